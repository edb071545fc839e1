use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON document error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unit catalog is not valid Yaml: {0}")]
    CatalogDecode(#[from] serde_yaml::Error),

    #[error("replay has an empty event timeline")]
    EmptyTimeline,

    #[error("expected a two-player match, found {0} players")]
    PlayerCount(usize),

    #[error("replay declares no winner")]
    MissingWinner,

    #[error("winner id {0} matches no player")]
    UnknownWinner(u32),

    #[error("faction {0:?} is not in the unit catalog")]
    UnknownFaction(String),

    #[error("unit type {unit_type:?} has no supply entry in the {faction} catalog")]
    UnknownUnitType { faction: String, unit_type: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for faults confined to a single replay. The batch driver skips
    /// those and keeps going; anything else aborts the run.
    pub fn is_replay_fault(&self) -> bool {
        !matches!(self, Error::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
