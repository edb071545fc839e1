use std::{fs::File, io::BufReader, path::Path};

use serde::Deserialize;

use crate::error::Result;

/// A match decoded to its structured form. Binary replay decoding happens
/// upstream; this crate only consumes the JSON export.
#[derive(Debug, Deserialize)]
pub struct Replay {
    pub players: Vec<ReplayPlayer>,

    /// Id of the winning player, absent for undecided matches.
    #[serde(default)]
    pub winner: Option<u32>,

    /// Timeline ordered by `second`.
    pub events: Vec<ReplayEvent>,
}

#[derive(Debug, Deserialize)]
pub struct ReplayPlayer {
    pub id: u32,
    pub name: String,
    pub faction: String,
}

#[derive(Debug, Deserialize)]
pub struct ReplayEvent {
    pub second: u32,

    #[serde(flatten)]
    pub kind: EventKind,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    UnitBorn {
        tag: u64,
        unit_type: String,
        player: u32,
    },
    UnitDied {
        tag: u64,
    },
    Command {
        player: u32,
        category: String,
    },
}

impl Replay {
    pub fn from_file(path: &Path) -> Result<Replay> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let replay = serde_json::from_reader(reader)?;
        Ok(replay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_tagged_events() {
        let raw = r#"{
            "players": [
                { "id": 1, "name": "Neeb", "faction": "protoss" },
                { "id": 2, "name": "ShoWTimE", "faction": "protoss" }
            ],
            "winner": 1,
            "events": [
                { "second": 0, "type": "unit_born", "tag": 7, "unit_type": "Probe", "player": 1 },
                { "second": 3, "type": "command", "player": 2, "category": "ability" },
                { "second": 9, "type": "unit_died", "tag": 7 }
            ]
        }"#;
        let replay: Replay = serde_json::from_str(raw).unwrap();
        assert_eq!(replay.players.len(), 2);
        assert_eq!(replay.winner, Some(1));
        assert_eq!(replay.events.len(), 3);
        match &replay.events[0].kind {
            EventKind::UnitBorn {
                tag,
                unit_type,
                player,
            } => {
                assert_eq!(*tag, 7);
                assert_eq!(unit_type, "Probe");
                assert_eq!(*player, 1);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn winner_defaults_to_none() {
        let raw = r#"{
            "players": [],
            "events": []
        }"#;
        let replay: Replay = serde_json::from_str(raw).unwrap();
        assert!(replay.winner.is_none());
    }
}
