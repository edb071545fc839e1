use serde::Serialize;

use crate::error::{Error, Result};
use crate::parser::replay_parser::Replay;

#[derive(Debug, Clone, Serialize)]
pub struct Metadata {
    pub players: Vec<PlayerName>,
    pub winner: Winner,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerName {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Winner {
    pub name: String,
    pub id: u32,
}

/// Player names and winner identity. The pipeline only handles decided
/// two-player matches; anything else is a malformed replay.
pub fn extract_metadata(replay: &Replay) -> Result<Metadata> {
    if replay.players.len() != 2 {
        return Err(Error::PlayerCount(replay.players.len()));
    }
    let winner_id = replay.winner.ok_or(Error::MissingWinner)?;
    let winner = replay
        .players
        .iter()
        .find(|player| player.id == winner_id)
        .ok_or(Error::UnknownWinner(winner_id))?;
    Ok(Metadata {
        players: replay
            .players
            .iter()
            .map(|player| PlayerName {
                name: player.name.clone(),
            })
            .collect(),
        winner: Winner {
            name: winner.name.clone(),
            id: winner_id,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::replay_parser::ReplayPlayer;

    fn player(id: u32, name: &str) -> ReplayPlayer {
        ReplayPlayer {
            id,
            name: name.into(),
            faction: "terran".into(),
        }
    }

    fn replay(players: Vec<ReplayPlayer>, winner: Option<u32>) -> Replay {
        Replay {
            players,
            winner,
            events: vec![],
        }
    }

    #[test]
    fn extracts_names_and_winner() {
        let replay = replay(vec![player(1, "Maru"), player(2, "Serral")], Some(2));
        let metadata = extract_metadata(&replay).unwrap();
        assert_eq!(metadata.players[0].name, "Maru");
        assert_eq!(metadata.players[1].name, "Serral");
        assert_eq!(metadata.winner.name, "Serral");
        assert_eq!(metadata.winner.id, 2);
    }

    #[test]
    fn rejects_non_two_player_matches() {
        let one = replay(vec![player(1, "Maru")], Some(1));
        assert!(matches!(extract_metadata(&one), Err(Error::PlayerCount(1))));
    }

    #[test]
    fn rejects_undecided_matches() {
        let undecided = replay(vec![player(1, "Maru"), player(2, "Serral")], None);
        assert!(matches!(
            extract_metadata(&undecided),
            Err(Error::MissingWinner)
        ));
    }

    #[test]
    fn rejects_unknown_winner_ids() {
        let bad = replay(vec![player(1, "Maru"), player(2, "Serral")], Some(9));
        assert!(matches!(
            extract_metadata(&bad),
            Err(Error::UnknownWinner(9))
        ));
    }
}
