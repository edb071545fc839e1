use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::parser::replay_parser::{EventKind, Replay};

use super::lifetimes::resolve_duration;
use super::metadata::Metadata;

/// Window over which actions are counted, in ticks.
const APM_WINDOW: usize = 60;

/// Actions-per-minute visualization document. The aggregation core never
/// looks inside it; the batch driver merges metadata in and serializes it.
#[derive(Debug, Serialize)]
pub struct ApmDocument {
    pub p1: ApmPlayer,
    pub p2: ApmPlayer,
    pub game_length: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Default, Serialize)]
pub struct ApmPlayer {
    pub apms: BTreeMap<String, Vec<u32>>,
}

/// Per player and per command category, the count of that player's commands
/// inside the trailing one-minute window ending at each tick.
pub fn assemble_apm_data(replay: &Replay) -> Result<ApmDocument> {
    if replay.players.len() != 2 {
        return Err(Error::PlayerCount(replay.players.len()));
    }
    let duration = resolve_duration(&replay.events)? as usize;
    Ok(ApmDocument {
        p1: ApmPlayer {
            apms: player_apms(replay, replay.players[0].id, duration),
        },
        p2: ApmPlayer {
            apms: player_apms(replay, replay.players[1].id, duration),
        },
        game_length: duration as u32,
        metadata: None,
    })
}

fn player_apms(replay: &Replay, player_id: u32, duration: usize) -> BTreeMap<String, Vec<u32>> {
    let mut per_tick: BTreeMap<String, Vec<u32>> = BTreeMap::new();
    for event in &replay.events {
        let EventKind::Command { player, category } = &event.kind else {
            continue;
        };
        // Commands at the final second fall outside the half-open series.
        if *player != player_id || event.second as usize >= duration {
            continue;
        }
        per_tick
            .entry(category.clone())
            .or_insert_with(|| vec![0; duration])[event.second as usize] += 1;
    }

    per_tick
        .into_iter()
        .map(|(category, actions)| {
            let mut rolling = vec![0u32; duration];
            let mut window = 0u32;
            for tick in 0..duration {
                window += actions[tick];
                if tick >= APM_WINDOW {
                    window -= actions[tick - APM_WINDOW];
                }
                rolling[tick] = window;
            }
            (category, rolling)
        })
        .collect()
}
