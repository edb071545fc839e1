use std::collections::BTreeMap;

use itertools::Itertools;

use super::replay_parser::{EventKind, Replay};

/// When a unit instance stopped existing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Death {
    At(u32),
    /// No death was recorded before the timeline ended.
    EndOfGame,
}

/// One unit instance's presence window as matched from the event stream.
/// `died` still carries the censored marker; the analyzer resolves it
/// against the match duration before any counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLifetime {
    pub born: u32,
    pub died: Death,
}

pub type GroupedLifetimes = BTreeMap<String, Vec<RawLifetime>>;

/// Pairs `unit_born`/`unit_died` events by unit tag and groups the resulting
/// lifetimes per player (in `replay.players` order) and per unit type.
///
/// Deaths without an open birth are dropped, as are units belonging to ids
/// outside `replay.players` (neutral or observer units). A unit whose tag is
/// never closed gets `Death::EndOfGame`.
pub fn match_lifetime_events(replay: &Replay) -> Vec<GroupedLifetimes> {
    // BTreeMap keeps the leftover (still alive) units in tag order so the
    // serialized lifetime lists are reproducible.
    let mut open: BTreeMap<u64, (u32, &str, u32)> = BTreeMap::new();
    let mut matched: Vec<(u32, (String, RawLifetime))> = Vec::new();

    for event in &replay.events {
        match &event.kind {
            EventKind::UnitBorn {
                tag,
                unit_type,
                player,
            } => {
                open.insert(*tag, (*player, unit_type.as_str(), event.second));
            }
            EventKind::UnitDied { tag } => {
                if let Some((player, unit_type, born)) = open.remove(tag) {
                    matched.push((
                        player,
                        (
                            unit_type.to_owned(),
                            RawLifetime {
                                born,
                                died: Death::At(event.second),
                            },
                        ),
                    ));
                }
            }
            EventKind::Command { .. } => {}
        }
    }

    for (player, unit_type, born) in open.into_values() {
        matched.push((
            player,
            (
                unit_type.to_owned(),
                RawLifetime {
                    born,
                    died: Death::EndOfGame,
                },
            ),
        ));
    }

    let mut by_player = matched.into_iter().into_group_map();
    replay
        .players
        .iter()
        .map(|p| {
            by_player
                .remove(&p.id)
                .unwrap_or_default()
                .into_iter()
                .into_group_map()
                .into_iter()
                .collect()
        })
        .collect()
}
