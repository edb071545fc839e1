use serde::Serialize;

use crate::error::{Error, Result};
use crate::parser::event_matcher::{Death, RawLifetime};
use crate::parser::replay_parser::ReplayEvent;

/// Number of one-second ticks in the match, taken from the last event.
pub fn resolve_duration(events: &[ReplayEvent]) -> Result<u32> {
    events
        .last()
        .map(|event| event.second)
        .ok_or(Error::EmptyTimeline)
}

/// Half-open presence window `[born, died)` with the censored marker already
/// resolved. Only this form reaches the series converters and the output
/// document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LifetimeInterval {
    pub born: u32,
    pub died: u32,
}

/// Resolves censored lifetimes against the match duration: a unit with no
/// recorded death counts as alive through the final tick.
pub fn normalize(raw: Vec<RawLifetime>, duration: u32) -> Vec<LifetimeInterval> {
    raw.into_iter()
        .map(|lifetime| LifetimeInterval {
            born: lifetime.born,
            died: match lifetime.died {
                Death::At(second) => second,
                Death::EndOfGame => duration,
            },
        })
        .collect()
}
