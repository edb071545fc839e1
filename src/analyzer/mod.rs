pub mod apm;
pub mod lifetimes;
pub mod metadata;
pub mod schema;
pub mod series;

use std::collections::BTreeMap;

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::parser::catalog_parser::{FactionCatalog, UnitCatalog};
use crate::parser::event_matcher::{match_lifetime_events, GroupedLifetimes};
use crate::parser::replay_parser::Replay;

use lifetimes::{normalize, resolve_duration, LifetimeInterval};
use metadata::{extract_metadata, Metadata};

/// One player's slice of the composition document. After schema completion
/// the key sets of `unit_counts` and `unit_supplies` equal the faction
/// catalog, whatever the player actually built.
#[derive(Debug, Default, Serialize)]
pub struct PlayerUnitData {
    pub unit_lifetimes: BTreeMap<String, Vec<LifetimeInterval>>,
    pub unit_counts: BTreeMap<String, Vec<u32>>,
    pub unit_supplies: BTreeMap<String, Vec<f64>>,
}

/// The serialized per-replay artifact. Write-once; every series inside has
/// length `duration`.
#[derive(Debug, Serialize)]
pub struct UnitCompositionDocument {
    pub players: Vec<PlayerUnitData>,
    pub duration: u32,
    pub metadata: Metadata,
}

/// Runs the whole aggregation for one replay: duration, lifetime matching,
/// per-player series, schema completion, metadata. Any failure drops the
/// document; nothing partial is ever returned.
pub fn assemble_composition_data(
    replay: &Replay,
    catalog: &UnitCatalog,
) -> Result<UnitCompositionDocument> {
    let metadata = extract_metadata(replay)?;
    let duration = resolve_duration(&replay.events)?;
    let grouped = match_lifetime_events(replay);

    let players = replay
        .players
        .iter()
        .zip(grouped)
        .map(|(player, player_lifetimes)| {
            let faction = catalog.faction(&player.faction)?;
            analyze_player(player_lifetimes, &player.faction, faction, duration)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(UnitCompositionDocument {
        players,
        duration,
        metadata,
    })
}

fn analyze_player(
    player_lifetimes: GroupedLifetimes,
    faction_name: &str,
    faction: &FactionCatalog,
    duration: u32,
) -> Result<PlayerUnitData> {
    let unit_lifetimes: BTreeMap<String, Vec<LifetimeInterval>> = player_lifetimes
        .into_iter()
        .map(|(unit_type, raw)| (unit_type, normalize(raw, duration)))
        .collect();

    // Unit types are independent of one another.
    let computed: Vec<(String, Vec<u32>, Vec<f64>)> = unit_lifetimes
        .par_iter()
        .map(|(unit_type, intervals)| {
            let cost = faction
                .supply_cost(unit_type)
                .ok_or_else(|| Error::UnknownUnitType {
                    faction: faction_name.to_owned(),
                    unit_type: unit_type.clone(),
                })?;
            let counts = series::lifetimes_to_counts(intervals, duration as usize);
            let supplies = series::counts_to_supply(&counts, cost);
            Ok((unit_type.clone(), counts.to_vec(), supplies.to_vec()))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut player = PlayerUnitData {
        unit_lifetimes,
        ..PlayerUnitData::default()
    };
    for (unit_type, counts, supplies) in computed {
        player.unit_counts.insert(unit_type.clone(), counts);
        player.unit_supplies.insert(unit_type, supplies);
    }
    schema::add_empties_for_missing_units(&mut player, faction, duration as usize);
    Ok(player)
}
