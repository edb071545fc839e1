use crate::parser::catalog_parser::FactionCatalog;

use super::PlayerUnitData;

/// Zero-fills every catalog unit type the player never produced, so both
/// players serialize with the full reference key set. Existing entries are
/// never touched.
pub fn add_empties_for_missing_units(
    player: &mut PlayerUnitData,
    catalog: &FactionCatalog,
    duration: usize,
) {
    for unit_type in catalog.unit_types() {
        player
            .unit_lifetimes
            .entry(unit_type.to_owned())
            .or_default();
        player
            .unit_counts
            .entry(unit_type.to_owned())
            .or_insert_with(|| vec![0; duration]);
        player
            .unit_supplies
            .entry(unit_type.to_owned())
            .or_insert_with(|| vec![0.0; duration]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::catalog_parser::UnitCatalog;

    fn catalog() -> UnitCatalog {
        serde_yaml::from_str("custom:\n  Worker: 1.0\n  Knight: 2.5\n  Keep: 0.0\n").unwrap()
    }

    #[test]
    fn completes_every_map_to_the_catalog_key_set() {
        let catalog = catalog();
        let faction = catalog.faction("custom").unwrap();
        let mut player = PlayerUnitData::default();
        player.unit_counts.insert("Worker".into(), vec![1, 1]);
        player.unit_supplies.insert("Worker".into(), vec![1.0, 1.0]);

        add_empties_for_missing_units(&mut player, faction, 2);

        let keys: Vec<_> = faction.unit_types().collect();
        assert_eq!(player.unit_lifetimes.keys().collect::<Vec<_>>(), keys);
        assert_eq!(player.unit_counts.keys().collect::<Vec<_>>(), keys);
        assert_eq!(player.unit_supplies.keys().collect::<Vec<_>>(), keys);
        assert_eq!(player.unit_counts["Knight"], vec![0, 0]);
        assert_eq!(player.unit_supplies["Knight"], vec![0.0, 0.0]);
        assert!(player.unit_lifetimes["Keep"].is_empty());
    }

    #[test]
    fn never_overwrites_and_is_idempotent() {
        let catalog = catalog();
        let faction = catalog.faction("custom").unwrap();
        let mut player = PlayerUnitData::default();
        player.unit_counts.insert("Worker".into(), vec![4, 2]);

        add_empties_for_missing_units(&mut player, faction, 2);
        add_empties_for_missing_units(&mut player, faction, 2);

        assert_eq!(player.unit_counts["Worker"], vec![4, 2]);
        assert_eq!(player.unit_counts.len(), 3);
        assert_eq!(player.unit_supplies.len(), 3);
    }
}
