use std::{
    collections::BTreeMap,
    fs::File,
    io::BufReader,
    path::Path,
    sync::LazyLock,
};

use serde::Deserialize;

use crate::error::{Error, Result};

static BUILTIN: LazyLock<UnitCatalog> = LazyLock::new(|| {
    serde_yaml::from_str(include_str!("builtin_catalog.yaml")).expect("builtin catalog parses")
});

/// Supply cost per unit type for one faction. The key set doubles as the
/// reference catalog of valid unit types.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct FactionCatalog {
    units: BTreeMap<String, f64>,
}

impl FactionCatalog {
    pub fn unit_types(&self) -> impl Iterator<Item = &str> {
        self.units.keys().map(String::as_str)
    }

    pub fn supply_cost(&self, unit_type: &str) -> Option<f64> {
        self.units.get(unit_type).copied()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// Faction name to unit table. Always passed into the analyzer explicitly;
/// the builtin tables are only a default, not ambient state.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct UnitCatalog {
    factions: BTreeMap<String, FactionCatalog>,
}

impl UnitCatalog {
    pub fn builtin() -> UnitCatalog {
        BUILTIN.clone()
    }

    pub fn from_file(path: &Path) -> Result<UnitCatalog> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let catalog = serde_yaml::from_reader(reader)?;
        Ok(catalog)
    }

    pub fn faction(&self, name: &str) -> Result<&FactionCatalog> {
        self.factions
            .get(name)
            .ok_or_else(|| Error::UnknownFaction(name.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_the_three_factions() {
        let catalog = UnitCatalog::builtin();
        for faction in ["protoss", "terran", "zerg"] {
            assert!(!catalog.faction(faction).unwrap().is_empty());
        }
    }

    #[test]
    fn supply_costs_resolve() {
        let catalog = UnitCatalog::builtin();
        let zerg = catalog.faction("zerg").unwrap();
        assert_eq!(zerg.supply_cost("Zergling"), Some(0.5));
        assert_eq!(zerg.supply_cost("Hatchery"), Some(0.0));
        assert_eq!(zerg.supply_cost("Dragoon"), None);
    }

    #[test]
    fn unknown_faction_is_an_error() {
        let catalog = UnitCatalog::builtin();
        assert!(matches!(
            catalog.faction("xelnaga"),
            Err(Error::UnknownFaction(_))
        ));
    }

    #[test]
    fn parses_an_override_table() {
        let catalog: UnitCatalog = serde_yaml::from_str(
            "custom:\n  Worker: 1.0\n  Knight: 2.5\n",
        )
        .unwrap();
        let custom = catalog.faction("custom").unwrap();
        assert_eq!(custom.len(), 2);
        assert_eq!(custom.supply_cost("Knight"), Some(2.5));
    }
}
