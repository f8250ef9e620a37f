//! Unit catalog.
//!
//! Every unit is a `UnitKind` value; its move range, cost, level and income
//! come from a compile-time table indexed by the enum discriminant.

use serde::{Deserialize, Serialize};

/// Highest soldier level. An attacker at this level ignores defenders.
pub const MAX_LEVEL: u8 = 4;

/// The number of unit kinds in the catalog.
pub const UNIT_KIND_COUNT: usize = 11;

/// A unit kind. `#[repr(u8)]` lets it index `UNIT_STATS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum UnitKind {
    Castle = 0,
    Farm = 1,
    Grave = 2,
    Pine = 3,
    Palm = 4,
    Soldier1 = 5,
    Soldier2 = 6,
    Soldier3 = 7,
    Soldier4 = 8,
    Tower2 = 9,
    Tower3 = 10,
}

/// All unit kinds in index order.
pub const ALL_UNIT_KINDS: [UnitKind; UNIT_KIND_COUNT] = [
    UnitKind::Castle,
    UnitKind::Farm,
    UnitKind::Grave,
    UnitKind::Pine,
    UnitKind::Palm,
    UnitKind::Soldier1,
    UnitKind::Soldier2,
    UnitKind::Soldier3,
    UnitKind::Soldier4,
    UnitKind::Tower2,
    UnitKind::Tower3,
];

/// Broad unit family, used by the placement table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitClass {
    Soldier,
    Tower,
    Farm,
    Tree,
    Grave,
    Castle,
}

/// Static stats for one unit kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitStats {
    pub name: &'static str,
    pub class: UnitClass,
    pub move_range: u32,
    pub cost: i64,
    pub level: u8,
    pub income: i64,
}

const fn stats(
    name: &'static str,
    class: UnitClass,
    move_range: u32,
    cost: i64,
    level: u8,
    income: i64,
) -> UnitStats {
    UnitStats { name, class, move_range, cost, level, income }
}

/// Stats for every unit kind, indexed by `UnitKind as usize`.
pub const UNIT_STATS: [UnitStats; UNIT_KIND_COUNT] = [
    stats("castle", UnitClass::Castle, 0, 0, 1, 0),
    stats("farm", UnitClass::Farm, 0, 10, 0, 4),
    stats("grave", UnitClass::Grave, 0, 0, 0, 0),
    stats("pine", UnitClass::Tree, 0, 0, 0, -1),
    stats("palm", UnitClass::Tree, 0, 0, 0, -1),
    stats("soldier1", UnitClass::Soldier, 4, 10, 1, -1),
    stats("soldier2", UnitClass::Soldier, 4, 20, 2, -6),
    stats("soldier3", UnitClass::Soldier, 4, 30, 3, -18),
    stats("soldier4", UnitClass::Soldier, 4, 40, 4, -36),
    stats("tower2", UnitClass::Tower, 0, 15, 2, -1),
    stats("tower3", UnitClass::Tower, 0, 35, 3, -6),
];

impl UnitKind {
    pub const fn stats(self) -> UnitStats {
        UNIT_STATS[self as usize]
    }

    pub const fn name(self) -> &'static str {
        self.stats().name
    }

    pub const fn class(self) -> UnitClass {
        self.stats().class
    }

    pub const fn move_range(self) -> u32 {
        self.stats().move_range
    }

    /// Catalog cost. Farms may cost more under a scaling policy; see
    /// `crate::config::FarmCost`.
    pub const fn cost(self) -> i64 {
        self.stats().cost
    }

    pub const fn level(self) -> u8 {
        self.stats().level
    }

    /// Per-turn income contribution to the province the unit stands in.
    pub const fn income(self) -> i64 {
        self.stats().income
    }

    pub fn is_soldier(self) -> bool {
        self.class() == UnitClass::Soldier
    }

    pub fn is_tower(self) -> bool {
        self.class() == UnitClass::Tower
    }

    pub fn is_tree(self) -> bool {
        self.class() == UnitClass::Tree
    }

    /// Soldiers, towers and farms can be bought; terrain and castles cannot.
    pub fn is_purchasable(self) -> bool {
        matches!(
            self.class(),
            UnitClass::Soldier | UnitClass::Tower | UnitClass::Farm
        )
    }

    /// Returns the soldier kind of the given level, if one exists.
    pub fn soldier(level: u8) -> Option<UnitKind> {
        match level {
            1 => Some(UnitKind::Soldier1),
            2 => Some(UnitKind::Soldier2),
            3 => Some(UnitKind::Soldier3),
            4 => Some(UnitKind::Soldier4),
            _ => None,
        }
    }

    /// Parses a unit kind from its catalog name.
    pub fn from_name(name: &str) -> Option<UnitKind> {
        ALL_UNIT_KINDS.iter().copied().find(|k| k.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_discriminant() {
        for (i, kind) in ALL_UNIT_KINDS.iter().enumerate() {
            assert_eq!(*kind as usize, i);
            assert_eq!(UnitKind::from_name(kind.name()), Some(*kind));
        }
        assert_eq!(UnitKind::from_name("dragon"), None);
    }

    #[test]
    fn only_soldiers_move() {
        for kind in ALL_UNIT_KINDS {
            assert_eq!(kind.move_range() > 0, kind.is_soldier(), "{:?}", kind);
        }
    }

    #[test]
    fn soldier_levels_round_trip() {
        for level in 1..=MAX_LEVEL {
            let kind = UnitKind::soldier(level).unwrap();
            assert_eq!(kind.level(), level);
        }
        assert_eq!(UnitKind::soldier(0), None);
        assert_eq!(UnitKind::soldier(MAX_LEVEL + 1), None);
    }

    #[test]
    fn purchasable_kinds() {
        assert!(UnitKind::Soldier1.is_purchasable());
        assert!(UnitKind::Tower3.is_purchasable());
        assert!(UnitKind::Farm.is_purchasable());
        assert!(!UnitKind::Pine.is_purchasable());
        assert!(!UnitKind::Grave.is_purchasable());
        assert!(!UnitKind::Castle.is_purchasable());
    }

    #[test]
    fn upkeep_grows_with_level() {
        assert!(UnitKind::Soldier4.income() < UnitKind::Soldier3.income());
        assert!(UnitKind::Soldier3.income() < UnitKind::Soldier2.income());
        assert!(UnitKind::Tower3.income() < UnitKind::Tower2.income());
        assert_eq!(UnitKind::Farm.income(), 4);
    }
}
