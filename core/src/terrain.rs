//! Terrain codes and per-unit terrain cost tables.

use std::collections::HashMap;
use std::fmt;

/// Movement costs at or above this value make a terrain impassable.
pub const UNREACHABLE: u32 = 99;

/// A terrain code of up to four ASCII characters, e.g. `Gg` for
/// grassland or `Mm` for mountains, packed into an integer.
#[derive(PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainCode(u32);

impl TerrainCode {
    /// No terrain. Used e.g. to request copying of edge terrain when
    /// a map is expanded.
    pub const NONE: TerrainCode = TerrainCode(0);

    pub const GRASSLAND: TerrainCode = TerrainCode::from_bytes(b"Gg");
    pub const FOREST: TerrainCode = TerrainCode::from_bytes(b"Ff");
    pub const HILLS: TerrainCode = TerrainCode::from_bytes(b"Hh");
    pub const MOUNTAINS: TerrainCode = TerrainCode::from_bytes(b"Mm");
    pub const SHALLOW_WATER: TerrainCode = TerrainCode::from_bytes(b"Ww");
    pub const VILLAGE: TerrainCode = TerrainCode::from_bytes(b"Vh");
    pub const CASTLE: TerrainCode = TerrainCode::from_bytes(b"Ch");
    pub const KEEP: TerrainCode = TerrainCode::from_bytes(b"Kh");
    pub const IMPASSABLE: TerrainCode = TerrainCode::from_bytes(b"Xu");

    /// Pack up to four bytes into a terrain code. Excess bytes
    /// are ignored.
    pub const fn from_bytes(b: &[u8]) -> TerrainCode {
        let mut code = 0u32;
        let mut i = 0;
        while i < b.len() && i < 4 {
            code |= (b[i] as u32) << (24 - 8 * i);
            i += 1;
        }
        TerrainCode(code)
    }

    /// Parse a terrain code. Returns `None` if the code is empty,
    /// longer than four characters or not printable ASCII.
    pub fn parse(s: &str) -> Option<TerrainCode> {
        let b = s.as_bytes();
        if b.is_empty() || b.len() > 4 || !b.iter().all(|c| c.is_ascii_graphic()) {
            return None
        }
        Some(TerrainCode::from_bytes(b))
    }

    pub fn is_none(&self) -> bool {
        *self == TerrainCode::NONE
    }

    /// Keeps count as castle.
    pub fn is_castle(&self) -> bool {
        *self == TerrainCode::CASTLE || *self == TerrainCode::KEEP
    }
}

impl fmt::Display for TerrainCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return write!(f, "_none")
        }
        for b in self.0.to_be_bytes().iter().filter(|b| **b != 0) {
            write!(f, "{}", *b as char)?;
        }
        Ok(())
    }
}

impl fmt::Debug for TerrainCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TerrainCode({})", self)
    }
}

/// A movement type: how costly it is for the units sharing it to enter
/// each terrain, and how likely they are to be hit standing on it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovementType {
    name: String,
    costs: HashMap<TerrainCode, u32>,
    defense: HashMap<TerrainCode, u8>,
    default_cost: u32,
    default_defense: u8,
}

impl MovementType {
    /// A movement type for which unlisted terrain is impassable
    /// and offers no defense.
    pub fn new(name: impl Into<String>) -> MovementType {
        MovementType {
            name: name.into(),
            costs: HashMap::new(),
            defense: HashMap::new(),
            default_cost: UNREACHABLE,
            default_defense: 100,
        }
    }

    /// A movement type that pays `cost` for any terrain.
    pub fn uniform(name: impl Into<String>, cost: u32) -> MovementType {
        MovementType { default_cost: cost.max(1), ..MovementType::new(name) }
    }

    /// Set the cost of entering terrain `t`. Costs below one are
    /// raised to one.
    pub fn with_cost(mut self, t: TerrainCode, cost: u32) -> MovementType {
        self.costs.insert(t, cost.max(1));
        self
    }

    /// Set the chance (in percent) to be hit on the given terrain.
    pub fn with_defense(mut self, t: TerrainCode, chance_to_hit: u8) -> MovementType {
        self.defense.insert(t, chance_to_hit.min(100));
        self
    }

    pub fn with_default_defense(mut self, chance_to_hit: u8) -> MovementType {
        self.default_defense = chance_to_hit.min(100);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The cost of entering a hex of the given terrain, or `None`
    /// if the terrain is impassable.
    pub fn cost(&self, t: TerrainCode) -> Option<u32> {
        let c = self.costs.get(&t).cloned().unwrap_or(self.default_cost);
        if c >= UNREACHABLE { None } else { Some(c) }
    }

    /// The chance (in percent) to be hit on the given terrain.
    pub fn defense(&self, t: TerrainCode) -> u8 {
        self.defense.get(&t).cloned().unwrap_or(self.default_defense)
    }
}
