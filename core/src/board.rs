//! The board as seen by path finding and flood fills.

use crate::grid::HexLocation;
use crate::movement::MovementProfile;
use crate::terrain::TerrainCode;

/// Read-only access to a board: its bounds and terrain, and the
/// terrain costs of a unit moving on it.
pub trait BoardOracle {
    /// Whether the location is on the playable area of the board.
    fn on_board(&self, loc: HexLocation) -> bool;

    /// Whether the location is on the board or its border.
    fn on_board_with_border(&self, loc: HexLocation) -> bool;

    /// The terrain at the given location. Locations off the board
    /// and its border have no terrain.
    fn terrain_at(&self, loc: HexLocation) -> TerrainCode;

    /// The cost for a unit with the given profile to enter terrain `t`,
    /// or `None` if the terrain is impassable for it.
    fn movement_cost(&self, profile: &MovementProfile<'_>, t: TerrainCode) -> Option<u32> {
        profile.movement_type.cost(t)
    }

    /// The chance (in percent) for a unit with the given profile
    /// to be hit on terrain `t`.
    fn defense_modifier(&self, profile: &MovementProfile<'_>, t: TerrainCode) -> u8 {
        profile.movement_type.defense(t)
    }

    /// The locations between which teleporting units may jump.
    fn teleport_network(&self) -> Vec<HexLocation> {
        Vec::new()
    }

    /// Whether units can be recruited onto the location.
    fn is_castle(&self, loc: HexLocation) -> bool {
        self.terrain_at(loc).is_castle()
    }
}

impl<'a, B: BoardOracle + ?Sized> BoardOracle for &'a B {
    fn on_board(&self, loc: HexLocation) -> bool {
        (**self).on_board(loc)
    }
    fn on_board_with_border(&self, loc: HexLocation) -> bool {
        (**self).on_board_with_border(loc)
    }
    fn terrain_at(&self, loc: HexLocation) -> TerrainCode {
        (**self).terrain_at(loc)
    }
    fn movement_cost(&self, profile: &MovementProfile<'_>, t: TerrainCode) -> Option<u32> {
        (**self).movement_cost(profile, t)
    }
    fn defense_modifier(&self, profile: &MovementProfile<'_>, t: TerrainCode) -> u8 {
        (**self).defense_modifier(profile, t)
    }
    fn teleport_network(&self) -> Vec<HexLocation> {
        (**self).teleport_network()
    }
    fn is_castle(&self, loc: HexLocation) -> bool {
        (**self).is_castle(loc)
    }
}
