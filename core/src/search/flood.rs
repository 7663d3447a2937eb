//! Contiguous regions of matching terrain.

use std::collections::BTreeSet;
use std::collections::VecDeque;

use crate::board::BoardOracle;
use crate::grid::HexLocation;
use crate::terrain::TerrainCode;

/// Beginning at `start`, perform a breadth-first search across the board
/// collecting every on-board hex connected to `start` through hexes whose
/// terrain matches the terrain of `start`, as decided by `same`.
///
/// The region always contains `start`.
pub fn flood_region<B: BoardOracle>(
    start: HexLocation,
    board: &B,
    same: impl Fn(TerrainCode, TerrainCode) -> bool,
) -> BTreeSet<HexLocation> {
    flood(start, board, |l| board.on_board(l), same)
}

/// Like [`flood_region`], but the region may extend into the border of
/// the board.
///
/// [`flood_region`]: fn.flood_region.html
pub fn flood_region_with_border<B: BoardOracle>(
    start: HexLocation,
    board: &B,
    same: impl Fn(TerrainCode, TerrainCode) -> bool,
) -> BTreeSet<HexLocation> {
    flood(start, board, |l| board.on_board_with_border(l), same)
}

fn flood<B: BoardOracle>(
    start: HexLocation,
    board: &B,
    within: impl Fn(HexLocation) -> bool,
    same: impl Fn(TerrainCode, TerrainCode) -> bool,
) -> BTreeSet<HexLocation> {
    let terrain = board.terrain_at(start);
    let mut region = BTreeSet::new();
    let mut front  = VecDeque::new();
    region.insert(start);
    front.push_back(start);
    while let Some(c) = front.pop_front() {
        for n in c.adjacent().iter().cloned() {
            if !region.contains(&n) && within(n) && same(terrain, board.terrain_at(n)) {
                region.insert(n);
                front.push_back(n);
            }
        }
    }
    region
}
