//! Maps: terrain, starting positions, units and the selection.
//!
//! A map of `width` x `height` playable hexes is surrounded by a border
//! ring of `border_size` hexes. The border has terrain but is not part
//! of the board units move on.

pub mod fragment;

pub use fragment::MapFragment;

use std::collections::BTreeSet;

use tracing::debug;

use crate::board::BoardOracle;
use crate::config::Config;
use crate::error::ActionError;
use crate::grid::HexLocation;
use crate::grid::shape;
use crate::movement::{ Unit, UnitMap };
use crate::search::flood;
use crate::terrain::TerrainCode;

/// The maximum number of players, i.e. of starting positions.
pub const MAX_PLAYERS: usize = 9;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Map {
    width: i32,
    height: i32,
    border: i32,
    /// Columns of terrain, including the border.
    tiles: Vec<Vec<TerrainCode>>,
    starting_positions: [Option<HexLocation>; MAX_PLAYERS],
    selection: BTreeSet<HexLocation>,
    units: UnitMap,
}

impl Map {
    /// A map filled with a single terrain, border included.
    pub fn new(width: i32, height: i32, fill: TerrainCode, config: &Config) -> Map {
        let (width, height) = (width.max(0), height.max(0));
        let border = config.border_size.max(0);
        let column = vec![fill; (height + 2 * border) as usize];
        Map {
            width,
            height,
            border,
            tiles: vec![column; (width + 2 * border) as usize],
            starting_positions: [None; MAX_PLAYERS],
            selection: BTreeSet::new(),
            units: UnitMap::new(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn border_size(&self) -> i32 {
        self.border
    }

    /// The width including the border.
    pub fn total_width(&self) -> i32 {
        self.width + 2 * self.border
    }

    /// The height including the border.
    pub fn total_height(&self) -> i32 {
        self.height + 2 * self.border
    }

    fn index(&self, loc: HexLocation) -> Option<(usize, usize)> {
        if self.on_board_with_border(loc) {
            Some(((loc.x + self.border) as usize, (loc.y + self.border) as usize))
        } else {
            None
        }
    }

    /// The terrain at `loc`, or [`TerrainCode::NONE`] off the map.
    ///
    /// [`TerrainCode::NONE`]: ../terrain/struct.TerrainCode.html#associatedconstant.NONE
    pub fn terrain(&self, loc: HexLocation) -> TerrainCode {
        self.index(loc).map_or(TerrainCode::NONE, |(x, y)| self.tiles[x][y])
    }

    /// Set the terrain at `loc`, returning whether `loc` is on the map.
    pub fn set_terrain(&mut self, loc: HexLocation, t: TerrainCode) -> bool {
        match self.index(loc) {
            Some((x, y)) => {
                self.tiles[x][y] = t;
                true
            }
            None => false
        }
    }

    /// The playable locations, column by column.
    pub fn locations(&self) -> impl Iterator<Item=HexLocation> {
        shape::rect(0, 0, self.width, self.height)
    }

    /// All locations of the map including the border, column by column.
    pub fn locations_with_border(&self) -> impl Iterator<Item=HexLocation> {
        let b = self.border;
        shape::rect(-b, -b, self.total_width(), self.total_height())
    }

    pub fn villages(&self) -> Vec<HexLocation> {
        self.locations().filter(|l| self.terrain(*l) == TerrainCode::VILLAGE).collect()
    }

    /// The hexes of the same terrain as `start` connected to it,
    /// border included.
    pub fn contiguous_terrain_tiles(&self, start: HexLocation) -> BTreeSet<HexLocation> {
        flood::flood_region_with_border(start, self, |a, b| a == b)
    }

    // Starting positions

    /// The starting position of a player, numbered from 1.
    pub fn starting_position(&self, player: usize) -> Option<HexLocation> {
        player.checked_sub(1)
            .and_then(|i| self.starting_positions.get(i))
            .and_then(|p| *p)
    }

    /// Set or clear the starting position of a player, returning the
    /// previous one. Players outside `1 ..= MAX_PLAYERS` are ignored.
    pub fn set_starting_position(&mut self, player: usize, loc: Option<HexLocation>)
        -> Option<HexLocation>
    {
        match player.checked_sub(1).and_then(|i| self.starting_positions.get_mut(i)) {
            Some(slot) => std::mem::replace(slot, loc),
            None => None
        }
    }

    /// The player starting at `loc`, if any.
    pub fn is_starting_position(&self, loc: HexLocation) -> Option<usize> {
        self.starting_positions.iter()
            .position(|p| *p == Some(loc))
            .map(|i| i + 1)
    }

    /// The players with a starting position, with their positions.
    pub fn starting_positions(&self) -> impl Iterator<Item=(usize, HexLocation)> + '_ {
        self.starting_positions.iter().enumerate()
            .filter_map(|(i, p)| p.map(|loc| (i + 1, loc)))
    }

    // Units

    pub fn units(&self) -> &UnitMap {
        &self.units
    }

    pub fn unit_at(&self, loc: HexLocation) -> Option<&Unit> {
        self.units.get(&loc)
    }

    /// Place a unit, returning the unit it replaces.
    pub fn place_unit(&mut self, loc: HexLocation, unit: Unit) -> Option<Unit> {
        self.units.insert(loc, unit)
    }

    pub fn remove_unit(&mut self, loc: HexLocation) -> Option<Unit> {
        self.units.remove(&loc)
    }

    // Selection

    pub fn selection(&self) -> &BTreeSet<HexLocation> {
        &self.selection
    }

    pub fn in_selection(&self, loc: HexLocation) -> bool {
        self.selection.contains(&loc)
    }

    /// Select `loc`, returning whether it was newly selected.
    /// Locations off the map cannot be selected.
    pub fn add_to_selection(&mut self, loc: HexLocation) -> bool {
        self.on_board_with_border(loc) && self.selection.insert(loc)
    }

    /// Deselect `loc`, returning whether it was selected.
    pub fn remove_from_selection(&mut self, loc: HexLocation) -> bool {
        self.selection.remove(&loc)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Select exactly the unselected locations of the map, border included.
    pub fn invert_selection(&mut self) {
        let selection = self.locations_with_border()
            .filter(|l| !self.selection.contains(l))
            .collect();
        self.selection = selection;
    }

    pub fn select_all(&mut self) {
        self.selection = self.locations_with_border().collect();
    }

    pub fn everything_selected(&self) -> bool {
        self.selection.len() == (self.total_width() * self.total_height()) as usize
    }

    // Map operations

    /// Resize the map to `width` x `height`. The hex at `(x, y)` on the
    /// resized map is the hex at `(x + x_offset, y + y_offset)` on the
    /// current map, i.e. a negative offset grows the map on the left or top
    /// and a positive offset shrinks it there. New hexes are filled with
    /// `fill`, or with a copy of the nearest edge if `fill` is `None`.
    ///
    /// Starting positions, units and the selection move along, and are
    /// dropped when they fall off the map.
    pub fn resize(
        &mut self,
        width: i32,
        height: i32,
        x_offset: i32,
        y_offset: i32,
        fill: Option<TerrainCode>,
    ) -> Result<(), ActionError> {
        if width <= 0 {
            return Err(ActionError::OperationOutOfRange {
                operation: "resize width", amount: width, size: self.width
            })
        }
        if height <= 0 {
            return Err(ActionError::OperationOutOfRange {
                operation: "resize height", amount: height, size: self.height
            })
        }
        if width == self.width && height == self.height && x_offset == 0 && y_offset == 0 {
            return Ok(())
        }
        let (tw, th) = (self.total_width(), self.total_height());
        let shrinks = [
            ("shrink right", -(width - self.width + x_offset), tw),
            ("shrink bottom", -(height - self.height + y_offset), th),
            ("shrink left", x_offset, tw),
            ("shrink top", y_offset, th),
        ];
        for &(operation, amount, size) in shrinks.iter() {
            if amount > size {
                return Err(ActionError::OperationOutOfRange { operation, amount, size })
            }
        }

        let b = self.border;
        let (old_w, old_h) = (self.width, self.height);
        let tiles = (-b .. width + b).map(|x| {
            (-b .. height + b).map(|y| {
                let old = HexLocation::new(x + x_offset, y + y_offset);
                if self.on_board_with_border(old) {
                    self.terrain(old)
                } else {
                    let edge = HexLocation::new(
                        old.x.max(-b).min(old_w + b - 1),
                        old.y.max(-b).min(old_h + b - 1));
                    fill.unwrap_or_else(|| self.terrain(edge))
                }
            }).collect()
        }).collect();

        self.tiles = tiles;
        self.width = width;
        self.height = height;
        self.relocate(|l| HexLocation::new(l.x - x_offset, l.y - y_offset));
        debug!(old_w, old_h, width, height, x_offset, y_offset, "map resized");
        Ok(())
    }

    /// Mirror the map top to bottom.
    ///
    /// Odd columns are shifted down, so they are mirrored around a row
    /// half a hex higher than the even columns. The last hex of an odd
    /// column, border included, stays in place.
    pub fn flip_x(&mut self) {
        let b = self.border;
        for (i, column) in self.tiles.iter_mut().enumerate() {
            let x = i as i32 - b;
            if x & 1 == 0 {
                column.reverse();
            } else {
                let n = column.len().saturating_sub(1);
                column[.. n].reverse();
            }
        }
        let (h, last) = (self.height, self.height + b - 1);
        self.relocate(|l| {
            if l.x & 1 == 1 && l.y == last {
                l
            } else {
                HexLocation::new(l.x, h - 1 - l.y - (l.x & 1))
            }
        });
        debug!("map flipped top to bottom");
    }

    /// Mirror the map left to right.
    ///
    /// On maps of even width this swaps even and odd columns, which
    /// changes the shape of the hex grid near the mirror axis.
    pub fn flip_y(&mut self) {
        self.tiles.reverse();
        let w = self.width;
        self.relocate(|l| HexLocation::new(w - 1 - l.x, l.y));
        debug!("map flipped left to right");
    }

    /// Move starting positions, units and the selection to their new
    /// locations after a change of the map geometry.
    fn relocate(&mut self, f: impl Fn(HexLocation) -> HexLocation) {
        let (w, h, b) = (self.width, self.height, self.border);
        let on_board = |l: HexLocation| l.is_valid_in(w, h);
        let with_border = |l: HexLocation| l.x >= -b && l.y >= -b && l.x < w + b && l.y < h + b;
        for p in self.starting_positions.iter_mut() {
            *p = p.map(&f).filter(|l| on_board(*l));
        }
        let units = std::mem::replace(&mut self.units, UnitMap::new());
        self.units = units.into_iter()
            .map(|(l, u)| (f(l), u))
            .filter(|(l, _)| on_board(*l))
            .collect();
        let selection = std::mem::replace(&mut self.selection, BTreeSet::new());
        self.selection = selection.into_iter()
            .map(&f)
            .filter(|l| with_border(*l))
            .collect();
    }
}

impl BoardOracle for Map {
    fn on_board(&self, loc: HexLocation) -> bool {
        loc.is_valid_in(self.width, self.height)
    }

    fn on_board_with_border(&self, loc: HexLocation) -> bool {
        let b = self.border;
        loc.x >= -b && loc.y >= -b && loc.x < self.width + b && loc.y < self.height + b
    }

    fn terrain_at(&self, loc: HexLocation) -> TerrainCode {
        self.terrain(loc)
    }

    /// Teleporting units travel between villages.
    fn teleport_network(&self) -> Vec<HexLocation> {
        self.villages()
    }
}
