//! Map locations in offset coordinates.

use std::fmt;

use super::coords::{ self, Coords };
use super::cube::*;

/// A location on a map, in offset coordinates with flat-top hexagons
/// where the odd columns are shifted down by half a hexagon.
///
/// `x` is the column and `y` the row. Ordering is by column, then row.
///
/// Guide: [Offset Coordinates]
///
/// [Offset Coordinates]: https://www.redblobgames.com/grids/hexagons/#coordinates-offset
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexLocation {
    pub x: i32,
    pub y: i32,
}

impl Coords for HexLocation {}

impl HexLocation {
    /// The location that denotes "no location".
    pub const INVALID: HexLocation = HexLocation { x: -1000, y: -1000 };

    pub const ORIGIN: HexLocation = HexLocation { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> HexLocation {
        HexLocation { x, y }
    }

    /// Whether this could be a location on a map, i.e. it has no
    /// negative component.
    pub fn is_valid(&self) -> bool {
        self.x >= 0 && self.y >= 0
    }

    /// Whether this is a location on a map of the given size.
    pub fn is_valid_in(&self, width: i32, height: i32) -> bool {
        self.is_valid() && self.x < width && self.y < height
    }

    /// The six adjacent locations, in the order of [`Direction::all`].
    /// Locations off the map are included; callers filter by
    /// the map bounds.
    ///
    /// [`Direction::all`]: ../cube/dir/enum.Direction.html#method.all
    pub fn adjacent(self) -> [HexLocation; 6] {
        let c = Cube::from(self);
        let mut res = [HexLocation::INVALID; 6];
        for (i, d) in Direction::all().iter().enumerate() {
            res[i] = HexLocation::from(c.neighbour(*d));
        }
        res
    }

    /// The adjacent location in the given direction.
    pub fn neighbour(self, d: Direction) -> HexLocation {
        HexLocation::from(Cube::from(self).neighbour(d))
    }

    /// Walk `n` steps in direction `d`. Negative counts walk
    /// in the opposite direction.
    pub fn get_direction(self, d: Direction, n: i32) -> HexLocation {
        let (d, n) = if n < 0 { (d.opposite(), -n) } else { (d, n) };
        HexLocation::from(Cube::from(self) + d.vector() * n)
    }

    /// The direction from `self` to an adjacent location, or `None`
    /// if the two locations are not adjacent.
    pub fn relative_direction(self, to: HexLocation) -> Option<Direction> {
        Direction::all().iter().cloned().find(|d| self.neighbour(*d) == to)
    }

    /// The distance to another location, in hex steps.
    pub fn distance(self, to: HexLocation) -> u32 {
        coords::distance(self, to)
    }

    /// Add a location interpreted as a displacement from the origin.
    ///
    /// Together with [`vector_difference`] this forms an abelian group,
    /// unlike plain component-wise addition which ignores the shifted
    /// odd columns.
    ///
    /// [`vector_difference`]: #method.vector_difference
    pub fn vector_sum(self, v: HexLocation) -> HexLocation {
        let d = Cube::from(v) - Cube::origin();
        HexLocation::from(Cube::from(self) + d)
    }

    /// The displacement that, added to `other`, yields `self`.
    pub fn vector_difference(self, other: HexLocation) -> HexLocation {
        let d = Cube::from(self) - Cube::from(other);
        HexLocation::from(Cube::origin() + d)
    }
}

impl Default for HexLocation {
    fn default() -> HexLocation {
        HexLocation::INVALID
    }
}

/// Whether two locations share a side.
pub fn tiles_adjacent(a: HexLocation, b: HexLocation) -> bool {
    a.distance(b) == 1
}

/// The six adjacent locations, in a fixed order.
pub fn adjacent(loc: HexLocation) -> [HexLocation; 6] {
    loc.adjacent()
}

impl From<Cube> for HexLocation {
    fn from(c: Cube) -> Self {
        let x = c.x();
        let y = c.z() + (x - (x & 1)) / 2;
        HexLocation { x, y }
    }
}

impl From<HexLocation> for Cube {
    fn from(o: HexLocation) -> Cube {
        let z = o.y - (o.x - (o.x & 1)) / 2;
        Cube::new_xz(o.x, z)
    }
}

impl fmt::Display for HexLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}
