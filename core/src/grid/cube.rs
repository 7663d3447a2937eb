//! A cube coordinate system for hexagonal grids.
pub mod dir;
pub mod vec;

use nalgebra::Point3;

use std::cmp::{ min, max };
use std::fmt;
use std::ops::{ Add, Sub, RangeInclusive };

pub use self::dir::*;
pub use self::vec::*;

/// A hex addressed by three axes whose components sum to zero.
///
/// Distances, rings and rotations are computed on cubes. Map locations
/// are converted to cubes and back for that (see [`Coords`]).
///
/// [`Coords`]: ../coords/trait.Coords.html
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct Cube {
    p: Point3<i32>,
}

impl Cube {
    pub fn origin() -> Cube {
        Self::mk(0, 0, 0)
    }

    pub fn new_xz(x: i32, z: i32) -> Cube {
        Self::mk(x, -x - z, z)
    }

    pub fn x(&self) -> i32 { self.p.coords.x }
    pub fn y(&self) -> i32 { self.p.coords.y }
    pub fn z(&self) -> i32 { self.p.coords.z }

    /// Iterate over the neighbouring (adjacent) cube coordinates,
    /// in the order of [`Direction::all`].
    ///
    /// [`Direction::all`]: dir/enum.Direction.html#method.all
    pub fn neighbours(&self) -> impl Iterator<Item=Cube> + '_ {
        CubeVec::directions().map(move |v| *self + v)
    }

    /// The neighbouring cube coordinate in the given direction.
    pub fn neighbour(&self, d: Direction) -> Cube {
        *self + d.vector()
    }

    /// The distance to another cube coordinate.
    pub fn distance(&self, other: Cube) -> u32 {
        ( (self.x() - other.x()).abs() as u32 +
          (self.y() - other.y()).abs() as u32 +
          (self.z() - other.z()).abs() as u32 ) / 2
    }

    /// The cube coordinates that are within the given range.
    pub fn range(&self, r: u16) -> impl Iterator<Item=Cube> + '_ {
        let mut v   = Vec::with_capacity(Self::num_in_range(r));
        let x_end   = r as i32;
        let x_start = -x_end;
        for x in RangeInclusive::new(x_start, x_end) {
            let y_start = max(x_start, -x - x_end);
            let y_end   = min(x_end,   -x + x_end);
            for y in RangeInclusive::new(y_start, y_end) {
                v.push(*self + CubeVec::new_xy(x, y));
            }
        }
        v.into_iter()
    }

    /// The number of cube coordinates that are within the given range.
    pub fn num_in_range(r: u16) -> usize {
        3 * (r as usize) * (r as usize + 1) + 1
    }

    fn mk(x: i32, y: i32, z: i32) -> Cube {
        let c = Cube { p: Point3::new(x, y, z) };
        debug_assert!(c.is_valid());
        c
    }

    /// Validity check for the cube coordinates, i.e. that they
    /// represent a point in the plane defined by `x + y + z = 0`.
    fn is_valid(&self) -> bool {
        self.x() + self.y() + self.z() == 0
    }
}

impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.x(), self.y(), self.z())
    }
}

impl Add<CubeVec> for Cube {
    type Output = Cube;

    fn add(self, v: CubeVec) -> Cube {
        Cube { p: self.p + v.0 }
    }
}

impl Sub<Cube> for Cube {
    type Output = CubeVec;

    fn sub(self, other: Cube) -> CubeVec {
        CubeVec(self.p - other.p)
    }
}

impl Sub<CubeVec> for Cube {
    type Output = Cube;

    fn sub(self, v: CubeVec) -> Cube {
        self + (-v)
    }
}
