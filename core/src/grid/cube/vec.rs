//! Displacements in the cube coordinate system.

use nalgebra::Vector3;
use std::ops::{ Add, Sub, Mul, Neg };

use either::Either;

use crate::geo::{ Z6, Rotation };
use super::dir::Direction;

/// Vectors for the displacement to a neighbouring (adjacent) cube coordinate
/// along one of the sides of a hexagon, indexed by [`Direction`].
///
/// [`Direction`]: ../dir/enum.Direction.html
pub const CUBE_DIR_VECTORS: [ [i32; 3]; 6] =
    [ [0,  1, -1], [ 1, 0, -1], [ 1, -1, 0]
    , [0, -1,  1], [-1, 0,  1], [-1,  1, 0]
    ];

/// A displacement of cube coordinates.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct CubeVec(pub(in crate::grid) Vector3<i32>);

impl CubeVec {
    pub fn new_xy(x: i32, y: i32) -> CubeVec {
        CubeVec(Vector3::new(x, y, -x - y))
    }

    pub(crate) fn from_array(v: [i32; 3]) -> CubeVec {
        CubeVec(Vector3::from(v))
    }

    pub fn directions() -> impl DoubleEndedIterator<Item=CubeVec> + Clone {
        CUBE_DIR_VECTORS.iter().map(|v| CubeVec::from_array(*v))
    }

    /// The sequence of directions to walk along the sides of a ring,
    /// when starting at the corner of the ring that lies in direction
    /// `d` from its center.
    pub fn walk_directions(d: Direction, r: Rotation) -> impl Iterator<Item=CubeVec> {
        let dirs = Self::directions();
        match r {
            Rotation::CW  => Either::Left(
                dirs.cycle().skip((d.index() + Z6::Two) as usize).take(6)
            ),
            Rotation::CCW => Either::Right(
                dirs.rev().cycle().skip((Z6::One - d.index()) as usize).take(6)
            )
        }
    }

    /// Rotate the vector `n` times by 60 degrees in the given direction.
    pub fn rotate(&self, r: Rotation, n: Z6) -> CubeVec {
        match r {
            Rotation::CW  => self.rotate(Rotation::CCW, -n),
            Rotation::CCW => match n {
                Z6::Zero  => *self,
                Z6::One   => CubeVec::new_xy(-self.0.y, -self.0.z),
                Z6::Two   => CubeVec::new_xy( self.0.z,  self.0.x),
                Z6::Three => CubeVec::new_xy(-self.0.x, -self.0.y),
                Z6::Four  => CubeVec::new_xy( self.0.y,  self.0.z),
                Z6::Five  => CubeVec::new_xy(-self.0.z, -self.0.x)
            }
        }
    }
}

impl Add<CubeVec> for CubeVec {
    type Output = CubeVec;

    fn add(self, other: CubeVec) -> Self::Output {
        CubeVec(self.0 + other.0)
    }
}

impl Sub<CubeVec> for CubeVec {
    type Output = CubeVec;

    fn sub(self, other: CubeVec) -> CubeVec {
        CubeVec(self.0 - other.0)
    }
}

impl Neg for CubeVec {
    type Output = CubeVec;

    fn neg(self) -> CubeVec {
        CubeVec(-self.0)
    }
}

impl Mul<i32> for CubeVec {
    type Output = CubeVec;

    fn mul(self, s: i32) -> CubeVec {
        CubeVec(self.0 * s)
    }
}
