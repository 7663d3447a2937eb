//! Directions in the cube coordinate system.
//!
//! Maps are laid out with flat-top hexagons and odd columns shifted
//! down, so the six sides of a hexagon face north, north-east,
//! south-east, south, south-west and north-west.

use num_traits::cast::FromPrimitive;

use crate::geo::Z6;
use super::vec::{ CubeVec, CUBE_DIR_VECTORS };

/// Directions for adjacent neighbours.
///
/// The discriminants index [`CUBE_DIR_VECTORS`] and define the
/// order in which neighbours are enumerated everywhere in the crate.
///
/// [`CUBE_DIR_VECTORS`]: ../vec/constant.CUBE_DIR_VECTORS.html
#[derive(PartialEq, Eq, Hash, Copy, Clone, PartialOrd, Ord)]
#[derive(FromPrimitive, Debug)]
pub enum Direction {
    North     = 0,
    NorthEast = 1,
    SouthEast = 2,
    South     = 3,
    SouthWest = 4,
    NorthWest = 5
}

impl Direction {
    /// All directions in enumeration order.
    pub fn all() -> [Direction; 6] {
        use self::Direction::*;
        [North, NorthEast, SouthEast, South, SouthWest, NorthWest]
    }

    pub fn vector(self) -> CubeVec {
        CubeVec::from_array(CUBE_DIR_VECTORS[self as usize])
    }

    pub fn index(self) -> Z6 {
        Z6::wrap(self as i32)
    }

    pub fn from_index(z: Z6) -> Direction {
        Direction::from_u8(z as u8).unwrap_or(Direction::North)
    }

    /// The direction pointing the opposite way.
    pub fn opposite(self) -> Direction {
        Direction::from_index(self.index() + Z6::Three)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::*;
    use rand::Rng;

    impl Arbitrary for Direction {
        fn arbitrary<G: Gen>(g: &mut G) -> Direction {
            Direction::from_u8(g.gen_range(0, 6)).unwrap()
        }
    }

    #[test]
    fn prop_opposite_involution() {
        fn prop(d: Direction) -> bool {
            d.opposite().opposite() == d
                && d.opposite() != d
                && d.vector() + d.opposite().vector() == CubeVec::new_xy(0, 0)
        }
        quickcheck(prop as fn(_) -> _);
    }

    #[test]
    fn test_all_in_order() {
        for (i, d) in Direction::all().iter().enumerate() {
            assert_eq!(*d as usize, i);
        }
    }
}
