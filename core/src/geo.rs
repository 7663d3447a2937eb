//! Rotational geometry of regular hexagons.

use num_traits::FromPrimitive;
use std::ops::{ Add, Neg, Sub };

/// The sense of a rotation around the center of a hexagon.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Rotation {
    /// Clockwise.
    CW,
    /// Counter-clockwise.
    CCW,
}

/// The integers modulo 6, i.e. the number of 60 degree steps
/// in a rotation of a hexagon.
#[derive(PartialEq, Eq, Clone, Copy, Debug, PartialOrd, Ord)]
#[derive(FromPrimitive)]
pub enum Z6 {
    Zero  = 0,
    One   = 1,
    Two   = 2,
    Three = 3,
    Four  = 4,
    Five  = 5,
}

impl Z6 {
    /// Reduce an arbitrary integer modulo 6.
    pub fn wrap(n: i32) -> Z6 {
        Z6::from_i32(n.rem_euclid(6)).unwrap_or(Z6::Zero)
    }
}

impl Add for Z6 {
    type Output = Z6;

    fn add(self, other: Z6) -> Z6 {
        Z6::wrap(self as i32 + other as i32)
    }
}

impl Sub for Z6 {
    type Output = Z6;

    fn sub(self, other: Z6) -> Z6 {
        Z6::wrap(self as i32 - other as i32)
    }
}

impl Neg for Z6 {
    type Output = Z6;

    fn neg(self) -> Z6 {
        Z6::wrap(-(self as i32))
    }
}
