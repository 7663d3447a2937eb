use crate::geo::Rotation;
use super::cube::*;

use std::convert::TryFrom;
use std::fmt::{ Debug, Display };
use std::hash::Hash;

/// Coordinates on a grid. A grid coordinate system must support
/// lossless conversion to and from cube coordinates, i.e. every
/// coordinate system is fully "embedded" in the cube coordinate system.
pub trait Coords:
    From<Cube> + Into<Cube> + Eq + Copy + Debug + Display + Hash {
}

impl Coords for Cube {}

/// Iterate over the neighbouring (adjacent) coordinates, in the
/// order of [`Direction::all`].
///
/// [`Direction::all`]: ../cube/dir/enum.Direction.html#method.all
pub fn neighbours<C: Coords>(c: C) -> impl Iterator<Item=C> {
    let cube: Cube = c.into();
    CubeVec::directions().map(move |v| C::from(cube + v))
}

/// The distance between two coordinates, in hex steps.
pub fn distance<C: Coords>(from: C, to: C) -> u32 {
    let a: Cube = from.into();
    a.distance(to.into())
}

/// The number of coordinates in the ring of a given radius.
pub fn num_in_ring(r: u16) -> usize {
    if r == 0 { 1 } else { 6 * (r as usize) }
}

/// Iterate over the coordinates in the ring at a given distance
/// from `c`, starting at the first coordinate of the ring in
/// the given direction from `c` and walking along the ring
/// as per the given `Rotation`. The ring of radius 0 is empty;
/// see [`ring`] for the ring that contains its center.
///
/// [`ring`]: fn.ring.html
pub fn walk_ring<C: Coords>(c: C, dir: Direction, rad: u16, rot: Rotation) -> RingIterator<C> {
    let dirs = CubeVec::walk_directions(dir, rot).collect::<Vec<_>>().into_iter();
    let center: Cube = c.into();
    RingIterator {
        radius: rad,
        pos: center + dir.vector() * rad as i32,
        dir: None,
        dir_count: rad,
        dirs,
        _coords: std::marker::PhantomData,
    }
}

pub struct RingIterator<C> {
    pos: Cube,
    dirs: std::vec::IntoIter<CubeVec>,
    dir: Option<CubeVec>,
    radius: u16,
    dir_count: u16,
    _coords: std::marker::PhantomData<C>,
}

impl<C: Coords> Iterator for RingIterator<C> {
    type Item = C;

    fn next(&mut self) -> Option<C> {
        if self.radius == 0 {
            return None
        }
        if self.dir_count >= self.radius {
            let dir = self.dirs.next()?;
            self.dir = Some(dir);
            self.dir_count = 0;
        }
        let pos = self.pos;
        self.dir_count += 1;
        if let Some(dir) = self.dir {
            self.pos = pos + dir;
        }
        Some(C::from(pos))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.radius == 0 {
            0
        } else {
            let current = if self.dir.is_some() {
                (self.radius - self.dir_count) as usize
            } else {
                0
            };
            self.dirs.len() * self.radius as usize + current
        };
        (remaining, Some(remaining))
    }
}

impl<C: Coords> ExactSizeIterator for RingIterator<C> {}

/// Iterate over all coordinates within the given radius, ring by ring,
/// beginning with `c` itself.
pub fn walk_range<C: Coords>(c: C, dir: Direction, rad: u16, rot: Rotation) -> impl Iterator<Item=C> {
    let rings = (1..rad+1).flat_map(move |i| walk_ring(c, dir, i, rot));
    std::iter::once(c).chain(rings)
}

/// The boundary hexagon of the given radius around `c`, walked
/// clockwise from its northern corner. The ring of radius 0 is
/// `c` itself. A negative radius, or one that does not fit in a `u16`,
/// yields nothing.
pub fn ring<C: Coords>(c: C, radius: i32) -> Vec<C> {
    match u16::try_from(radius) {
        Ok(0) => vec![c],
        Ok(r) => walk_ring(c, Direction::North, r, Rotation::CW).collect(),
        Err(_) => Vec::new(),
    }
}

/// All coordinates within the given radius around `c`, i.e. the
/// union of the rings `0 ..= radius`, without duplicates.
/// A negative radius, or one that does not fit in a `u16`, yields nothing.
pub fn tiles_in_radius<C: Coords>(c: C, radius: i32) -> Vec<C> {
    let r = match u16::try_from(radius) {
        Ok(r) => r,
        Err(_) => return Vec::new(),
    };
    let mut tiles = Vec::with_capacity(Cube::num_in_range(r));
    tiles.extend(walk_range(c, Direction::North, r, Rotation::CW));
    tiles
}
