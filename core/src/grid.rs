//! Hexagonal grids with overlaid coordinate systems.
//!
//! Cube coordinates are the canonical coordinate system in which
//! all arithmetic is done. Maps are addressed by [`HexLocation`]s,
//! offset coordinates that convert to and from cube coordinates.
//!
//! [`HexLocation`]: location/struct.HexLocation.html

pub mod coords;
pub mod cube;
pub mod location;
pub mod shape;

pub use self::coords::*;
pub use self::cube::*;
pub use self::location::*;
