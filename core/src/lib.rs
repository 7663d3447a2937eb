//! Movement ranges, zones of control and undoable map editing
//! on hexagonal grids.

#[macro_use]
extern crate num_derive;

pub mod action;
pub mod board;
pub mod config;
pub mod error;
pub mod geo;
pub mod grid;
pub mod map;
pub mod movement;
pub mod search;
pub mod terrain;

pub use action::{ Action, ActionContext, ActionStack };
pub use board::BoardOracle;
pub use config::Config;
pub use error::{ ActionError, MoveError };
pub use grid::{ Direction, HexLocation };
pub use map::{ Map, MapFragment, MAX_PLAYERS };
pub use movement::{ find_vacant_tile, MovementProfile, Side, Team, TeamRelations, Unit, UnitMap, Vacancy };
pub use search::flood::flood_region;
pub use search::reach::{ compute_reachable, find_route, ReachableSet, Route };
pub use terrain::{ MovementType, TerrainCode };
