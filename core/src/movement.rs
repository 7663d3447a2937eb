//! Units, sides and the resolution of moves.
//!
//! Occupancy is not checked here: moving onto a hex that is taken by
//! another unit is the caller's concern, using the [`UnitMap`].

use std::collections::{ BTreeMap, BTreeSet, HashSet, VecDeque };
use std::fmt;

use tracing::debug;

use crate::action::{ Action, ActionContext };
use crate::board::BoardOracle;
use crate::error::MoveError;
use crate::grid::HexLocation;
use crate::search::reach::{ ReachableSet, Route };
use crate::terrain::MovementType;

/// What the path engine needs to know about a moving unit.
#[derive(Clone, Copy, Debug)]
pub struct MovementProfile<'a> {
    pub movement_type: &'a MovementType,
    /// The movement points left to spend this turn.
    pub movement: u32,
    /// The movement points of every later turn.
    pub max_movement: u32,
    /// The number of turns after the current one to plan for.
    pub additional_turns: u32,
    pub ignores_zone_of_control: bool,
    pub teleports: bool,
}

impl<'a> MovementProfile<'a> {
    pub fn new(movement_type: &'a MovementType, movement: u32) -> MovementProfile<'a> {
        MovementProfile {
            movement_type,
            movement,
            max_movement: movement,
            additional_turns: 0,
            ignores_zone_of_control: false,
            teleports: false,
        }
    }

    /// Plan moves over `turns` more turns, each with `max_movement` points.
    pub fn over_turns(self, turns: u32, max_movement: u32) -> MovementProfile<'a> {
        MovementProfile { additional_turns: turns, max_movement, ..self }
    }

    pub fn ignoring_zone_of_control(self) -> MovementProfile<'a> {
        MovementProfile { ignores_zone_of_control: true, ..self }
    }

    pub fn teleporting(self) -> MovementProfile<'a> {
        MovementProfile { teleports: true, ..self }
    }
}

/// A side (player) in a game, numbered from 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Side(pub u32);

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "side {}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub side: Side,
    /// Movement points left this turn.
    pub moves: u32,
    /// Whether the unit exerts a zone of control on its adjacent hexes.
    pub emits_zoc: bool,
}

impl Unit {
    pub fn new(side: Side, moves: u32) -> Unit {
        Unit { side, moves, emits_zoc: true }
    }

    /// The movement profile of this unit for the rest of the turn.
    pub fn profile<'a>(&self, movement_type: &'a MovementType) -> MovementProfile<'a> {
        MovementProfile::new(movement_type, self.moves)
    }
}

/// The positions of the units on a map.
pub type UnitMap = BTreeMap<HexLocation, Unit>;

/// How the side viewing the board relates to the other sides.
pub trait TeamRelations {
    fn is_enemy(&self, side: Side) -> bool;
}

/// A team with its allies. Every other side is an enemy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Team {
    pub side: Side,
    pub allies: BTreeSet<Side>,
}

impl Team {
    pub fn new(side: Side) -> Team {
        Team { side, allies: BTreeSet::new() }
    }

    pub fn allied_with(mut self, side: Side) -> Team {
        self.allies.insert(side);
        self
    }
}

impl TeamRelations for Team {
    fn is_enemy(&self, side: Side) -> bool {
        side != self.side && !self.allies.contains(&side)
    }
}

impl<F: Fn(Side) -> bool> TeamRelations for F {
    fn is_enemy(&self, side: Side) -> bool {
        self(side)
    }
}

/// The on-board hexes adjacent to an enemy unit that exerts a zone of control.
pub fn zone_of_control_hexes(
    board: &impl BoardOracle,
    units: &UnitMap,
    relations: &impl TeamRelations,
) -> HashSet<HexLocation> {
    units.iter()
        .filter(|(_, u)| u.emits_zoc && relations.is_enemy(u.side))
        .flat_map(|(loc, _)| loc.adjacent().to_vec())
        .filter(|adj| board.on_board(*adj))
        .collect()
}

/// The route to `dest`, if it can be reached this turn.
pub fn validate_move(reachable: &ReachableSet, dest: HexLocation) -> Result<Route, MoveError> {
    let route = reachable.route(dest).ok_or(MoveError::Unreachable(dest))?;
    if route.turns > 0 {
        return Err(MoveError::BeyondTurn { dest, turns: route.turns })
    }
    Ok(route)
}

/// The furthest [`find_vacant_tile`] looks, in steps from its start.
///
/// [`find_vacant_tile`]: fn.find_vacant_tile.html
pub const VACANT_TILE_RANGE: u32 = 49;

/// The hexes [`find_vacant_tile`] may settle on.
///
/// [`find_vacant_tile`]: fn.find_vacant_tile.html
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Vacancy {
    /// Any on-board hex.
    Any,
    /// Castle hexes reachable from the start through castle only.
    Castle,
}

/// The closest on-board hex to `loc` holding no unit, `loc` itself
/// included. Ties are broken in the order of [`HexLocation::adjacent`].
///
/// [`HexLocation::adjacent`]: ../grid/location/struct.HexLocation.html#method.adjacent
pub fn find_vacant_tile(
    loc: HexLocation,
    vacancy: Vacancy,
    board: &impl BoardOracle,
    units: &UnitMap,
) -> Option<HexLocation> {
    let allowed = |l: HexLocation| {
        board.on_board(l) && (vacancy == Vacancy::Any || board.is_castle(l))
    };
    let mut seen = HashSet::new();
    let mut front = VecDeque::new();
    seen.insert(loc);
    front.push_back((loc, 0));
    while let Some((l, depth)) = front.pop_front() {
        if allowed(l) && !units.contains_key(&l) {
            debug!(start = %loc, found = %l, steps = depth, "found vacant tile");
            return Some(l)
        }
        if depth == VACANT_TILE_RANGE {
            continue
        }
        for n in l.adjacent().iter().cloned() {
            if allowed(n) && seen.insert(n) {
                front.push_back((n, depth + 1));
            }
        }
    }
    None
}

/// The on-board hexes adjacent to `loc` that hold an enemy unit,
/// in the order of [`HexLocation::adjacent`].
///
/// [`HexLocation::adjacent`]: ../grid/location/struct.HexLocation.html#method.adjacent
pub fn adjacent_enemies(
    loc: HexLocation,
    board: &impl BoardOracle,
    units: &UnitMap,
    relations: &impl TeamRelations,
) -> Vec<HexLocation> {
    loc.adjacent().iter()
        .filter(|adj| board.on_board(**adj))
        .filter(|adj| units.get(adj).map_or(false, |u| relations.is_enemy(u.side)))
        .cloned()
        .collect()
}

/// The result of a move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub route: Route,
    /// Enemies adjacent to the destination, which may be attacked.
    pub adjacent_enemies: Vec<HexLocation>,
}

/// Move the unit at the source of `reachable` to `dest` through the
/// action context, so that the move can be undone.
///
/// Moving a unit onto its own hex does nothing but report the
/// adjacent enemies.
pub fn execute_move(
    ctx: &mut ActionContext,
    reachable: &ReachableSet,
    dest: HexLocation,
    relations: &impl TeamRelations,
) -> Result<MoveOutcome, MoveError> {
    let route = validate_move(reachable, dest)?;
    let source = reachable.source();
    if dest != source {
        ctx.perform_action(Action::MoveUnit {
            from: source,
            to: dest,
            moves_left: route.moves_left,
        })?;
    }
    let map = ctx.map();
    let enemies = adjacent_enemies(dest, map, map.units(), relations);
    debug!(from = %source, to = %dest, moves_left = route.moves_left,
           enemies = enemies.len(), "unit moved");
    Ok(MoveOutcome { route, adjacent_enemies: enemies })
}
