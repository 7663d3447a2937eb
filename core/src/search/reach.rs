//! Movement ranges and routes of units on a board.

use std::collections::HashSet;

use tracing::debug;

use crate::board::BoardOracle;
use crate::grid::HexLocation;
use crate::movement::MovementProfile;

use super::{ astar, Context, Tree };

/// The hexes a unit can reach, with the cheapest route to each.
///
/// A hex that is missing from the set cannot be reached with the
/// movement budget the set was computed for.
#[derive(Clone, Debug)]
pub struct ReachableSet {
    tree: Tree<HexLocation>,
    clock: TurnClock,
}

/// A route taken by a moving unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    /// The hexes from the source to the destination, both included.
    /// Successive hexes are adjacent unless the unit teleports between
    /// them. The route to the source itself has no steps.
    pub steps: Vec<HexLocation>,
    /// The movement points left upon arrival.
    pub moves_left: u32,
    /// The number of turns after the current one needed to arrive.
    pub turns: u32,
}

impl Route {
    pub fn destination(&self) -> Option<HexLocation> {
        self.steps.last().cloned()
    }
}

/// Movement spread over turns, counted in movement points spent since
/// the start of the search. Turn 0 is the current turn and ends once
/// the unit's remaining movement is spent. Every further turn adds the
/// unit's full movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct TurnClock {
    first: u32,
    full: u32,
    additional: u32,
}

impl TurnClock {
    fn new(profile: &MovementProfile<'_>) -> TurnClock {
        TurnClock {
            first: profile.movement,
            full: profile.max_movement,
            additional: if profile.max_movement == 0 { 0 } else { profile.additional_turns },
        }
    }

    /// The points spent when the given turn ends.
    fn end_of(&self, turn: u32) -> u32 {
        self.first.saturating_add(turn.saturating_mul(self.full))
    }

    fn turn_of(&self, spent: u32) -> u32 {
        if spent <= self.first || self.full == 0 {
            0
        } else {
            (spent - self.first + self.full - 1) / self.full
        }
    }

    fn max_cost(&self) -> u32 {
        self.end_of(self.additional)
    }

    fn is_last(&self, turn: u32) -> bool {
        turn >= self.additional
    }

    fn moves_left(&self, spent: u32) -> u32 {
        self.end_of(self.turn_of(spent)) - spent
    }

    /// Enter a hex costing `step`. A hex that cannot be paid for with
    /// the rest of the turn is entered at the start of the next turn,
    /// forfeiting the rest.
    fn enter(&self, spent: u32, step: u32) -> Option<u32> {
        let turn = self.turn_of(spent);
        let end = self.end_of(turn);
        let arrival = spent.checked_add(step)?;
        if arrival <= end {
            Some(arrival)
        } else if !self.is_last(turn) && step <= self.full {
            end.checked_add(step)
        } else {
            None
        }
    }

    /// Forfeit the rest of the turn, unless it is the last one.
    fn end_turn(&self, spent: u32) -> u32 {
        let turn = self.turn_of(spent);
        if self.is_last(turn) { spent } else { self.end_of(turn) }
    }
}

impl ReachableSet {
    pub fn source(&self) -> HexLocation {
        self.tree.root()
    }

    /// The movement points left this turn when the set was computed.
    pub fn budget(&self) -> u32 {
        self.clock.first
    }

    pub fn contains(&self, loc: HexLocation) -> bool {
        self.tree.contains(loc)
    }

    /// The movement points left upon arriving at `loc`, in the turn
    /// of arrival.
    pub fn moves_left(&self, loc: HexLocation) -> Option<u32> {
        self.tree.cost(loc).map(|c| self.clock.moves_left(c))
    }

    /// The number of turns after the current one needed to reach `loc`.
    pub fn turns(&self, loc: HexLocation) -> Option<u32> {
        self.tree.cost(loc).map(|c| self.clock.turn_of(c))
    }

    pub fn route(&self, dest: HexLocation) -> Option<Route> {
        let cost = self.tree.cost(dest)?;
        let moves_left = self.clock.moves_left(cost);
        let turns = self.clock.turn_of(cost);
        if dest == self.source() {
            return Some(Route { steps: Vec::new(), moves_left, turns })
        }
        let path = self.tree.path(dest)?;
        Some(Route { steps: path.into_iter().map(|n| n.coords).collect(), moves_left, turns })
    }

    /// The hexes on the route to `dest` where the unit ends a turn, with
    /// the turn numbered from 1 for the current turn. The last entry is
    /// `dest` itself, unless `dest` is the source.
    pub fn waypoints(&self, dest: HexLocation) -> Option<Vec<(HexLocation, u32)>> {
        let path = self.tree.path(dest)?;
        if dest == self.source() {
            return Some(Vec::new())
        }
        let turns = path.iter().map(|n| self.clock.turn_of(n.cost)).collect::<Vec<_>>();
        let mut waypoints = path.iter().zip(turns.windows(2))
            .filter(|(_, t)| t[1] > t[0])
            .map(|(n, t)| (n.coords, t[0] + 1))
            .collect::<Vec<_>>();
        let last = turns.last().map_or(0, |t| *t);
        waypoints.push((dest, last + 1));
        Some(waypoints)
    }

    /// The hex preceding `loc` on its route.
    pub fn previous(&self, loc: HexLocation) -> Option<HexLocation> {
        self.tree.parent(loc)
    }

    /// The number of reachable hexes, including the source.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// The reachable hexes with the movement points left on each,
    /// in no particular order.
    pub fn iter(&self) -> impl Iterator<Item=(HexLocation, u32)> + '_ {
        let clock = self.clock;
        self.tree.iter().map(move |(loc, cost)| (loc, clock.moves_left(cost)))
    }

    pub fn locations(&self) -> impl Iterator<Item=HexLocation> + '_ {
        self.tree.iter().map(|(loc, _)| loc)
    }
}

/// The search context of a moving unit.
struct MovementContext<'a, B> {
    profile: &'a MovementProfile<'a>,
    board: &'a B,
    zone_of_control: &'a HashSet<HexLocation>,
    network: Vec<HexLocation>,
    clock: TurnClock,
}

impl<'a, B: BoardOracle> MovementContext<'a, B> {
    fn new(
        profile: &'a MovementProfile<'a>,
        board: &'a B,
        zone_of_control: &'a HashSet<HexLocation>,
    ) -> MovementContext<'a, B> {
        let network = if profile.teleports { board.teleport_network() } else { Vec::new() };
        MovementContext { profile, board, zone_of_control, network, clock: TurnClock::new(profile) }
    }

    /// The cost of entering `loc`. Every hex costs at least one point.
    fn entry_cost(&self, loc: HexLocation) -> Option<u32> {
        if !self.board.on_board(loc) {
            return None
        }
        self.board.movement_cost(self.profile, self.board.terrain_at(loc)).map(|c| c.max(1))
    }

    fn in_zone_of_control(&self, loc: HexLocation) -> bool {
        !self.profile.ignores_zone_of_control && self.zone_of_control.contains(&loc)
    }
}

impl<'a, B: BoardOracle> Context<HexLocation> for MovementContext<'a, B> {
    fn max_cost(&self) -> u32 {
        self.clock.max_cost()
    }

    fn cost(&mut self, _from: HexLocation, to: HexLocation) -> Option<u32> {
        self.entry_cost(to)
    }

    /// Entering an enemy zone of control spends the rest of the turn.
    fn accumulate(&mut self, spent: u32, to: HexLocation, step: u32) -> Option<u32> {
        let arrival = self.clock.enter(spent, step)?;
        if self.in_zone_of_control(to) {
            Some(self.clock.end_turn(arrival))
        } else {
            Some(arrival)
        }
    }

    /// Hexes in an enemy zone of control can be entered, but only left
    /// again in a later turn.
    fn expands(&mut self, at: HexLocation, cost: u32) -> bool {
        !self.in_zone_of_control(at) || !self.clock.is_last(self.clock.turn_of(cost))
    }

    /// Jumps lead to the other hexes of the teleport network that the
    /// unit can enter.
    fn jumps(&mut self, from: HexLocation) -> Vec<HexLocation> {
        if !self.network.contains(&from) {
            return Vec::new()
        }
        self.network.iter().cloned()
            .filter(|t| self.entry_cost(*t).is_some())
            .collect()
    }

    /// The hex distance, or the distance to the closest teleport
    /// plus the distance from the teleport closest to the goal if
    /// that is shorter.
    fn heuristic(&mut self, from: HexLocation, to: HexLocation) -> u32 {
        let direct = from.distance(to);
        let to_network = self.network.iter().map(|t| from.distance(*t)).min();
        let from_network = self.network.iter().map(|t| t.distance(to)).min();
        match (to_network, from_network) {
            (Some(a), Some(b)) => direct.min(a + b),
            _ => direct,
        }
    }
}

/// Compute all hexes a unit with the given profile can reach from `source`.
///
/// The search expands by accumulated movement cost. A hex is entered only
/// if its full cost can be paid. Hexes in `zone_of_control` are leaves of
/// the search unless the unit ignores zones of control, apart from the
/// source itself. Teleporting units standing on a hex of the board's
/// teleport network may jump to any other hex of the network they can
/// enter, for free.
///
/// With additional turns, a hex that cannot be paid for this turn is
/// entered in the next one, and a unit entering a zone of control may
/// move on in the next turn.
pub fn compute_reachable<B: BoardOracle>(
    source: HexLocation,
    profile: &MovementProfile<'_>,
    board: &B,
    zone_of_control: &HashSet<HexLocation>,
) -> ReachableSet {
    let mut ctx = MovementContext::new(profile, board, zone_of_control);
    let tree = astar::tree(source, None, &mut ctx);
    debug!(source = %source, budget = profile.movement, turns = profile.additional_turns,
           movement_type = profile.movement_type.name(),
           reachable = tree.len(), "computed movement range");
    ReachableSet { tree, clock: ctx.clock }
}

/// Find the cheapest route from `source` to `dest` within the unit's
/// movement budget, under the same rules as [`compute_reachable`].
///
/// [`compute_reachable`]: fn.compute_reachable.html
pub fn find_route<B: BoardOracle>(
    source: HexLocation,
    dest: HexLocation,
    profile: &MovementProfile<'_>,
    board: &B,
    zone_of_control: &HashSet<HexLocation>,
) -> Option<Route> {
    let mut ctx = MovementContext::new(profile, board, zone_of_control);
    let path = astar::path(source, dest, &mut ctx)?;
    let cost = path.back().map_or(0, |n| n.cost);
    let steps = if dest == source {
        Vec::new()
    } else {
        path.into_iter().map(|n| n.coords).collect()
    };
    Some(Route { steps, moves_left: ctx.clock.moves_left(cost), turns: ctx.clock.turn_of(cost) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::grid::{ tiles_adjacent, Cube };
    use crate::map::Map;
    use crate::terrain::{ MovementType, TerrainCode };
    use quickcheck::*;

    fn loc(x: i32, y: i32) -> HexLocation {
        HexLocation::new(x, y)
    }

    fn grassland(width: i32, height: i32) -> Map {
        Map::new(width, height, TerrainCode::GRASSLAND, &Config::default())
    }

    fn smallfoot() -> MovementType {
        MovementType::new("smallfoot")
            .with_cost(TerrainCode::GRASSLAND, 1)
            .with_cost(TerrainCode::HILLS, 2)
            .with_cost(TerrainCode::VILLAGE, 1)
    }

    fn no_zoc() -> HashSet<HexLocation> {
        HashSet::new()
    }

    #[test]
    fn test_uniform_range() {
        let map = grassland(5, 5);
        let mt = smallfoot();
        let profile = MovementProfile::new(&mt, 3);
        let reach = compute_reachable(loc(0, 0), &profile, &map, &no_zoc());
        let expected = map.locations()
            .filter(|l| l.distance(loc(0, 0)) <= 3)
            .collect::<HashSet<_>>();
        assert_eq!(reach.locations().collect::<HashSet<_>>(), expected);
        for (l, left) in reach.iter() {
            assert_eq!(left, 3 - l.distance(loc(0, 0)), "moves left on {}", l);
        }
    }

    #[test]
    fn test_full_range_on_open_ground() {
        let map = grassland(9, 9);
        let mt = smallfoot();
        let profile = MovementProfile::new(&mt, 3);
        let reach = compute_reachable(loc(4, 4), &profile, &map, &no_zoc());
        assert_eq!(reach.len(), Cube::num_in_range(3));
    }

    /// A board that charges nothing for grassland.
    struct FreeGrass(Map);

    impl BoardOracle for FreeGrass {
        fn on_board(&self, loc: HexLocation) -> bool {
            self.0.on_board(loc)
        }
        fn on_board_with_border(&self, loc: HexLocation) -> bool {
            self.0.on_board_with_border(loc)
        }
        fn terrain_at(&self, loc: HexLocation) -> TerrainCode {
            self.0.terrain_at(loc)
        }
        fn movement_cost(&self, profile: &MovementProfile<'_>, t: TerrainCode) -> Option<u32> {
            if t == TerrainCode::GRASSLAND { Some(0) } else { profile.movement_type.cost(t) }
        }
    }

    #[test]
    fn test_free_terrain_costs_one() {
        let board = FreeGrass(grassland(5, 5));
        let mt = smallfoot();
        let profile = MovementProfile::new(&mt, 2);
        let reach = compute_reachable(loc(2, 2), &profile, &board, &no_zoc());
        assert_eq!(reach.len(), Cube::num_in_range(2));
        assert_eq!(reach.moves_left(loc(2, 0)), Some(0));
        let route = find_route(loc(2, 2), loc(2, 0), &profile, &board, &no_zoc()).expect("route");
        assert_eq!(route.steps, vec![loc(2, 2), loc(2, 1), loc(2, 0)]);
    }

    #[test]
    fn test_source_route() {
        let map = grassland(5, 5);
        let mt = smallfoot();
        let profile = MovementProfile::new(&mt, 3);
        let reach = compute_reachable(loc(2, 2), &profile, &map, &no_zoc());
        assert_eq!(reach.source(), loc(2, 2));
        assert_eq!(reach.route(loc(2, 2)), Some(Route { steps: vec![], moves_left: 3, turns: 0 }));
        assert_eq!(reach.waypoints(loc(2, 2)), Some(vec![]));
    }

    #[test]
    fn test_impassable_hex() {
        let mut map = grassland(5, 5);
        map.set_terrain(loc(1, 0), TerrainCode::MOUNTAINS);
        let mt = smallfoot();
        let profile = MovementProfile::new(&mt, 3);
        let reach = compute_reachable(loc(0, 0), &profile, &map, &no_zoc());
        assert!(!reach.contains(loc(1, 0)));
        // (2,0) lies two steps away past the mountain, four steps around it.
        assert!(!reach.contains(loc(2, 0)));
        assert_eq!(reach.moves_left(loc(1, 1)), Some(1));
        assert_eq!(reach.moves_left(loc(2, 1)), Some(0));
        let route = reach.route(loc(2, 1)).expect("route");
        assert_eq!(route.steps, vec![loc(0, 0), loc(0, 1), loc(1, 1), loc(2, 1)]);
    }

    #[test]
    fn test_partial_entry_not_permitted() {
        let mut map = grassland(5, 5);
        map.set_terrain(loc(0, 1), TerrainCode::HILLS);
        let mt = smallfoot();
        let profile = MovementProfile::new(&mt, 1);
        let reach = compute_reachable(loc(0, 0), &profile, &map, &no_zoc());
        assert!(!reach.contains(loc(0, 1)));
        assert_eq!(reach.moves_left(loc(1, 0)), Some(0));
        assert_eq!(reach.len(), 2);
    }

    #[test]
    fn test_zone_of_control_hex_is_terminal() {
        let map = grassland(5, 5);
        let mt = smallfoot();
        let profile = MovementProfile::new(&mt, 3);
        let zoc = vec![loc(2, 0)].into_iter().collect();
        let reach = compute_reachable(loc(0, 0), &profile, &map, &zoc);
        assert_eq!(reach.moves_left(loc(2, 0)), Some(1));
        assert!(reach.locations().all(|l| reach.previous(l) != Some(loc(2, 0))));
        // (3,0) is still reachable around the zone of control.
        assert_eq!(reach.moves_left(loc(3, 0)), Some(0));
        assert_ne!(reach.previous(loc(3, 0)), Some(loc(2, 0)));
    }

    #[test]
    fn test_zone_of_control_blocks_corridor() {
        let map = grassland(5, 1);
        let mt = smallfoot();
        let zoc = vec![loc(2, 0)].into_iter().collect();
        let profile = MovementProfile::new(&mt, 4);
        let reach = compute_reachable(loc(0, 0), &profile, &map, &zoc);
        let hexes = reach.locations().collect::<HashSet<_>>();
        assert_eq!(hexes, vec![loc(0, 0), loc(1, 0), loc(2, 0)].into_iter().collect());

        let skirmisher = profile.ignoring_zone_of_control();
        let reach = compute_reachable(loc(0, 0), &skirmisher, &map, &zoc);
        assert_eq!(reach.len(), 5);
        assert_eq!(reach.moves_left(loc(4, 0)), Some(0));
    }

    #[test]
    fn test_source_in_zone_of_control_expands() {
        let map = grassland(5, 1);
        let mt = smallfoot();
        let zoc = vec![loc(1, 0), loc(2, 0)].into_iter().collect();
        let profile = MovementProfile::new(&mt, 4);
        let reach = compute_reachable(loc(2, 0), &profile, &map, &zoc);
        assert!(reach.contains(loc(1, 0)));
        assert!(reach.contains(loc(4, 0)));
        assert!(!reach.contains(loc(0, 0)));
    }

    fn tunnels() -> Map {
        let mut map = grassland(5, 1);
        map.set_terrain(loc(2, 0), TerrainCode::IMPASSABLE);
        map.set_terrain(loc(0, 0), TerrainCode::VILLAGE);
        map.set_terrain(loc(4, 0), TerrainCode::VILLAGE);
        map
    }

    #[test]
    fn test_teleport() {
        let map = tunnels();
        let mt = smallfoot();
        let walker = MovementProfile::new(&mt, 1);
        let reach = compute_reachable(loc(0, 0), &walker, &map, &no_zoc());
        assert_eq!(reach.len(), 2);

        let teleporter = walker.teleporting();
        let reach = compute_reachable(loc(0, 0), &teleporter, &map, &no_zoc());
        assert_eq!(reach.moves_left(loc(4, 0)), Some(1));
        assert_eq!(reach.moves_left(loc(3, 0)), Some(0));
        let route = reach.route(loc(3, 0)).expect("route");
        assert_eq!(route.steps, vec![loc(0, 0), loc(4, 0), loc(3, 0)]);
        assert!(!tiles_adjacent(route.steps[0], route.steps[1]));
    }

    #[test]
    fn test_teleport_target_must_be_passable() {
        let mut map = grassland(7, 1);
        map.set_terrain(loc(0, 0), TerrainCode::VILLAGE);
        map.set_terrain(loc(6, 0), TerrainCode::VILLAGE);
        let mermaid = MovementType::new("mermaid").with_cost(TerrainCode::GRASSLAND, 1);
        let profile = MovementProfile::new(&mermaid, 1).teleporting();
        let reach = compute_reachable(loc(0, 0), &profile, &map, &no_zoc());
        assert!(!reach.contains(loc(6, 0)));
        assert!(!reach.contains(loc(5, 0)));
        assert_eq!(reach.len(), 2);
        assert!(find_route(loc(0, 0), loc(5, 0), &profile, &map, &no_zoc()).is_none());
    }

    #[test]
    fn test_range_over_turns() {
        let map = grassland(6, 1);
        let mt = smallfoot();
        let profile = MovementProfile::new(&mt, 2);
        let reach = compute_reachable(loc(0, 0), &profile, &map, &no_zoc());
        assert_eq!(reach.len(), 3);

        let planned = profile.over_turns(1, 3);
        let reach = compute_reachable(loc(0, 0), &planned, &map, &no_zoc());
        assert_eq!(reach.len(), 6);
        assert_eq!(reach.turns(loc(2, 0)), Some(0));
        assert_eq!(reach.moves_left(loc(2, 0)), Some(0));
        assert_eq!(reach.turns(loc(3, 0)), Some(1));
        assert_eq!(reach.moves_left(loc(3, 0)), Some(2));
        assert_eq!(reach.moves_left(loc(5, 0)), Some(0));
        assert_eq!(reach.waypoints(loc(5, 0)), Some(vec![(loc(2, 0), 1), (loc(5, 0), 2)]));
        assert_eq!(reach.waypoints(loc(1, 0)), Some(vec![(loc(1, 0), 1)]));
        assert_eq!(reach.route(loc(4, 0)).map(|r| r.turns), Some(1));
    }

    #[test]
    fn test_turn_rest_forfeited() {
        let mut map = grassland(5, 1);
        map.set_terrain(loc(2, 0), TerrainCode::HILLS);
        let mt = smallfoot();
        let profile = MovementProfile::new(&mt, 2).over_turns(1, 3);
        let reach = compute_reachable(loc(0, 0), &profile, &map, &no_zoc());
        // The hills cost more than the one point left after (1,0).
        assert_eq!(reach.turns(loc(2, 0)), Some(1));
        assert_eq!(reach.moves_left(loc(2, 0)), Some(1));
        assert_eq!(reach.moves_left(loc(3, 0)), Some(0));
        assert!(!reach.contains(loc(4, 0)));
        assert_eq!(reach.waypoints(loc(3, 0)), Some(vec![(loc(1, 0), 1), (loc(3, 0), 2)]));
    }

    #[test]
    fn test_zone_of_control_over_turns() {
        let map = grassland(5, 1);
        let mt = smallfoot();
        let zoc = vec![loc(2, 0)].into_iter().collect();
        let profile = MovementProfile::new(&mt, 4).over_turns(1, 4);
        let reach = compute_reachable(loc(0, 0), &profile, &map, &zoc);
        assert_eq!(reach.moves_left(loc(2, 0)), Some(0));
        assert_eq!(reach.turns(loc(2, 0)), Some(0));
        assert_eq!(reach.previous(loc(3, 0)), Some(loc(2, 0)));
        assert_eq!(reach.turns(loc(3, 0)), Some(1));
        assert_eq!(reach.moves_left(loc(4, 0)), Some(2));
    }

    #[test]
    fn test_no_later_turns_without_movement() {
        let map = grassland(5, 1);
        let mt = smallfoot();
        let profile = MovementProfile::new(&mt, 1).over_turns(3, 0);
        let reach = compute_reachable(loc(0, 0), &profile, &map, &no_zoc());
        assert_eq!(reach.len(), 2);
    }

    #[test]
    fn test_find_route() {
        let mut map = grassland(5, 5);
        map.set_terrain(loc(1, 0), TerrainCode::MOUNTAINS);
        let mt = smallfoot();
        let profile = MovementProfile::new(&mt, 3);
        let route = find_route(loc(0, 0), loc(2, 1), &profile, &map, &no_zoc()).expect("route");
        assert_eq!(route.moves_left, 0);
        assert_eq!(route.steps.first(), Some(&loc(0, 0)));
        assert_eq!(route.destination(), Some(loc(2, 1)));
        assert!(find_route(loc(0, 0), loc(2, 0), &profile, &map, &no_zoc()).is_none());
        let stay = find_route(loc(0, 0), loc(0, 0), &profile, &map, &no_zoc());
        assert_eq!(stay, Some(Route { steps: vec![], moves_left: 3, turns: 0 }));
    }

    #[test]
    fn test_find_route_teleport() {
        let map = tunnels();
        let mt = smallfoot();
        let profile = MovementProfile::new(&mt, 1).teleporting();
        let route = find_route(loc(0, 0), loc(3, 0), &profile, &map, &no_zoc()).expect("route");
        assert_eq!(route.steps, vec![loc(0, 0), loc(4, 0), loc(3, 0)]);
        assert_eq!(route.moves_left, 0);
    }

    #[test]
    fn test_find_route_over_turns() {
        let map = grassland(6, 1);
        let mt = smallfoot();
        let profile = MovementProfile::new(&mt, 2);
        assert!(find_route(loc(0, 0), loc(5, 0), &profile, &map, &no_zoc()).is_none());
        let planned = profile.over_turns(1, 3);
        let route = find_route(loc(0, 0), loc(5, 0), &planned, &map, &no_zoc()).expect("route");
        assert_eq!(route.steps.len(), 6);
        assert_eq!(route.turns, 1);
        assert_eq!(route.moves_left, 0);
    }

    /// A 6x6 board with terrain drawn from the given bytes.
    fn patchwork(terrain: &[u8]) -> Map {
        let mut map = grassland(6, 6);
        for (l, b) in map.locations().collect::<Vec<_>>().into_iter().zip(terrain) {
            let t = match b % 3 {
                0 => TerrainCode::GRASSLAND,
                1 => TerrainCode::HILLS,
                _ => TerrainCode::MOUNTAINS,
            };
            map.set_terrain(l, t);
        }
        map
    }

    #[test]
    fn prop_range_monotone() {
        fn prop(terrain: Vec<u8>, b1: u8, b2: u8) -> bool {
            let map = patchwork(&terrain);
            let mt = smallfoot();
            let (lo, hi) = (b1.min(b2) as u32 % 8, b1.max(b2) as u32 % 8 + 8);
            let small = compute_reachable(loc(2, 2), &MovementProfile::new(&mt, lo), &map, &no_zoc());
            let large = compute_reachable(loc(2, 2), &MovementProfile::new(&mt, hi), &map, &no_zoc());
            let ok = small.locations().all(|l| large.contains(l));
            ok
        }
        quickcheck(prop as fn(_, _, _) -> _);
    }

    #[test]
    fn prop_zone_of_control_containment() {
        fn prop(terrain: Vec<u8>, zoc: Vec<(u8, u8)>, budget: u8) -> bool {
            let map = patchwork(&terrain);
            let mt = smallfoot();
            let zoc = zoc.into_iter()
                .map(|(x, y)| loc((x % 6) as i32, (y % 6) as i32))
                .collect::<HashSet<_>>();
            let profile = MovementProfile::new(&mt, budget as u32 % 10);
            let source = loc(2, 2);
            let held = compute_reachable(source, &profile, &map, &zoc);
            let free = compute_reachable(source, &profile.ignoring_zone_of_control(), &map, &zoc);
            let ok = held.locations().all(|l| {
                let through_zoc = held.previous(l)
                    .map_or(false, |p| p != source && zoc.contains(&p));
                free.contains(l) && !through_zoc
            });
            ok
        }
        quickcheck(prop as fn(_, _, _) -> _);
    }

    #[test]
    fn prop_routes_are_connected() {
        fn prop(terrain: Vec<u8>, budget: u8) -> bool {
            let map = patchwork(&terrain);
            let mt = smallfoot();
            let profile = MovementProfile::new(&mt, budget as u32 % 10);
            let reach = compute_reachable(loc(3, 3), &profile, &map, &no_zoc());
            let ok = reach.locations().all(|l| match reach.route(l) {
                Some(r) => r.steps.windows(2).all(|w| tiles_adjacent(w[0], w[1])),
                None => false,
            });
            ok
        }
        quickcheck(prop as fn(_, _) -> _);
    }
}
