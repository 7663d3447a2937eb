
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::collections::HashMap;

use tracing::trace;

use crate::grid::Coords;
use crate::grid::coords;

use super::{ Context, Tree, Path };

/// A node in the "open" list of the A* algorithm to prioritise the search.
struct Open<C> {
    coords: C,
    cost: u32,
    priority: u32,
    seq: u64,
}

impl<C> PartialEq for Open<C> {
    fn eq(&self, other: &Open<C>) -> bool {
        self.priority == other.priority && self.seq == other.seq
    }
}

impl<C> Eq for Open<C> {}

impl<C> PartialOrd for Open<C> {
    fn partial_cmp(&self, other: &Open<C>) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C> Ord for Open<C> {
    fn cmp(&self, other: &Open<C>) -> Ordering {
        // Lower priorities (= estimated total costs) are considered
        // "greater" for the binary heap, as are earlier insertions
        // among equal priorities.
        other.priority.cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Beginning at the given start coordinates, perform a cost-aware search across
/// the grid, subject to the constraints of the given context, returning the
/// resulting search tree from which paths may be extracted.
///
/// Without a goal this is Dijkstra's algorithm and the tree holds the cheapest
/// path to every coordinate within `max_cost`. Among paths of equal cost the
/// one discovered first is kept, i.e. neighbours are preferred in the order
/// of [`Direction::all`], followed by jumps.
///
/// The search stops when any of the following conditions is met:
///
///   * Goal coordinates are given and found.
///   * The `exit` function signals termination.
///   * The grid has been exhaustively searched.
///
/// [`Direction::all`]: ../../grid/cube/dir/enum.Direction.html#method.all
pub fn tree<C: Coords>(
    start: C,
    goal: Option<C>,
    ctx: &mut impl Context<C>
) -> Tree<C> {
    let max_cost     = ctx.max_cost();
    let mut parents  = HashMap::new();
    let mut costs    = HashMap::new();
    let mut open     = BinaryHeap::new();
    let mut seq      = 0u64;
    open.push(Open { coords: start, cost: 0, priority: 0, seq });
    costs.insert(start, 0);
    while let Some(parent) = open.pop() {
        let pc = parent.coords;
        if parent.cost > *costs.get(&pc).unwrap_or(&std::u32::MAX) {
            // Superseded by a cheaper path.
            continue
        }
        if ctx.exit(pc) || goal.map_or(false, |g| g == pc) {
            break
        }
        if pc != start && !ctx.expands(pc, parent.cost) {
            continue
        }
        let steps = coords::neighbours(pc)
            .filter_map(|cc| ctx.cost(pc, cc).map(|cost| (cc, cost)))
            .collect::<Vec<_>>();
        let jumps = ctx.jumps(pc).into_iter()
            .filter(|cc| *cc != pc)
            .map(|cc| (cc, 0));
        for (cc, step) in steps.into_iter().chain(jumps) {
            let new_cost = match ctx.accumulate(parent.cost, cc, step) {
                Some(c) if c <= max_cost => c,
                _ => continue
            };
            let better = costs.get(&cc).map_or(true, |old| new_cost < *old);
            if better {
                parents.insert(cc, pc);
                costs.insert(cc, new_cost);
                let estimate = goal.map_or(0, |g| ctx.heuristic(cc, g));
                seq += 1;
                open.push(Open {
                    coords: cc,
                    cost: new_cost,
                    priority: new_cost.saturating_add(estimate),
                    seq,
                });
            }
        }
    }
    trace!(start = %start, explored = costs.len(), "search finished");
    Tree { root: start, parents, costs }
}

/// Beginning at the given start coordinates, perform a cost-aware search for
/// a path to the given goal coordinates across the grid, subject to the
/// constraints of the given context.
///
/// This is equivalent to:
/// ```raw
/// tree(start, Some(goal), ctx).path(goal)
/// ```
pub fn path<C: Coords>(
    start: C,
    goal: C,
    ctx: &mut impl Context<C>
) -> Option<Path<C>> {
    tree(start, Some(goal), ctx).path(goal)
}
