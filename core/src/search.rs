//! Searching the grid: movement ranges, routes and contiguous regions.

pub mod astar;
pub mod flood;
pub mod reach;

use crate::grid::coords::{ self, Coords };

use std::collections::HashMap;
use std::collections::VecDeque;

/// The context of a search defines the cost and bounds of the search space.
pub trait Context<C: Coords> {
    /// The maximum total cost of any path in the search tree.
    fn max_cost(&self) -> u32 {
        std::u32::MAX
    }
    /// Whether to stop the search upon reaching the given coordinates.
    fn exit(&mut self, _next: C) -> bool {
        false
    }
    fn heuristic(&mut self, from: C, to: C) -> u32 {
        coords::distance(from, to)
    }
    /// The cost of a single step between adjacent coordinates,
    /// or `None` if the step cannot be taken.
    fn cost(&mut self, from: C, to: C) -> Option<u32>;
    /// The total cost upon reaching `to` by a step of cost `step`, having
    /// spent `spent` before, or `None` if `to` cannot be reached that way.
    /// The result must not decrease as `spent` grows.
    fn accumulate(&mut self, spent: u32, _to: C, step: u32) -> Option<u32> {
        spent.checked_add(step)
    }
    /// Whether the search may continue from the given coordinates once
    /// they have been reached at the given cost. Coordinates that may not
    /// be expanded are leaves of the search tree. The start of a search
    /// is always expanded.
    fn expands(&mut self, _at: C, _cost: u32) -> bool {
        true
    }
    /// Coordinates that can be reached from the given coordinates in
    /// a single jump, at no cost.
    fn jumps(&mut self, _from: C) -> Vec<C> {
        Vec::new()
    }
}

/// A tree is constructed as the result of a search on a grid.
/// The root node of the tree is the start coordinates of the search
/// and the paths to the leaves are paths on the grid from the start
/// coordinates to other grid coordinates.
#[derive(Clone, Debug)]
pub struct Tree<C: Coords> {
    root: C,
    parents: HashMap<C, C>,
    costs: HashMap<C, u32>,
}

/// A node in a path of a search tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node<C> {
    pub coords: C,
    pub cost: u32,
}

impl<C> Node<C> {
    fn new(coords: C, cost: u32) -> Node<C> {
        Node { coords, cost }
    }
}

/// A path through a search tree, from the root to a goal.
pub type Path<C> = VecDeque<Node<C>>;

impl<C: Coords> Tree<C> {
    pub fn root(&self) -> C {
        self.root
    }

    /// The total cost of the cheapest path found to the given coordinates.
    pub fn cost(&self, c: C) -> Option<u32> {
        self.costs.get(&c).cloned()
    }

    pub fn contains(&self, c: C) -> bool {
        self.costs.contains_key(&c)
    }

    /// The coordinates preceding `c` on the cheapest path.
    pub fn parent(&self, c: C) -> Option<C> {
        self.parents.get(&c).cloned()
    }

    /// The number of coordinates in the tree, including the root.
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// Iterate over all coordinates in the tree with their costs,
    /// in no particular order.
    pub fn iter(&self) -> impl Iterator<Item=(C, u32)> + '_ {
        self.costs.iter().map(|(c, cost)| (*c, *cost))
    }

    /// Trace a path from the given goal back to the root of the tree. The path
    /// is returned in the natural (i.e. reverse) order from start to goal.
    pub fn path(&self, goal: C) -> Option<Path<C>> {
        let gcost = self.cost(goal)?;
        let mut path = VecDeque::with_capacity(coords::distance(self.root, goal) as usize + 1);
        path.push_front(Node::new(goal, gcost));
        let mut current = goal;
        while current != self.root {
            let parent = self.parent(current)?;
            let cost = self.cost(parent).unwrap_or(0);
            path.push_front(Node::new(parent, cost));
            current = parent;
        }
        Some(path)
    }
}
