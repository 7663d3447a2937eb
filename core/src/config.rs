//! Tunables of maps and action contexts.

/// Default number of actions kept on each of the undo and redo stacks.
pub const DEFAULT_ACTION_STACK_CAPACITY: usize = 100;

/// Default width of the border ring around the playable area of a map.
pub const DEFAULT_BORDER_SIZE: i32 = 1;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Maximum number of actions on the undo (and the redo) stack.
    /// The oldest actions are discarded first.
    pub action_stack_capacity: usize,
    /// Width of the border ring of new maps.
    pub border_size: i32,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            action_stack_capacity: DEFAULT_ACTION_STACK_CAPACITY,
            border_size: DEFAULT_BORDER_SIZE,
        }
    }
}
