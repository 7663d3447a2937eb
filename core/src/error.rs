//! Errors of actions and moves.
//!
//! A path search that finds nothing is not an error: a location missing
//! from a [`ReachableSet`] is the "no path" answer. Undo and redo on an
//! empty stack are no-ops and not errors either.
//!
//! [`ReachableSet`]: ../search/reach/struct.ReachableSet.html

use crate::grid::HexLocation;

/// Errors raised when constructing or performing an [`Action`].
///
/// [`Action`]: ../action/enum.Action.html
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// The action exists but is not (yet) supported. Commands producing
    /// it should not be offered.
    #[error("action not implemented: {0}")]
    NotImplemented(&'static str),

    /// The action was requested with invalid parameters.
    #[error("action creation failed: {0}")]
    CreationFailed(String),

    /// A map operation was requested beyond the current map bounds.
    #[error("{operation} by {amount} is out of range for a map dimension of {size}")]
    OperationOutOfRange {
        operation: &'static str,
        amount: i32,
        size: i32,
    },
}

impl ActionError {
    pub(crate) fn creation_failed(msg: impl Into<String>) -> ActionError {
        ActionError::CreationFailed(msg.into())
    }
}

/// Errors raised when moving a unit.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// The destination is not within the unit's movement range.
    #[error("destination {0} is unreachable")]
    Unreachable(HexLocation),

    /// The destination can only be reached in a later turn.
    #[error("destination {dest} is {turns} turn(s) away")]
    BeyondTurn {
        dest: HexLocation,
        turns: u32,
    },

    /// Performing the move on the map failed.
    #[error(transparent)]
    Action(#[from] ActionError),
}
