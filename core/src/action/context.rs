use tracing::{ debug, warn };

use crate::config::Config;
use crate::error::ActionError;
use crate::map::Map;

use super::{ Action, ActionStack };

/// A map together with its undo and redo history. All changes to the
/// map go through the context so that they can be undone.
#[derive(Clone, Debug)]
pub struct ActionContext {
    map: Map,
    undo: ActionStack,
    redo: ActionStack,
    /// The number of actions performed since the map was last saved,
    /// negative after undoing past the save point, `None` once the
    /// save point can no longer be reached.
    actions_since_save: Option<i64>,
}

impl ActionContext {
    pub fn new(map: Map, config: &Config) -> ActionContext {
        ActionContext {
            map,
            undo: ActionStack::new(config.action_stack_capacity),
            redo: ActionStack::new(config.action_stack_capacity),
            actions_since_save: Some(0),
        }
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn into_map(self) -> Map {
        self.map
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_size(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_size(&self) -> usize {
        self.redo.len()
    }

    /// The action that the next `undo` performs.
    pub fn last_undo_action_mut(&mut self) -> Option<&mut Action> {
        self.undo.last_mut()
    }

    /// Whether the map differs from the last saved one.
    pub fn modified(&self) -> bool {
        self.actions_since_save != Some(0)
    }

    pub fn mark_saved(&mut self) {
        self.actions_since_save = Some(0);
    }

    /// Forget all undo and redo history.
    pub fn clear_history(&mut self) {
        self.undo.clear();
        self.redo.clear();
        if self.actions_since_save != Some(0) {
            self.actions_since_save = None;
        }
    }

    /// Perform an action and record its inverse for undoing it.
    /// This discards the redo history.
    pub fn perform_action(&mut self, action: Action) -> Result<(), ActionError> {
        let undo_before = self.undo.len();
        let inverse = action.perform(&mut self.map)?;
        self.push_undo(inverse);
        self.redo.clear();
        self.actions_since_save = match self.actions_since_save {
            Some(n) if n >= 0 => Some(n + 1),
            _ => None,
        };
        debug!(action = action.name(), undo_before, undo_after = self.undo.len(),
               "performed action");
        Ok(())
    }

    /// Perform an action and fold its inverse into the most recent undo
    /// entry, as for strokes of a brush that are undone at once. Without
    /// an undo entry the inverse becomes one. This discards the redo history.
    pub fn perform_partial_action(&mut self, action: &Action) -> Result<(), ActionError> {
        let inverse = action.perform(&mut self.map)?;
        match self.undo.pop_recent() {
            Some(last) => {
                self.undo.push(last.prepend(inverse));
            }
            None => {
                self.push_undo(inverse);
                self.actions_since_save = self.actions_since_save.map(|n| n + 1);
            }
        }
        self.redo.clear();
        if self.actions_since_save.map_or(true, |n| n <= 0) {
            self.actions_since_save = None;
        }
        debug!(action = action.name(), undo = self.undo.len(), "performed partial action");
        Ok(())
    }

    /// Perform an action that cannot be undone. This discards the redo
    /// history and makes the undo history inexact, so the last save point
    /// is no longer reachable.
    pub fn perform_without_undo(&mut self, action: &Action) -> Result<(), ActionError> {
        action.perform_without_undo(&mut self.map)?;
        self.redo.clear();
        self.actions_since_save = None;
        debug!(action = action.name(), "performed action without undo");
        Ok(())
    }

    /// Undo the most recent action. Does nothing if there is nothing
    /// to undo. If undoing fails the history is unchanged.
    pub fn undo(&mut self) -> Result<(), ActionError> {
        let action = match self.undo.pop_recent() {
            Some(a) => a,
            None => {
                warn!("undo with empty undo stack");
                return Ok(())
            }
        };
        match action.perform(&mut self.map) {
            Ok(inverse) => {
                let evicted = self.redo.push(inverse).is_some();
                self.actions_since_save = self.actions_since_save.map(|n| n - 1);
                if evicted {
                    let len = self.redo.len() as i64;
                    self.forget_save_point(|n| -n > len);
                }
                debug!(action = action.name(), undo = self.undo.len(), redo = self.redo.len(),
                       "undone");
                Ok(())
            }
            Err(e) => {
                self.undo.push(action);
                Err(e)
            }
        }
    }

    /// Redo the most recently undone action. Does nothing if there is
    /// nothing to redo. If redoing fails the history is unchanged.
    pub fn redo(&mut self) -> Result<(), ActionError> {
        let action = match self.redo.pop_recent() {
            Some(a) => a,
            None => {
                warn!("redo with empty redo stack");
                return Ok(())
            }
        };
        match action.perform(&mut self.map) {
            Ok(inverse) => {
                self.push_undo(inverse);
                self.actions_since_save = self.actions_since_save.map(|n| n + 1);
                debug!(action = action.name(), undo = self.undo.len(), redo = self.redo.len(),
                       "redone");
                Ok(())
            }
            Err(e) => {
                self.redo.push(action);
                Err(e)
            }
        }
    }

    fn push_undo(&mut self, inverse: Action) {
        if self.undo.push(inverse).is_some() {
            let len = self.undo.len() as i64;
            self.forget_save_point(|n| n >= len);
        }
    }

    /// Forget the save point if it fell off the history.
    fn forget_save_point(&mut self, lost: impl Fn(i64) -> bool) {
        if self.actions_since_save.map_or(false, lost) {
            self.actions_since_save = None;
        }
    }
}
