use std::collections::VecDeque;

use super::Action;

/// A bounded history of actions. Once full, pushing an action
/// discards the oldest one.
#[derive(Clone, Debug)]
pub struct ActionStack {
    actions: VecDeque<Action>,
    capacity: usize,
}

impl ActionStack {
    pub fn new(capacity: usize) -> ActionStack {
        ActionStack { actions: VecDeque::new(), capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Push an action onto the recent end, returning the oldest
    /// action if it had to be discarded.
    pub fn push(&mut self, action: Action) -> Option<Action> {
        self.actions.push_back(action);
        if self.actions.len() > self.capacity {
            self.actions.pop_front()
        } else {
            None
        }
    }

    pub fn pop_recent(&mut self) -> Option<Action> {
        self.actions.pop_back()
    }

    pub fn last(&self) -> Option<&Action> {
        self.actions.back()
    }

    pub fn last_mut(&mut self) -> Option<&mut Action> {
        self.actions.back_mut()
    }

    pub fn clear(&mut self) {
        self.actions.clear();
    }

    /// The actions from the oldest to the most recent.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item=&Action> {
        self.actions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::*;

    fn marker(n: usize) -> Action {
        Action::RotateMap { quarter_turns: n as i32 }
    }

    #[test]
    fn test_push_pop() {
        let mut s = ActionStack::new(3);
        assert_eq!(s.pop_recent(), None);
        assert_eq!(s.push(marker(1)), None);
        assert_eq!(s.push(marker(2)), None);
        assert_eq!(s.last(), Some(&marker(2)));
        assert_eq!(s.pop_recent(), Some(marker(2)));
        assert_eq!(s.pop_recent(), Some(marker(1)));
        assert!(s.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut s = ActionStack::new(3);
        s.push(marker(1));
        s.push(marker(2));
        s.clear();
        assert!(s.is_empty());
        assert_eq!(s.last_mut(), None);
    }

    #[test]
    fn prop_capacity() {
        fn prop(capacity: u8, pushes: u8) -> bool {
            let capacity = capacity as usize % 20;
            let pushes = pushes as usize % 50;
            let mut s = ActionStack::new(capacity);
            let evicted = (0 .. pushes).filter_map(|i| s.push(marker(i))).count();
            let oldest = pushes.saturating_sub(capacity);
            let kept = s.iter().cloned().eq((oldest .. pushes).map(marker));
            s.len() == pushes.min(capacity) && evicted == oldest && kept
        }
        quickcheck(prop as fn(_, _) -> _);
    }

    #[test]
    fn test_capacity_plus_one() {
        let mut s = ActionStack::new(100);
        for i in 0 .. 101 {
            s.push(marker(i));
        }
        assert_eq!(s.len(), 100);
        assert_eq!(s.iter().next(), Some(&marker(1)));
        assert_eq!(s.last(), Some(&marker(100)));
    }
}
