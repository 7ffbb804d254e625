use std::collections::VecDeque;

use crate::maze::Coord;

/// A pending cell together with the number of steps taken to discover it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FrontierEntry {
    pub coord: Coord,
    pub steps: usize,
}

/// Ordering of discovered-but-unprocessed cells. The choice of frontier is the only
/// thing that distinguishes the search strategies.
pub trait Frontier {
    fn push(&mut self, entry: FrontierEntry);
    fn pop(&mut self) -> Option<FrontierEntry>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Last in, first out: depth-first search.
#[derive(Default)]
pub struct StackFrontier(Vec<FrontierEntry>);

impl Frontier for StackFrontier {
    fn push(&mut self, entry: FrontierEntry) {
        self.0.push(entry);
    }

    fn pop(&mut self) -> Option<FrontierEntry> {
        self.0.pop()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

/// First in, first out: breadth-first search.
#[derive(Default)]
pub struct QueueFrontier(VecDeque<FrontierEntry>);

impl Frontier for QueueFrontier {
    fn push(&mut self, entry: FrontierEntry) {
        self.0.push_back(entry);
    }

    fn pop(&mut self) -> Option<FrontierEntry> {
        self.0.pop_front()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(x: u16) -> FrontierEntry {
        FrontierEntry {
            coord: (x, 0),
            steps: 0,
        }
    }

    #[test]
    fn test_stack_is_lifo() {
        let mut frontier = StackFrontier::default();
        (0..3).for_each(|x| frontier.push(entry(x)));
        assert_eq!(frontier.len(), 3);
        assert_eq!(frontier.pop(), Some(entry(2)));
        assert_eq!(frontier.pop(), Some(entry(1)));
        assert_eq!(frontier.pop(), Some(entry(0)));
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_queue_is_fifo() {
        let mut frontier = QueueFrontier::default();
        (0..3).for_each(|x| frontier.push(entry(x)));
        assert_eq!(frontier.pop(), Some(entry(0)));
        assert_eq!(frontier.pop(), Some(entry(1)));
        assert_eq!(frontier.pop(), Some(entry(2)));
        assert_eq!(frontier.pop(), None);
    }
}
