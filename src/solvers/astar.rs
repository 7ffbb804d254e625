use std::{cmp::Reverse, collections::BinaryHeap};

use ordered_float::OrderedFloat;

use super::frontier::{Frontier, FrontierEntry};
use crate::maze::Coord;

/// Straight-line distance between two cells, in cells.
pub fn euclidean_distance(a: Coord, b: Coord) -> f64 {
    let dx = a.0 as f64 - b.0 as f64;
    let dy = a.1 as f64 - b.1 as f64;
    (dx * dx + dy * dy).sqrt()
}

/// Pops the entry with the lowest `steps + distance to goal`.
///
/// Entries with equal cost come out in insertion order.
pub struct PriorityFrontier {
    // Using Reverse to turn the max-heap into a min-heap
    heap: BinaryHeap<Reverse<(OrderedFloat<f64>, u64, FrontierEntry)>>,
    goal: Coord,
    pushed: u64,
}

impl PriorityFrontier {
    pub fn new(goal: Coord) -> Self {
        PriorityFrontier {
            heap: BinaryHeap::new(),
            goal,
            pushed: 0,
        }
    }

    fn cost(&self, entry: &FrontierEntry) -> f64 {
        entry.steps as f64 + euclidean_distance(entry.coord, self.goal)
    }
}

impl Frontier for PriorityFrontier {
    fn push(&mut self, entry: FrontierEntry) {
        let cost = OrderedFloat(self.cost(&entry));
        self.heap.push(Reverse((cost, self.pushed, entry)));
        self.pushed += 1;
    }

    fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop().map(|Reverse((_, _, entry))| entry)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean_distance() {
        assert_eq!(euclidean_distance((0, 0), (3, 4)), 5.0);
        assert_eq!(euclidean_distance((3, 4), (0, 0)), 5.0);
        assert_eq!(euclidean_distance((2, 2), (2, 2)), 0.0);
    }

    #[test]
    fn test_pops_lowest_estimated_cost() {
        let mut frontier = PriorityFrontier::new((4, 4));
        // cost 0 + 5.66
        frontier.push(FrontierEntry {
            coord: (0, 0),
            steps: 0,
        });
        // cost 6 + 1
        frontier.push(FrontierEntry {
            coord: (4, 3),
            steps: 6,
        });
        // cost 2 + 2.83
        frontier.push(FrontierEntry {
            coord: (2, 2),
            steps: 2,
        });
        assert_eq!(frontier.pop().map(|e| e.coord), Some((2, 2)));
        assert_eq!(frontier.pop().map(|e| e.coord), Some((0, 0)));
        assert_eq!(frontier.pop().map(|e| e.coord), Some((4, 3)));
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut frontier = PriorityFrontier::new((2, 2));
        // Both are 1 step plus 1 cell away
        frontier.push(FrontierEntry {
            coord: (2, 1),
            steps: 1,
        });
        frontier.push(FrontierEntry {
            coord: (1, 2),
            steps: 1,
        });
        assert_eq!(frontier.pop().map(|e| e.coord), Some((2, 1)));
        assert_eq!(frontier.pop().map(|e| e.coord), Some((1, 2)));
    }
}
