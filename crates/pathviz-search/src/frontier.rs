use std::cmp::Ordering;
use std::collections::BinaryHeap;

use pathviz_core::Cell;

/// A frontier entry. `g` is the cost the cell had when pushed, so entries
/// superseded by a later, cheaper push can be recognised on pop.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Entry {
    pub(crate) cell: Cell,
    pub(crate) g: f64,
    pub(crate) f: f64,
    seq: u64,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap (max-heap) pops smallest f first, then the
        // earliest push among equal f.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

/// Min-f priority queue with FIFO tie-breaking.
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl Frontier {
    pub(crate) fn push(&mut self, cell: Cell, g: f64, f: f64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { cell, g, f, seq });
    }

    pub(crate) fn pop(&mut self) -> Option<Entry> {
        self.heap.pop()
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_lowest_f_first() {
        let mut q = Frontier::default();
        q.push(Cell::new(0, 0), 0.0, 5.0);
        q.push(Cell::new(0, 1), 0.0, 2.5);
        q.push(Cell::new(0, 2), 0.0, 9.0);
        let order: Vec<_> = std::iter::from_fn(|| q.pop()).map(|e| e.f).collect();
        assert_eq!(order, vec![2.5, 5.0, 9.0]);
    }

    #[test]
    fn equal_f_pops_in_insertion_order() {
        let mut q = Frontier::default();
        for c in 0..5 {
            q.push(Cell::new(0, c), 0.0, 3.0);
        }
        assert_eq!(q.len(), 5);
        let order: Vec<_> = std::iter::from_fn(|| q.pop()).map(|e| e.cell.col).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }
}
