//! Ordered result sink shared by benchmark workers.
//!
//! Workers finish in any order; each pushes its result with the index of the unit it measured. The sink
//! serializes writes behind a mutex and hands results back in index order, so reports are deterministic
//! regardless of scheduling.

use std::collections::BTreeMap;

use parking_lot::Mutex;

#[derive(Debug)]
pub struct OrderedSink<T> {
    slots: Mutex<BTreeMap<usize, T>>,
}

impl<T> OrderedSink<T> {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(BTreeMap::new()),
        }
    }

    /// Store the result for slot `index`. A second push to the same slot replaces the first.
    pub fn push(&self, index: usize, item: T) {
        self.slots.lock().insert(index, item);
    }

    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.lock().is_empty()
    }

    /// All results, ordered by index.
    pub fn into_inner(self) -> Vec<T> {
        self.slots.into_inner().into_values().collect()
    }
}

impl<T> Default for OrderedSink<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;

    #[test]
    fn results_come_back_in_index_order() {
        let sink = OrderedSink::new();
        sink.push(2, "c");
        sink.push(0, "a");
        sink.push(1, "b");
        assert_eq!(sink.len(), 3);
        assert_eq!(sink.into_inner(), vec!["a", "b", "c"]);
    }

    #[test]
    fn concurrent_pushes_are_serialized() {
        let sink = OrderedSink::new();
        (0..64usize).into_par_iter().rev().for_each(|i| sink.push(i, i * 10));
        let out = sink.into_inner();
        assert_eq!(out.len(), 64);
        assert!(out.iter().enumerate().all(|(i, v)| *v == i * 10));
    }
}
