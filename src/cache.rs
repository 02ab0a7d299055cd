//! Per-rule memoisation. Every constructor rule (`Union`, `Product`,
//! `Bound`) owns one [`Cache`]; `Epsilon` and `Singleton` are stateless and
//! go uncached since their operations are already closed-form.
//!
//! Caches are grow-only: a query either finds a cached answer or computes
//! and stores it, and no entry is ever invalidated or evicted.

use std::cell::RefCell;
use std::collections::HashMap;
use std::hash::Hash;

pub(crate) struct Cache<T> {
    count: RefCell<HashMap<usize, usize>>,
    list: RefCell<HashMap<usize, Vec<T>>>,
    unrank: RefCell<HashMap<(usize, usize), T>>,
    weight: RefCell<HashMap<T, usize>>,
    rank: RefCell<HashMap<T, usize>>,
}

impl<T> Default for Cache<T> {
    fn default() -> Self {
        Cache {
            count: RefCell::new(HashMap::new()),
            list: RefCell::new(HashMap::new()),
            unrank: RefCell::new(HashMap::new()),
            weight: RefCell::new(HashMap::new()),
            rank: RefCell::new(HashMap::new()),
        }
    }
}

impl<T: Clone + Eq + Hash> Cache<T> {
    pub(crate) fn count(&self, n: usize) -> Option<usize> {
        self.count.borrow().get(&n).copied()
    }

    pub(crate) fn put_count(&self, n: usize, value: usize) {
        self.count.borrow_mut().insert(n, value);
    }

    pub(crate) fn list(&self, n: usize) -> Option<Vec<T>> {
        self.list.borrow().get(&n).cloned()
    }

    pub(crate) fn put_list(&self, n: usize, value: Vec<T>) {
        self.list.borrow_mut().insert(n, value);
    }

    pub(crate) fn unrank(&self, n: usize, r: usize) -> Option<T> {
        self.unrank.borrow().get(&(n, r)).cloned()
    }

    pub(crate) fn put_unrank(&self, n: usize, r: usize, value: T) {
        self.unrank.borrow_mut().insert((n, r), value);
    }

    pub(crate) fn weight(&self, object: &T) -> Option<usize> {
        self.weight.borrow().get(object).copied()
    }

    pub(crate) fn put_weight(&self, object: T, value: usize) {
        self.weight.borrow_mut().insert(object, value);
    }

    pub(crate) fn rank(&self, object: &T) -> Option<usize> {
        self.rank.borrow().get(object).copied()
    }

    pub(crate) fn put_rank(&self, object: T, value: usize) {
        self.rank.borrow_mut().insert(object, value);
    }
}
