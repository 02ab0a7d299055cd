//! The sealed [`Grammar`]: named rules linked together, their valuations
//! solved, and the recursive count/list/unrank/rank/weight/random
//! algorithms that read and write the per-rule memoisation caches.

use std::collections::HashMap;
use std::hash::Hash;

use log::trace;
use rand::Rng;

use crate::cache::Cache;
use crate::error::GrammarError;
use crate::rule::{Rule, RuleId};

/// A sealed grammar: a named mapping from nonterminal to rule, with every
/// rule linked by [`RuleId`] and every valuation solved.
///
/// Built with [`GrammarBuilder`](crate::GrammarBuilder); once sealed, the
/// mapping is immutable and only the query operations below may run.
pub struct Grammar<T> {
    names: HashMap<String, RuleId>,
    rule_names: Vec<String>,
    rules: Vec<Rule<T>>,
    valuations: Vec<usize>,
    caches: Vec<Cache<T>>,
}

impl<T> Grammar<T> {
    pub(crate) fn new(
        names: HashMap<String, RuleId>,
        rule_names: Vec<String>,
        rules: Vec<Rule<T>>,
        valuations: Vec<usize>,
        caches: Vec<Cache<T>>,
    ) -> Self {
        Grammar {
            names,
            rule_names,
            rules,
            valuations,
            caches,
        }
    }

    /// Resolves a nonterminal's name to the [`RuleId`] a query can be run
    /// against.
    pub fn root(&self, name: &str) -> Result<RuleId, GrammarError> {
        self.names.get(name).copied().ok_or_else(|| GrammarError::UnknownName {
            rule: "<query root>".to_string(),
            missing: name.to_string(),
        })
    }

    fn rule_name(&self, id: RuleId) -> &str {
        &self.rule_names[id.index()]
    }
}

impl<T: Clone + Eq + Hash> Grammar<T> {
    /// Minimum weight of any object `root` generates.
    pub fn valuation(&self, root: &str) -> Result<usize, GrammarError> {
        Ok(self.valuations[self.root(root)?.index()])
    }

    /// Number of distinct objects of weight exactly `n` that `root` generates.
    pub fn count(&self, root: &str, n: usize) -> Result<usize, GrammarError> {
        Ok(self.count_of(self.root(root)?, n))
    }

    /// Enumerates every object of weight `n` that `root` generates, in
    /// canonical order.
    pub fn list(&self, root: &str, n: usize) -> Result<Vec<T>, GrammarError> {
        Ok(self.list_of(self.root(root)?, n))
    }

    /// The `r`-th object (0-indexed) of weight `n`, in canonical order.
    pub fn unrank(&self, root: &str, n: usize, r: usize) -> Result<T, GrammarError> {
        self.unrank_of(self.root(root)?, n, r)
    }

    /// The position of `object` within `list(weight(object))`.
    pub fn rank(&self, root: &str, object: &T) -> Result<usize, GrammarError> {
        self.rank_of(self.root(root)?, object)
    }

    /// The weight of `object` under `root`.
    pub fn weight(&self, root: &str, object: &T) -> Result<usize, GrammarError> {
        self.weight_of(self.root(root)?, object)
    }

    /// Draws a uniformly random object of weight `n`, consuming one
    /// uniform draw from `rng`. Fails with [`GrammarError::EmptyClass`]
    /// rather than drawing from an empty range when no such object exists.
    pub fn random(&self, root: &str, n: usize, rng: &mut impl Rng) -> Result<T, GrammarError> {
        let id = self.root(root)?;
        let count = self.count_of(id, n);
        if count == 0 {
            return Err(GrammarError::EmptyClass { weight: n });
        }
        let r = rng.gen_range(0..count);
        trace!("random draw: weight {n}, rank {r} of {count}");
        self.unrank_of(id, n, r)
    }

    fn valuation_of(&self, id: RuleId) -> usize {
        self.valuations[id.index()]
    }

    fn count_of(&self, id: RuleId, n: usize) -> usize {
        match &self.rules[id.index()] {
            Rule::Epsilon(_) => usize::from(n == 0),
            Rule::Singleton(_) => usize::from(n == 1),
            Rule::Union { left, right, .. } => {
                let cache = &self.caches[id.index()];
                if let Some(c) = cache.count(n) {
                    return c;
                }
                let c = self.count_of(*left, n) + self.count_of(*right, n);
                cache.put_count(n, c);
                c
            }
            Rule::Product { left, right, .. } => {
                let cache = &self.caches[id.index()];
                if let Some(c) = cache.count(n) {
                    return c;
                }
                let blocks = self.product_block_counts(*left, *right, n);
                let c = blocks.iter().map(|&(_, _, block)| block).sum();
                cache.put_count(n, c);
                c
            }
            Rule::Bound { inner, lo, hi } => {
                if n < *lo || n > *hi {
                    0
                } else {
                    self.count_of(*inner, n)
                }
            }
        }
    }

    /// Walks the product blocks for weight `n`, returning `(size_left,
    /// block_start, block_size)` for each nonempty `size_left` in
    /// `val(left)..=n - val(right)`.
    fn product_block_counts(&self, left: RuleId, right: RuleId, n: usize) -> Vec<(usize, usize, usize)> {
        let val_l = self.valuation_of(left);
        let val_r = self.valuation_of(right);
        if n < val_l + val_r {
            return vec![];
        }
        let hi = n - val_r;
        let mut begin = 0usize;
        let mut blocks = Vec::with_capacity(hi - val_l + 1);
        for i in val_l..=hi {
            let block = self.count_of(left, i) * self.count_of(right, n - i);
            blocks.push((i, begin, block));
            begin += block;
        }
        blocks
    }

    fn list_of(&self, id: RuleId, n: usize) -> Vec<T> {
        match &self.rules[id.index()] {
            Rule::Epsilon(object) => {
                if n == 0 {
                    vec![object.clone()]
                } else {
                    vec![]
                }
            }
            Rule::Singleton(object) => {
                if n == 1 {
                    vec![object.clone()]
                } else {
                    vec![]
                }
            }
            Rule::Union { left, right, .. } => {
                let cache = &self.caches[id.index()];
                if let Some(v) = cache.list(n) {
                    return v;
                }
                let mut v = self.list_of(*left, n);
                v.extend(self.list_of(*right, n));
                cache.put_list(n, v.clone());
                v
            }
            Rule::Product { left, right, build, .. } => {
                let cache = &self.caches[id.index()];
                if let Some(v) = cache.list(n) {
                    return v;
                }
                let mut result = Vec::new();
                for (size_left, _, _) in self.product_block_counts(*left, *right, n) {
                    let size_right = n - size_left;
                    let list_l = self.list_of(*left, size_left);
                    let list_r = self.list_of(*right, size_right);
                    for a in &list_l {
                        for b in &list_r {
                            result.push(build(a.clone(), b.clone()));
                        }
                    }
                }
                cache.put_list(n, result.clone());
                result
            }
            Rule::Bound { inner, lo, hi } => {
                if n < *lo || n > *hi {
                    vec![]
                } else {
                    self.list_of(*inner, n)
                }
            }
        }
    }

    fn unrank_of(&self, id: RuleId, n: usize, r: usize) -> Result<T, GrammarError> {
        match &self.rules[id.index()] {
            Rule::Epsilon(object) => {
                if n != 0 {
                    return Err(GrammarError::WeightMismatch { expected: 0, got: n });
                }
                if r != 0 {
                    return Err(GrammarError::RankOutOfBounds { weight: n, rank: r, count: 1 });
                }
                Ok(object.clone())
            }
            Rule::Singleton(object) => {
                if n != 1 {
                    return Err(GrammarError::WeightMismatch { expected: 1, got: n });
                }
                if r != 0 {
                    return Err(GrammarError::RankOutOfBounds { weight: n, rank: r, count: 1 });
                }
                Ok(object.clone())
            }
            Rule::Union { left, right, .. } => {
                let cache = &self.caches[id.index()];
                if let Some(object) = cache.unrank(n, r) {
                    return Ok(object);
                }
                let count_l = self.count_of(*left, n);
                let count_r = self.count_of(*right, n);
                if r >= count_l + count_r {
                    return Err(GrammarError::RankOutOfBounds {
                        weight: n,
                        rank: r,
                        count: count_l + count_r,
                    });
                }
                let object = if r < count_l {
                    self.unrank_of(*left, n, r)?
                } else {
                    self.unrank_of(*right, n, r - count_l)?
                };
                cache.put_unrank(n, r, object.clone());
                Ok(object)
            }
            Rule::Product { left, right, build, .. } => {
                let cache = &self.caches[id.index()];
                if let Some(object) = cache.unrank(n, r) {
                    return Ok(object);
                }
                let blocks = self.product_block_counts(*left, *right, n);
                let total: usize = blocks.iter().map(|(_, _, block)| block).sum();
                if r >= total {
                    return Err(GrammarError::RankOutOfBounds { weight: n, rank: r, count: total });
                }
                let (size_left, block_begin, _) = blocks
                    .into_iter()
                    .find(|&(_, begin, block)| r < begin + block)
                    .expect("rank within the total must fall in some block");
                let size_right = n - size_left;
                let rel = r - block_begin;
                let s = self.count_of(*right, size_right);
                let a = self.unrank_of(*left, size_left, rel / s)?;
                let b = self.unrank_of(*right, size_right, rel % s)?;
                let object = build(a, b);
                cache.put_unrank(n, r, object.clone());
                Ok(object)
            }
            Rule::Bound { inner, lo, hi } => {
                if n < *lo || n > *hi {
                    return Err(GrammarError::WeightOutOfBounds { weight: n, lo: *lo, hi: *hi });
                }
                self.unrank_of(*inner, n, r)
            }
        }
    }

    fn weight_of(&self, id: RuleId, object: &T) -> Result<usize, GrammarError> {
        match &self.rules[id.index()] {
            Rule::Epsilon(empty) => {
                if object == empty {
                    Ok(0)
                } else {
                    Err(GrammarError::NotInClass { rule: self.rule_name(id).to_string() })
                }
            }
            Rule::Singleton(atom) => {
                if object == atom {
                    Ok(1)
                } else {
                    Err(GrammarError::NotInClass { rule: self.rule_name(id).to_string() })
                }
            }
            Rule::Union { left, right, belongs_left } => {
                let cache = &self.caches[id.index()];
                if let Some(w) = cache.weight(object) {
                    return Ok(w);
                }
                let w = if belongs_left(object) {
                    self.weight_of(*left, object)?
                } else {
                    self.weight_of(*right, object)?
                };
                cache.put_weight(object.clone(), w);
                Ok(w)
            }
            Rule::Product { left, right, split, .. } => {
                let cache = &self.caches[id.index()];
                if let Some(w) = cache.weight(object) {
                    return Ok(w);
                }
                let (a, b) = split(object);
                let w = self.weight_of(*left, &a)? + self.weight_of(*right, &b)?;
                cache.put_weight(object.clone(), w);
                Ok(w)
            }
            Rule::Bound { inner, lo, hi } => {
                let w = self.weight_of(*inner, object)?;
                if w < *lo || w > *hi {
                    Err(GrammarError::WeightOutOfBounds { weight: w, lo: *lo, hi: *hi })
                } else {
                    Ok(w)
                }
            }
        }
    }

    fn rank_of(&self, id: RuleId, object: &T) -> Result<usize, GrammarError> {
        match &self.rules[id.index()] {
            Rule::Epsilon(_) | Rule::Singleton(_) => Ok(0),
            Rule::Union { left, right, belongs_left } => {
                let cache = &self.caches[id.index()];
                if let Some(r) = cache.rank(object) {
                    return Ok(r);
                }
                let r = if belongs_left(object) {
                    self.rank_of(*left, object)?
                } else {
                    let w = self.weight_of(*right, object)?;
                    let count_l = self.count_of(*left, w);
                    count_l + self.rank_of(*right, object)?
                };
                cache.put_rank(object.clone(), r);
                Ok(r)
            }
            Rule::Product { left, right, split, .. } => {
                let cache = &self.caches[id.index()];
                if let Some(r) = cache.rank(object) {
                    return Ok(r);
                }
                let (a, b) = split(object);
                let wa = self.weight_of(*left, &a)?;
                let wb = self.weight_of(*right, &b)?;
                let val_l = self.valuation_of(*left);
                let mut offset = 0usize;
                for i in val_l..wa {
                    offset += self.count_of(*left, i) * self.count_of(*right, wa + wb - i);
                }
                offset += self.count_of(*right, wb) * self.rank_of(*left, &a)?;
                offset += self.rank_of(*right, &b)?;
                cache.put_rank(object.clone(), offset);
                Ok(offset)
            }
            Rule::Bound { inner, .. } => self.rank_of(*inner, object),
        }
    }
}
