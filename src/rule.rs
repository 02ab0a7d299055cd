//! The rule algebra: epsilon and singleton atoms, disjoint union, Cartesian
//! product, and a weight-bounding wrapper.
//!
//! Rules never hold their children by value. A [`Union`](RuleSpec::Union) or
//! [`Product`](RuleSpec::Product) refers to its siblings by name while the
//! grammar is being built, and by [`RuleId`] (an index into the sealed
//! grammar's rule arena) once it has been sealed. This is what lets a rule
//! refer to itself, directly or through a cycle, without cyclic ownership.

use std::fmt;

/// Index of a rule inside a sealed [`Grammar`](crate::Grammar)'s arena.
///
/// Obtained by resolving a nonterminal's name at seal time; never
/// constructed directly by callers.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct RuleId(pub(crate) usize);

impl RuleId {
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A predicate deciding, for an object produced by a [`Union`](RuleSpec::Union),
/// which side produced it.
pub type BelongsLeft<T> = Box<dyn Fn(&T) -> bool>;
/// Builds a product object from a left and right component.
pub type Build<T> = Box<dyn Fn(T, T) -> T>;
/// Splits a product object into its left and right component.
pub type Split<T> = Box<dyn Fn(&T) -> (T, T)>;

/// A rule as given to a [`GrammarBuilder`](crate::GrammarBuilder), with
/// children referenced by name.
///
/// Construct one with [`RuleSpec::epsilon`], [`RuleSpec::singleton`],
/// [`RuleSpec::union`], [`RuleSpec::product`] or [`RuleSpec::bound`].
pub enum RuleSpec<T> {
    /// A single object of weight 0.
    Epsilon(T),
    /// A single object of weight 1.
    Singleton(T),
    /// Disjoint union of the named `left` and `right` subrules.
    Union {
        /// Name of the left subrule.
        left: String,
        /// Name of the right subrule.
        right: String,
        /// Decides, for any object the union produces, whether it came from `left`.
        belongs_left: BelongsLeft<T>,
    },
    /// Cartesian product of the named `left` and `right` subrules.
    Product {
        /// Name of the left subrule.
        left: String,
        /// Name of the right subrule.
        right: String,
        /// Combines a left and a right object into a product object.
        build: Build<T>,
        /// Recovers the left and right components of a product object.
        split: Split<T>,
    },
    /// Restriction of the named `inner` subrule to weights in `[lo, hi]`.
    Bound {
        /// Name of the restricted subrule.
        inner: String,
        /// Inclusive lower bound.
        lo: usize,
        /// Inclusive upper bound.
        hi: usize,
    },
}

impl<T> RuleSpec<T> {
    /// A single "empty" object of weight 0.
    pub fn epsilon(object: T) -> Self {
        RuleSpec::Epsilon(object)
    }

    /// A single atom of weight 1.
    pub fn singleton(object: T) -> Self {
        RuleSpec::Singleton(object)
    }

    /// Disjoint union of `left` and `right`, ordered left-before-right.
    ///
    /// `belongs_left` must be a total, consistent partition: every object the
    /// union produces belongs to exactly one side, and the predicate must
    /// report it correctly. The grammar cannot verify this; see the crate
    /// documentation.
    pub fn union(
        left: impl Into<String>,
        right: impl Into<String>,
        belongs_left: impl Fn(&T) -> bool + 'static,
    ) -> Self {
        RuleSpec::Union {
            left: left.into(),
            right: right.into(),
            belongs_left: Box::new(belongs_left),
        }
    }

    /// Cartesian product of `left` and `right`.
    ///
    /// `split` must be the left inverse of `build` on every legal pair:
    /// `split(build(a, b)) == (a, b)`.
    pub fn product(
        left: impl Into<String>,
        right: impl Into<String>,
        build: impl Fn(T, T) -> T + 'static,
        split: impl Fn(&T) -> (T, T) + 'static,
    ) -> Self {
        RuleSpec::Product {
            left: left.into(),
            right: right.into(),
            build: Box::new(build),
            split: Box::new(split),
        }
    }

    /// Restricts `inner` to objects whose weight lies in `[lo, hi]`.
    pub fn bound(inner: impl Into<String>, lo: usize, hi: usize) -> Self {
        RuleSpec::Bound {
            inner: inner.into(),
            lo,
            hi,
        }
    }

    /// Names of the subrules this spec refers to, for validation.
    pub(crate) fn referenced_names(&self) -> Vec<&str> {
        match self {
            RuleSpec::Epsilon(_) | RuleSpec::Singleton(_) => vec![],
            RuleSpec::Union { left, right, .. } => vec![left.as_str(), right.as_str()],
            RuleSpec::Product { left, right, .. } => vec![left.as_str(), right.as_str()],
            RuleSpec::Bound { inner, .. } => vec![inner.as_str()],
        }
    }
}

/// A rule inside a sealed grammar, with children resolved to [`RuleId`]s.
pub(crate) enum Rule<T> {
    Epsilon(T),
    Singleton(T),
    Union {
        left: RuleId,
        right: RuleId,
        belongs_left: BelongsLeft<T>,
    },
    Product {
        left: RuleId,
        right: RuleId,
        build: Build<T>,
        split: Split<T>,
    },
    Bound {
        inner: RuleId,
        lo: usize,
        hi: usize,
    },
}

