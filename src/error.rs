//! Value-level errors returned by every fallible operation in this crate.
//!
//! There are no panics on user-reachable paths and no silent failures: a
//! query either returns `Ok` or one of these variants.

use std::fmt;

/// Every way a grammar can fail to be built, or a query against it can fail.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GrammarError {
    /// `unrank` was called with a rank outside `[0, count(weight))`.
    RankOutOfBounds {
        /// The weight that was queried.
        weight: usize,
        /// The out-of-bounds rank that was given.
        rank: usize,
        /// The actual number of objects of that weight.
        count: usize,
    },
    /// `unrank` was called on an Epsilon or Singleton rule with a weight
    /// other than that rule's valuation.
    WeightMismatch {
        /// The rule's own weight (0 for Epsilon, 1 for Singleton).
        expected: usize,
        /// The weight that was given.
        got: usize,
    },
    /// A weight fell outside a [`Bound`](crate::RuleSpec::Bound) rule's interval.
    WeightOutOfBounds {
        /// The offending weight.
        weight: usize,
        /// Inclusive lower bound of the interval.
        lo: usize,
        /// Inclusive upper bound of the interval.
        hi: usize,
    },
    /// An object was not a member of the class a rule generates.
    NotInClass {
        /// Name of the rule the object was tested against.
        rule: String,
    },
    /// The grammar was rejected at sealing time because some nonterminal's
    /// valuation remained infinite after the fixed point converged.
    InvalidGrammar {
        /// Names of every nonterminal with infinite valuation.
        names: Vec<String>,
    },
    /// A `Union`, `Product` or `Bound` rule named a nonterminal that does
    /// not exist in the grammar.
    UnknownName {
        /// Name of the rule doing the referencing.
        rule: String,
        /// The name it referenced that could not be found.
        missing: String,
    },
    /// `random` was asked to draw from a class with no objects of the
    /// requested weight.
    EmptyClass {
        /// The weight that has no objects.
        weight: usize,
    },
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::RankOutOfBounds { weight, rank, count } => write!(
                f,
                "rank {rank} is out of bounds for weight {weight}: only {count} objects exist"
            ),
            GrammarError::WeightMismatch { expected, got } => write!(
                f,
                "weight {got} does not match this rule's own weight {expected}"
            ),
            GrammarError::WeightOutOfBounds { weight, lo, hi } => write!(
                f,
                "weight {weight} is outside the bound [{lo}, {hi}]"
            ),
            GrammarError::NotInClass { rule } => {
                write!(f, "object is not a member of the class generated by `{rule}`")
            }
            GrammarError::InvalidGrammar { names } => write!(
                f,
                "grammar is invalid: nonterminal(s) with infinite valuation: {}",
                names.join(", ")
            ),
            GrammarError::UnknownName { rule, missing } => write!(
                f,
                "rule `{rule}` refers to unknown nonterminal `{missing}`"
            ),
            GrammarError::EmptyClass { weight } => {
                write!(f, "no objects of weight {weight} exist")
            }
        }
    }
}

impl std::error::Error for GrammarError {}
