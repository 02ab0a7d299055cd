//! Analytic combinatorics on labelled grammars.
//!
//! A combinatorial class is specified as a named, mutually recursive
//! collection of [`RuleSpec`]s over three atoms: [`RuleSpec::epsilon`]
//! (one object of weight 0), [`RuleSpec::singleton`] (one object of weight
//! 1), [`RuleSpec::union`] (disjoint union) and [`RuleSpec::product`]
//! (Cartesian product), plus [`RuleSpec::bound`] to restrict a class to a
//! weight interval. Once [sealed](GrammarBuilder::seal), a [`Grammar`]
//! answers, for any nonterminal and any weight `n`:
//!
//! - [`Grammar::count`], how many objects of weight `n` exist;
//! - [`Grammar::list`], enumerate them in a fixed canonical order;
//! - [`Grammar::unrank`], produce the `r`-th one in that order;
//! - [`Grammar::rank`], invert `unrank`;
//! - [`Grammar::random`], draw one uniformly at random.
//!
//! ```
//! use combinatorics::{GrammarBuilder, RuleSpec};
//!
//! // Tree = Leaf | Node(Tree, Tree), counted by the Catalan numbers.
//! let mut builder = GrammarBuilder::new();
//! builder
//!     .add("Leaf", RuleSpec::singleton(Obj::Leaf))
//!     .add(
//!         "Node",
//!         RuleSpec::product(
//!             "Tree",
//!             "Tree",
//!             |a, b| Obj::Node(Box::new(a), Box::new(b)),
//!             |o: &Obj| match o {
//!                 Obj::Node(a, b) => ((**a).clone(), (**b).clone()),
//!                 Obj::Leaf => unreachable!(),
//!             },
//!         ),
//!     )
//!     .add(
//!         "Tree",
//!         RuleSpec::union("Leaf", "Node", |o: &Obj| matches!(o, Obj::Leaf)),
//!     );
//! let grammar = builder.seal().unwrap();
//! assert_eq!(grammar.count("Tree", 4).unwrap(), 5);
//!
//! #[derive(Clone, PartialEq, Eq, Hash)]
//! enum Obj {
//!     Leaf,
//!     Node(Box<Obj>, Box<Obj>),
//! }
//! ```

#![deny(missing_copy_implementations, trivial_casts, trivial_numeric_casts)]
#![cfg_attr(test, deny(warnings))]

mod builder;
mod cache;
mod error;
mod grammar;
mod rule;
mod valuation;

pub use builder::GrammarBuilder;
pub use error::GrammarError;
pub use grammar::Grammar;
pub use rule::{RuleId, RuleSpec};
