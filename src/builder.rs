//! Builds a [`Grammar`] from a name→rule mapping and seals it.

use std::collections::HashMap;
use std::hash::Hash;

use log::debug;

use crate::cache::Cache;
use crate::error::GrammarError;
use crate::grammar::Grammar;
use crate::rule::{Rule, RuleId, RuleSpec};
use crate::valuation;

/// Accumulates named rules before they are linked together and sealed into
/// a [`Grammar`].
///
/// ```
/// use combinatorics::{GrammarBuilder, RuleSpec};
///
/// // Strings over {A, B}, counted by 2^n.
/// let mut builder: GrammarBuilder<String> = GrammarBuilder::new();
/// builder
///     .add("Vide", RuleSpec::epsilon(String::new()))
///     .add("AtomA", RuleSpec::singleton("A".to_string()))
///     .add("AtomB", RuleSpec::singleton("B".to_string()))
///     .add("Au", RuleSpec::product("AtomA", "Mot", |a, b| a + &b, |o: &String| (o[..1].to_string(), o[1..].to_string())))
///     .add("Bu", RuleSpec::product("AtomB", "Mot", |a, b| a + &b, |o: &String| (o[..1].to_string(), o[1..].to_string())))
///     .add("Cas1", RuleSpec::union("Au", "Bu", |o: &String| o.starts_with('A')))
///     .add("Mot", RuleSpec::union("Vide", "Cas1", |o: &String| o.is_empty()));
/// let grammar = builder.seal().unwrap();
/// assert_eq!(grammar.count("Mot", 3).unwrap(), 8);
/// ```
pub struct GrammarBuilder<T> {
    specs: Vec<(String, RuleSpec<T>)>,
}

impl<T> Default for GrammarBuilder<T> {
    fn default() -> Self {
        GrammarBuilder { specs: Vec::new() }
    }
}

impl<T> GrammarBuilder<T> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a named rule. Later calls with the same name shadow
    /// earlier ones, matching the semantics of a plain name→rule mapping.
    pub fn add(&mut self, name: impl Into<String>, spec: RuleSpec<T>) -> &mut Self {
        let name = name.into();
        if let Some(slot) = self.specs.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = spec;
        } else {
            self.specs.push((name, spec));
        }
        self
    }

    /// Links every rule to the grammar, runs the valuation fixed point, and
    /// rejects the grammar if any nonterminal remains at infinite
    /// valuation, or if any rule refers to a nonexistent nonterminal. On
    /// success the mapping becomes immutable.
    pub fn seal(self) -> Result<Grammar<T>, GrammarError>
    where
        T: Clone + Eq + Hash,
    {
        let mut names = HashMap::with_capacity(self.specs.len());
        for (index, (name, _)) in self.specs.iter().enumerate() {
            names.insert(name.clone(), RuleId(index));
        }

        valuation::validate_references(&self.specs, &names)?;

        let rule_names: Vec<String> = self.specs.iter().map(|(name, _)| name.clone()).collect();
        let rules: Vec<Rule<T>> = self
            .specs
            .into_iter()
            .map(|(_, spec)| resolve(spec, &names))
            .collect();

        let raw_valuations = valuation::solve_valuations(&rules);
        let valuations = valuation::reject_infinite(&raw_valuations, &rule_names)?;

        let caches = rules.iter().map(|_| Cache::default()).collect();

        debug!("grammar sealed with {} rule(s)", rules.len());
        Ok(Grammar::new(names, rule_names, rules, valuations, caches))
    }
}

fn resolve<T>(spec: RuleSpec<T>, names: &HashMap<String, RuleId>) -> Rule<T> {
    let resolve_name = |name: &str| names[name];
    match spec {
        RuleSpec::Epsilon(object) => Rule::Epsilon(object),
        RuleSpec::Singleton(object) => Rule::Singleton(object),
        RuleSpec::Union {
            left,
            right,
            belongs_left,
        } => Rule::Union {
            left: resolve_name(&left),
            right: resolve_name(&right),
            belongs_left,
        },
        RuleSpec::Product {
            left,
            right,
            build,
            split,
        } => Rule::Product {
            left: resolve_name(&left),
            right: resolve_name(&right),
            build,
            split,
        },
        RuleSpec::Bound { inner, lo, hi } => Rule::Bound {
            inner: resolve_name(&inner),
            lo,
            hi,
        },
    }
}
