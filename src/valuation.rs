//! The valuation fixed point and the grammar validator.
//!
//! Valuations are seeded at "infinite" (`None`) and descend monotonically
//! until a full pass leaves every rule unchanged, no worklist needed, a
//! single changed flag per pass is enough.

use std::collections::HashMap;

use log::{debug, trace, warn};

use crate::error::GrammarError;
use crate::rule::{Rule, RuleId, RuleSpec};

/// Checks that every name a `Union`/`Product`/`Bound` rule refers to exists
/// in `names`. Does not check the partition contract of `Union`, that is
/// the caller's responsibility.
pub(crate) fn validate_references<T>(
    specs: &[(String, RuleSpec<T>)],
    names: &HashMap<String, RuleId>,
) -> Result<(), GrammarError> {
    for (rule_name, spec) in specs {
        for referenced in spec.referenced_names() {
            if !names.contains_key(referenced) {
                return Err(GrammarError::UnknownName {
                    rule: rule_name.clone(),
                    missing: referenced.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Recomputes one rule's valuation from the current assignment of its
/// children. `Bound` is folded in alongside `Union`/`Product` so a
/// non-root `Bound` is never left with a stale valuation.
fn recompute<T>(rule: &Rule<T>, valuations: &[Option<usize>]) -> Option<usize> {
    match rule {
        Rule::Epsilon(_) => Some(0),
        Rule::Singleton(_) => Some(1),
        Rule::Union { left, right, .. } => {
            match (valuations[left.index()], valuations[right.index()]) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (Some(a), None) => Some(a),
                (None, Some(b)) => Some(b),
                (None, None) => None,
            }
        }
        Rule::Product { left, right, .. } => {
            match (valuations[left.index()], valuations[right.index()]) {
                (Some(a), Some(b)) => Some(a + b),
                _ => None,
            }
        }
        Rule::Bound { inner, lo, .. } => valuations[inner.index()].map(|v| v.max(*lo)),
    }
}

/// Runs the Kleene fixed point to completion and returns the valuation of
/// every rule, indexed by `RuleId`. A rule whose valuation never converges
/// to a finite value keeps `None` in the returned table.
pub(crate) fn solve_valuations<T>(rules: &[Rule<T>]) -> Vec<Option<usize>> {
    let mut valuations = vec![None; rules.len()];
    let mut pass = 0u32;
    loop {
        pass += 1;
        let mut changed = 0usize;
        for (index, rule) in rules.iter().enumerate() {
            let new_val = recompute(rule, &valuations);
            if new_val != valuations[index] {
                valuations[index] = new_val;
                changed += 1;
            }
        }
        trace!("valuation pass {pass}: {changed} rule(s) changed");
        if changed == 0 {
            break;
        }
    }
    debug!("valuation fixed point reached after {pass} pass(es)");
    valuations
}

/// Rejects a grammar where any rule's valuation is still infinite,
/// returning the names of every offender.
pub(crate) fn reject_infinite(
    valuations: &[Option<usize>],
    rule_names: &[String],
) -> Result<Vec<usize>, GrammarError> {
    let infinite: Vec<String> = valuations
        .iter()
        .zip(rule_names)
        .filter(|(v, _)| v.is_none())
        .map(|(_, name)| name.clone())
        .collect();
    if !infinite.is_empty() {
        warn!("grammar rejected: {} nonterminal(s) with infinite valuation", infinite.len());
        return Err(GrammarError::InvalidGrammar { names: infinite });
    }
    Ok(valuations.iter().map(|v| v.unwrap()).collect())
}
