#![allow(dead_code)]

//! Builds the conformance fixtures: six small word/tree grammars ported
//! directly from the original reference implementation, used to exercise
//! the universal laws and the literal seed-scenario counts.

use std::hash::Hash;
use std::rc::Rc;

use combinatorics::{Grammar, GrammarBuilder, RuleSpec};

fn vide(o: &String) -> bool {
    o.is_empty()
}

fn conc(a: String, b: String) -> String {
    a + &b
}

fn first(o: &String) -> (String, String) {
    (o[..1].to_string(), o[1..].to_string())
}

fn last(o: &String) -> (String, String) {
    let n = o.len();
    (o[..n - 1].to_string(), o[n - 1..].to_string())
}

/// Splits `obj` right after the shortest balanced run of `(`/`)`.
fn before_right_paren(o: &String) -> (String, String) {
    let bytes = o.as_bytes();
    let (mut opened, mut closed) = (0i64, 0i64);
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'(' {
            opened += 1;
        } else {
            closed += 1;
        }
        if opened == closed {
            return (o[..i].to_string(), o[i..].to_string());
        }
    }
    unreachable!("{o} has no balanced `()` prefix")
}

/// True if `obj` starts with exactly one `f`, not two.
fn unique(o: &String, f: char) -> bool {
    let mut chars = o.chars();
    match chars.next() {
        Some(c) if c == f => chars.next().map_or(true, |next| next != f),
        _ => false,
    }
}

/// True if `obj` has more than one character and starts with `x`.
fn x_u_x(o: &String, x: char) -> bool {
    o.chars().count() > 1 && o.starts_with(x)
}

/// Fibonacci words: binary strings over {A, B} avoiding the substring "BB".
pub fn fibonacci_words() -> (Grammar<String>, &'static str) {
    let mut b = GrammarBuilder::new();
    b.add("Vide", RuleSpec::epsilon(String::new()))
        .add("AtomA", RuleSpec::singleton("A".to_string()))
        .add("AtomB", RuleSpec::singleton("B".to_string()))
        .add("CasAu", RuleSpec::product("AtomA", "Fib", conc, first))
        .add("CasBAu", RuleSpec::product("AtomB", "CasAu", conc, first))
        .add("Cas2", RuleSpec::union("AtomB", "CasBAu", |o: &String| o == "B"))
        .add("Cas1", RuleSpec::union("CasAu", "Cas2", |o: &String| o.starts_with('A')))
        .add("Fib", RuleSpec::union("Vide", "Cas1", vide));
    (b.seal().expect("fibonacci grammar is valid"), "Fib")
}

/// Binary words of length `n`, `count(n) = 2^n`.
pub fn binary_words() -> (Grammar<String>, &'static str) {
    let mut b = GrammarBuilder::new();
    b.add("Vide", RuleSpec::epsilon(String::new()))
        .add("AtomA", RuleSpec::singleton("A".to_string()))
        .add("AtomB", RuleSpec::singleton("B".to_string()))
        .add("Au", RuleSpec::product("AtomA", "Mot", conc, first))
        .add("Bu", RuleSpec::product("AtomB", "Mot", conc, first))
        .add("Cas1", RuleSpec::union("Au", "Bu", |o: &String| o.starts_with('A')))
        .add("Mot", RuleSpec::union("Vide", "Cas1", vide));
    (b.seal().expect("binary word grammar is valid"), "Mot")
}

/// Dyck words (balanced parentheses). `count(n) = 0` for odd `n`.
pub fn dyck_words() -> (Grammar<String>, &'static str) {
    let mut b = GrammarBuilder::new();
    b.add("Vide", RuleSpec::epsilon(String::new()))
        .add("Atom(", RuleSpec::singleton("(".to_string()))
        .add("Atom)", RuleSpec::singleton(")".to_string()))
        .add("(D", RuleSpec::product("Atom(", "Dyck", conc, first))
        .add(")D", RuleSpec::product("Atom)", "Dyck", conc, first))
        .add("(D)D", RuleSpec::product("(D", ")D", conc, before_right_paren))
        .add("Dyck", RuleSpec::union("Vide", "(D)D", vide));
    (b.seal().expect("dyck word grammar is valid"), "Dyck")
}

/// Words over {A, B} with no three consecutive equal letters.
pub fn no_three_in_a_row() -> (Grammar<String>, &'static str) {
    let mut b = GrammarBuilder::new();
    b.add("Vide", RuleSpec::epsilon(String::new()))
        .add("AtomA", RuleSpec::singleton("A".to_string()))
        .add("AtomB", RuleSpec::singleton("B".to_string()))
        .add("Au", RuleSpec::product("AtomA", "restB", conc, first))
        .add("AAu", RuleSpec::product("AtomA", "Au", conc, first))
        .add("Bu", RuleSpec::product("AtomB", "restA", conc, first))
        .add("BBu", RuleSpec::product("AtomB", "Bu", conc, first))
        .add("restB", RuleSpec::union("Vide", "CasB", vide))
        .add("restA", RuleSpec::union("Vide", "CasA", vide))
        .add("CasB", RuleSpec::union("Bu", "BBu", |o: &String| unique(o, 'B')))
        .add("CasA", RuleSpec::union("Au", "AAu", |o: &String| unique(o, 'A')))
        .add("Cas1", RuleSpec::union("CasA", "CasB", |o: &String| o.starts_with('A')))
        .add("Non_Triple", RuleSpec::union("Vide", "Cas1", vide));
    (b.seal().expect("no-three-in-a-row grammar is valid"), "Non_Triple")
}

/// Palindromes over {A, B}. `count(n) = 2^ceil(n/2)`.
pub fn palindromes_2() -> (Grammar<String>, &'static str) {
    let mut b = GrammarBuilder::new();
    b.add("Vide", RuleSpec::epsilon(String::new()))
        .add("AtomA", RuleSpec::singleton("A".to_string()))
        .add("AtomB", RuleSpec::singleton("B".to_string()))
        .add("Au", RuleSpec::product("AtomA", "Pal", conc, first))
        .add("Bu", RuleSpec::product("AtomB", "Pal", conc, first))
        .add("AuA", RuleSpec::product("Au", "AtomA", conc, last))
        .add("BuB", RuleSpec::product("Bu", "AtomB", conc, last))
        .add("Cas3", RuleSpec::union("AtomA", "AtomB", |o: &String| o.starts_with('A')))
        .add("Cas2", RuleSpec::union("BuB", "Cas3", |o: &String| x_u_x(o, 'B')))
        .add("Cas1", RuleSpec::union("AuA", "Cas2", |o: &String| x_u_x(o, 'A')))
        .add("Pal", RuleSpec::union("Vide", "Cas1", vide));
    (b.seal().expect("palindrome grammar is valid"), "Pal")
}

/// Palindromes over {A, B, C}, proving the union chain generalises past
/// two letters.
pub fn palindromes_3() -> (Grammar<String>, &'static str) {
    let mut b = GrammarBuilder::new();
    b.add("Vide", RuleSpec::epsilon(String::new()))
        .add("AtomA", RuleSpec::singleton("A".to_string()))
        .add("AtomB", RuleSpec::singleton("B".to_string()))
        .add("AtomC", RuleSpec::singleton("C".to_string()))
        .add("Au", RuleSpec::product("AtomA", "Pal", conc, first))
        .add("Bu", RuleSpec::product("AtomB", "Pal", conc, first))
        .add("Cu", RuleSpec::product("AtomC", "Pal", conc, first))
        .add("AuA", RuleSpec::product("Au", "AtomA", conc, last))
        .add("BuB", RuleSpec::product("Bu", "AtomB", conc, last))
        .add("CuC", RuleSpec::product("Cu", "AtomC", conc, last))
        .add("Cas5", RuleSpec::union("AtomB", "AtomC", |o: &String| o.starts_with('B')))
        .add("Cas4", RuleSpec::union("AtomA", "Cas5", |o: &String| o.starts_with('A')))
        .add("Cas3", RuleSpec::union("CuC", "Cas4", |o: &String| x_u_x(o, 'C')))
        .add("Cas2", RuleSpec::union("BuB", "Cas3", |o: &String| x_u_x(o, 'B')))
        .add("Cas1", RuleSpec::union("AuA", "Cas2", |o: &String| x_u_x(o, 'A')))
        .add("Pal", RuleSpec::union("Vide", "Cas1", vide));
    (b.seal().expect("3-letter palindrome grammar is valid"), "Pal")
}

/// A binary tree: either a leaf, or a node joining two subtrees. Wrapped in
/// `Rc` so cloning a subtree (needed on every cache hit) is cheap.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Tree {
    Leaf,
    Node(Rc<Tree>, Rc<Tree>),
}

fn build_node(a: Tree, b: Tree) -> Tree {
    Tree::Node(Rc::new(a), Rc::new(b))
}

fn split_node(o: &Tree) -> (Tree, Tree) {
    match o {
        Tree::Node(a, b) => ((**a).clone(), (**b).clone()),
        Tree::Leaf => unreachable!("split_node called on a leaf"),
    }
}

/// Binary trees. A leaf has weight 1, so `count(n) = Catalan(n - 1)` for
/// `n >= 1` and `count(0) = 0`. Also registers `BoundTree = Bound(Tree, 2,
/// 9)` and `Test = Product(Tree, BoundTree)`, the crate's canonical
/// Bound-inside-Product fixture.
pub fn binary_trees() -> (Grammar<Tree>, &'static str) {
    let mut b = GrammarBuilder::new();
    b.add("Leaf", RuleSpec::singleton(Tree::Leaf))
        .add("Node", RuleSpec::product("Tree", "Tree", build_node, split_node))
        .add("Tree", RuleSpec::union("Leaf", "Node", |o: &Tree| matches!(o, Tree::Leaf)))
        .add("BoundTree", RuleSpec::bound("Tree", 2, 9))
        .add("Test", RuleSpec::product("Tree", "BoundTree", build_node, split_node));
    (b.seal().expect("binary tree grammar is valid"), "Tree")
}

/// Asserts the universal laws hold for `grammar`/`root` at every weight in
/// `0..=max_weight`. Works for a `Bound` root too: outside its interval
/// `unrank` fails with `WeightOutOfBounds` rather than `RankOutOfBounds`,
/// since there the weight itself is rejected, not just the rank.
pub fn assert_universal_laws<T>(grammar: &Grammar<T>, root: &str, max_weight: usize)
where
    T: Clone + Eq + Hash + std::fmt::Debug,
{
    for n in 0..=max_weight {
        let list = grammar.list(root, n).unwrap();
        let count = grammar.count(root, n).unwrap();
        assert_eq!(list.len(), count, "count/list disagree at weight {n}");

        let unranked: Vec<T> = (0..count).map(|r| grammar.unrank(root, n, r).unwrap()).collect();
        assert_eq!(list, unranked, "unrank does not enumerate list at weight {n}");

        for (index, object) in list.iter().enumerate() {
            assert_eq!(
                grammar.rank(root, object).unwrap(),
                index,
                "rank does not invert unrank at weight {n}"
            );
            assert_eq!(
                &grammar.unrank(root, n, grammar.rank(root, object).unwrap()).unwrap(),
                object
            );
            assert_eq!(grammar.weight(root, object).unwrap(), n, "weight mismatch at {n}");
        }

        let out_of_range = grammar.unrank(root, n, count);
        assert!(
            matches!(
                out_of_range,
                Err(combinatorics::GrammarError::RankOutOfBounds { .. })
                    | Err(combinatorics::GrammarError::WeightOutOfBounds { .. })
            ),
            "unrank(n, count(n)) should fail at weight {n}, got {out_of_range:?}"
        );
    }

    let min_weight = (0..=max_weight).find(|&n| grammar.count(root, n).unwrap() > 0);
    if let Some(min_weight) = min_weight {
        assert_eq!(
            grammar.valuation(root).unwrap(),
            min_weight,
            "valuation should be the smallest weight with a nonempty class"
        );
    }
}
