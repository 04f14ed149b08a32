//! Rule Engine
//!
//! Fixed predicate/consequence rules evaluated first-match-wins against
//! road records.

mod rules;

pub use rules::{Recommendation, Rule, RuleSet};
