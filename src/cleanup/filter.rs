//! Name Filter
//!
//! Conjunctive name predicates over claims. Each configured rule narrows
//! the set of claims considered for cleanup; an empty rule is never added.

use crate::domain::ports::Named;
use serde::{Deserialize, Serialize};

/// Predicate matching names that start with `prefix`
pub fn prefix_filter(prefix: &str) -> impl Fn(&str) -> bool + '_ {
    move |name: &str| name.starts_with(prefix)
}

/// Predicate matching names that end with `suffix`
pub fn suffix_filter(suffix: &str) -> impl Fn(&str) -> bool + '_ {
    move |name: &str| name.ends_with(suffix)
}

// =============================================================================
// Name Rules
// =============================================================================

/// A single constraint on a resource name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameRule {
    Prefix(String),
    Suffix(String),
}

impl NameRule {
    pub fn matches(&self, name: &str) -> bool {
        match self {
            NameRule::Prefix(p) => prefix_filter(p)(name),
            NameRule::Suffix(s) => suffix_filter(s)(name),
        }
    }
}

impl std::fmt::Display for NameRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NameRule::Prefix(p) => write!(f, "prefix={}", p),
            NameRule::Suffix(s) => write!(f, "suffix={}", s),
        }
    }
}

// =============================================================================
// Name Filter
// =============================================================================

/// Conjunction of name rules; with no rules every name matches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameFilter {
    rules: Vec<NameRule>,
}

impl NameFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a prefix; empty strings add no constraint
    pub fn with_prefix(self, prefix: &str) -> Self {
        self.with_rule_if(!prefix.is_empty(), || NameRule::Prefix(prefix.to_string()))
    }

    /// Require a suffix; empty strings add no constraint
    pub fn with_suffix(self, suffix: &str) -> Self {
        self.with_rule_if(!suffix.is_empty(), || NameRule::Suffix(suffix.to_string()))
    }

    fn with_rule_if(mut self, cond: bool, rule: impl FnOnce() -> NameRule) -> Self {
        if cond {
            self.rules.push(rule());
        }
        self
    }

    pub fn rules(&self) -> &[NameRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// True iff every rule matches `name`
    pub fn matches(&self, name: &str) -> bool {
        self.rules.iter().all(|rule| rule.matches(name))
    }

    /// Keep the items whose name matches, preserving their order
    pub fn apply<T: Named>(&self, items: Vec<T>) -> Vec<T> {
        if self.is_empty() {
            return items;
        }
        items.into_iter().filter(|item| self.matches(item.name())).collect()
    }
}

impl std::fmt::Display for NameFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.rules.is_empty() {
            return write!(f, "none");
        }
        let rules: Vec<String> = self.rules.iter().map(ToString::to_string).collect();
        write!(f, "{}", rules.join(","))
    }
}
