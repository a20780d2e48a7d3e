//! Reorder requests and the checks applied to them.

use crate::validation::{Validate, ValidationErrors};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One `(id, order)` pair of a reorder request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReorderItem {
    pub id: String,
    pub order: u32,
}

impl ReorderItem {
    #[must_use]
    pub fn new(id: impl Into<String>, order: u32) -> Self {
        Self {
            id: id.into(),
            order,
        }
    }
}

/// How much a reorder request is trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReorderPolicy {
    /// The request must be a full permutation of the collection onto `0..N`.
    #[default]
    Strict,
    /// Apply whatever orders are supplied.
    Trusting,
}

impl std::str::FromStr for ReorderPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(ReorderPolicy::Strict),
            "trusting" | "trust" => Ok(ReorderPolicy::Trusting),
            _ => Err(format!("Unknown reorder policy: {s}")),
        }
    }
}

impl std::fmt::Display for ReorderPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReorderPolicy::Strict => write!(f, "strict"),
            ReorderPolicy::Trusting => write!(f, "trusting"),
        }
    }
}

/// Shape checks that hold under every policy.
impl Validate for [ReorderItem] {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let mut seen = HashSet::new();
        for (index, item) in self.iter().enumerate() {
            if item.id.trim().is_empty() {
                errors.add(format!("items[{index}].id"), "must not be empty");
            } else if !seen.insert(item.id.as_str()) {
                errors.add(format!("items[{index}].id"), "is listed more than once");
            }
        }
        errors.into_result()
    }
}

/// Check that `items` maps exactly the ids in `current` onto `0..current.len()`.
pub fn check_permutation(items: &[ReorderItem], current: &[&str]) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let current_ids: HashSet<&str> = current.iter().copied().collect();
    let requested_ids: HashSet<&str> = items.iter().map(|i| i.id.as_str()).collect();

    for (index, item) in items.iter().enumerate() {
        if !current_ids.contains(item.id.as_str()) {
            errors.add(format!("items[{index}].id"), "is not in this collection");
        }
    }
    let mut missing: Vec<&str> = current_ids.difference(&requested_ids).copied().collect();
    if !missing.is_empty() {
        missing.sort_unstable();
        errors.add(
            "items",
            format!("must include every record; missing {}", missing.join(", ")),
        );
    }

    let expected: HashSet<u32> = (0..current.len())
        .filter_map(|i| u32::try_from(i).ok())
        .collect();
    let supplied: HashSet<u32> = items.iter().map(|i| i.order).collect();
    if supplied.len() != items.len() || supplied != expected {
        errors.add(
            "items",
            format!(
                "orders must be exactly 0..{} with no gaps or duplicates",
                current.len()
            ),
        );
    }

    errors.into_result()
}
