//! Equality filters and ordering shared by the store backends.

use super::Row;
use serde_json::Value;
use std::cmp::Ordering;

/// Conjunction of `field == value` conditions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Value)>,
}

impl Filter {
    /// A filter that matches every row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field` to equal `value`.
    #[must_use]
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((field.into(), value.into()));
        self
    }

    #[must_use]
    pub fn matches(&self, row: &Row) -> bool {
        self.conditions
            .iter()
            .all(|(field, value)| row.get(field) == Some(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

impl OrderBy {
    #[must_use]
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Asc,
        }
    }

    #[must_use]
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Desc,
        }
    }
}

/// Options for [`super::Store::find_many`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindMany {
    pub filter: Filter,
    pub order_by: Option<OrderBy>,
    pub limit: Option<usize>,
}

impl FindMany {
    /// Every row, in storage order.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn ordered_by(order_by: OrderBy) -> Self {
        Self {
            order_by: Some(order_by),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Run this query over an in-memory set of rows.
    pub(crate) fn apply<'r, I>(&self, rows: I) -> Vec<Row>
    where
        I: IntoIterator<Item = &'r Row>,
    {
        let mut matched: Vec<Row> = rows
            .into_iter()
            .filter(|row| self.filter.matches(row))
            .cloned()
            .collect();

        if let Some(order_by) = &self.order_by {
            // Stable sort keeps storage order between equal keys.
            matched.sort_by(|a, b| {
                let ordering = compare_values(a.get(&order_by.field), b.get(&order_by.field));
                match order_by.direction {
                    Direction::Asc => ordering,
                    Direction::Desc => ordering.reverse(),
                }
            });
        }

        if let Some(limit) = self.limit {
            matched.truncate(limit);
        }
        matched
    }
}

/// Total order over JSON scalars. Missing and null sort first.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            match (x.as_i64(), y.as_i64()) {
                (Some(x), Some(y)) => x.cmp(&y),
                _ => x
                    .as_f64()
                    .unwrap_or(0.0)
                    .total_cmp(&y.as_f64().unwrap_or(0.0)),
            }
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::patch;
    use serde_json::json;

    fn rows() -> Vec<Row> {
        vec![
            patch([("id", json!("a")), ("order", json!(2)), ("kind", json!("x"))]),
            patch([("id", json!("b")), ("order", json!(0)), ("kind", json!("y"))]),
            patch([("id", json!("c")), ("order", json!(1)), ("kind", json!("x"))]),
        ]
    }

    fn ids(rows: &[Row]) -> Vec<&str> {
        rows.iter()
            .filter_map(|r| r.get("id").and_then(Value::as_str))
            .collect()
    }

    #[test]
    fn test_filter_eq_matches_all_conditions() {
        let filter = Filter::new().eq("kind", "x").eq("order", 1);
        let matched = FindMany::all().with_filter(filter).apply(&rows());
        assert_eq!(ids(&matched), vec!["c"]);
    }

    #[test]
    fn test_order_by_asc_and_desc() {
        let asc = FindMany::ordered_by(OrderBy::asc("order")).apply(&rows());
        assert_eq!(ids(&asc), vec!["b", "c", "a"]);

        let desc = FindMany::ordered_by(OrderBy::desc("order")).apply(&rows());
        assert_eq!(ids(&desc), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_limit_applies_after_ordering() {
        let first = FindMany::ordered_by(OrderBy::asc("order"))
            .with_limit(1)
            .apply(&rows());
        assert_eq!(ids(&first), vec!["b"]);
    }

    #[test]
    fn test_missing_field_sorts_first() {
        let mut rows = rows();
        rows.push(patch([("id", json!("d"))]));
        let asc = FindMany::ordered_by(OrderBy::asc("order")).apply(&rows);
        assert_eq!(ids(&asc).first(), Some(&"d"));
    }
}
