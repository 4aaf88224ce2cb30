//! Building record queries: one target entity kind plus field filters.
//!
//! Validation happens when a filter is made, not when it is sent. A
//! [`Filter`] that exists always carries an operand count its operator
//! accepts, and deserializing a request body funnels through the same
//! check. So a body that reaches the remote side is structurally valid,
//! and a bad one fails right here with a message pointing at the filter.

use crate::registry::{EntityType, FilterOperator, OperandCount};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// A filter that cannot be built.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidFilter {
    #[error("`{operator}` takes {expected}, but this filter has {found}")]
    OperandCount {
        operator: FilterOperator,
        expected: OperandCount,
        found: usize,
    },
}

/// The field a filter applies to, named the way the remote API names it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldName(pub String);

impl From<&str> for FieldName {
    fn from(value: &str) -> Self {
        FieldName(value.to_string())
    }
}

impl From<String> for FieldName {
    fn from(value: String) -> Self {
        FieldName(value)
    }
}

impl Display for FieldName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A literal operand, like 3 or "alpine".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(i64),
    Text(String),
    Flag(bool),
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Number(number) => write!(f, "{}", number),
            FieldValue::Text(text) => write!(f, "{:?}", text),
            FieldValue::Flag(flag) => write!(f, "{}", flag),
        }
    }
}

/// One field condition of a record query.
///
/// The fields are private on purpose: the only ways to get a `Filter` check
/// the operand count against the operator, so one of these existing means
/// it is well formed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FilterParts")]
pub struct Filter {
    field: FieldName,
    #[serde(rename = "op")]
    operator: FilterOperator,
    values: Vec<FieldValue>,
}

/// The raw wire shape of a filter, before validation.
#[derive(Deserialize)]
struct FilterParts {
    field: FieldName,
    op: FilterOperator,
    // Presence filters may leave the array out entirely.
    #[serde(default)]
    values: Vec<FieldValue>,
}

impl TryFrom<FilterParts> for Filter {
    type Error = InvalidFilter;

    fn try_from(parts: FilterParts) -> Result<Self, Self::Error> {
        Filter::new(parts.field, parts.op, parts.values)
    }
}

impl Filter {
    /// Builds a filter, checking the operand count against the operator.
    pub fn new(
        field: impl Into<FieldName>,
        operator: FilterOperator,
        values: Vec<FieldValue>,
    ) -> Result<Filter, InvalidFilter> {
        let field = field.into();
        let expected = operator.operand_count();

        if !expected.accepts(values.len()) {
            debug!(
                "rejected filter on {}: {} with {} value(s)",
                field,
                operator,
                values.len()
            );

            return Err(InvalidFilter::OperandCount {
                operator,
                expected,
                found: values.len(),
            });
        }

        Ok(Filter { field, operator, values })
    }

    /// The field must have a value, whatever it is.
    pub fn present(field: impl Into<FieldName>) -> Filter {
        Filter {
            field: field.into(),
            operator: FilterOperator::Present,
            values: Vec::new(),
        }
    }

    /// The field must have no value.
    pub fn not_present(field: impl Into<FieldName>) -> Filter {
        Filter {
            field: field.into(),
            operator: FilterOperator::NotPresent,
            values: Vec::new(),
        }
    }

    /// A single-operand comparison: `is`, `contains`, `greater_than` and
    /// friends. Rejects the presence checks and `between`, which take a
    /// different number of operands.
    pub fn compare(
        field: impl Into<FieldName>,
        operator: FilterOperator,
        value: impl Into<FieldValue>,
    ) -> Result<Filter, InvalidFilter> {
        Filter::new(field, operator, vec![value.into()])
    }

    /// The field must sit between the two operands.
    pub fn between(
        field: impl Into<FieldName>,
        low: impl Into<FieldValue>,
        high: impl Into<FieldValue>,
    ) -> Filter {
        Filter {
            field: field.into(),
            operator: FilterOperator::Between,
            values: vec![low.into(), high.into()],
        }
    }

    pub fn field(&self) -> &FieldName {
        &self.field
    }

    pub fn operator(&self) -> FilterOperator {
        self.operator
    }

    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.field, self.operator)?;

        match self.values.as_slice() {
            [] => Ok(()),
            [operand] => write!(f, " {}", operand),
            [low, high] => write!(f, " {} and {}", low, high),
            // Filters can't actually carry more than two values, but the
            // formatter shouldn't be the thing that enforces it.
            more => {
                for value in more {
                    write!(f, " {}", value)?;
                }

                Ok(())
            }
        }
    }
}

/// A filtered query against one kind of record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordQuery {
    entity: EntityType,
    #[serde(default)]
    filters: Vec<Filter>,
}

impl RecordQuery {
    pub fn new(entity: EntityType) -> RecordQuery {
        RecordQuery {
            entity,
            filters: Vec::new(),
        }
    }

    /// Adds a filter. Chainable, so queries read top to bottom:
    ///
    /// ```
    /// use record_query::{EntityType, Filter, FilterOperator, RecordQuery};
    ///
    /// # fn main() -> Result<(), record_query::InvalidFilter> {
    /// let query = RecordQuery::new(EntityType::Node)
    ///     .with(Filter::compare("status", FilterOperator::Is, 3)?)
    ///     .with(Filter::present("last_seen"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn with(mut self, filter: Filter) -> RecordQuery {
        self.filters.push(filter);
        self
    }

    pub fn entity(&self) -> EntityType {
        self.entity
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Renders the JSON body to send to the records endpoint.
    pub fn to_request_body(&self) -> Result<String, crate::Error> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a JSON body back into a query, re-running every check.
    ///
    /// Unknown entity or operator codes and bad operand counts fail here,
    /// at the boundary, instead of being smoothed over into some default.
    pub fn from_request_body(body: &str) -> Result<RecordQuery, crate::Error> {
        let query: RecordQuery = serde_json::from_str(body)?;

        debug!("parsed body for {}: {} filter(s)", query.entity, query.filters.len());

        Ok(query)
    }
}

impl Display for RecordQuery {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.entity)?;

        for filter in &self.filters {
            write!(f, " | {}", filter)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operand_counts_are_enforced() {
        let error =
            Filter::new("notes", FilterOperator::Present, vec![FieldValue::Number(1)]).unwrap_err();
        assert_eq!(
            "`present` takes no operands, but this filter has 1",
            format!("{}", error)
        );

        let error =
            Filter::new("ram", FilterOperator::Between, vec![FieldValue::Number(8)]).unwrap_err();
        assert_eq!(
            "`between` takes two operands, but this filter has 1",
            format!("{}", error)
        );

        assert!(Filter::new("name", FilterOperator::Contains, vec!["alp".into()]).is_ok());
    }

    #[test]
    fn compare_only_accepts_single_operand_operators() {
        assert!(Filter::compare("status", FilterOperator::Is, 3).is_ok());

        let error = Filter::compare("notes", FilterOperator::Present, 1).unwrap_err();
        assert_eq!(
            InvalidFilter::OperandCount {
                operator: FilterOperator::Present,
                expected: OperandCount::Zero,
                found: 1,
            },
            error
        );
    }

    #[test]
    fn queries_render_codes_on_the_wire() {
        let query = RecordQuery::new(EntityType::Node)
            .with(Filter::compare("status", FilterOperator::Is, 3).unwrap());

        assert_eq!(
            r#"{"entity":4,"filters":[{"field":"status","op":3,"values":[3]}]}"#,
            query.to_request_body().unwrap()
        );
    }

    #[test]
    fn round_trips_preserve_the_codes() {
        // NODE is 4, contains_any is 7. Both have to survive untouched.
        let query = RecordQuery::new(EntityType::Node)
            .with(Filter::compare("tag", FilterOperator::ContainsAny, "alpine").unwrap());

        let body = query.to_request_body().unwrap();
        let parsed = RecordQuery::from_request_body(&body).unwrap();

        assert_eq!(query, parsed);
        assert_eq!(4, parsed.entity().code());
        assert_eq!(7, parsed.filters()[0].operator().code());
    }

    #[test]
    fn bodies_with_bad_operand_counts_are_rejected() {
        let body = r#"{"entity":4,"filters":[{"field":"notes","op":1,"values":[1]}]}"#;
        let error = RecordQuery::from_request_body(body).unwrap_err();

        assert!(
            format!("{}", error).contains("`present` takes no operands"),
            "got: {}",
            error
        );
    }

    #[test]
    fn bodies_with_unknown_codes_are_rejected() {
        let bad_entity = r#"{"entity":99,"filters":[]}"#;
        let error = RecordQuery::from_request_body(bad_entity).unwrap_err();
        assert!(format!("{}", error).contains("unknown entity type code 99"), "got: {}", error);

        let bad_operator = r#"{"entity":4,"filters":[{"field":"x","op":14,"values":[1]}]}"#;
        let error = RecordQuery::from_request_body(bad_operator).unwrap_err();
        assert!(
            format!("{}", error).contains("unknown filter operator code 14"),
            "got: {}",
            error
        );
    }

    #[test]
    fn presence_filters_can_leave_the_values_out() {
        let filter: Filter = serde_json::from_str(r#"{"field":"notes","op":1}"#).unwrap();

        assert_eq!(Filter::present("notes"), filter);
    }

    #[test]
    fn queries_display_like_pipelines() {
        let query = RecordQuery::new(EntityType::Node)
            .with(Filter::compare("status", FilterOperator::Is, 3).unwrap())
            .with(Filter::between("ram", 8, 64))
            .with(Filter::present("last_seen"));

        assert_eq!(
            "NODE | status is 3 | ram between 8 and 64 | last_seen present",
            format!("{}", query)
        );
    }
}
