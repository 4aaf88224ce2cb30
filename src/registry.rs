//! The closed vocabularies of the records API.
//!
//! Everything the remote side cares about is identified by a small integer
//! code: what kind of record a request is for, and how a filter compares a
//! field to its operands. The codes cross the wire, so they are frozen.
//! Renumbering one would silently reclassify records on the other end, which
//! is why the mapping lives in exactly one place, here.

mod entity;
mod operator;

pub use entity::EntityType;
pub use operator::{FilterOperator, OperandCount};

use thiserror::Error;

/// Raw input that doesn't belong to one of the closed sets.
///
/// Codes and names come from outside: API payloads, config files, people
/// typing things. Whatever doesn't match must fail right at the conversion.
/// Falling back to some default variant would misclassify data, so there is
/// deliberately no lenient version of these lookups.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UnknownSymbol {
    #[error("unknown entity type code {0}, expected a code from 1 to 11")]
    EntityCode(u64),
    #[error("unknown entity type name {0:?}")]
    EntityName(String),
    #[error("unknown filter operator code {0}, expected a code from 1 to 13")]
    OperatorCode(u64),
    #[error("unknown filter operator name {0:?}")]
    OperatorName(String),
}
