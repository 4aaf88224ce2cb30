mod error;
pub mod filter;
pub mod registry;

pub use error::{Error, ErrorKind};
pub use filter::{FieldName, FieldValue, Filter, InvalidFilter, RecordQuery};
pub use registry::{EntityType, FilterOperator, OperandCount, UnknownSymbol};
