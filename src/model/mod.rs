//! Thing record, typed request parameters and validation error types.

mod errors;
mod thing;

pub use errors::{humanize, ErrorKind, FieldError, ValidationErrors};
pub use thing::{Thing, ThingAttrs, ThingParams};
