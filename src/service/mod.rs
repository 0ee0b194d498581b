//! ThingService: the per-action state transitions, independent of HTTP.

mod things;
mod validation;
pub use things::ThingService;
pub use validation::ThingValidator;
