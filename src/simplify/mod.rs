//! Text simplification pipeline.
//!
//! - `substitute`: the per-word decision (keep, pass through, or replace
//!   with the nearest restricted-vocabulary word)
//! - `processor`: tokenization, batching and the parallel fan-out/fan-in
//!   that applies the decision at scale

mod processor;
mod substitute;

pub use processor::{tokenize, ProcessingError, TextSimplifier};
pub use substitute::substitute;
