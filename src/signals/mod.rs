// =============================================================================
// Signals Module
// =============================================================================
//
// Threshold classification over the latest enriched row: one discrete
// BUY/SELL/HOLD/NO DATA verdict plus its supporting evidence, once per run.

pub mod classifier;

pub use classifier::{classify, MIN_CANDLES};
