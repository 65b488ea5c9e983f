//! artstar-filter - Edge detection for Art Star
//!
//! This crate holds the non-geometric image analysis used by the
//! compositing pipeline. Currently that is a single operation: a
//! Canny-style binary edge map with adjustable hysteresis thresholds.

pub mod edge;
mod error;

pub use edge::edge_map;
pub use error::{FilterError, FilterResult};
