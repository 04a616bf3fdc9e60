//! Envimix: environment-mix variants of TM2020 maps
//!
//! Derives a batch of variant maps from one source map by swapping the
//! vehicle, rewriting environment gates to match it, and adjusting the map
//! identity and medal times. The source map is rewritten in place for each
//! variant and restored once the batch is exhausted.

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod gates;
pub mod generator;
pub mod logging;
pub mod naming;
pub mod objective;
pub mod sink;
pub mod snapshot;
pub mod uid;
pub mod vehicle;

pub use document::{Map, MapDocument};
pub use error::{ApiError, GenerationError, StorageError};
pub use generator::{GenerationOptions, Variant, VariantGenerator, Variants};
pub use objective::ValidationMode;
pub use sink::{drain_into, DirectorySink, Sink};
