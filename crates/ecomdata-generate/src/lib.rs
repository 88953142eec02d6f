//! Deterministic synthetic e-commerce dataset generator.
//!
//! Produces users, products, orders, order items and payments from a single
//! seed, keeps order totals and payment amounts consistent with the line
//! items, and writes one CSV file per table.

pub mod checks;
pub mod engine;
pub mod errors;
pub mod generators;
pub mod model;
pub mod money;
pub mod output;
pub mod random;
pub mod records;

pub use engine::{GenerationEngine, GenerationResult, generate_dataset};
pub use errors::GenerationError;
pub use model::{GenerateOptions, GenerationReport, ItemsPerOrder, TableReport};
pub use random::RandomSource;
pub use records::Dataset;
