//! Loads the generated CSV files into a SQLite store.
//!
//! Every run deletes the store, recreates the schema from the table
//! descriptors in `ecomdata-core`, coerces each column to its declared type
//! and inserts the tables in dependency order inside one transaction.

pub mod coerce;
pub mod engine;
pub mod errors;
pub mod loader;
pub mod model;
pub mod schema;
pub mod store;

pub use coerce::SqlValue;
pub use engine::IngestEngine;
pub use errors::IngestError;
pub use model::{IngestOptions, IngestReport, LoadedTable};
