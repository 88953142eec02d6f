//! Core table contracts for the ecomdata pipeline.
//!
//! This crate defines the five e-commerce tables shared by the generator and
//! the ingester: column order, per-column type descriptors, keys and the
//! dependency order in which tables must be produced and loaded.

pub mod error;
pub mod graph;
pub mod schema;
pub mod tables;
pub mod validation;

pub use error::{Error, Result};
pub use graph::dependency_order;
pub use schema::{ColumnDef, ColumnKind, ForeignKeyDef, TableDef};
pub use tables::{ORDER_ITEMS, ORDERS, PAYMENTS, PRODUCTS, TABLES, USERS, table};
pub use validation::validate_tables;
