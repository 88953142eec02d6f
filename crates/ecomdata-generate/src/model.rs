use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::GenerationError;

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_USERS: usize = 200;
pub const DEFAULT_PRODUCTS: usize = 200;
pub const DEFAULT_ORDERS: usize = 200;
/// Upper bound accepted for `items_per_order.max`.
pub const MAX_ITEMS_PER_ORDER: usize = 1000;

/// Inclusive bounds for the number of line items drawn per order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemsPerOrder {
    pub min: usize,
    pub max: usize,
}

impl Default for ItemsPerOrder {
    fn default() -> Self {
        Self { min: 1, max: 1 }
    }
}

/// Options for the generation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// Directory where the CSV files are written.
    pub out_dir: PathBuf,
    /// Seed shared by the choice and faker streams.
    pub seed: u64,
    pub users: usize,
    pub products: usize,
    pub orders: usize,
    pub items_per_order: ItemsPerOrder,
    /// "Today" for the signup and order date windows. Defaults to the current
    /// UTC date when unset.
    pub reference_date: Option<NaiveDate>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("data"),
            seed: DEFAULT_SEED,
            users: DEFAULT_USERS,
            products: DEFAULT_PRODUCTS,
            orders: DEFAULT_ORDERS,
            items_per_order: ItemsPerOrder::default(),
            reference_date: None,
        }
    }
}

impl GenerateOptions {
    pub fn validate(&self) -> Result<(), GenerationError> {
        for (name, count) in [
            ("users", self.users),
            ("products", self.products),
            ("orders", self.orders),
        ] {
            if count == 0 {
                return Err(GenerationError::InvalidOptions(format!(
                    "{name} must be at least 1"
                )));
            }
        }

        let ItemsPerOrder { min, max } = self.items_per_order;
        if min == 0 || min > max {
            return Err(GenerationError::InvalidOptions(format!(
                "items_per_order must satisfy 1 <= min <= max (got {min}..={max})"
            )));
        }
        if max > MAX_ITEMS_PER_ORDER {
            return Err(GenerationError::InvalidOptions(format!(
                "items_per_order.max must be at most {MAX_ITEMS_PER_ORDER} (got {max})"
            )));
        }
        if self.orders.checked_mul(max).is_none() {
            return Err(GenerationError::InvalidOptions(format!(
                "{} orders with up to {max} items each overflow the item id range",
                self.orders
            )));
        }

        Ok(())
    }

    pub fn resolved_reference_date(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| chrono::Utc::now().date_naive())
    }
}

/// Summary of a written table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableReport {
    pub table: String,
    pub file: PathBuf,
    pub rows: u64,
    pub bytes_written: u64,
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub seed: u64,
    pub reference_date: NaiveDate,
    pub tables: Vec<TableReport>,
    pub bytes_written: u64,
    pub duration_ms: u64,
}

impl GenerationReport {
    pub fn new(seed: u64, reference_date: NaiveDate) -> Self {
        Self {
            seed,
            reference_date,
            tables: Vec::new(),
            bytes_written: 0,
            duration_ms: 0,
        }
    }

    pub fn record_table(&mut self, table: TableReport) {
        self.bytes_written += table.bytes_written;
        self.tables.push(table);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_compiled_constants() {
        let options = GenerateOptions::default();
        assert_eq!(options.seed, 42);
        assert_eq!((options.users, options.products, options.orders), (200, 200, 200));
        assert_eq!(options.items_per_order, ItemsPerOrder { min: 1, max: 1 });
        assert!(options.validate().is_ok());
    }

    #[test]
    fn rejects_empty_counts_and_inverted_item_bounds() {
        let mut options = GenerateOptions::default();
        options.products = 0;
        assert!(matches!(
            options.validate(),
            Err(GenerationError::InvalidOptions(_))
        ));

        let mut options = GenerateOptions::default();
        options.items_per_order = ItemsPerOrder { min: 3, max: 2 };
        assert!(matches!(
            options.validate(),
            Err(GenerationError::InvalidOptions(_))
        ));
    }

    #[test]
    fn rejects_oversized_item_bounds() {
        let mut options = GenerateOptions::default();
        options.items_per_order = ItemsPerOrder {
            min: usize::MAX / 2,
            max: usize::MAX / 2,
        };
        assert!(matches!(
            options.validate(),
            Err(GenerationError::InvalidOptions(_))
        ));

        options.items_per_order = ItemsPerOrder {
            min: 1,
            max: MAX_ITEMS_PER_ORDER,
        };
        assert!(options.validate().is_ok());

        options.items_per_order.max = MAX_ITEMS_PER_ORDER + 1;
        assert!(options.validate().is_err());

        options.items_per_order.max = MAX_ITEMS_PER_ORDER;
        options.orders = usize::MAX;
        assert!(matches!(
            options.validate(),
            Err(GenerationError::InvalidOptions(_))
        ));
    }

    #[test]
    fn report_serializes_with_iso_reference_date() {
        let mut report = GenerationReport::new(42, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        report.record_table(TableReport {
            table: "users".to_string(),
            file: PathBuf::from("data/users.csv"),
            rows: 3,
            bytes_written: 120,
        });

        let value = serde_json::to_value(&report).expect("serialize report");
        assert_eq!(value["reference_date"], "2024-06-01");
        assert_eq!(value["bytes_written"], 120);
        assert_eq!(value["tables"][0]["rows"], 3);
    }
}
