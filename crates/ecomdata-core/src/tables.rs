//! Table definitions for the five dataset entities.

use crate::error::{Error, Result};
use crate::schema::{ColumnDef, ColumnKind, ForeignKeyDef, TableDef};

// =============================================================================
// Independent tables
// =============================================================================

pub static USERS: TableDef = TableDef {
    name: "users",
    file_name: "users.csv",
    primary_key: "user_id",
    columns: &[
        ColumnDef::new("user_id", ColumnKind::Integer),
        ColumnDef::new("name", ColumnKind::Text),
        ColumnDef::new("email", ColumnKind::Text),
        ColumnDef::new("signup_date", ColumnKind::Date),
    ],
    foreign_keys: &[],
};

pub static PRODUCTS: TableDef = TableDef {
    name: "products",
    file_name: "products.csv",
    primary_key: "product_id",
    columns: &[
        ColumnDef::new("product_id", ColumnKind::Integer),
        ColumnDef::new("name", ColumnKind::Text),
        ColumnDef::new("category", ColumnKind::Text),
        ColumnDef::new("price", ColumnKind::Real),
    ],
    foreign_keys: &[],
};

// =============================================================================
// Dependent tables
// =============================================================================

pub static ORDERS: TableDef = TableDef {
    name: "orders",
    file_name: "orders.csv",
    primary_key: "order_id",
    columns: &[
        ColumnDef::new("order_id", ColumnKind::Integer),
        ColumnDef::new("user_id", ColumnKind::Integer),
        ColumnDef::new("order_date", ColumnKind::Date),
        ColumnDef::new("total_amount", ColumnKind::Real),
    ],
    foreign_keys: &[ForeignKeyDef {
        column: "user_id",
        references_table: "users",
        references_column: "user_id",
    }],
};

pub static ORDER_ITEMS: TableDef = TableDef {
    name: "order_items",
    file_name: "order_items.csv",
    primary_key: "item_id",
    columns: &[
        ColumnDef::new("item_id", ColumnKind::Integer),
        ColumnDef::new("order_id", ColumnKind::Integer),
        ColumnDef::new("product_id", ColumnKind::Integer),
        ColumnDef::new("quantity", ColumnKind::Integer),
    ],
    foreign_keys: &[
        ForeignKeyDef {
            column: "order_id",
            references_table: "orders",
            references_column: "order_id",
        },
        ForeignKeyDef {
            column: "product_id",
            references_table: "products",
            references_column: "product_id",
        },
    ],
};

pub static PAYMENTS: TableDef = TableDef {
    name: "payments",
    file_name: "payments.csv",
    primary_key: "payment_id",
    columns: &[
        ColumnDef::new("payment_id", ColumnKind::Integer),
        ColumnDef::new("order_id", ColumnKind::Integer),
        ColumnDef::new("method", ColumnKind::Text),
        ColumnDef::new("status", ColumnKind::Text),
        ColumnDef::new("amount", ColumnKind::Real),
    ],
    foreign_keys: &[ForeignKeyDef {
        column: "order_id",
        references_table: "orders",
        references_column: "order_id",
    }],
};

/// All tables in declaration order.
pub static TABLES: [&TableDef; 5] = [&USERS, &PRODUCTS, &ORDERS, &ORDER_ITEMS, &PAYMENTS];

/// Look up a table definition by name.
pub fn table(name: &str) -> Result<&'static TableDef> {
    TABLES
        .iter()
        .copied()
        .find(|table| table.name == name)
        .ok_or_else(|| Error::UnknownTable(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_declared_tables() {
        assert_eq!(table("order_items").map(|t| t.file_name).ok(), Some("order_items.csv"));
        assert!(matches!(table("carts"), Err(Error::UnknownTable(_))));
    }

    #[test]
    fn primary_keys_are_first_integer_columns() {
        for table in TABLES {
            let first = table.columns[0];
            assert_eq!(first.name, table.primary_key);
            assert_eq!(first.kind, ColumnKind::Integer);
        }
    }
}
