//! SQLite DDL and DML rendered from the table descriptors.

use ecomdata_core::TableDef;

/// `CREATE TABLE IF NOT EXISTS` statement with primary and foreign keys.
pub fn create_table_sql(table: &TableDef) -> String {
    let mut lines: Vec<String> = table
        .columns
        .iter()
        .map(|column| {
            if column.name == table.primary_key {
                format!("    {} {} PRIMARY KEY", column.name, column.kind.sql_type())
            } else {
                format!("    {} {} NOT NULL", column.name, column.kind.sql_type())
            }
        })
        .collect();

    for fk in table.foreign_keys {
        lines.push(format!(
            "    FOREIGN KEY ({}) REFERENCES {}({})",
            fk.column, fk.references_table, fk.references_column
        ));
    }

    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n{}\n)",
        table.name,
        lines.join(",\n")
    )
}

/// Parameterised INSERT covering every column in file order.
pub fn insert_sql(table: &TableDef) -> String {
    let placeholders = vec!["?"; table.columns.len()].join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table.name,
        table.column_names().join(", "),
        placeholders
    )
}

pub fn count_sql(table: &TableDef) -> String {
    format!("SELECT COUNT(*) FROM {}", table.name)
}

#[cfg(test)]
mod tests {
    use ecomdata_core::{ORDER_ITEMS, USERS};

    use super::*;

    #[test]
    fn renders_keys_and_types() {
        let expected = "CREATE TABLE IF NOT EXISTS order_items (\n    item_id INTEGER PRIMARY KEY,\n    order_id INTEGER NOT NULL,\n    product_id INTEGER NOT NULL,\n    quantity INTEGER NOT NULL,\n    FOREIGN KEY (order_id) REFERENCES orders(order_id),\n    FOREIGN KEY (product_id) REFERENCES products(product_id)\n)";
        assert_eq!(create_table_sql(&ORDER_ITEMS), expected);
    }

    #[test]
    fn renders_insert_in_file_order() {
        assert_eq!(
            insert_sql(&USERS),
            "INSERT INTO users (user_id, name, email, signup_date) VALUES (?, ?, ?, ?)"
        );
    }
}
