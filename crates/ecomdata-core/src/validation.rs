use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};
use crate::schema::TableDef;

/// Validate internal consistency of a set of table definitions.
///
/// This checks:
/// - duplicate tables/columns/file names
/// - primary key columns exist
/// - foreign key columns and referenced targets exist
pub fn validate_tables(tables: &[&TableDef]) -> Result<()> {
    let mut catalog: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    let mut files = BTreeSet::new();

    for table in tables {
        if catalog.contains_key(table.name) {
            return Err(Error::InvalidSchema(format!(
                "duplicate table name: {}",
                table.name
            )));
        }
        if !files.insert(table.file_name) {
            return Err(Error::InvalidSchema(format!(
                "duplicate file name: {}",
                table.file_name
            )));
        }

        let mut columns = BTreeSet::new();
        for column in table.columns {
            if !columns.insert(column.name) {
                return Err(Error::InvalidSchema(format!(
                    "duplicate column name: {}.{}",
                    table.name, column.name
                )));
            }
        }

        catalog.insert(table.name, columns);
    }

    for table in tables {
        let columns = &catalog[table.name];

        if !columns.contains(table.primary_key) {
            return Err(Error::InvalidSchema(format!(
                "primary key column not found: {}.{}",
                table.name, table.primary_key
            )));
        }

        for fk in table.foreign_keys {
            if !columns.contains(fk.column) {
                return Err(Error::InvalidSchema(format!(
                    "foreign key column not found: {}.{}",
                    table.name, fk.column
                )));
            }

            let ref_columns = catalog.get(fk.references_table).ok_or_else(|| {
                Error::InvalidSchema(format!(
                    "referenced table not found: {}",
                    fk.references_table
                ))
            })?;

            if !ref_columns.contains(fk.references_column) {
                return Err(Error::InvalidSchema(format!(
                    "referenced column not found: {}.{}",
                    fk.references_table, fk.references_column
                )));
            }
        }
    }

    Ok(())
}
