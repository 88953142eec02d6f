use std::path::{Path, PathBuf};

use sqlx::sqlite::SqliteConnection;

use ecomdata_core::TableDef;

use crate::coerce::{SqlValue, coerce};
use crate::errors::IngestError;
use crate::schema::{count_sql, create_table_sql, insert_sql};

/// Typed rows of one table, in file order.
pub type TableRows = Vec<Vec<SqlValue>>;

pub fn artifact_path(data_dir: &Path, table: &TableDef) -> PathBuf {
    data_dir.join(table.file_name)
}

/// Fail with `MissingArtifact` unless `path` is an existing file.
pub fn require_artifact(path: &Path, table: &'static TableDef) -> Result<(), IngestError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(IngestError::MissingArtifact {
            table: table.name,
            path: path.to_path_buf(),
        })
    }
}

/// Read a table's CSV file and coerce every field to its declared kind.
///
/// The whole file is parsed before anything is returned, so a bad field
/// never leaves a partially inserted table behind.
pub fn read_table(path: &Path, table: &'static TableDef) -> Result<TableRows, IngestError> {
    require_artifact(path, table)?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;

    let expected = table.column_names();
    let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if header != expected {
        return Err(IngestError::InvalidArtifact {
            table: table.name,
            message: format!(
                "header [{}] does not match [{}]",
                header.join(","),
                expected.join(",")
            ),
        });
    }

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let row_number = index as u64 + 1;
        let mut row = Vec::with_capacity(table.columns.len());

        for (column, raw) in table.columns.iter().zip(record.iter()) {
            let value =
                coerce(column.kind, raw).map_err(|expected| IngestError::TypeCoercion {
                    table: table.name,
                    column: column.name,
                    row: row_number,
                    value: raw.to_string(),
                    expected,
                })?;
            row.push(value);
        }
        rows.push(row);
    }

    Ok(rows)
}

/// Create every table, in the order given.
pub async fn create_schema(
    conn: &mut SqliteConnection,
    tables: &[&TableDef],
) -> Result<(), IngestError> {
    for table in tables {
        sqlx::query(&create_table_sql(table))
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

/// Append rows to a pre-created table, preserving their order.
pub async fn insert_rows(
    conn: &mut SqliteConnection,
    table: &TableDef,
    rows: &[Vec<SqlValue>],
) -> Result<u64, IngestError> {
    let sql = insert_sql(table);
    let mut inserted = 0_u64;

    for row in rows {
        let mut query = sqlx::query(&sql);
        for value in row {
            query = match value {
                SqlValue::Integer(value) => query.bind(*value),
                SqlValue::Real(value) => query.bind(*value),
                SqlValue::Text(value) => query.bind(value.as_str()),
            };
        }
        inserted += query.execute(&mut *conn).await?.rows_affected();
    }

    Ok(inserted)
}

pub async fn count_rows(conn: &mut SqliteConnection, table: &TableDef) -> Result<u64, IngestError> {
    let count: i64 = sqlx::query_scalar(&count_sql(table))
        .fetch_one(&mut *conn)
        .await?;
    Ok(count.max(0) as u64)
}

/// Read, coerce and insert one table, then check the stored row count.
pub async fn load_table(
    conn: &mut SqliteConnection,
    data_dir: &Path,
    table: &'static TableDef,
) -> Result<u64, IngestError> {
    let rows = read_table(&artifact_path(data_dir, table), table)?;
    insert_rows(conn, table, &rows).await?;

    let expected = rows.len() as u64;
    let actual = count_rows(conn, table).await?;
    if actual != expected {
        return Err(IngestError::RowCountMismatch {
            table: table.name,
            expected,
            actual,
        });
    }
    Ok(actual)
}
