use std::path::Path;
use std::time::Instant;

use sqlx::Connection;
use sqlx::sqlite::SqliteConnection;
use tracing::{info, warn};

use ecomdata_core::{TABLES, TableDef, dependency_order, table, validate_tables};

use crate::errors::IngestError;
use crate::loader::{artifact_path, create_schema, load_table, require_artifact};
use crate::model::{IngestOptions, IngestReport, LoadedTable};
use crate::store::{open_store, reset_store};

/// Entry point for loading the flat files into the store.
#[derive(Debug, Clone)]
pub struct IngestEngine {
    options: IngestOptions,
}

impl IngestEngine {
    pub fn new(options: IngestOptions) -> Self {
        Self { options }
    }

    /// Replace the store with a freshly loaded copy of the flat files.
    ///
    /// Schema creation and every table load share one transaction: on error
    /// it is rolled back and the store holds no tables.
    pub async fn run(&self) -> Result<IngestReport, IngestError> {
        let start = Instant::now();
        let tables = load_order()?;
        let IngestOptions {
            data_dir,
            db_path,
            enforce_foreign_keys,
        } = &self.options;

        info!(
            data_dir = %data_dir.display(),
            db_path = %db_path.display(),
            enforce_foreign_keys,
            "ingestion started"
        );

        for &table in &tables {
            require_artifact(&artifact_path(data_dir, table), table)?;
        }

        reset_store(db_path)?;
        info!(db_path = %db_path.display(), "store reset");

        let mut conn = open_store(db_path, *enforce_foreign_keys).await?;
        let mut tx = conn.begin().await?;

        let outcome = load_all(&mut *tx, &tables, data_dir).await;
        match outcome {
            Ok(loaded) => {
                tx.commit().await?;
                conn.close().await?;

                let report = IngestReport {
                    db_path: db_path.clone(),
                    tables: loaded,
                    duration_ms: start.elapsed().as_millis() as u64,
                };
                info!(
                    tables = report.tables.len(),
                    duration_ms = report.duration_ms,
                    "ingestion completed"
                );
                Ok(report)
            }
            Err(err) => {
                warn!(
                    error = %err,
                    table = err.table().unwrap_or("-"),
                    "ingestion failed, rolling back"
                );
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "rollback failed");
                }
                if let Err(close_err) = conn.close().await {
                    warn!(error = %close_err, "closing store failed");
                }
                Err(err)
            }
        }
    }
}

/// Dataset tables sorted so parents load before children.
pub fn load_order() -> Result<Vec<&'static TableDef>, IngestError> {
    validate_tables(&TABLES)?;
    let order = dependency_order(&TABLES)?;
    order
        .into_iter()
        .map(|name| table(name).map_err(IngestError::from))
        .collect()
}

async fn load_all(
    conn: &mut SqliteConnection,
    tables: &[&'static TableDef],
    data_dir: &Path,
) -> Result<Vec<LoadedTable>, IngestError> {
    create_schema(conn, tables).await?;
    info!(tables = tables.len(), "schema created");

    let mut loaded = Vec::with_capacity(tables.len());
    for &table in tables {
        let rows = load_table(conn, data_dir, table).await?;
        info!(table = table.name, rows, "table loaded");
        loaded.push(LoadedTable {
            table: table.name.to_string(),
            rows,
        });
    }
    Ok(loaded)
}
