use std::path::PathBuf;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::checks::verify_dataset;
use crate::errors::GenerationError;
use crate::generators::{
    generate_order_items_and_finalize_totals, generate_orders, generate_payments,
    generate_products, generate_users,
};
use crate::model::{GenerateOptions, GenerationReport, TableReport};
use crate::output::csv::{StagedFile, stage_table_csv};
use crate::random::RandomSource;
use crate::records::Dataset;

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub out_dir: PathBuf,
    pub dataset: Dataset,
    pub report: GenerationReport,
}

/// Build all five record sets in dependency order, entirely in memory.
pub fn generate_dataset(
    options: &GenerateOptions,
    random: &mut RandomSource,
) -> Result<Dataset, GenerationError> {
    options.validate()?;
    let reference_date = options.resolved_reference_date();

    let users = generate_users(options.users, reference_date, random)?;
    debug!(table = "users", rows = users.len(), "table generated");

    let products = generate_products(options.products, random)?;
    debug!(table = "products", rows = products.len(), "table generated");

    let mut orders = generate_orders(options.orders, &users, reference_date, random)?;
    let order_items = generate_order_items_and_finalize_totals(
        &mut orders,
        &products,
        options.items_per_order,
        random,
    )?;
    debug!(table = "orders", rows = orders.len(), "table generated");
    debug!(table = "order_items", rows = order_items.len(), "table generated");

    let payments = generate_payments(&orders, random)?;
    debug!(table = "payments", rows = payments.len(), "table generated");

    Ok(Dataset {
        users,
        products,
        orders,
        order_items,
        payments,
    })
}

/// Entry point for generating the flat-file dataset.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    options: GenerateOptions,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    /// Generate, verify and write all five CSV files.
    ///
    /// Nothing is written unless the whole dataset passes verification, and
    /// destination files are only replaced once every table has been staged.
    /// Each file is then replaced by its own rename: a failed rename leaves the
    /// tables committed before it in place and removes the remaining staged
    /// files.
    pub fn run(&self) -> Result<GenerationResult, GenerationError> {
        let start = Instant::now();
        self.options.validate()?;
        ecomdata_core::validate_tables(&ecomdata_core::TABLES)?;

        // Pin the date once so the whole run shares one "today".
        let mut options = self.options.clone();
        let reference_date = options.resolved_reference_date();
        options.reference_date = Some(reference_date);

        info!(
            seed = options.seed,
            reference_date = %reference_date,
            users = options.users,
            products = options.products,
            orders = options.orders,
            out_dir = %options.out_dir.display(),
            "generation started"
        );

        let mut random = RandomSource::new(options.seed);
        let dataset = generate_dataset(&options, &mut random).inspect_err(|err| {
            warn!(error = %err, "generation failed");
        })?;
        verify_dataset(&dataset).inspect_err(|err| {
            warn!(error = %err, "generated dataset failed verification");
        })?;

        std::fs::create_dir_all(&options.out_dir)?;
        let staged: Vec<StagedFile> = vec![
            stage_table_csv(&options.out_dir, &dataset.users)?,
            stage_table_csv(&options.out_dir, &dataset.products)?,
            stage_table_csv(&options.out_dir, &dataset.orders)?,
            stage_table_csv(&options.out_dir, &dataset.order_items)?,
            stage_table_csv(&options.out_dir, &dataset.payments)?,
        ];

        let mut report = GenerationReport::new(options.seed, reference_date);
        for file in staged {
            let table = file.table();
            let rows = file.rows();
            let bytes_written = file.bytes_written();
            let path = file.commit().inspect_err(|err| {
                warn!(table, error = %err, "commit failed, discarding remaining staged files");
            })?;
            info!(
                table,
                rows,
                bytes_written,
                path = %path.display(),
                "table written"
            );
            report.record_table(TableReport {
                table: table.to_string(),
                file: path,
                rows,
                bytes_written,
            });
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            tables = report.tables.len(),
            bytes_written = report.bytes_written,
            duration_ms = report.duration_ms,
            "generation completed"
        );

        Ok(GenerationResult {
            out_dir: options.out_dir,
            dataset,
            report,
        })
    }
}
