use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{Connection, Row};

use ecomdata_core::TABLES;
use ecomdata_generate::{GenerateOptions, GenerationEngine};
use ecomdata_ingest::{IngestEngine, IngestError, IngestOptions};

struct Fixture {
    data_dir: PathBuf,
    db_path: PathBuf,
}

impl Fixture {
    fn new(label: &str, rows: usize) -> Result<Self> {
        let mut root = std::env::temp_dir();
        root.push(format!("ecomdata_ingest_{label}_{}", uuid::Uuid::new_v4()));
        let data_dir = root.join("data");

        let options = GenerateOptions {
            out_dir: data_dir.clone(),
            users: rows,
            products: rows,
            orders: rows,
            reference_date: NaiveDate::from_ymd_opt(2024, 6, 1),
            ..GenerateOptions::default()
        };
        GenerationEngine::new(options)
            .run()
            .context("generating fixture dataset")?;

        Ok(Self {
            data_dir,
            db_path: root.join("db").join("ecom.db"),
        })
    }

    fn engine(&self) -> IngestEngine {
        IngestEngine::new(IngestOptions {
            data_dir: self.data_dir.clone(),
            db_path: self.db_path.clone(),
            enforce_foreign_keys: true,
        })
    }

    async fn connect(&self) -> Result<SqliteConnection> {
        let options = SqliteConnectOptions::new().filename(&self.db_path);
        SqliteConnection::connect_with(&options)
            .await
            .context("opening loaded store")
    }
}

fn csv_rows(path: &Path) -> Result<Vec<csv::StringRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    Ok(reader.records().collect::<Result<Vec<_>, _>>()?)
}

async fn table_count(conn: &mut SqliteConnection, table: &str) -> Result<i64> {
    let count = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(&mut *conn)
        .await?;
    Ok(count)
}

#[tokio::test]
async fn loads_every_table_with_matching_counts() -> Result<()> {
    let fixture = Fixture::new("counts", 200)?;
    let report = fixture.engine().run().await?;

    let mut conn = fixture.connect().await?;
    for table in TABLES {
        let expected = csv_rows(&fixture.data_dir.join(table.file_name))?.len() as i64;
        assert_eq!(table_count(&mut conn, table.name).await?, expected, "{}", table.name);
        assert_eq!(report.rows(table.name), Some(expected as u64));
    }

    let loaded: Vec<&str> = report.tables.iter().map(|t| t.table.as_str()).collect();
    assert_eq!(
        loaded,
        vec!["users", "products", "orders", "order_items", "payments"]
    );
    Ok(())
}

#[tokio::test]
async fn running_twice_replaces_instead_of_appending() -> Result<()> {
    let fixture = Fixture::new("twice", 60)?;
    let engine = fixture.engine();

    engine.run().await?;
    engine.run().await?;

    let mut conn = fixture.connect().await?;
    for table in TABLES {
        let expected = csv_rows(&fixture.data_dir.join(table.file_name))?.len() as i64;
        assert_eq!(table_count(&mut conn, table.name).await?, expected, "{}", table.name);
    }
    Ok(())
}

#[tokio::test]
async fn rows_round_trip_with_normalized_types() -> Result<()> {
    let fixture = Fixture::new("roundtrip", 40)?;
    fixture.engine().run().await?;
    let mut conn = fixture.connect().await?;

    let source = csv_rows(&fixture.data_dir.join("users.csv"))?;
    let stored =
        sqlx::query("SELECT user_id, name, email, signup_date FROM users ORDER BY user_id")
            .fetch_all(&mut conn)
            .await?;
    assert_eq!(stored.len(), source.len());
    for (row, record) in stored.iter().zip(&source) {
        assert_eq!(row.try_get::<i64, _>(0)?, record[0].parse::<i64>()?);
        assert_eq!(row.try_get::<String, _>(1)?, &record[1]);
        assert_eq!(row.try_get::<String, _>(2)?, &record[2]);
        assert_eq!(row.try_get::<String, _>(3)?, &record[3]);
    }

    let source = csv_rows(&fixture.data_dir.join("orders.csv"))?;
    let stored = sqlx::query(
        "SELECT order_id, user_id, order_date, total_amount FROM orders ORDER BY order_id",
    )
    .fetch_all(&mut conn)
    .await?;
    assert_eq!(stored.len(), source.len());
    for (row, record) in stored.iter().zip(&source) {
        assert_eq!(row.try_get::<i64, _>(0)?, record[0].parse::<i64>()?);
        assert_eq!(row.try_get::<i64, _>(1)?, record[1].parse::<i64>()?);
        assert_eq!(row.try_get::<String, _>(2)?, &record[2]);
        let total: f64 = row.try_get(3)?;
        assert!((total - record[3].parse::<f64>()?).abs() < 1e-9);
    }

    let source = csv_rows(&fixture.data_dir.join("products.csv"))?;
    let stored =
        sqlx::query("SELECT product_id, name, category, price FROM products ORDER BY product_id")
            .fetch_all(&mut conn)
            .await?;
    assert_eq!(stored.len(), source.len());
    for (row, record) in stored.iter().zip(&source) {
        assert_eq!(row.try_get::<i64, _>(0)?, record[0].parse::<i64>()?);
        assert_eq!(row.try_get::<String, _>(1)?, &record[1]);
        assert_eq!(row.try_get::<String, _>(2)?, &record[2]);
        let price: f64 = row.try_get(3)?;
        assert!((price - record[3].parse::<f64>()?).abs() < 1e-9);
    }

    let source = csv_rows(&fixture.data_dir.join("order_items.csv"))?;
    let stored = sqlx::query(
        "SELECT item_id, order_id, product_id, quantity FROM order_items ORDER BY item_id",
    )
    .fetch_all(&mut conn)
    .await?;
    assert_eq!(stored.len(), source.len());
    for (row, record) in stored.iter().zip(&source) {
        for index in 0..4 {
            assert_eq!(row.try_get::<i64, _>(index)?, record[index].parse::<i64>()?);
        }
    }

    let source = csv_rows(&fixture.data_dir.join("payments.csv"))?;
    let stored = sqlx::query(
        "SELECT payment_id, order_id, method, status, amount FROM payments ORDER BY payment_id",
    )
    .fetch_all(&mut conn)
    .await?;
    assert_eq!(stored.len(), source.len());
    for (row, record) in stored.iter().zip(&source) {
        assert_eq!(row.try_get::<i64, _>(0)?, record[0].parse::<i64>()?);
        assert_eq!(row.try_get::<i64, _>(1)?, record[1].parse::<i64>()?);
        assert_eq!(row.try_get::<String, _>(2)?, &record[2]);
        assert_eq!(row.try_get::<String, _>(3)?, &record[3]);
        let amount: f64 = row.try_get(4)?;
        assert!((amount - record[4].parse::<f64>()?).abs() < 1e-9);
    }
    Ok(())
}

#[tokio::test]
async fn foreign_keys_resolve_after_load() -> Result<()> {
    let fixture = Fixture::new("fk", 80)?;
    fixture.engine().run().await?;
    let mut conn = fixture.connect().await?;

    let violations = sqlx::query("PRAGMA foreign_key_check")
        .fetch_all(&mut conn)
        .await?;
    assert!(violations.is_empty());

    let orphans: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM payments p LEFT JOIN orders o ON o.order_id = p.order_id \
         WHERE o.order_id IS NULL",
    )
    .fetch_one(&mut conn)
    .await?;
    assert_eq!(orphans, 0);
    Ok(())
}

#[tokio::test]
async fn float_formatted_ids_and_datetimes_are_normalized() -> Result<()> {
    let fixture = Fixture::new("normalize", 10)?;
    let users_path = fixture.data_dir.join("users.csv");
    let rewritten: String = fs::read_to_string(&users_path)?
        .lines()
        .enumerate()
        .map(|(index, line)| {
            if index == 1 {
                let fields: Vec<&str> = line.splitn(2, ',').collect();
                let line = format!("1.0,{}", fields[1]);
                let (head, date) = line.rsplit_once(',').unwrap_or((line.as_str(), ""));
                format!("{head},{date} 13:45:00\n")
            } else {
                format!("{line}\n")
            }
        })
        .collect();
    fs::write(&users_path, rewritten)?;

    fixture.engine().run().await?;
    let mut conn = fixture.connect().await?;
    let row = sqlx::query("SELECT user_id, signup_date FROM users ORDER BY user_id LIMIT 1")
        .fetch_one(&mut conn)
        .await?;
    assert_eq!(row.try_get::<i64, _>(0)?, 1);
    let date: String = row.try_get(1)?;
    assert!(NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_ok(), "{date}");
    assert_eq!(date.len(), 10);
    Ok(())
}

#[tokio::test]
async fn fractional_quantity_aborts_without_leaving_tables() -> Result<()> {
    let fixture = Fixture::new("coercion", 20)?;
    let items_path = fixture.data_dir.join("order_items.csv");
    let corrupted: String = fs::read_to_string(&items_path)?
        .lines()
        .enumerate()
        .map(|(index, line)| {
            if index == 3 {
                let (head, _) = line.rsplit_once(',').unwrap_or((line, ""));
                format!("{head},2.5\n")
            } else {
                format!("{line}\n")
            }
        })
        .collect();
    fs::write(&items_path, corrupted)?;

    let err = fixture.engine().run().await.unwrap_err();
    match err {
        IngestError::TypeCoercion {
            table,
            column,
            row,
            ref value,
            ..
        } => {
            assert_eq!(table, "order_items");
            assert_eq!(column, "quantity");
            assert_eq!(row, 3);
            assert_eq!(value, "2.5");
        }
        other => panic!("unexpected error: {other}"),
    }

    let mut conn = fixture.connect().await?;
    let tables: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'")
            .fetch_one(&mut conn)
            .await?;
    assert_eq!(tables, 0, "failed ingestion must not leave tables behind");
    Ok(())
}

#[tokio::test]
async fn missing_artifact_keeps_previous_store() -> Result<()> {
    let fixture = Fixture::new("missing", 15)?;
    fixture.engine().run().await?;

    fs::remove_file(fixture.data_dir.join("payments.csv"))?;
    let err = fixture.engine().run().await.unwrap_err();
    assert!(matches!(
        err,
        IngestError::MissingArtifact {
            table: "payments",
            ..
        }
    ));

    let mut conn = fixture.connect().await?;
    assert_eq!(table_count(&mut conn, "users").await?, 15);
    Ok(())
}

#[tokio::test]
async fn mismatched_header_is_rejected() -> Result<()> {
    let fixture = Fixture::new("header", 5)?;
    let products_path = fixture.data_dir.join("products.csv");
    let contents = fs::read_to_string(&products_path)?;
    fs::write(
        &products_path,
        contents.replacen("product_id,name,category,price", "product_id,name,price,category", 1),
    )?;

    let err = fixture.engine().run().await.unwrap_err();
    assert!(matches!(
        err,
        IngestError::InvalidArtifact {
            table: "products",
            ..
        }
    ));
    Ok(())
}

#[tokio::test]
async fn unusable_store_location_is_a_store_state_error() -> Result<()> {
    let fixture = Fixture::new("store_state", 5)?;
    let db_dir = fixture
        .db_path
        .parent()
        .context("store path has a parent")?;
    fs::write(db_dir, "not a directory")?;

    let err = fixture.engine().run().await.unwrap_err();
    match err {
        IngestError::StoreState { ref path, .. } => assert_eq!(path, &fixture.db_path),
        other => panic!("unexpected error: {other}"),
    }
    assert!(fs::metadata(db_dir)?.is_file());
    Ok(())
}
