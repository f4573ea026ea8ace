//! libSQL backend — async `RecordStore` implementation.
//!
//! A `libsql::Database` handle is kept for the life of the process and a
//! fresh connection is opened for each operation. In-memory databases are
//! private per connection, so they keep one shared connection instead.

use std::path::Path;

use async_trait::async_trait;
use libsql::{Connection, Database as LibSqlDatabase, params};
use tracing::{debug, info};

use crate::error::DatabaseError;
use crate::store::migrations;
use crate::store::traits::{PhoneRecord, RecordStore, normalize_phone_number};

/// libSQL database backend.
pub struct LibSqlBackend {
    db: LibSqlDatabase,
    /// Set only for `:memory:` databases.
    shared: Option<Connection>,
}

impl LibSqlBackend {
    /// Open (or create) a local database file and run migrations.
    pub async fn new_local(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::Connection(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| {
                DatabaseError::Connection(format!("Failed to open libSQL database: {e}"))
            })?;

        let backend = Self { db, shared: None };
        backend.init_schema().await?;
        info!(path = %path.display(), "Database opened");
        Ok(backend)
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, DatabaseError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| {
                DatabaseError::Connection(format!("Failed to create in-memory database: {e}"))
            })?;

        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Connection(format!("Failed to create connection: {e}")))?;

        let backend = Self {
            db,
            shared: Some(conn),
        };
        backend.init_schema().await?;
        Ok(backend)
    }

    /// Open a connection for a single operation.
    ///
    /// The returned connection is dropped (closed) by the caller when the
    /// operation finishes.
    fn connect(&self) -> Result<Connection, DatabaseError> {
        match &self.shared {
            Some(conn) => Ok(conn.clone()),
            None => self
                .db
                .connect()
                .map_err(|e| DatabaseError::Connection(format!("Failed to create connection: {e}"))),
        }
    }

    async fn init_schema(&self) -> Result<(), DatabaseError> {
        let conn = self.connect()?;
        migrations::run_migrations(&conn).await
    }

    /// Insert a record, replacing the details of an existing number.
    ///
    /// Provisioning helper; the webhook path only ever reads. The number is
    /// normalized the same way `lookup` normalizes it.
    pub async fn insert_record(&self, record: &PhoneRecord) -> Result<(), DatabaseError> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO phone_data (phone_number, details) VALUES (?1, ?2)
             ON CONFLICT(phone_number) DO UPDATE SET details = excluded.details",
            params![
                normalize_phone_number(&record.phone_number),
                record.details.as_str()
            ],
        )
        .await
        .map_err(|e| DatabaseError::Query(format!("insert_record: {e}")))?;
        Ok(())
    }
}

/// Read a nullable TEXT column.
fn text_column(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row
        .get_value(idx)
        .map_err(|e| DatabaseError::Query(format!("column {idx}: {e}")))?
    {
        libsql::Value::Text(s) => Ok(Some(s)),
        libsql::Value::Null => Ok(None),
        other => Err(DatabaseError::Query(format!(
            "column {idx}: expected text, got {other:?}"
        ))),
    }
}

#[async_trait]
impl RecordStore for LibSqlBackend {
    async fn lookup(&self, phone_number: &str) -> Result<Option<String>, DatabaseError> {
        let normalized = normalize_phone_number(phone_number);
        let conn = self.connect()?;

        let mut rows = conn
            .query(
                "SELECT details FROM phone_data WHERE phone_number = ?1",
                params![normalized],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("lookup: {e}")))?;

        let row = rows
            .next()
            .await
            .map_err(|e| DatabaseError::Query(format!("lookup: {e}")))?;

        let details = match row {
            Some(row) => text_column(&row, 0)?,
            None => None,
        };

        debug!(
            phone_number = normalized,
            found = details.is_some(),
            "Record lookup"
        );
        Ok(details)
    }
}
