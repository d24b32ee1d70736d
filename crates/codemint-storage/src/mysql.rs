use async_trait::async_trait;
use codemint_core::store::Result;
use codemint_core::{Code, CodeRecord, CodeStore, StoreError};
use jiff::Timestamp;
use sqlx::{MySqlPool, Row};

/// MySQL implementation of the store contract.
///
/// Uniqueness rides on the primary key of the `unique_codes` table: the
/// conditional insert is a plain `INSERT` whose duplicate-key rejection maps
/// to [`StoreError::Conflict`]. Records are never updated or reused by this
/// store; deletion is an administrative action outside of it.
#[derive(Debug, Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    /// Creates a store from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Creates a store by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Looks up the record stored under `code`.
    ///
    /// Not part of [`CodeStore`]; used by administrative tooling and tests.
    pub async fn get(&self, code: &Code) -> Result<Option<CodeRecord>> {
        let row = sqlx::query(
            r#"
            SELECT created_on, used_by, reference, description
            FROM unique_codes
            WHERE code = ?
            LIMIT 1
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let created_on_raw: i64 = row.try_get("created_on").map_err(map_sqlx_error)?;
        let created_on = parse_created_on(created_on_raw)?;
        let used_by: Option<String> = row.try_get("used_by").map_err(map_sqlx_error)?;
        let reference: Option<String> = row.try_get("reference").map_err(map_sqlx_error)?;
        let description: Option<String> = row.try_get("description").map_err(map_sqlx_error)?;

        Ok(Some(CodeRecord {
            created_on,
            used_by,
            reference,
            description,
        }))
    }
}

fn parse_created_on(seconds: i64) -> Result<Timestamp> {
    Timestamp::from_second(seconds).map_err(|e| {
        StoreError::InvalidData(format!("invalid created_on timestamp '{}': {e}", seconds))
    })
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StoreError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StoreError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StoreError::InvalidData(message),
        _ => StoreError::Query(message),
    }
}

#[async_trait]
impl CodeStore for MySqlStore {
    async fn put_if_absent(&self, code: &Code, record: CodeRecord) -> Result<()> {
        let created_on = record.created_on.as_second();

        let result = sqlx::query(
            r#"
            INSERT INTO unique_codes (code, created_on, used_by, reference, description)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(code.as_str())
        .bind(created_on)
        .bind(record.used_by)
        .bind(record.reference)
        .bind(record.description)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => {
                Err(StoreError::Conflict(code.as_str().to_owned()))
            }
            Err(err) => Err(map_sqlx_error(err)),
        }
    }
}
