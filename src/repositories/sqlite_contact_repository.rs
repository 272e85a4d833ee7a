use crate::domain::{ContactId, EmailAddress, PhoneNumber};
use crate::error::{StoreError, StoreResult};
use crate::models::{timestamp_now, Contact, ContactPatch, NewContact};
use crate::repositories::traits::ContactRepository;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{ffi, params, Connection, ErrorCode, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS contacts (
    id          TEXT PRIMARY KEY NOT NULL,
    name        TEXT NOT NULL,
    phone       TEXT NOT NULL,
    email       TEXT NOT NULL,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);
CREATE UNIQUE INDEX IF NOT EXISTS idx_contacts_phone ON contacts (phone);
CREATE UNIQUE INDEX IF NOT EXISTS idx_contacts_name_phone ON contacts (name, phone);
"#;

const SELECT_COLUMNS: &str = "SELECT id, name, phone, email, created_at, updated_at FROM contacts";

/// Contact repository backed by an embedded SQLite database.
///
/// rusqlite is synchronous, so every call runs on the blocking thread pool
/// behind a single shared connection. The unique indexes on `phone` and
/// `(name, phone)` are the authoritative duplicate guard.
#[derive(Clone)]
pub struct SqliteContactRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteContactRepository {
    /// Open (or create) the database at `path` and ensure the schema exists.
    ///
    /// The special path `:memory:` opens a private in-memory database.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if path.as_os_str() == ":memory:" {
            return Self::open_in_memory();
        }

        tracing::info!("Opening contact store at {}", path.display());
        let conn = Connection::open(path).map_err(map_sqlite_error)?;
        Self::from_connection(conn)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory().map_err(map_sqlite_error)?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> StoreResult<Self> {
        conn.busy_timeout(Duration::from_secs(5))
            .map_err(map_sqlite_error)?;
        conn.execute_batch(SCHEMA).map_err(map_sqlite_error)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run a closure against the connection on the blocking pool.
    async fn with_conn<T, F>(&self, f: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|_| StoreError::Backend("Connection lock poisoned".to_string()))?;
            f(&conn).map_err(map_sqlite_error)
        })
        .await
        .map_err(|e| StoreError::Backend(format!("Task join error: {}", e)))?
    }
}

#[async_trait]
impl ContactRepository for SqliteContactRepository {
    async fn find_by_id(&self, id: &ContactId) -> StoreResult<Option<Contact>> {
        let id = id.clone();
        self.with_conn(move |conn| select_by_id(conn, &id)).await
    }

    async fn find_by_phone(&self, phone: &PhoneNumber) -> StoreResult<Option<Contact>> {
        let phone = phone.clone();
        self.with_conn(move |conn| {
            conn.query_row(
                &format!("{} WHERE phone = ?1", SELECT_COLUMNS),
                [phone.as_str()],
                row_to_contact,
            )
            .optional()
        })
        .await
    }

    async fn list_newest_first(&self) -> StoreResult<Vec<Contact>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "{} ORDER BY created_at DESC, rowid DESC",
                SELECT_COLUMNS
            ))?;
            let contacts = stmt
                .query_map([], row_to_contact)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(contacts)
        })
        .await
    }

    async fn search(&self, query: &str) -> StoreResult<Vec<Contact>> {
        let contacts = self
            .with_conn(|conn| {
                let mut stmt = conn.prepare(&format!("{} ORDER BY rowid", SELECT_COLUMNS))?;
                let contacts = stmt
                    .query_map([], row_to_contact)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(contacts)
            })
            .await?;

        // SQLite's lower() folds ASCII only, so matching happens here
        Ok(contacts
            .into_iter()
            .filter(|contact| contact.matches_query(query))
            .collect())
    }

    async fn insert(&self, contact: NewContact) -> StoreResult<Contact> {
        let now = timestamp_now();
        let record = Contact {
            id: ContactId::generate(),
            name: contact.name,
            phone: contact.phone,
            email: contact.email,
            created_at: now,
            updated_at: now,
        };

        let row = record.clone();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO contacts (id, name, phone, email, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    row.id.as_str(),
                    row.name,
                    row.phone.as_str(),
                    row.email.as_str(),
                    encode_timestamp(&row.created_at),
                    encode_timestamp(&row.updated_at),
                ],
            )?;
            Ok(())
        })
        .await?;

        tracing::debug!("Inserted contact {}", record.id);
        Ok(record)
    }

    async fn update(
        &self,
        id: &ContactId,
        patch: &ContactPatch,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<Option<Contact>> {
        let id = id.clone();
        let patch = patch.clone();

        self.with_conn(move |conn| {
            let changed = conn.execute(
                "UPDATE contacts SET \
                     name = COALESCE(?2, name), \
                     phone = COALESCE(?3, phone), \
                     email = COALESCE(?4, email), \
                     updated_at = ?5 \
                 WHERE id = ?1",
                params![
                    id.as_str(),
                    patch.name,
                    patch.phone.as_ref().map(PhoneNumber::as_str),
                    patch.email.as_ref().map(EmailAddress::as_str),
                    encode_timestamp(&updated_at),
                ],
            )?;

            if changed == 0 {
                return Ok(None);
            }
            select_by_id(conn, &id)
        })
        .await
    }

    async fn delete(&self, id: &ContactId) -> StoreResult<bool> {
        let id = id.clone();
        self.with_conn(move |conn| {
            let removed = conn.execute("DELETE FROM contacts WHERE id = ?1", [id.as_str()])?;
            Ok(removed > 0)
        })
        .await
    }
}

fn select_by_id(conn: &Connection, id: &ContactId) -> rusqlite::Result<Option<Contact>> {
    conn.query_row(
        &format!("{} WHERE id = ?1", SELECT_COLUMNS),
        [id.as_str()],
        row_to_contact,
    )
    .optional()
}

fn row_to_contact(row: &Row<'_>) -> rusqlite::Result<Contact> {
    let id: String = row.get(0)?;
    let phone: String = row.get(2)?;
    let email: String = row.get(3)?;
    let created_at: String = row.get(4)?;
    let updated_at: String = row.get(5)?;

    Ok(Contact {
        id: ContactId::new(id).map_err(|e| conversion_error(0, e))?,
        name: row.get(1)?,
        phone: PhoneNumber::new(phone).map_err(|e| conversion_error(2, e))?,
        email: EmailAddress::new(email).map_err(|e| conversion_error(3, e))?,
        created_at: decode_timestamp(&created_at).map_err(|e| conversion_error(4, e))?,
        updated_at: decode_timestamp(&updated_at).map_err(|e| conversion_error(5, e))?,
    })
}

fn conversion_error<E>(column: usize, error: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(error))
}

fn encode_timestamp(at: &DateTime<Utc>) -> String {
    // Fixed width so lexical order in SQL equals chronological order
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw).map(|at| at.with_timezone(&Utc))
}

/// Translate rusqlite failures, singling out unique-index rejections.
fn map_sqlite_error(error: rusqlite::Error) -> StoreError {
    if let rusqlite::Error::SqliteFailure(failure, detail) = &error {
        let unique = failure.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
            || failure.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY;
        if failure.code == ErrorCode::ConstraintViolation && unique {
            let message = detail.clone().unwrap_or_else(|| error.to_string());
            return StoreError::UniqueViolation(message);
        }
    }
    StoreError::Backend(error.to_string())
}
