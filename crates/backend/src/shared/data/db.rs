use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

const CREATE_LOGS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS bbai_logs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        level TEXT NOT NULL DEFAULT 'info',
        message TEXT NOT NULL,
        context TEXT,
        source TEXT NOT NULL DEFAULT 'core',
        meta TEXT,
        user_id INTEGER,
        created_at TEXT NOT NULL
    );
"#;

const CREATE_LOGS_INDEXES: [&str; 2] = [
    "CREATE INDEX IF NOT EXISTS idx_bbai_logs_level ON bbai_logs (level);",
    "CREATE INDEX IF NOT EXISTS idx_bbai_logs_created_at ON bbai_logs (created_at);",
];

/// Build the sqlite URL for a file path, creating its directory
fn sqlite_url(db_file: &Path) -> anyhow::Result<String> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    Ok(format!("sqlite://{}{}?mode=rwc", prefix, normalized))
}

/// Create the log table and its indexes when missing
pub async fn ensure_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        CREATE_LOGS_TABLE.to_string(),
    ))
    .await?;
    for sql in CREATE_LOGS_INDEXES {
        conn.execute(Statement::from_string(DatabaseBackend::Sqlite, sql.to_string()))
            .await?;
    }
    Ok(())
}

pub async fn initialize_database(db_file: &Path) -> anyhow::Result<()> {
    let db_url = sqlite_url(db_file)?;
    tracing::info!("Opening database at {}", db_url);
    let conn = Database::connect(&db_url).await?;

    ensure_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}
