use once_cell::sync::OnceCell;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::Path;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// URL sqlite для sea-orm и sqlx (Windows-пути тоже приводятся к `/`)
pub fn build_sqlite_url(path: &Path) -> String {
    let normalized = path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    format!("sqlite://{}{}?mode=rwc", prefix, normalized)
}

/// Открыть БД и сохранить глобальное соединение. Схему создают миграции
pub async fn initialize_database(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let db_url = build_sqlite_url(db_path);

    let mut options = ConnectOptions::new(db_url);
    options.sqlx_logging(false);
    let conn = Database::connect(options).await?;
    tracing::info!("Database connected: {}", db_path.display());

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_url() {
        assert_eq!(
            build_sqlite_url(Path::new("/var/app/db/app.db")),
            "sqlite:///var/app/db/app.db?mode=rwc"
        );
        assert_eq!(
            build_sqlite_url(Path::new("C:\\app\\app.db")),
            "sqlite:///C:/app/app.db?mode=rwc"
        );
    }
}
