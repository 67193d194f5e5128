use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub admin: AdminConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Администратор, создаваемый при первом запуске
#[derive(Debug, Deserialize, Clone)]
pub struct AdminConfig {
    #[serde(default = "default_admin_username")]
    pub username: String,
    #[serde(default = "default_admin_password")]
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: default_admin_username(),
            password: default_admin_password(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    3000
}

fn default_admin_username() -> String {
    "admin".into()
}

fn default_admin_password() -> String {
    "admin12345".into()
}

/// Конфигурация по умолчанию, зашитая в бинарник
const DEFAULT_CONFIG: &str = r#"
[database]
path = "target/db/app.db"

[server]
host = "0.0.0.0"
port = 3000
"#;

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Загрузка config.toml
///
/// Порядок поиска:
/// 1. Рядом с исполняемым файлом
/// 2. Встроенная конфигурация по умолчанию
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");
            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                return parse_config(&contents);
            }
            tracing::warn!("config.toml not found at: {}", config_path.display());
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    Ok(config)
}

/// Путь к файлу БД; относительный путь считается от каталога бинарника
pub fn get_database_path(config: &Config) -> anyhow::Result<PathBuf> {
    let db_path = Path::new(&config.database.path);
    if db_path.is_absolute() {
        return Ok(db_path.to_path_buf());
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return Ok(exe_dir.join(db_path));
        }
    }

    Ok(db_path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.database.path, "target/db/app.db");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.admin.username, "admin");
    }

    #[test]
    fn test_sections_are_optional() {
        let config = parse_config("[database]\npath = \"/tmp/x.db\"\n").unwrap();
        assert_eq!(config.server.bind_address(), "0.0.0.0:3000");
        assert!(config.admin.password.len() >= 8);
        assert_eq!(
            get_database_path(&config).unwrap(),
            PathBuf::from("/tmp/x.db")
        );
    }

    #[test]
    fn test_partial_server_section() {
        let config =
            parse_config("[database]\npath = \"a.db\"\n[server]\nport = 8080\n").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
    }
}
