use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,

    // PostgreSQL settings
    #[serde(default = "default_db_host")]
    pub db_host: String,
    #[serde(default = "default_db_port")]
    pub db_port: u16,
    #[serde(default = "default_db_user")]
    pub db_user: String,
    #[serde(default)]
    pub db_pass: String,
    #[serde(default = "default_db_name")]
    pub db_name: String,

    // S3 settings
    pub s3_bucket: String,
    pub s3_endpoint_url: Option<String>,

    #[serde(default = "default_max_upload_size")]
    pub max_upload_size_mb: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_db_host() -> String {
    "localhost".to_string()
}

fn default_db_port() -> u16 {
    5432
}

fn default_db_user() -> String {
    "postgres".to_string()
}

fn default_db_name() -> String {
    "postgres".to_string()
}

fn default_max_upload_size() -> u64 {
    100
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    pub fn max_upload_size_bytes(&self) -> u64 {
        self.max_upload_size_mb.saturating_mul(1024 * 1024)
    }

    pub fn max_request_body_bytes(&self) -> usize {
        // Allow some overhead for multipart boundaries/headers.
        let bytes = self
            .max_upload_size_mb
            .saturating_add(1)
            .saturating_mul(1024 * 1024);
        usize::try_from(bytes).unwrap_or(usize::MAX)
    }

    pub fn db_connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .username(&self.db_user)
            .password(&self.db_pass)
            .database(&self.db_name)
    }
}

/// Settings for the `daily_summary` task.
#[derive(Clone, Debug, Deserialize)]
pub struct SummaryConfig {
    #[serde(default = "default_summary_bucket")]
    pub s3_bucket: String,
    pub s3_endpoint_url: Option<String>,
}

fn default_summary_bucket() -> String {
    "clitasker-daily-summary".to_string()
}

impl SummaryConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let vars = vec![("S3_BUCKET".to_string(), "uploads".to_string())];
        let config: Config = envy::from_iter(vars).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.db_host, "localhost");
        assert_eq!(config.db_port, 5432);
        assert_eq!(config.db_user, "postgres");
        assert_eq!(config.db_pass, "");
        assert_eq!(config.db_name, "postgres");
        assert_eq!(config.s3_bucket, "uploads");
        assert!(config.s3_endpoint_url.is_none());
        assert_eq!(config.max_upload_size_bytes(), 100 * 1024 * 1024);
    }

    #[test]
    fn test_bucket_is_required() {
        let vars = vec![("DB_HOST".to_string(), "db.internal".to_string())];
        let result: Result<Config, envy::Error> = envy::from_iter(vars);
        assert!(result.is_err());
    }

    #[test]
    fn test_db_settings_from_env() {
        let vars = vec![
            ("S3_BUCKET".to_string(), "uploads".to_string()),
            ("DB_HOST".to_string(), "db.internal".to_string()),
            ("DB_PORT".to_string(), "6543".to_string()),
            ("DB_USER".to_string(), "app".to_string()),
            ("DB_PASS".to_string(), "secret".to_string()),
            ("DB_NAME".to_string(), "tasks".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();

        let options = config.db_connect_options();
        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 6543);
        assert_eq!(options.get_username(), "app");
        assert_eq!(options.get_database(), Some("tasks"));
    }

    #[test]
    fn test_huge_upload_limit_saturates() {
        let vars = vec![
            ("S3_BUCKET".to_string(), "uploads".to_string()),
            ("MAX_UPLOAD_SIZE_MB".to_string(), u64::MAX.to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();

        assert_eq!(config.max_upload_size_bytes(), u64::MAX);
        assert_eq!(config.max_request_body_bytes(), usize::MAX);
    }

    #[test]
    fn test_summary_bucket_default() {
        let config: SummaryConfig = envy::from_iter(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config.s3_bucket, "clitasker-daily-summary");
        assert!(config.s3_endpoint_url.is_none());
    }
}
