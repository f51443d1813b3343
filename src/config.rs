//! Configuration for Trail
//!
//! CLI arguments and environment variable handling using clap.

use clap::Parser;

/// Trail - interruption tracking HTTP API
#[derive(Parser, Debug, Clone)]
#[command(name = "trail")]
#[command(about = "HTTP API for tracking interruptions, backed by MongoDB")]
pub struct Args {
    /// Port to listen on (the service binds localhost)
    #[arg(long, env = "PORT", default_value = "8080")]
    pub port: u16,

    /// MongoDB username
    #[arg(long, env = "DB_USER", default_value = "default")]
    pub user: String,

    /// MongoDB password
    #[arg(long, env = "DB_PASS", default_value = "12345")]
    pub pass: String,

    /// MongoDB host:port
    #[arg(long, env = "DB_HOST", default_value = "localhost:27017")]
    pub host: String,

    /// Database name
    #[arg(long, env = "DB_NAME", default_value = "trail")]
    pub db: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Validate the build and exit without serving
    #[arg(long, default_value = "false")]
    pub self_test: bool,
}

impl Args {
    /// Assemble the MongoDB connection string from the configured parts
    pub fn mongo_uri(&self) -> String {
        format!(
            "mongodb://{}:{}@{}/{}",
            self.user, self.pass, self.host, self.db
        )
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("DB_HOST must not be empty".to_string());
        }
        if self.db.is_empty() {
            return Err("DB_NAME must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["trail"]);
        assert_eq!(args.port, 8080);
        assert_eq!(args.host, "localhost:27017");
        assert_eq!(args.db, "trail");
        assert!(!args.self_test);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_mongo_uri_assembly() {
        let args = Args::parse_from([
            "trail", "--user", "myUser", "--pass", "s3cret", "--host", "db:27017", "--db",
            "trailDB",
        ]);
        assert_eq!(args.mongo_uri(), "mongodb://myUser:s3cret@db:27017/trailDB");
    }

    #[test]
    fn test_validate_rejects_empty_host() {
        let mut args = Args::parse_from(["trail"]);
        args.host.clear();
        assert!(args.validate().is_err());
    }
}
