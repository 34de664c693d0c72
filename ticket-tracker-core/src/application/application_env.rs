use anyhow::anyhow;
use std::{net::SocketAddr, time::Duration};
use tracing::level_filters::LevelFilter;

/// 30 days
const DEFAULT_JWT_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);

pub struct ApplicationEnv {
    pub log_directory: String,
    pub log_filename: String,
    pub console_log_level: LevelFilter,
    pub file_log_level: LevelFilter,
    /// extra `target=level` directives applied to both outputs
    pub log_directives: String,

    pub bind_address: SocketAddr,

    pub db_connection_string: String,
    pub db_name: String,

    pub max_http_content_len: usize,

    /// HS256 secret shared by token issuing and validation
    pub jwt_secret: String,
    pub jwt_ttl: Duration,

    pub bcrypt_cost: u32,

    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl ApplicationEnv {
    pub fn parse() -> anyhow::Result<Self> {
        let log_directory = Self::env_var("TICKET_TRACKER_LOG_DIRECTORY")?;
        let log_filename = Self::env_var("TICKET_TRACKER_LOG_FILENAME")?;
        let console_log_level = match Self::optional_env_var("TICKET_TRACKER_CONSOLE_LOG_LEVEL") {
            Some(level) => level.parse()?,
            None => LevelFilter::DEBUG,
        };
        let file_log_level = match Self::optional_env_var("TICKET_TRACKER_FILE_LOG_LEVEL") {
            Some(level) => level.parse()?,
            None => LevelFilter::INFO,
        };
        let log_directives =
            Self::optional_env_var("TICKET_TRACKER_LOG_DIRECTIVES").unwrap_or_default();
        let bind_address = Self::env_var("TICKET_TRACKER_BIND_ADDRESS")?.parse()?;
        let db_connection_string = Self::env_var("TICKET_TRACKER_DB_CONNECTION_STRING")?;
        let db_name = Self::env_var("TICKET_TRACKER_DB_NAME")?;
        let max_http_content_len = Self::env_var("TICKET_TRACKER_MAX_HTTP_CONTENT_LEN")?.parse()?;
        let jwt_secret = Self::env_var("TICKET_TRACKER_JWT_SECRET")?;
        let jwt_ttl = match Self::optional_env_var("TICKET_TRACKER_JWT_TTL") {
            Some(jwt_ttl) => Duration::from_secs(jwt_ttl.parse()?),
            None => DEFAULT_JWT_TTL,
        };
        let bcrypt_cost = match Self::optional_env_var("TICKET_TRACKER_BCRYPT_COST") {
            Some(bcrypt_cost) => bcrypt_cost.parse()?,
            None => bcrypt::DEFAULT_COST,
        };
        let admin_email = Self::optional_env_var("TICKET_TRACKER_ADMIN_EMAIL");
        let admin_password = Self::optional_env_var("TICKET_TRACKER_ADMIN_PASSWORD");

        Ok(Self {
            log_directory,
            log_filename,
            console_log_level,
            file_log_level,
            log_directives,
            bind_address,
            db_connection_string,
            db_name,
            max_http_content_len,
            jwt_secret,
            jwt_ttl,
            bcrypt_cost,
            admin_email,
            admin_password,
        })
    }

    fn env_var(name: &'static str) -> anyhow::Result<String> {
        std::env::var(name).map_err(|_| anyhow!("environment variable {name} not set"))
    }

    fn optional_env_var(name: &'static str) -> Option<String> {
        std::env::var(name).ok().filter(|value| !value.is_empty())
    }
}
