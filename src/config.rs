use crate::error::Error;

pub static DATABASE_URL: &str = "DATABASE_URL";
pub static JWT_SECRET: &str = "JWT_SECRET";
pub static BIND_HOST: &str = "BIND_HOST";
pub static BIND_PORT: &str = "BIND_PORT";
pub static DB_MAX_CONNECTIONS: &str = "DB_MAX_CONNECTIONS";
pub static TOKEN_TTL_DAYS: &str = "TOKEN_TTL_DAYS";
pub static ADMIN_USERNAME: &str = "ADMIN_USERNAME";
pub static ADMIN_PASSWORD: &str = "ADMIN_PASSWORD";

#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_host: String,
    pub bind_port: u16,
    pub max_connections: u32,
    pub token_ttl_days: i64,
    pub admin: Option<AdminAccount>,
}

fn optional(key: &str) -> Option<String> {
    dotenv::var(key).ok().filter(|v| !v.is_empty())
}

impl Config {
    /// Reads the configuration from the process environment, after `.env` has been loaded.
    pub fn from_env() -> Result<Self, Error> {
        let database_url = dotenv::var(DATABASE_URL)?;
        let jwt_secret = dotenv::var(JWT_SECRET)?;
        let bind_host = optional(BIND_HOST).unwrap_or_else(|| "0.0.0.0".into());
        let bind_port: u16 = optional(BIND_PORT).map(|v| v.parse()).transpose()?.unwrap_or(8000);
        let max_connections: u32 = optional(DB_MAX_CONNECTIONS).map(|v| v.parse()).transpose()?.unwrap_or(5);
        let token_ttl_days: i64 = optional(TOKEN_TTL_DAYS).map(|v| v.parse()).transpose()?.unwrap_or(30);
        let admin = match (optional(ADMIN_USERNAME), optional(ADMIN_PASSWORD)) {
            (Some(username), Some(password)) => Some(AdminAccount { username, password }),
            (None, None) => None,
            _ => return Err(Error::ServerError(format!("{} and {} must be set together", ADMIN_USERNAME, ADMIN_PASSWORD))),
        };
        Ok(Self {
            database_url,
            jwt_secret,
            bind_host,
            bind_port,
            max_connections,
            token_ttl_days,
            admin,
        })
    }
}
