use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub scrape_api_url: String,
    pub scrape_api_key: Option<String>,
    pub scrape_timeout_secs: u64,
    pub extractor_api_url: String,
    pub extractor_api_key: Option<String>,
    pub extractor_model: String,
    pub extractor_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("scrape_api_url", &self.scrape_api_url)
            .field(
                "scrape_api_key",
                &self.scrape_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("scrape_timeout_secs", &self.scrape_timeout_secs)
            .field("extractor_api_url", &self.extractor_api_url)
            .field(
                "extractor_api_key",
                &self.extractor_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("extractor_model", &self.extractor_model)
            .field("extractor_timeout_secs", &self.extractor_timeout_secs)
            .finish()
    }
}
