#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the tracker backend, e.g. `http://localhost:5000`.
    /// Required; there is no usable default.
    pub backend_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub log_level: String,
}
