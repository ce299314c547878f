use std::env;

#[derive(Debug, Clone)]
pub struct Settings {
    pub mongodb_uri: String,
    pub mongodb_db: String,

    pub rapidapi_key: String,
    pub rapidapi_yahoo_finance_host: String,
    pub notifications_slack_webhook: String,

    /// Seconds between evaluation passes.
    pub monitor_interval_secs: u64,
    /// Retry cap shared by the outbound HTTP clients.
    pub http_max_retries: u32,
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    let mongodb_uri = env::var("MONGODB_URI")
        .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

    let mongodb_db = env::var("MONGODB_DB")
        .unwrap_or_else(|_| "stockwatch".to_string());

    let rapidapi_key = env::var("RAPIDAPI_KEY").unwrap_or_default();

    let rapidapi_yahoo_finance_host = env::var("RAPIDAPI_YAHOO_FINANCE_HOST")
        .unwrap_or_else(|_| "apidojo-yahoo-finance-v1.p.rapidapi.com".to_string());

    let notifications_slack_webhook =
        env::var("NOTIFICATIONS_SLACK_WEBHOOK").unwrap_or_default();

    let monitor_interval_secs = env::var("MONITOR_INTERVAL_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(300);

    let http_max_retries = env::var("HTTP_MAX_RETRIES")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(3);

    Settings {
        mongodb_uri,
        mongodb_db,
        rapidapi_key,
        rapidapi_yahoo_finance_host,
        notifications_slack_webhook,
        monitor_interval_secs,
        http_max_retries,
    }
}
