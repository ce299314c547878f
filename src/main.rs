use std::sync::Arc;

use mongodb::Client;
use tracing_subscriber;

use stockwatch::services::history::MongoHistoryStore;
use stockwatch::services::retry::RetryPolicy;
use stockwatch::services::slack::SlackClient;
use stockwatch::services::watchlist::MongoWatchlistStore;
use stockwatch::services::yahoo_finance::YahooFinanceClient;
use stockwatch::services::{db_init, monitor};
use stockwatch::{config, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let settings = config::load();

    // Mongo connection
    let client = Client::with_uri_str(&settings.mongodb_uri)
        .await
        .expect("Failed to connect to MongoDB");
    let db = client.database(&settings.mongodb_db);

    db_init::ensure_indexes(&db)
        .await
        .expect("Failed to ensure MongoDB indexes");

    let retry = RetryPolicy::new(settings.http_max_retries);

    let state = AppState {
        quotes: Arc::new(YahooFinanceClient::new(
            settings.rapidapi_yahoo_finance_host.clone(),
            settings.rapidapi_key.clone(),
            retry.clone(),
        )),
        notifier: Arc::new(SlackClient::new(retry)),
        watchlist: Arc::new(MongoWatchlistStore::new(db.clone())),
        history: Arc::new(MongoHistoryStore::new(db)),
        settings,
    };

    tracing::info!(
        interval_secs = state.settings.monitor_interval_secs,
        "stockwatch monitor starting"
    );

    monitor::run_scheduler(state).await;
}
