//! Library entrypoint for stockwatch.
//!
//! This file exists mainly to make the monitor easy to test (integration
//! tests under `tests/` can build the app state with in-memory stand-ins
//! for the quote source, the webhook sink and the Mongo stores).

pub mod config;
pub mod error;
pub mod models;
pub mod services;

use std::sync::Arc;

use services::history::HistoryStore;
use services::slack::NotificationSink;
use services::watchlist::WatchlistStore;
use services::yahoo_finance::QuoteSource;

#[derive(Clone)]
pub struct AppState {
    pub settings: config::Settings,
    pub quotes: Arc<dyn QuoteSource>,
    pub notifier: Arc<dyn NotificationSink>,
    pub watchlist: Arc<dyn WatchlistStore>,
    pub history: Arc<dyn HistoryStore>,
}
