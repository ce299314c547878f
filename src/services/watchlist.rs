use async_trait::async_trait;
use futures_util::StreamExt;
use mongodb::bson::{doc, Document};
use mongodb::Database;

use crate::error::Error;
use crate::models::MonitoredStock;

/// Read access to the operator-managed watch-list.
#[async_trait]
pub trait WatchlistStore: Send + Sync {
    /// Every stock currently flagged active. Order does not matter; the
    /// monitor regroups by region anyway.
    async fn list_active(&self) -> Result<Vec<MonitoredStock>, Error>;
}

#[derive(Clone)]
pub struct MongoWatchlistStore {
    db: Database,
}

impl MongoWatchlistStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

fn active_filter() -> Document {
    doc! { "is_active": true }
}

#[async_trait]
impl WatchlistStore for MongoWatchlistStore {
    async fn list_active(&self) -> Result<Vec<MonitoredStock>, Error> {
        let stocks = self.db.collection::<MonitoredStock>("stocks_to_monitor");

        let mut cursor = stocks.find(active_filter(), None).await?;

        let mut out: Vec<MonitoredStock> = Vec::new();
        while let Some(stock) = cursor.next().await {
            out.push(stock?);
        }
        Ok(out)
    }
}
