use async_trait::async_trait;
use chrono::NaiveDate;
use futures_util::StreamExt;
use mongodb::bson::doc;
use mongodb::options::UpdateOptions;
use mongodb::Database;

use crate::error::Error;
use crate::models::{table_date_format, NotificationHistory};

/// Day-scoped notification state. At most one record exists per
/// (date, symbol); writes overwrite it, they never append.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Every record for the given calendar day. The monitor pulls the whole
    /// day in one query and joins to stocks in memory.
    async fn list_for_date(&self, date: NaiveDate) -> Result<Vec<NotificationHistory>, Error>;

    /// Insert-or-overwrite the record keyed by (record.date, record.symbol).
    async fn upsert(&self, record: &NotificationHistory) -> Result<(), Error>;
}

#[derive(Clone)]
pub struct MongoHistoryStore {
    db: Database,
}

impl MongoHistoryStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HistoryStore for MongoHistoryStore {
    async fn list_for_date(&self, date: NaiveDate) -> Result<Vec<NotificationHistory>, Error> {
        let history = self.db.collection::<NotificationHistory>("notification_history");

        let mut cursor = history
            .find(doc! { "date": table_date_format(date) }, None)
            .await?;

        let mut out: Vec<NotificationHistory> = Vec::new();
        while let Some(record) = cursor.next().await {
            out.push(record?);
        }
        Ok(out)
    }

    async fn upsert(&self, record: &NotificationHistory) -> Result<(), Error> {
        let history = self.db.collection::<NotificationHistory>("notification_history");

        history
            .update_one(
                doc! { "date": &record.date, "symbol": &record.symbol },
                doc! { "$set": { "last_notified_price": record.last_notified_price } },
                UpdateOptions::builder().upsert(true).build(),
            )
            .await?;
        Ok(())
    }
}
