use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// yyyy-MM-dd, the day-partition format used by the history collection.
pub fn table_date_format(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Per-(day, symbol) dedup state: the price at which the most recent
/// alert for that symbol was sent today. A later alert the same day
/// overwrites the record, it is never duplicated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationHistory {
    pub date: String,
    pub symbol: String,
    pub last_notified_price: f64,
}

impl NotificationHistory {
    pub fn new(date: NaiveDate, symbol: impl Into<String>, last_notified_price: f64) -> Self {
        Self {
            date: table_date_format(date),
            symbol: symbol.into(),
            last_notified_price,
        }
    }
}
