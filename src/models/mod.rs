pub mod monitored_stock;
pub mod notification_history;
pub mod quote;

pub use monitored_stock::MonitoredStock;
pub use notification_history::{NotificationHistory, table_date_format};
pub use quote::Quote;
