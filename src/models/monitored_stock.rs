use serde::{Deserialize, Serialize};

/// One watch-list entry. Rows are created and edited by an operator;
/// the monitor only ever reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoredStock {
    pub symbol: String,

    // Grouping key for batched quote requests ("US", "AU", ...); an API
    // parameter, not a geographic guarantee.
    pub region: String,

    pub is_active: bool,
    pub alert_price_threshold: f64,
}
