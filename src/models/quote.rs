/// A point-in-time price observation, fetched fresh each pass and
/// never persisted.
#[derive(Debug, Clone)]
pub struct Quote {
    pub symbol: String,
    pub display_name: String,
    pub current_price: f64,
}
