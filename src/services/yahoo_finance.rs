use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use crate::error::Error;
use crate::models::Quote;
use crate::services::retry::RetryPolicy;

/// Batched quote retrieval, one call per region. Symbols absent from the
/// result mean "no data this pass" and must not fail the caller.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn get_quotes(
        &self,
        region: &str,
        symbols: &[String],
    ) -> Result<HashMap<String, Quote>, Error>;
}

/// RapidAPI Yahoo Finance client (`market/v2/get-quotes`).
#[derive(Clone)]
pub struct YahooFinanceClient {
    http: Client,
    host: String,
    api_key: String,
    retry: RetryPolicy,
}

impl YahooFinanceClient {
    pub fn new(host: String, api_key: String, retry: RetryPolicy) -> Self {
        Self {
            http: Client::new(),
            host,
            api_key,
            retry,
        }
    }

    fn has_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    async fn get_quotes_once(
        &self,
        region: &str,
        symbols_param: &str,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let url = format!("https://{}/market/v2/get-quotes", self.host);
        self.http
            .get(&url)
            .query(&[("region", region), ("symbols", symbols_param)])
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", &self.host)
            .send()
            .await
    }
}

#[async_trait]
impl QuoteSource for YahooFinanceClient {
    async fn get_quotes(
        &self,
        region: &str,
        symbols: &[String],
    ) -> Result<HashMap<String, Quote>, Error> {
        if !self.has_key() {
            return Err(Error::MissingConfig("RAPIDAPI_KEY"));
        }

        let symbols_param = symbols.join(",");

        let mut attempt = 0;
        let response = loop {
            match self.get_quotes_once(region, &symbols_param).await {
                Ok(res) if res.status().is_success() => break res,
                Ok(res) => {
                    let status = res.status();
                    if attempt < self.retry.max_retries && self.retry.is_retryable_status(status) {
                        attempt += 1;
                        warn!(%region, %status, attempt, "quote request failed, retrying");
                        tokio::time::sleep(self.retry.delay(attempt)).await;
                        continue;
                    }
                    return Err(Error::QuoteStatus {
                        region: region.to_string(),
                        status,
                    });
                }
                Err(e) => {
                    if attempt < self.retry.max_retries {
                        attempt += 1;
                        warn!(%region, error = %e, attempt, "quote request failed, retrying");
                        tokio::time::sleep(self.retry.delay(attempt)).await;
                        continue;
                    }
                    return Err(e.into());
                }
            }
        };

        let body: GetQuotesResponse = response.json().await?;

        Ok(body
            .quote_response
            .result
            .into_iter()
            .filter_map(quote_from_result)
            .map(|q| (q.symbol.clone(), q))
            .collect())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetQuotesResponse {
    quote_response: QuoteResponseBody,
}

#[derive(Debug, Deserialize)]
struct QuoteResponseBody {
    #[serde(default)]
    result: Vec<QuoteResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteResult {
    symbol: String,
    regular_market_price: Option<f64>,
    long_name: Option<String>,
    short_name: Option<String>,
}

/// Results without a market price (momentarily untradeable symbols) are
/// dropped; the monitor treats them the same as symbols the API omitted.
fn quote_from_result(r: QuoteResult) -> Option<Quote> {
    let current_price = r.regular_market_price?;
    let display_name = r
        .long_name
        .or(r.short_name)
        .unwrap_or_else(|| r.symbol.clone());

    Some(Quote {
        symbol: r.symbol,
        display_name,
        current_price,
    })
}
