use std::collections::HashMap;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use futures_util::future::join_all;
use tokio::time::{self, MissedTickBehavior};
use tracing::{error, info};

use crate::error::Error;
use crate::models::{MonitoredStock, NotificationHistory, Quote};
use crate::AppState;

/// Webhook sender name on outgoing alerts.
const SENDER_LABEL: &str = "Stock Alerts";

/// Outcome of one evaluation pass, for the operator-facing log line.
#[derive(Debug, Default)]
pub struct PassSummary {
    /// Stocks that had a quote this pass and went through the decision rule.
    pub stocks_evaluated: usize,
    pub alerts_triggered: usize,
    pub notification_failures: usize,
    pub history_write_failures: usize,
    /// Regions whose batched quote call failed; the rest of the pass ran.
    pub regions_failed: Vec<String>,
}

#[derive(Debug, Default)]
struct RegionSummary {
    stocks_evaluated: usize,
    alerts_triggered: usize,
    notification_failures: usize,
    history_write_failures: usize,
}

/// Runs evaluation passes forever at the configured interval.
///
/// Each pass is awaited before the next tick, so passes never overlap
/// within the process; an over-long pass delays the next one instead of
/// racing it on the same history keys.
pub async fn run_scheduler(state: AppState) {
    let mut interval =
        time::interval(Duration::from_secs(state.settings.monitor_interval_secs.max(1)));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let today = Local::now().date_naive();
        match run_pass(&state, today).await {
            Ok(summary) => info!(
                stocks = summary.stocks_evaluated,
                alerts = summary.alerts_triggered,
                failed_regions = ?summary.regions_failed,
                "monitor pass complete"
            ),
            Err(e) => error!("monitor pass failed: {e}"),
        }
    }
}

/// One complete evaluation of all active stocks against `today`'s
/// notification history. The caller supplies the date so the decision
/// rule stays deterministic under test.
pub async fn run_pass(state: &AppState, today: NaiveDate) -> Result<PassSummary, Error> {
    let stocks = state.watchlist.list_active().await?;
    if stocks.is_empty() {
        return Ok(PassSummary::default());
    }

    // Today's history is one day-partition query; the per-symbol lookup
    // happens in memory during the join.
    let notified_today: HashMap<String, NotificationHistory> = state
        .history
        .list_for_date(today)
        .await?
        .into_iter()
        .map(|h| (h.symbol.clone(), h))
        .collect();

    let region_passes = group_by_region(stocks).into_iter().map(|(region, group)| {
        let notified_today = &notified_today;
        async move {
            let outcome = evaluate_region(state, today, &region, group, notified_today).await;
            (region, outcome)
        }
    });

    let mut summary = PassSummary::default();
    for (region, outcome) in join_all(region_passes).await {
        match outcome {
            Ok(n) => {
                summary.stocks_evaluated += n.stocks_evaluated;
                summary.alerts_triggered += n.alerts_triggered;
                summary.notification_failures += n.notification_failures;
                summary.history_write_failures += n.history_write_failures;
            }
            Err(e) => {
                error!(%region, "region evaluation failed: {e}");
                summary.regions_failed.push(region);
            }
        }
    }

    Ok(summary)
}

/// One batched quote call for the whole region, then the decision rule per
/// stock. A failure here is isolated to this region by the caller.
async fn evaluate_region(
    state: &AppState,
    today: NaiveDate,
    region: &str,
    group: Vec<MonitoredStock>,
    notified_today: &HashMap<String, NotificationHistory>,
) -> Result<RegionSummary, Error> {
    let symbols: Vec<String> = group.iter().map(|s| s.symbol.clone()).collect();
    let quotes = state.quotes.get_quotes(region, &symbols).await?;

    let mut summary = RegionSummary::default();
    for (stock, quote, notified) in join_stock_details(group, &quotes, notified_today) {
        summary.stocks_evaluated += 1;

        if price_under_threshold(notified, quote.current_price, stock.alert_price_threshold) {
            summary.alerts_triggered += 1;
            trigger_alert(state, today, &stock, quote, &mut summary).await;
        }
    }
    Ok(summary)
}

/// Send the notification, then record it. The two side effects are
/// independent: a failed send must not stop the history write, and a
/// failed write is logged loudly rather than aborting the pass.
async fn trigger_alert(
    state: &AppState,
    today: NaiveDate,
    stock: &MonitoredStock,
    quote: &Quote,
    summary: &mut RegionSummary,
) {
    let text = format_alert_message(&quote.display_name, &stock.symbol, quote.current_price);

    match state
        .notifier
        .send_message(
            &state.settings.notifications_slack_webhook,
            SENDER_LABEL,
            &text,
        )
        .await
    {
        Ok(()) => info!(
            symbol = %stock.symbol,
            price = quote.current_price,
            "price drop alert sent"
        ),
        Err(e) => {
            summary.notification_failures += 1;
            error!(symbol = %stock.symbol, "failed to send alert: {e}");
        }
    }

    let record = NotificationHistory::new(today, stock.symbol.clone(), quote.current_price);
    if let Err(e) = state.history.upsert(&record).await {
        summary.history_write_failures += 1;
        error!(symbol = %stock.symbol, "failed to record notification: {e}");
    }
}

fn group_by_region(stocks: Vec<MonitoredStock>) -> HashMap<String, Vec<MonitoredStock>> {
    let mut by_region: HashMap<String, Vec<MonitoredStock>> = HashMap::new();
    for stock in stocks {
        by_region.entry(stock.region.clone()).or_default().push(stock);
    }
    by_region
}

/// Inner-join stocks to their quotes by symbol (stocks without a quote are
/// skipped this pass) and left-lookup any same-day notification record.
fn join_stock_details<'a>(
    group: Vec<MonitoredStock>,
    quotes: &'a HashMap<String, Quote>,
    notified_today: &'a HashMap<String, NotificationHistory>,
) -> Vec<(MonitoredStock, &'a Quote, Option<&'a NotificationHistory>)> {
    group
        .into_iter()
        .filter_map(|stock| {
            let quote = quotes.get(&stock.symbol)?;
            let notified = notified_today.get(&stock.symbol);
            Some((stock, quote, notified))
        })
        .collect()
}

/// The decision rule. With no record for (today, symbol) the configured
/// threshold applies; once a record exists, only a further decline below
/// the last notified price re-triggers (the ratchet).
fn price_under_threshold(
    notified: Option<&NotificationHistory>,
    current_price: f64,
    alert_price_threshold: f64,
) -> bool {
    match notified {
        None => current_price < alert_price_threshold,
        Some(h) => current_price < h.last_notified_price,
    }
}

/// Replace `.` with a middle dot so chat clients don't render symbols like
/// `BRK.B` as hyperlinks. Display only; storage keys keep the real symbol.
fn escape_symbol(symbol: &str) -> String {
    symbol.replace('.', "·")
}

fn format_alert_message(display_name: &str, symbol: &str, current_price: f64) -> String {
    format!("{} ({})\n${}", display_name, escape_symbol(symbol), current_price)
}
