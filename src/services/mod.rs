pub mod yahoo_finance;
pub mod slack;
pub mod retry;
pub mod db_init;

pub mod watchlist;
pub mod history;
pub mod monitor;
