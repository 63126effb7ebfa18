//! Library side of the cardsync binary: configuration loading, logging setup
//! and the sync driver.

pub mod config;
pub mod logging;
pub mod sync;
