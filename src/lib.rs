#![doc(test(attr(deny(warnings))))]

//! Cashflow Core projects an account balance across a calendar range by
//! simulating recurring and one-time budget items day by day and emitting a
//! ledger row for every triggered transaction.

pub mod budget;
pub mod config;
pub mod engine;
pub mod errors;
pub mod report;
pub mod schedule;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Cashflow Core tracing initialized.");
    });
}
