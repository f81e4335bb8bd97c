#![doc(test(attr(deny(warnings))))]

//! Bill Split allocates shared household utility bills (electricity, water,
//! internet) among the people in a household for one billing period.
//!
//! The pipeline is: [`storage`] loads the period series, [`engine::allocate`]
//! turns it into a [`domain::Ledger`] using the rules from [`config`], and the
//! [`output`] adapters render the ledger.

pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod output;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init(verbosity: u8) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(verbosity);
        tracing::debug!("Bill Split tracing initialized.");
    });
}
