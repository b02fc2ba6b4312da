#![doc(test(attr(deny(warnings))))]

//! Fintrack Core offers the ledger, budgeting, and reporting primitives that
//! power a single-user personal finance tracker.

pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod store;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("fintrack_core=info".parse().unwrap());
        fmt().with_env_filter(filter).init();
        tracing::info!("Fintrack Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
