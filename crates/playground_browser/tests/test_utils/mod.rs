//! Test utilities for browser tests.
//!
//! This module provides a mock connector API and small async helpers.

pub mod mock_api;

#[allow(unused_imports)]
pub use mock_api::MockConnectorApi;

use std::time::Duration;

/// Polls `condition` until it holds, yielding to other tasks in between.
#[allow(dead_code)]
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    for _ in 0..500 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    panic!("condition not reached in time");
}
