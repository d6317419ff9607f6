/*! Integration tests for Homebase.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library surface:
 * - auth: Account and session lifecycle through the client
 * - table: Named-collection persistence
 * - analytics: Fire-and-forget event logging
 * - client: Facade behavior, degraded mode, restart round-trips
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("homebase=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod analytics;
mod auth;
mod client;
mod helpers;
mod table;
