/*! Integration tests for Vellum.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - document: Tests for the DocumentStore over real scratch directories
 * - auth: Tests for the CredentialStore over real credential files
 * - workflow: End-to-end content-management scenarios across components
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("vellum=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod auth;
mod document;
