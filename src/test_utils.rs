//! # Test Utilities
//!
//! Helpers shared by unit and integration tests. Environment variables are
//! only set when missing, so CI can override them.

use std::env;

use crate::constants::env::ENVIRONMENT;
use crate::logging;

/// Setup test environment with all necessary environment variables
///
/// Sets `EVENT_BUS_ENV=test` if it is not already present and installs the
/// structured logger once.
pub fn setup_test_environment() {
    if env::var(ENVIRONMENT).is_err() {
        env::set_var(ENVIRONMENT, "test");
    }

    logging::init_structured_logging();
}
