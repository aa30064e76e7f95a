use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir};

use std::time::Duration;

use googletest::assert_that;
use googletest::prelude::{anything, eq, err};
use serial_test::serial;

// =========================================================================
// Validation Tests - Session
// =========================================================================

#[test]
#[serial]
fn given_freshness_zero_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _freshness = EnvGuard::set("EDU_SESSION_FRESHNESS_SECS", "0");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_freshness_over_one_day_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _freshness = EnvGuard::set("EDU_SESSION_FRESHNESS_SECS", "86401");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_default_session_when_freshness_then_five_minutes() {
    // Given
    let (_temp, _guard) = setup_config_dir();

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.session.freshness(), eq(Duration::from_secs(300)));
}
