use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir};

use googletest::assert_that;
use googletest::prelude::{anything, eq, err, some};
use serial_test::serial;

// =========================================================================
// Validation Tests - Tenant
// =========================================================================

#[test]
#[serial]
fn given_blank_default_key_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _key = EnvGuard::set("EDU_TENANT_DEFAULT_KEY", "  ");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_dotted_default_key_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _key = EnvGuard::set("EDU_TENANT_DEFAULT_KEY", "www.example");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_mixed_case_default_key_when_parsed_then_lower_case() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _key = EnvGuard::set("EDU_TENANT_DEFAULT_KEY", "Marketing");

    // When
    let config = Config::load().unwrap();
    let key = config.tenant.default_key().unwrap();

    // Then
    assert_that!(key.as_str(), eq("marketing"));
}

#[test]
#[serial]
fn given_host_env_when_load_then_host_set() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _host = EnvGuard::set("EDU_TENANT_HOST", "acme.example.com");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.tenant.host.as_deref(), some(eq("acme.example.com")));
}
