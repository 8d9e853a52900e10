use crate::Config;
use crate::tests::{EnvGuard, VALID_SECRET, setup_config_dir};

use googletest::assert_that;
use googletest::prelude::{anything, contains_substring, err, not};
use serial_test::serial;

// =========================================================================
// Validation Tests - Auth
// =========================================================================

#[test]
#[serial]
fn given_no_jwt_secret_when_validate_then_error_mentions_secret() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _secret = EnvGuard::remove("IDP_AUTH_JWT_SECRET");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("jwt_secret"));
}

#[test]
#[serial]
fn given_jwt_secret_too_short_when_validate_then_error_mentions_32_chars() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _secret = EnvGuard::set("IDP_AUTH_JWT_SECRET", "tooshort");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("32 characters"));
}

#[test]
#[serial]
fn given_zero_expiry_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _secret = EnvGuard::set("IDP_AUTH_JWT_SECRET", VALID_SECRET);
    let _expiry = EnvGuard::set("IDP_AUTH_ACCESS_TOKEN_EXPIRE_MINUTES", "0");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_secret_set_when_debug_formatted_then_secret_redacted() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _secret = EnvGuard::set("IDP_AUTH_JWT_SECRET", VALID_SECRET);

    // When
    let config = Config::load().unwrap();
    let debug = format!("{:?}", config.auth);

    // Then
    assert_that!(debug, not(contains_substring(VALID_SECRET)));
    assert_that!(debug, contains_substring("redacted"));
}
