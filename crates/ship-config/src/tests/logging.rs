use crate::{ConfigError, ConfigSection, LoggingConfig};

use googletest::assert_that;
use googletest::prelude::{anything, ok};

#[test]
fn given_default_logging_config_when_validate_then_ok() {
    assert_that!(LoggingConfig::default().validate(), ok(anything()));
}

#[test]
fn given_blank_log_file_when_validate_then_logging_section_error() {
    let config = LoggingConfig {
        file: Some(String::from("   ")),
        ..Default::default()
    };

    let err = config.validate().unwrap_err();

    assert!(matches!(
        err,
        ConfigError::Invalid {
            section: ConfigSection::Logging,
            ..
        }
    ));
}
