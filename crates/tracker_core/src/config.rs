//! Configuration record consumed by the tracker factory.
//!
//! The record shape is `{ auth: { username, password }, timezone }`. Where it
//! comes from (file, environment, remote config service) is the caller's
//! concern; this module only models it and validates field presence.

use crate::TrackerError;
use chrono_tz::Tz;
use secrecy::SecretString;
use serde::Deserialize;

/// Credentials block of a tracker configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AuthConfig {
    pub username: Option<String>,
    pub password: Option<SecretString>,
}

/// One tracker's configuration record.
///
/// All leaves are optional at the serde level so that absence surfaces as
/// [`TrackerError::MissingConfigField`] from the accessors below rather than
/// as a deserializer error with no field path.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TrackerConfig {
    #[serde(default)]
    pub auth: AuthConfig,
    pub timezone: Option<String>,
}

impl TrackerConfig {
    /// Parse a configuration record from a JSON document.
    pub fn from_json(document: &str) -> Result<Self, TrackerError> {
        Ok(serde_json::from_str(document)?)
    }

    /// The account identifier, or `MissingConfigField("auth.username")`.
    pub fn username(&self) -> Result<&str, TrackerError> {
        self.auth
            .username
            .as_deref()
            .ok_or(TrackerError::MissingConfigField("auth.username"))
    }

    /// The account secret, or `MissingConfigField("auth.password")`.
    pub fn password(&self) -> Result<&SecretString, TrackerError> {
        self.auth
            .password
            .as_ref()
            .ok_or(TrackerError::MissingConfigField("auth.password"))
    }

    /// The resolved timezone. Fails with `MissingConfigField("timezone")`
    /// when absent and `InvalidTimezone` when the identifier is unknown.
    pub fn time_zone(&self) -> Result<Tz, TrackerError> {
        let name = self
            .timezone
            .as_deref()
            .ok_or(TrackerError::MissingConfigField("timezone"))?;
        name.parse()
            .map_err(|_| TrackerError::InvalidTimezone(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn from_json_reads_all_fields() {
        let cfg = TrackerConfig::from_json(
            r#"{"auth": {"username": "alice", "password": "secret1"}, "timezone": "Europe/Berlin"}"#,
        )
        .expect("cfg");
        assert_eq!(cfg.username().unwrap(), "alice");
        assert_eq!(cfg.password().unwrap().expose_secret(), "secret1");
        assert_eq!(cfg.time_zone().unwrap(), chrono_tz::Europe::Berlin);
    }

    #[test]
    fn missing_auth_block_reports_username_path() {
        let cfg = TrackerConfig::from_json(r#"{"timezone": "UTC"}"#).expect("cfg");
        let err = cfg.username().unwrap_err();
        assert!(matches!(
            err,
            TrackerError::MissingConfigField("auth.username")
        ));
    }

    #[test]
    fn missing_password_reports_its_path() {
        let cfg =
            TrackerConfig::from_json(r#"{"auth": {"username": "alice"}, "timezone": "UTC"}"#)
                .expect("cfg");
        let err = cfg.password().unwrap_err();
        assert!(matches!(
            err,
            TrackerError::MissingConfigField("auth.password")
        ));
    }

    #[test]
    fn missing_timezone_reported_before_resolution() {
        let cfg = TrackerConfig::from_json(r#"{"auth": {"username": "a", "password": "b"}}"#)
            .expect("cfg");
        assert!(matches!(
            cfg.time_zone().unwrap_err(),
            TrackerError::MissingConfigField("timezone")
        ));
    }

    #[test]
    fn unresolvable_timezone_is_invalid() {
        let cfg = TrackerConfig::from_json(
            r#"{"auth": {"username": "a", "password": "b"}, "timezone": "Not/A_Zone"}"#,
        )
        .expect("cfg");
        match cfg.time_zone().unwrap_err() {
            TrackerError::InvalidTimezone(name) => assert_eq!(name, "Not/A_Zone"),
            other => panic!("expected InvalidTimezone, got {other}"),
        }
    }

    #[test]
    fn malformed_document_is_a_config_error() {
        let res = TrackerConfig::from_json("{not json");
        assert!(matches!(res, Err(TrackerError::Config(_))));
    }

    #[test]
    fn debug_output_redacts_password() {
        let cfg = TrackerConfig::from_json(
            r#"{"auth": {"username": "alice", "password": "secret1"}, "timezone": "UTC"}"#,
        )
        .expect("cfg");
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("secret1"));
    }
}
