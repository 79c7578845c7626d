//! CLI glue over `rentdesk-config`: profile selection and flag overrides.
//!
//! Core never sees these types -- it receives a pre-built `SessionConfig`.

use std::time::Duration;

use rentdesk_config::{Config, ConfigError, Profile};
use rentdesk_core::{OperatorCredentials, SessionConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Translate a `Profile` + global flags into a `SessionConfig`.
///
/// This is the single boundary where CLI config types cross into core
/// types. Flag > environment > profile, per field.
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<SessionConfig, CliError> {
    // 1. Backend URL (flag > env > profile)
    let url_str = global.server.as_deref().unwrap_or(&profile.server);
    let url: url::Url = url_str.parse().map_err(|_| CliError::Validation {
        field: "server".into(),
        reason: format!("invalid URL: {url_str}"),
    })?;

    // 2. Credentials
    let credentials = resolve_credentials(profile, profile_name, global)?;

    // 3. TLS verification
    let tls = if global.insecure || profile.insecure.unwrap_or(false) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    Ok(SessionConfig {
        url,
        credentials,
        tls,
        timeout: Duration::from_secs(global.timeout),
        metrics_interval_secs: profile.metrics_interval.unwrap_or(10),
        pending_interval_secs: profile.pending_interval.unwrap_or(30),
    })
}

/// Build a `SessionConfig` from flags alone when no profile exists.
pub fn resolve_from_flags(global: &GlobalOpts, profile_name: &str) -> Result<SessionConfig, CliError> {
    let url_str = global.server.as_deref().ok_or_else(|| CliError::NoConfig {
        path: rentdesk_config::config_path().display().to_string(),
    })?;

    let url: url::Url = url_str.parse().map_err(|_| CliError::Validation {
        field: "server".into(),
        reason: format!("invalid URL: {url_str}"),
    })?;

    let username = global
        .username
        .clone()
        .ok_or_else(|| CliError::NoCredentials {
            profile: profile_name.into(),
        })?;

    let password = std::env::var("RENTDESK_PASSWORD")
        .map(secrecy::SecretString::from)
        .map_err(|_| CliError::NoCredentials {
            profile: profile_name.into(),
        })?;

    let tls = if global.insecure {
        TlsVerification::DangerAcceptInvalid
    } else {
        TlsVerification::SystemDefaults
    };

    Ok(SessionConfig {
        url,
        credentials: OperatorCredentials { username, password },
        tls,
        timeout: Duration::from_secs(global.timeout),
        metrics_interval_secs: 10,
        pending_interval_secs: 30,
    })
}

// ── Credential helpers ───────────────────────────────────────────────

fn resolve_credentials(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<OperatorCredentials, CliError> {
    // CLI flag takes precedence for the username; the password is never a
    // flag -- env var, keyring, or profile only.
    if let Some(ref username) = global.username {
        let password =
            rentdesk_config::resolve_password(profile, profile_name).map_err(map_config_err)?;
        return Ok(OperatorCredentials {
            username: username.clone(),
            password,
        });
    }

    rentdesk_config::resolve_credentials(profile, profile_name).map_err(map_config_err)
}

fn map_config_err(err: ConfigError) -> CliError {
    match err {
        ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
        ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
        ConfigError::Io(e) => CliError::Io(e),
        ConfigError::Figment(e) => CliError::Config(e),
        ConfigError::Serialization(e) => CliError::Validation {
            field: "config".into(),
            reason: e.to_string(),
        },
    }
}

/// Build the `SessionConfig` for the active profile, falling back to
/// flags/env when the profile does not exist.
pub fn build_session_config(global: &GlobalOpts) -> Result<SessionConfig, CliError> {
    let cfg = rentdesk_config::load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    if let Some(profile) = cfg.profiles.get(&profile_name) {
        return resolve_profile(profile, &profile_name, global);
    }

    resolve_from_flags(global, &profile_name)
}
