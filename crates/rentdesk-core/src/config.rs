// ── Runtime session configuration ──
//
// These types describe *how* to reach the backend and how often to poll.
// They carry credential data and connection tuning, but never touch disk.
// The CLI constructs a `SessionConfig` and hands it in.

use secrecy::SecretString;
use url::Url;

/// Operator login credentials.
#[derive(Debug, Clone)]
pub struct OperatorCredentials {
    pub username: String,
    pub password: SecretString,
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default)]
pub enum TlsVerification {
    /// System CA store (strict). Default -- the backend is a first-party
    /// deployment, unlike appliance-style self-signed targets.
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-hosted installs with self-signed certs).
    DangerAcceptInvalid,
}

impl PartialEq for TlsVerification {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::SystemDefaults, Self::SystemDefaults) => true,
            (Self::CustomCa(a), Self::CustomCa(b)) => a == b,
            (Self::DangerAcceptInvalid, Self::DangerAcceptInvalid) => true,
            _ => false,
        }
    }
}

impl Eq for TlsVerification {}

/// Configuration for a single operator session.
///
/// Built by the CLI, passed to `Session` -- core never reads config files.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Backend base URL (e.g., `https://desk.example.com`).
    pub url: Url,
    /// Operator credentials.
    pub credentials: OperatorCredentials,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: std::time::Duration,
    /// Dashboard-metrics refresh cadence in seconds (the short timer).
    /// 0 = never.
    pub metrics_interval_secs: u64,
    /// Pending-count poll cadence in seconds (the longer timer -- the one
    /// with alerting semantics). 0 = never.
    pub pending_interval_secs: u64,
}

impl SessionConfig {
    /// Session config for one-shot commands: no background polling.
    pub fn oneshot(mut self) -> Self {
        self.metrics_interval_secs = 0;
        self.pending_interval_secs = 0;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:5000"
                .parse()
                .expect("static default URL"),
            credentials: OperatorCredentials {
                username: "admin".into(),
                password: SecretString::from(String::new()),
            },
            tls: TlsVerification::default(),
            timeout: std::time::Duration::from_secs(30),
            metrics_interval_secs: 10,
            pending_interval_secs: 30,
        }
    }
}
