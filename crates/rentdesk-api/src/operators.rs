// Operator account endpoints: login, directory, and activity reports.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::client::ConsoleClient;
use crate::error::Error;
use crate::models::{ActivityReportRow, LoginBody, OperatorRecord};

impl ConsoleClient {
    /// Authenticate an operator with username/password.
    ///
    /// `POST /api/admins/login`
    ///
    /// Returns the operator record (password hash stripped by the backend)
    /// on success; 401 surfaces as [`Error::Authentication`].
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<OperatorRecord, Error> {
        let url = self.api_url("admins/login")?;
        debug!(username, "logging in");

        let body = LoginBody {
            username: username.to_owned(),
            password: password.expose_secret().to_owned(),
        };

        self.post(url, &body).await
    }

    /// Fetch the full operator directory.
    ///
    /// `GET /api/admins`
    pub async fn list_operators(&self) -> Result<Vec<OperatorRecord>, Error> {
        let url = self.api_url("admins")?;
        self.get(url).await
    }

    /// Re-fetch a single operator record by id.
    ///
    /// `GET /api/admins/current?id={id}`
    ///
    /// Used to refresh the session's capability set without a new login.
    pub async fn get_operator(&self, id: &str) -> Result<OperatorRecord, Error> {
        let url = self.api_url("admins/current")?;
        self.get_with_query(url, &[("id", id)]).await
    }

    /// Fetch the per-operator daily activity report.
    ///
    /// `GET /api/admins/reports/daily`
    pub async fn daily_report(&self) -> Result<Vec<ActivityReportRow>, Error> {
        let url = self.api_url("admins/reports/daily")?;
        self.get(url).await
    }
}
