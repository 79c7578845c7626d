// Calendar override endpoints.
//
// Overrides are keyed by ISO date. The write endpoint doubles as the
// delete endpoint: setting `delete: true` on the payload removes the
// record for that date instead of writing one.

use std::collections::BTreeMap;

use tracing::debug;

use crate::client::ConsoleClient;
use crate::error::Error;
use crate::models::{Acknowledgment, OverrideRecord, OverrideWriteBody};

impl ConsoleClient {
    /// Fetch every calendar override, keyed by `YYYY-MM-DD`.
    ///
    /// `GET /api/discounts`
    pub async fn list_overrides(&self) -> Result<BTreeMap<String, OverrideRecord>, Error> {
        let url = self.api_url("discounts")?;
        self.get(url).await
    }

    /// Write or delete the override for a single date.
    ///
    /// `POST /api/discounts`
    pub async fn save_override(&self, body: &OverrideWriteBody) -> Result<(), Error> {
        let url = self.api_url("discounts")?;
        debug!(date = %body.date, delete = body.delete.unwrap_or(false), "saving override");

        let _ack: Acknowledgment = self.post(url, body).await?;
        Ok(())
    }

    /// Fetch the override in effect for one date, if any.
    ///
    /// `GET /api/discounts/check?date=YYYY-MM-DD`
    ///
    /// The backend answers `{ "type": "none" }` for dates without a record;
    /// callers should treat that kind as absent.
    pub async fn check_override(&self, date: &str) -> Result<OverrideRecord, Error> {
        let url = self.api_url("discounts/check")?;
        self.get_with_query(url, &[("date", date)]).await
    }
}
