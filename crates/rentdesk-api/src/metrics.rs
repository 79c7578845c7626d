// Aggregate dashboard metrics endpoint.

use crate::client::ConsoleClient;
use crate::error::Error;
use crate::models::StatsResponse;

impl ConsoleClient {
    /// Fetch the aggregate business metrics used for dashboard display.
    ///
    /// `GET /api/stats`
    ///
    /// These counts (revenue, active rentals, inventory availability) are
    /// display-only; the alerting path never reads them.
    pub async fn get_stats(&self) -> Result<StatsResponse, Error> {
        let url = self.api_url("stats")?;
        self.get(url).await
    }
}
