// Review-queue endpoints: rental requests and KYC requests.
//
// The two categories expose structurally different wire shapes and field
// names (the KYC action body says `request_id`, the rental one says `id`)
// but share the same lifecycle semantics. Normalization into one domain
// shape happens in rentdesk-core.

use tracing::debug;

use crate::client::ConsoleClient;
use crate::error::Error;
use crate::models::{
    Acknowledgment, KycActionBody, KycRequestRecord, RentalActionBody, RentalRequestRecord,
};

impl ConsoleClient {
    /// Fetch all rental requests.
    ///
    /// `GET /api/requests`
    pub async fn list_rental_requests(&self) -> Result<Vec<RentalRequestRecord>, Error> {
        let url = self.api_url("requests")?;
        self.get(url).await
    }

    /// Submit a review decision for a rental request.
    ///
    /// `POST /api/requests/action`
    ///
    /// Returns [`Error::Conflict`] when the request is no longer pending
    /// and [`Error::NotFound`] for an unknown id.
    pub async fn submit_rental_review(&self, body: &RentalActionBody) -> Result<(), Error> {
        let url = self.api_url("requests/action")?;
        debug!(id = %body.id, action = %body.action, "submitting rental review");

        let _ack: Acknowledgment = self.post(url, body).await?;
        Ok(())
    }

    /// Fetch all identity-verification requests.
    ///
    /// `GET /api/kyc`
    pub async fn list_kyc_requests(&self) -> Result<Vec<KycRequestRecord>, Error> {
        let url = self.api_url("kyc")?;
        self.get(url).await
    }

    /// Submit a review decision for an identity-verification request.
    ///
    /// `POST /api/kyc/action`
    pub async fn submit_kyc_review(&self, body: &KycActionBody) -> Result<(), Error> {
        let url = self.api_url("kyc/action")?;
        debug!(id = %body.request_id, action = %body.action, "submitting KYC review");

        let _ack: Acknowledgment = self.post(url, body).await?;
        Ok(())
    }
}
