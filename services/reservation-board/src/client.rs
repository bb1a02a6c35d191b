//! Client for the upstream reservations endpoint

use std::sync::Arc;

use crate::config::SourceConfig;
use crate::error::FetchError;
use crate::io::HttpClient;
use crate::reservation::Reservation;

/// Fetches the reservation list from `{base_url}{path}`
pub struct ReservationClient {
    url: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for ReservationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReservationClient")
            .field("url", &self.url)
            .finish()
    }
}

impl ReservationClient {
    pub fn new(config: &SourceConfig, http: Arc<dyn HttpClient>) -> Self {
        let url = config.reservations_url();
        tracing::debug!("Created ReservationClient for {}", url);
        Self { url, http }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Issue one GET and classify the outcome
    pub async fn fetch(&self) -> Result<Vec<Reservation>, FetchError> {
        let response = self.http.get(&self.url).await?;

        if !response.is_success() {
            tracing::debug!(
                "Non-success response from {}: status={}",
                self.url,
                response.status
            );
            return Err(FetchError::Status(response.status));
        }

        // Only the outer shape is checked; each element is taken as-is.
        let items: Vec<serde_json::Value> = serde_json::from_str(&response.body)
            .map_err(|e| FetchError::Parse(format!("Invalid reservations payload: {}", e)))?;
        let reservations: Vec<Reservation> =
            items.into_iter().map(Reservation::from_json).collect();

        tracing::debug!("Fetched data: {:?}", reservations);
        Ok(reservations)
    }
}
