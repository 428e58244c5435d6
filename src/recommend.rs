//! Remote plant recommendation call with local fallback
//!
//! The remote service is a best-effort extra: one POST, no retry, no timeout,
//! response body logged and discarded. The local matcher always produces the
//! result, whatever happened on the wire.

#[cfg(feature = "api")]
use crate::error::{PlantPalError, Result};
#[cfg(feature = "api")]
use crate::location::Location;
#[cfg(feature = "api")]
use crate::matcher::{apply_filters, MatchResult, PreferenceCriteria, ScoreJitter};
#[cfg(feature = "api")]
use crate::types::{Level, PlantRecord, PlantType};
#[cfg(feature = "api")]
use serde::{Deserialize, Serialize};

/// JSON body sent to the recommendation endpoint
#[cfg(feature = "api")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub light: Level,
    pub water: Level,
    pub indoor_only: bool,
    pub edible_only: bool,
    pub selected_types: Vec<PlantType>,
    pub location: Location,
}

#[cfg(feature = "api")]
impl RecommendationRequest {
    pub fn new(criteria: &PreferenceCriteria, location: &Location) -> Self {
        Self {
            light: criteria.light_level(),
            water: criteria.water_level(),
            indoor_only: criteria.indoor_only,
            edible_only: criteria.edible_only,
            selected_types: criteria.selected_types.clone(),
            location: location.clone(),
        }
    }
}

/// What happened to the remote call
#[cfg(feature = "api")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "lowercase")]
pub enum RemoteOutcome {
    Accepted,
    Failed(String),
    Disabled,
}

/// Local match result plus the remote call outcome
#[cfg(feature = "api")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(flatten)]
    pub result: MatchResult,
    pub remote: RemoteOutcome,
}

#[cfg(feature = "api")]
#[derive(Debug, Clone)]
pub struct RecommendationClient {
    http: reqwest::Client,
    endpoint: String,
}

#[cfg(feature = "api")]
impl RecommendationClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST the request once. Any 2xx is success.
    pub async fn send(&self, request: &RecommendationRequest) -> Result<()> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| PlantPalError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlantPalError::UnexpectedStatus(status.as_u16()));
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!("Recommendation service replied ({} bytes): {}", body.len(), body);
        Ok(())
    }
}

/// Call the remote service (when configured), then match locally regardless.
#[cfg(feature = "api")]
pub async fn recommend_with_fallback<J>(
    client: Option<&RecommendationClient>,
    catalog: &[PlantRecord],
    criteria: &PreferenceCriteria,
    location: &Location,
    jitter: &mut J,
) -> Recommendation
where
    J: ScoreJitter + ?Sized,
{
    let remote = match client {
        None => RemoteOutcome::Disabled,
        Some(client) => {
            let request = RecommendationRequest::new(criteria, location);
            match client.send(&request).await {
                Ok(()) => RemoteOutcome::Accepted,
                Err(e) => {
                    tracing::warn!(
                        "Recommendation request to {} failed, using local matching: {}",
                        client.endpoint(),
                        e
                    );
                    RemoteOutcome::Failed(e.to_string())
                }
            }
        }
    };

    Recommendation {
        result: apply_filters(catalog, criteria, jitter),
        remote,
    }
}

#[cfg(all(test, feature = "api"))]
mod tests {
    use super::*;
    use crate::catalog::default_catalog;
    use crate::location::tunis;
    use crate::matcher::{reset_filters, FixedJitter};
    use axum::{http::StatusCode, routing::post, Router};

    async fn spawn_stub(status: StatusCode) -> String {
        let app = Router::new().route("/recommend", post(move || async move { status }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/recommend", addr)
    }

    #[test]
    fn test_request_body_shape() {
        let request = RecommendationRequest::new(&reset_filters(), &tunis());
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["light"], "Medium");
        assert_eq!(body["water"], "Low");
        assert_eq!(body["indoorOnly"], true);
        assert_eq!(body["edibleOnly"], false);
        assert_eq!(body["selectedTypes"], serde_json::json!(["Herb"]));
        assert_eq!(body["location"]["city"], "Tunis");
        assert_eq!(body["location"]["country"], "Tunisia");
    }

    #[tokio::test]
    async fn test_disabled_client_matches_locally() {
        let catalog = default_catalog();
        let rec = recommend_with_fallback(
            None,
            &catalog,
            &reset_filters(),
            &tunis(),
            &mut FixedJitter::constant(0),
        )
        .await;

        assert_eq!(rec.remote, RemoteOutcome::Disabled);
        assert_eq!(rec.result.names(), vec!["Basil", "Lavender"]);
    }

    #[tokio::test]
    async fn test_accepted_call_still_matches_locally() {
        let client = RecommendationClient::new(spawn_stub(StatusCode::OK).await);
        let catalog = default_catalog();
        let rec = recommend_with_fallback(
            Some(&client),
            &catalog,
            &reset_filters(),
            &tunis(),
            &mut FixedJitter::constant(0),
        )
        .await;

        assert_eq!(rec.remote, RemoteOutcome::Accepted);
        assert_eq!(rec.result.names(), vec!["Basil", "Lavender"]);
    }

    #[tokio::test]
    async fn test_server_error_falls_back() {
        let client = RecommendationClient::new(spawn_stub(StatusCode::INTERNAL_SERVER_ERROR).await);
        let catalog = default_catalog();
        let rec = recommend_with_fallback(
            Some(&client),
            &catalog,
            &reset_filters(),
            &tunis(),
            &mut FixedJitter::constant(0),
        )
        .await;

        assert!(matches!(rec.remote, RemoteOutcome::Failed(ref msg) if msg.contains("500")));
        assert_eq!(rec.result.names(), vec!["Basil", "Lavender"]);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_falls_back() {
        // Bind then drop to get a port nothing listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = RecommendationClient::new(format!("http://{}/recommend", addr));
        let catalog = default_catalog();
        let rec = recommend_with_fallback(
            Some(&client),
            &catalog,
            &reset_filters(),
            &tunis(),
            &mut FixedJitter::constant(0),
        )
        .await;

        assert!(matches!(rec.remote, RemoteOutcome::Failed(_)));
        assert!(!rec.result.is_empty());
    }
}
