use async_trait::async_trait;
use campusbus_core::{BusApi, CoreError, CoreResult, Session};
use campusbus_shared::models::{
    ApiErrorBody, AuthResponse, BookTripRequest, BookingResult, IncidentReport, LoginRequest,
    MessageResponse, QrValidateRequest, QrValidateResponse, RegisterRequest, Route, Trip,
};
use chrono::NaiveDate;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn, Instrument};
use uuid::Uuid;

use crate::app_config::ApiConfig;

pub const REGISTER: &str = "/api/auth/register";
pub const LOGIN: &str = "/api/auth/login";
pub const TRIPS_AVAILABLE: &str = "/api/trips/available";
pub const BOOKINGS: &str = "/api/bookings";
pub const QR_VALIDATE: &str = "/api/qr/validate";
pub const INCIDENTS: &str = "/api/incidents";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    None,
    Bearer,
}

/// `BusApi` over HTTP/JSON
#[derive(Clone)]
pub struct HttpBusApi {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

impl HttpBusApi {
    pub fn new(config: &ApiConfig, session: Session) -> CoreResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| CoreError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.base_url, path))
    }

    /// Send one request: tag it, attach the bearer token when required, and
    /// turn non-2xx statuses into `CoreError::Backend`.
    async fn send(&self, builder: RequestBuilder, auth: Auth) -> CoreResult<Response> {
        let request_id = Uuid::new_v4();
        let mut builder = builder.header("X-Request-Id", request_id.to_string());

        if auth == Auth::Bearer {
            let token = self.session.token().await.ok_or(CoreError::Unauthenticated)?;
            builder = builder.bearer_auth(token.expose());
        }

        let span = tracing::info_span!("api_request", %request_id);
        async move {
            let response = builder.send().await.map_err(|e| {
                tracing::error!("Request failed: {}", e);
                CoreError::Transport(e.to_string())
            })?;

            let status = response.status();
            info!(status = status.as_u16(), url = %response.url().path(), "Response received");
            if status.is_success() {
                return Ok(response);
            }

            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.message)
                .ok()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());

            Err(CoreError::Backend {
                status: status.as_u16(),
                message,
            })
        }
        .instrument(span)
        .await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> CoreResult<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| CoreError::Transport(format!("Invalid response body: {}", e)))
    }
}

/// Decode a trip-list body. Some deployments double-encode the array as a JSON
/// string; that is unwrapped once. Anything else that is not a trip array
/// counts as "no trips".
pub fn decode_trip_list(body: &str) -> Vec<Trip> {
    let value = match serde_json::from_str::<Value>(body) {
        Ok(Value::String(inner)) => match serde_json::from_str::<Value>(&inner) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to parse trips response: {}", e);
                return Vec::new();
            }
        },
        Ok(value) => value,
        Err(e) => {
            warn!("Failed to parse trips response: {}", e);
            return Vec::new();
        }
    };

    serde_json::from_value::<Vec<Trip>>(value).unwrap_or_else(|e| {
        warn!("Trips response has unexpected shape: {}", e);
        Vec::new()
    })
}

#[async_trait]
impl BusApi for HttpBusApi {
    async fn register(&self, request: &RegisterRequest) -> CoreResult<AuthResponse> {
        let response = self
            .send(self.request(Method::POST, REGISTER).json(request), Auth::None)
            .await?;
        Self::decode(response).await
    }

    async fn login(&self, request: &LoginRequest) -> CoreResult<AuthResponse> {
        let response = self
            .send(self.request(Method::POST, LOGIN).json(request), Auth::None)
            .await?;
        Self::decode(response).await
    }

    async fn available_trips(&self, route: Route, trip_date: NaiveDate) -> CoreResult<Vec<Trip>> {
        let date = trip_date.format("%Y-%m-%d").to_string();
        let builder = self
            .request(Method::GET, TRIPS_AVAILABLE)
            .query(&[("route", route.as_str()), ("tripDate", date.as_str())]);

        let response = self.send(builder, Auth::Bearer).await?;
        let body = response
            .text()
            .await
            .map_err(|e| CoreError::Transport(e.to_string()))?;

        let trips = decode_trip_list(&body);
        info!(route = %route, trip_date = %date, count = trips.len(), "Fetched trips");
        Ok(trips)
    }

    async fn book_trip(&self, trip_id: &str) -> CoreResult<BookingResult> {
        let body = BookTripRequest {
            trip_id: trip_id.to_string(),
        };
        let response = self
            .send(self.request(Method::POST, BOOKINGS).json(&body), Auth::Bearer)
            .await?;
        Self::decode(response).await
    }

    async fn cancel_booking(&self, booking_id: &str) -> CoreResult<MessageResponse> {
        let path = format!("{}/{}", BOOKINGS, booking_id);
        let response = self
            .send(self.request(Method::DELETE, &path), Auth::Bearer)
            .await?;
        Self::decode(response).await
    }

    async fn validate_qr(&self, request: &QrValidateRequest) -> CoreResult<QrValidateResponse> {
        let response = self
            .send(self.request(Method::POST, QR_VALIDATE).json(request), Auth::Bearer)
            .await?;
        Self::decode(response).await
    }

    async fn report_incident(&self, report: &IncidentReport) -> CoreResult<MessageResponse> {
        let response = self
            .send(self.request(Method::POST, INCIDENTS).json(report), Auth::Bearer)
            .await?;
        Self::decode(response).await
    }
}
