//! Three-state remote resource with explicit refetch.
//!
//! A [`Resource`] is always exactly one of loading, failed or ready. Each
//! request is tagged with a [`RequestTicket`]; a result arriving for any
//! ticket but the latest is dropped, so a slow early response can never
//! overwrite a newer one.

use serde_json::Value;
use std::fmt;

use sentily_explorer::{alerts_from_json, records_from_json, DashboardSummary, FeedbackRecord};
use sentily_protocol::{Endpoint, FetchError, HealthResponse};

use crate::client::{decode_health, ApiClient};

/// Turns a successful JSON body into the resource's data.
pub type Decoder<T> = fn(&Value) -> Result<T, FetchError>;

#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Loading,
    Failed(FetchError),
    Ready(T),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            FetchState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Generation number of one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

pub struct Resource<T> {
    endpoint: Endpoint,
    decode: Decoder<T>,
    latest: u64,
    state: FetchState<T>,
}

impl<T: fmt::Debug> fmt::Debug for Resource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("endpoint", &self.endpoint)
            .field("latest", &self.latest)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<T> Resource<T> {
    pub fn new(endpoint: Endpoint, decode: Decoder<T>) -> Self {
        Self {
            endpoint,
            decode,
            latest: 0,
            state: FetchState::Loading,
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    pub fn into_state(self) -> FetchState<T> {
        self.state
    }

    /// Issue a new ticket and enter the loading state. Older tickets become stale.
    pub fn begin(&mut self) -> RequestTicket {
        self.latest += 1;
        self.state = FetchState::Loading;
        RequestTicket(self.latest)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Apply the outcome of the request issued with `ticket`. Returns `false`
    /// (state untouched) when a newer request has been issued since.
    pub fn resolve(&mut self, ticket: RequestTicket, result: Result<Value, FetchError>) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.latest,
                "discarding stale response for {}",
                self.endpoint
            );
            return false;
        }
        self.state = match result.and_then(|body| (self.decode)(&body)) {
            Ok(data) => FetchState::Ready(data),
            Err(err) => FetchState::Failed(err),
        };
        true
    }

    /// Fetch once and settle the state.
    pub async fn load(&mut self, client: &ApiClient) -> &FetchState<T> {
        let ticket = self.begin();
        let result = client.fetch(&self.endpoint).await;
        self.resolve(ticket, result);
        &self.state
    }

    /// Explicit user-triggered reload. Same as [`Resource::load`]; there is no
    /// automatic retry.
    pub async fn refetch(&mut self, client: &ApiClient) -> &FetchState<T> {
        self.load(client).await
    }

    /// Displayable message for the failed state.
    pub fn error_message(&self) -> Option<String> {
        self.state.error().map(|err| err.to_string())
    }
}

impl Resource<Vec<FeedbackRecord>> {
    pub fn feedback(limit: usize) -> Self {
        Self::new(Endpoint::feedback(limit), records_from_json)
    }

    pub fn alerts(urgency: Option<String>, feedback_type: Option<String>) -> Self {
        Self::new(Endpoint::alerts(urgency, feedback_type), alerts_from_json)
    }
}

impl Resource<DashboardSummary> {
    pub fn summary() -> Self {
        Self::new(Endpoint::Summary, |body| Ok(DashboardSummary::from_json(body)))
    }
}

impl Resource<HealthResponse> {
    pub fn health() -> Self {
        Self::new(Endpoint::Health, decode_health)
    }
}
