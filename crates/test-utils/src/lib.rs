use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tubemeta::errors::ExtractError;
use tubemeta::fetch::{FetchMethod, FetchRequest, FetchResponse, PageFetcher};
use tubemeta::strategies::{ExtractionResult, Strategy};

// --- Mock Strategy ---

/// What a `MockStrategy` does when invoked.
#[derive(Clone, Debug)]
pub enum MockOutcome {
    /// Returns this result.
    Returns(ExtractionResult),
    /// Fails as if the page were blocked.
    Fails,
}

/// A strategy with a canned outcome that records every URL it was asked for.
#[derive(Clone, Debug)]
pub struct MockStrategy {
    name: &'static str,
    outcome: MockOutcome,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockStrategy {
    pub fn new(name: &'static str, outcome: MockOutcome) -> Self {
        Self {
            name,
            outcome,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A strategy that finds both fields.
    pub fn complete(name: &'static str, title: &str, description: &str) -> Self {
        Self::new(
            name,
            MockOutcome::Returns(ExtractionResult::new(title, description)),
        )
    }

    /// A strategy that finds a title but no description.
    pub fn title_only(name: &'static str, title: &str) -> Self {
        Self::new(
            name,
            MockOutcome::Returns(ExtractionResult::from_fields(Some(title.to_string()), None)),
        )
    }

    /// A strategy that finds a description but no title.
    pub fn description_only(name: &'static str, description: &str) -> Self {
        Self::new(
            name,
            MockOutcome::Returns(ExtractionResult::from_fields(
                None,
                Some(description.to_string()),
            )),
        )
    }

    /// A strategy that returns the "not found" sentinels for both fields.
    pub fn empty(name: &'static str) -> Self {
        Self::new(name, MockOutcome::Returns(ExtractionResult::default()))
    }

    pub fn failing(name: &'static str) -> Self {
        Self::new(name, MockOutcome::Fails)
    }

    /// Retrieves the recorded calls for assertion.
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Boxes a clone for an orchestrator while the original keeps the call log.
    pub fn boxed(&self) -> Box<dyn Strategy> {
        Box::new(self.clone())
    }
}

#[async_trait]
impl Strategy for MockStrategy {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn extract(&self, url: &str) -> Result<ExtractionResult, ExtractError> {
        self.calls.lock().unwrap().push(url.to_string());
        match &self.outcome {
            MockOutcome::Returns(result) => Ok(result.clone()),
            MockOutcome::Fails => Err(ExtractError::BlockedResponse(url.to_string())),
        }
    }
}

// --- Mock Fetcher ---

/// One request as seen by the `MockFetcher`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: FetchMethod,
    pub url: String,
    pub user_agent: String,
    pub query: Vec<(String, String)>,
}

/// A `PageFetcher` serving canned responses keyed by URL. Unknown URLs get a 404.
#[derive(Clone, Debug, Default)]
pub struct MockFetcher {
    responses: Arc<Mutex<HashMap<String, (u16, Vec<u8>)>>>,
    calls: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-programs the response for `url`, ignoring any query string.
    pub fn add_response(&self, url: &str, status: u16, body: impl Into<Vec<u8>>) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(url.to_string(), (status, body.into()));
    }

    /// Retrieves the recorded calls for assertion.
    pub fn get_calls(&self) -> Vec<RecordedRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, request: FetchRequest<'_>) -> Result<FetchResponse, ExtractError> {
        self.calls.lock().unwrap().push(RecordedRequest {
            method: request.method,
            url: request.url.to_string(),
            user_agent: request.user_agent.to_string(),
            query: request
                .query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });

        let responses = self.responses.lock().unwrap();
        let (status, body) = responses
            .get(request.url)
            .cloned()
            .unwrap_or_else(|| (404, b"Not Found".to_vec()));
        Ok(FetchResponse {
            url: request.url.to_string(),
            status,
            body,
        })
    }
}
