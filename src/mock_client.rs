use crate::{
    data::{CannedResponse, InteractionSpec, Response, Verb},
    error::Error,
    http_client::HttpClient,
};
use async_trait::async_trait;
use std::{collections::HashMap, sync::Mutex};
use tracing::debug;

/// In-memory stand-in for the real client. Each supported verb maps to at
/// most one canned response, returned unchanged on every dispatch of that
/// verb. Dispatching a verb with no canned response is a hard configuration
/// error, never a fall-through to network I/O.
#[derive(Debug, Default)]
pub struct MockHttpClient {
    canned: Mutex<HashMap<Verb, CannedResponse>>,
    recorded: Mutex<Vec<InteractionSpec>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the canned response returned by every subsequent dispatch
    /// of `verb`. Reconfiguring a verb replaces its previous response.
    pub fn configure(&self, verb: Verb, response: CannedResponse) {
        self.canned.lock().unwrap().insert(verb, response);
    }

    /// Every interaction dispatched through this mock, in order.
    pub fn recorded(&self) -> Vec<InteractionSpec> {
        self.recorded.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn dispatch(&self, spec: &InteractionSpec) -> Result<Response, Error> {
        let canned = self
            .canned
            .lock()?
            .get(&spec.verb)
            .cloned()
            .ok_or(Error::MockNotConfigured(spec.verb))?;

        debug!(verb = %spec.verb, url = %spec.url, status = canned.status_code, "serving canned response");

        self.recorded.lock()?.push(spec.clone());

        let body = match &canned.json_body {
            Some(json) => serde_json::to_string(json)?,
            None => String::new(),
        };

        Ok(Response::new(canned.status_code, canned.headers, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec(verb: Verb) -> InteractionSpec {
        InteractionSpec {
            verb,
            url: "https://example.com/things/1".into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    #[tokio::test]
    async fn echoes_the_configured_response_for_every_verb() {
        let mock = MockHttpClient::new();

        for (i, verb) in Verb::ALL.iter().enumerate() {
            mock.configure(*verb, CannedResponse::ok(json!({ "n": i })));
        }

        for (i, verb) in Verb::ALL.iter().enumerate() {
            let response = mock.dispatch(&spec(*verb)).await.unwrap();
            assert_eq!(response.status_code(), 200);
            assert_eq!(response.body().unwrap(), json!({ "n": i }));
        }
    }

    #[tokio::test]
    async fn repeated_dispatch_is_idempotent() {
        let mock = MockHttpClient::new();
        mock.configure(Verb::Get, CannedResponse::ok(json!({"id": 1})));

        let first = mock.dispatch(&spec(Verb::Get)).await.unwrap();
        let second = mock.dispatch(&spec(Verb::Get)).await.unwrap();

        assert_eq!(first.status_code(), second.status_code());
        assert_eq!(first.body().unwrap(), second.body().unwrap());
    }

    #[tokio::test]
    async fn unconfigured_verb_is_a_configuration_error() {
        let mock = MockHttpClient::new();
        mock.configure(Verb::Get, CannedResponse::status(200));

        match mock.dispatch(&spec(Verb::Post)).await {
            Err(Error::MockNotConfigured(verb)) => assert_eq!(verb, Verb::Post),
            other => panic!("expected MockNotConfigured, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn reconfiguring_a_verb_replaces_the_response() {
        let mock = MockHttpClient::new();
        mock.configure(Verb::Put, CannedResponse::ok(json!({"v": 1})));
        mock.configure(Verb::Put, CannedResponse::ok(json!({"v": 2})));

        let response = mock.dispatch(&spec(Verb::Put)).await.unwrap();
        assert_eq!(response.body().unwrap(), json!({"v": 2}));
    }

    #[tokio::test]
    async fn records_dispatched_interactions_in_order() {
        let mock = MockHttpClient::new();
        mock.configure(Verb::Get, CannedResponse::status(200));
        mock.configure(Verb::Delete, CannedResponse::status(200));

        mock.dispatch(&spec(Verb::Get)).await.unwrap();
        mock.dispatch(&spec(Verb::Delete)).await.unwrap();

        let recorded = mock.recorded();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].verb, Verb::Get);
        assert_eq!(recorded[1].verb, Verb::Delete);
    }

    #[tokio::test]
    async fn canned_response_without_body_yields_empty_text() {
        let mock = MockHttpClient::new();
        mock.configure(Verb::Delete, CannedResponse::status(204));

        let response = mock.dispatch(&spec(Verb::Delete)).await.unwrap();
        assert_eq!(response.status_code(), 204);
        assert_eq!(response.text(), "");
    }
}
