use crate::{
    data::{InteractionSpec, Response, Verb},
    error::Error,
    http_client::{HttpClient, HyperHttpClient},
    schema::Schema,
};
use serde_json::Value;
use std::{collections::HashMap, sync::Arc};
use tracing::info;

/// Builder used to build a ContractVerifier instance.
#[derive(Debug, Default)]
pub struct ContractVerifierBuilder {
    base_url: Option<String>,
    headers: HashMap<String, String>,
    http_client: Option<Arc<dyn HttpClient + Send + Sync>>,
}

impl ContractVerifierBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given base URL; paths passed to `invoke` are appended to it.
    pub fn with_base_url<T: Into<String>>(mut self, base_url: T) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a header sent with every interaction.
    pub fn with_header<S1: Into<String>, S2: Into<String>>(mut self, name: S1, value: S2) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Use the given client instead of the real one. Tests pass a
    /// [`crate::MockHttpClient`] here.
    pub fn with_http_client(mut self, http_client: Arc<dyn HttpClient + Send + Sync>) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Consume the builder and create a ContractVerifier using all of the
    /// previously configured values or their defaults.
    pub fn build(mut self) -> ContractVerifier {
        ContractVerifier {
            base_url: self.base_url.take().unwrap_or_default(),
            headers: self.headers,
            http_client: self
                .http_client
                .take()
                .unwrap_or_else(|| Arc::new(HyperHttpClient::new())),
        }
    }
}

/// Drives declared HTTP interactions through an injected [`HttpClient`] and
/// verifies the caller-observable contract of the responses.
#[derive(Debug)]
pub struct ContractVerifier {
    base_url: String,
    headers: HashMap<String, String>,
    http_client: Arc<dyn HttpClient + Send + Sync>,
}

impl ContractVerifier {
    pub fn builder() -> ContractVerifierBuilder {
        ContractVerifierBuilder::new()
    }

    /// Performs the (possibly mocked) call described by `verb` and `path`,
    /// carrying the verifier's default headers and an optional JSON body.
    pub async fn invoke(
        &self,
        verb: Verb,
        path: &str,
        body: Option<Value>,
    ) -> Result<Response, Error> {
        let spec = InteractionSpec {
            verb,
            url: format!("{}{}", self.base_url, path),
            headers: self.headers.clone(),
            body,
        };

        info!(verb = %spec.verb, url = %spec.url, "dispatching interaction");

        self.http_client.dispatch(&spec).await
    }
}

/// Fails the test when the response's status code or decoded body diverges
/// from the expectation.
pub fn assert_contract(response: &Response, expected_status: u16, expected_body: &Value) {
    if response.status_code() != expected_status {
        panic!(
            "status code mismatch: expected {}, got {}",
            expected_status,
            response.status_code()
        );
    }

    let body = match response.body() {
        Ok(body) => body,
        Err(e) => panic!("the response body is not valid JSON: {}", e),
    };

    if &body != expected_body {
        panic!("body mismatch: expected {}, got {}", expected_body, body);
    }
}

/// Fails the test when the response's decoded body does not conform to
/// `schema`, listing every offending field.
pub fn assert_schema(response: &Response, schema: &Schema) {
    let body = match response.body() {
        Ok(body) => body,
        Err(e) => panic!("the response body is not valid JSON: {}", e),
    };

    if let Err(violations) = schema.validate(&body) {
        let details = violations
            .iter()
            .map(|violation| violation.to_string())
            .collect::<Vec<_>>()
            .join("; ");

        panic!("schema violation: {}", details);
    }
}
