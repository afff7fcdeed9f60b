use crate::{
    data::{InteractionSpec, Response},
    error::Error,
};
use async_trait::async_trait;
use hyper::{
    body,
    header::{HeaderName, HeaderValue},
    Body, HeaderMap, Request,
};
use hyper_tls::HttpsConnector;
use std::{collections::HashMap, fmt::Debug};

/// The capability the verifier depends on. Tests inject a mock
/// implementation; production code uses [`HyperHttpClient`].
#[async_trait]
pub trait HttpClient: Debug {
    async fn dispatch(&self, spec: &InteractionSpec) -> Result<Response, Error>;
}

/// Real client that performs the network call described by an
/// [`InteractionSpec`].
#[derive(Debug)]
pub struct HyperHttpClient {}

impl HyperHttpClient {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl HttpClient for HyperHttpClient {
    async fn dispatch(&self, spec: &InteractionSpec) -> Result<Response, Error> {
        let mut request_builder = Request::builder()
            .uri(spec.url.as_str())
            .method(spec.verb.as_str());

        if let Some(headers_mut) = request_builder.headers_mut() {
            put_headers(
                headers_mut,
                spec.headers
                    .iter()
                    .filter(|(header_name, _)| header_name.as_str() != "host"),
            )?;
        }

        let body = match &spec.body {
            Some(json) => Body::from(serde_json::to_vec(json)?),
            None => Body::empty(),
        };

        let request: Request<Body> = request_builder.body(body)?;

        let client = hyper::Client::builder().build(HttpsConnector::new());

        let response = client.request(request).await?;

        let status_code = response.status().as_u16();
        let headers = extract_headers(response.headers());
        let body = body::to_bytes(response.into_body()).await?;

        Ok(Response::new(
            status_code,
            headers,
            String::from_utf8_lossy(&body).into(),
        ))
    }
}

impl Default for HyperHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

fn extract_headers(header_map: &HeaderMap) -> HashMap<String, String> {
    // it currently ignores header values with opaque characters
    header_map
        .iter()
        .map(|(k, v)| (String::from(k.as_str()), v.to_str()))
        .filter_map(|(key, value)| value.ok().map(|v| (key, String::from(v))))
        .collect::<HashMap<_, _>>()
}

fn put_headers<'a, I: IntoIterator<Item = (&'a String, &'a String)>>(
    header_map: &mut HeaderMap<HeaderValue>,
    headers: I,
) -> Result<(), Error> {
    for (key, value) in headers {
        let header_name = HeaderName::from_lowercase(key.to_lowercase().as_bytes())?;
        let header_value = HeaderValue::from_str(value)?;
        header_map.append(header_name, header_value);
    }

    Ok(())
}
