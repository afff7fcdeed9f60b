use crate::error::Error;
use serde_json::Value;
use std::{collections::HashMap, fmt, str::FromStr};

/// The HTTP verbs the harness supports. Anything else is outside the
/// contract surface and unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    pub const ALL: [Verb; 4] = [Verb::Get, Verb::Post, Verb::Put, Verb::Delete];

    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Verb::Get),
            "POST" => Ok(Verb::Post),
            "PUT" => Ok(Verb::Put),
            "DELETE" => Ok(Verb::Delete),
            _ => Err(Error::UnsupportedVerb(s.into())),
        }
    }
}

/// A single declared HTTP interaction: what would go over the wire if the
/// call weren't intercepted. Immutable once built.
#[derive(Debug, Clone)]
pub struct InteractionSpec {
    pub verb: Verb,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Value>,
}

/// A pre-built substitute for a network response. Constructed before the
/// mock dispatches anything and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct CannedResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub json_body: Option<Value>,
}

impl CannedResponse {
    pub fn status(status_code: u16) -> Self {
        Self {
            status_code,
            headers: HashMap::new(),
            json_body: None,
        }
    }

    pub fn with_json(status_code: u16, body: Value) -> Self {
        let mut headers = HashMap::new();
        headers.insert("content-type".into(), "application/json".into());

        Self {
            status_code,
            headers,
            json_body: Some(body),
        }
    }

    /// 200 with a JSON body.
    pub fn ok(body: Value) -> Self {
        Self::with_json(200, body)
    }

    /// 201 with a JSON body.
    pub fn created(body: Value) -> Self {
        Self::with_json(201, body)
    }
}

/// The caller-observable result of a dispatched interaction.
#[derive(Debug, Clone)]
pub struct Response {
    status_code: u16,
    headers: HashMap<String, String>,
    body: String,
}

impl Response {
    pub(crate) fn new(status_code: u16, headers: HashMap<String, String>, body: String) -> Self {
        Self {
            status_code,
            headers,
            body,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn text(&self) -> &str {
        &self.body
    }

    /// Decodes the body as JSON.
    pub fn body(&self) -> Result<Value, Error> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn verb_round_trips_through_str() {
        for verb in Verb::ALL.iter() {
            assert_eq!(verb.as_str().parse::<Verb>().unwrap(), *verb);
        }
    }

    #[test]
    fn verb_parsing_is_case_insensitive() {
        assert_eq!("get".parse::<Verb>().unwrap(), Verb::Get);
        assert_eq!("Delete".parse::<Verb>().unwrap(), Verb::Delete);
    }

    #[test]
    fn unsupported_verb_is_rejected() {
        match "PATCH".parse::<Verb>() {
            Err(Error::UnsupportedVerb(verb)) => assert_eq!(verb, "PATCH"),
            other => panic!("expected UnsupportedVerb, got {:?}", other),
        }
    }

    #[test]
    fn json_constructors_set_content_type() {
        let canned = CannedResponse::ok(json!({"id": 1}));
        assert_eq!(canned.status_code, 200);
        assert_eq!(canned.headers["content-type"], "application/json");

        assert_eq!(CannedResponse::created(json!({})).status_code, 201);
        assert!(CannedResponse::status(204).json_body.is_none());
    }

    #[test]
    fn response_decodes_json_body() {
        let response = Response::new(200, HashMap::new(), r#"{"id": 7}"#.into());
        assert_eq!(response.body().unwrap(), json!({"id": 7}));
    }

    #[test]
    fn undecodable_body_is_an_error() {
        let response = Response::new(200, HashMap::new(), "not json".into());
        assert!(matches!(response.body(), Err(Error::JsonError(_))));
    }
}
