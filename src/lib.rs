mod data;
mod error;
mod http_client;
mod mock_client;
mod schema;
mod test_session;
mod verifier;

pub use data::{CannedResponse, InteractionSpec, Response, Verb};
pub use error::Error;
pub use http_client::{HttpClient, HyperHttpClient};
pub use mock_client::MockHttpClient;
pub use schema::{PrimitiveType, Schema, SchemaViolation};
pub use test_session::TestSession;
pub use verifier::{assert_contract, assert_schema, ContractVerifier, ContractVerifierBuilder};
