use std::sync::Once;
use tracing::info;
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Per-test lifecycle guard.
///
/// Sets up process-wide logging exactly once, no matter how many tests (or
/// threads) begin a session, and emits a start line immediately and a
/// completion line when dropped.
pub struct TestSession {
    name: String,
}

impl TestSession {
    pub fn begin<S: Into<String>>(name: S) -> Self {
        INIT_LOGGING.call_once(|| {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
                )
                .with_test_writer()
                .init();
        });

        let name = name.into();
        info!("Starting test: {}", name);

        Self { name }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for TestSession {
    fn drop(&mut self) {
        info!("Completed test: {}", self.name);
    }
}
