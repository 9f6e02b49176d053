use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use salomo_backend::{app_state::AppState, build_app};
use salomo_config::{AppConfig, StripeConfig};
use std::io;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use tracing::Level;

// Collects formatted log lines in memory.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_requests_are_logged_at_info() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let config = Arc::new(AppConfig {
        stripe: StripeConfig {
            secret_key: "sk_test_secret".to_string(),
            publishable_key: "pk_test_public".to_string(),
            ..StripeConfig::default()
        },
        ..AppConfig::default()
    });
    let app = build_app(AppState::from_config(config).unwrap());

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    assert!(output.contains("finished processing request"), "{}", output);
    assert!(output.contains("status=200"), "{}", output);
}
