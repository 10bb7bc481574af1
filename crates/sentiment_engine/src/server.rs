//! HTTP endpoint: `GET /` explains usage, `POST /` classifies the `text` form field.
//!
//! The form may be urlencoded or `multipart/form-data`; the first `text` field wins.
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, FromRequest, Multipart, Request, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Form, Router};
use engine_logging::{engine_debug, engine_error, engine_info, engine_warn};
use sentiment_core::SentimentAnalyzer;
use thiserror::Error;
use tokio::net::TcpListener;

pub const USAGE_MESSAGE: &str = "You need to POST some data to test this endpoint";
pub const MISSING_TEXT_MESSAGE: &str = "Missing form field: text";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub addr: SocketAddr,
    /// Requests with a larger body are rejected with 413.
    pub max_body_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            max_body_bytes: 64 * 1024,
        }
    }
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind { addr: SocketAddr, source: io::Error },
    #[error("server io error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Clone)]
struct AppState {
    analyzer: Arc<SentimentAnalyzer>,
}

const TEXT_FIELD: &str = "text";

/// The first non-file `text` field of a urlencoded or multipart form.
struct TextField(Option<String>);

impl<S> FromRequest<S> for TextField
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.to_ascii_lowercase().starts_with("multipart/form-data"));

        if !multipart {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            let text = pairs
                .into_iter()
                .find_map(|(name, value)| (name == TEXT_FIELD).then_some(value));
            return Ok(Self(text));
        }

        let mut form = Multipart::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;
        while let Some(field) = form.next_field().await.map_err(IntoResponse::into_response)? {
            if field.name() == Some(TEXT_FIELD) && field.file_name().is_none() {
                let text = field.text().await.map_err(IntoResponse::into_response)?;
                return Ok(Self(Some(text)));
            }
        }
        Ok(Self(None))
    }
}

pub fn router(analyzer: Arc<SentimentAnalyzer>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", get(usage).post(classify))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(AppState { analyzer })
}

async fn usage() -> &'static str {
    USAGE_MESSAGE
}

async fn health() -> &'static str {
    "OK"
}

async fn classify(State(state): State<AppState>, TextField(text): TextField) -> Response {
    let Some(text) = text else {
        engine_warn!("Rejected POST / without a text field");
        return (StatusCode::BAD_REQUEST, MISSING_TEXT_MESSAGE).into_response();
    };

    let analysis = state.analyzer.analyze(&text);
    engine_debug!(
        "Classified {} distinct words as {:?} ({})",
        analysis.features.len(),
        analysis.label,
        analysis.sentiment
    );
    analysis.sentiment.message().into_response()
}

/// A bound listener plus the routes it will serve.
pub struct SentimentServer {
    listener: TcpListener,
    router: Router,
}

impl SentimentServer {
    pub async fn bind(
        settings: &ServerSettings,
        analyzer: Arc<SentimentAnalyzer>,
    ) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(settings.addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: settings.addr,
                source,
            })?;
        Ok(Self {
            listener,
            router: router(analyzer, settings.max_body_bytes),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Serves until `shutdown` resolves, then drains in-flight requests.
    pub async fn serve<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.local_addr()?;
        engine_info!("Listening on http://{}", addr);
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;
        engine_info!("Server shutdown complete");
        Ok(())
    }
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            engine_error!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                engine_error!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => engine_info!("Received Ctrl+C, shutting down"),
        () = terminate => engine_info!("Received SIGTERM, shutting down"),
    }
}
