//! HTTP endpoint accepting contact-form submissions.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderName, HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use folio_core::{Config, SmtpConfig, config::ServerConfig};
use serde::Serialize;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, warn};

use crate::{
    mailer::{Mailer, SmtpMailer},
    submission::LeadForm,
};

/// Route the contact form posts to.
pub const LEAD_PATH: &str = "/api/lead";

const GENERIC_FAILURE: &str = "Failed to process lead submission. Please try again later.";

/// Server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// JSON body returned by the lead endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LeadResponse {
    Accepted {
        success: bool,
        message: String,
    },
    Rejected {
        error: String,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        details: Vec<String>,
    },
}

impl LeadResponse {
    fn accepted() -> Self {
        Self::Accepted {
            success: true,
            message: "Lead submission received successfully".to_string(),
        }
    }

    fn rejected(error: impl Into<String>) -> Self {
        Self::Rejected {
            error: error.into(),
            details: Vec::new(),
        }
    }
}

fn reply(status: StatusCode, body: LeadResponse) -> Response {
    (status, Json(body)).into_response()
}

/// Shared state of the lead service.
#[derive(Clone)]
pub struct LeadState {
    smtp: SmtpConfig,
    mailer: Arc<dyn Mailer>,
}

impl LeadState {
    /// State using the given SMTP configuration and mailer.
    pub fn new(smtp: SmtpConfig, mailer: Arc<dyn Mailer>) -> Self {
        Self { smtp, mailer }
    }

    /// State delivering through a real SMTP relay.
    pub fn smtp(smtp: SmtpConfig) -> Self {
        Self::new(smtp, Arc::new(SmtpMailer))
    }
}

/// Build the lead router.
pub fn router(state: LeadState, server: &ServerConfig) -> Router {
    let router = Router::new()
        .route(LEAD_PATH, post(submit_lead).fallback(method_not_allowed))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    match cors_layer(&server.cors_origins) {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

/// CORS for the configured browser origins; `None` keeps the endpoint
/// same-origin only.
fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|_| warn!(%origin, "ignoring invalid CORS origin"))
                .ok()
        })
        .collect();

    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::POST, Method::OPTIONS])
            .allow_headers([
                header::CONTENT_TYPE,
                header::AUTHORIZATION,
                HeaderName::from_static("x-requested-with"),
            ])
            .allow_credentials(true),
    )
}

/// Bind and serve until the process is stopped.
pub async fn serve(config: &Config) -> Result<(), ServerError> {
    let app = router(LeadState::smtp(config.smtp.clone()), &config.server);
    let listener = TcpListener::bind(&config.server.bind).await?;

    info!(addr = %listener.local_addr()?, path = LEAD_PATH, "lead service listening");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn method_not_allowed() -> Response {
    reply(
        StatusCode::METHOD_NOT_ALLOWED,
        LeadResponse::rejected("Method not allowed"),
    )
}

async fn submit_lead(State(state): State<LeadState>, body: Bytes) -> Response {
    let form: LeadForm = match serde_json::from_slice(&body) {
        Ok(form) => form,
        Err(e) => {
            error!(error = %e, "lead submission error: unreadable body");
            return reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                LeadResponse::rejected(GENERIC_FAILURE),
            );
        }
    };

    let submission = match form.validate() {
        Ok(submission) => submission,
        Err(details) => {
            return reply(
                StatusCode::BAD_REQUEST,
                LeadResponse::Rejected {
                    error: "Validation failed".to_string(),
                    details,
                },
            );
        }
    };

    let settings = match state.smtp.settings() {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "SMTP configuration missing. Required: host, user, pass, to");
            return reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                LeadResponse::rejected("Email service configuration error"),
            );
        }
    };

    if let Err(e) = state.mailer.send(&settings, &submission.email()).await {
        error!(error = %e, "lead submission error");
        return reply(
            StatusCode::INTERNAL_SERVER_ERROR,
            LeadResponse::rejected(GENERIC_FAILURE),
        );
    }

    reply(StatusCode::OK, LeadResponse::accepted())
}
