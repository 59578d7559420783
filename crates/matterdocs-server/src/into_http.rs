use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Local;
use color_eyre::Report;
use serde_json::json;
use std::{fmt, io::Write};
use termcolor::{ColorChoice, StandardStream};
use tracing::{error, warn};

use crate::validation::ValidationError;

#[derive(Debug)]
pub enum HttpError {
    NotImplemented { msg: String },
    InvalidOutput(ValidationError),
    Internal { err: String },
}

impl HttpError {
    pub fn from_report(err: Report) -> Self {
        error!("HTTP handler error: {}", err.root_cause());

        if let Some(bt) = err
            .handler()
            .downcast_ref::<color_eyre::Handler>()
            .and_then(|h| h.backtrace())
        {
            error!("Backtrace:");
            let mut stream = StandardStream::stderr(ColorChoice::Auto);
            let _ = writeln!(&mut stream, "{bt:?}");
        }

        let mut stream = StandardStream::stderr(ColorChoice::Auto);
        let _ = writeln!(&mut stream, "{err:?}");

        HttpError::Internal {
            err: err.to_string(),
        }
    }

    pub fn not_implemented(message: impl Into<String>) -> Self {
        HttpError::NotImplemented {
            msg: message.into(),
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::NotImplemented { .. } => StatusCode::NOT_IMPLEMENTED,
            HttpError::InvalidOutput(_) | HttpError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

macro_rules! impl_from {
    ($from:ty) => {
        impl From<$from> for HttpError {
            fn from(err: $from) -> Self {
                let report = color_eyre::Report::from(err);
                Self::from_report(report)
            }
        }
    };
}

impl_from!(std::io::Error);
impl_from!(serde_json::Error);

impl From<ValidationError> for HttpError {
    fn from(e: ValidationError) -> Self {
        warn!("Rejected response payload: {e}");
        HttpError::InvalidOutput(e)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let date = Local::now().to_rfc3339();
        let status = self.status();
        match self {
            HttpError::NotImplemented { msg } => (
                status,
                Json(json!({ "err": msg, "type": "not_implemented", "date": date })),
            )
                .into_response(),
            HttpError::InvalidOutput(e) => (
                status,
                Json(json!({ "err": e.to_string(), "type": "invalid_output", "date": date })),
            )
                .into_response(),
            HttpError::Internal { err } => {
                (status, Json(json!({ "err": err, "date": date }))).into_response()
            }
        }
    }
}

impl std::error::Error for HttpError {}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            HttpError::NotImplemented { msg } => msg.to_owned(),
            HttpError::InvalidOutput(e) => e.to_string(),
            HttpError::Internal { err } => err.to_owned(),
        };
        write!(f, "HttpError: {msg}")
    }
}
