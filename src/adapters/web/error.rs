//! HTTP error responses for the web adapter.

use askama::Template;
use axum::{
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};

use crate::domain::error::TickermapError;

use super::is_htmx_request;

#[derive(Debug)]
pub struct WebError {
    pub status: StatusCode,
    pub message: String,
}

impl WebError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

pub fn status_from_error(err: &TickermapError) -> StatusCode {
    match err {
        TickermapError::InvalidHolding(_)
        | TickermapError::ConfigMissing { .. }
        | TickermapError::ConfigInvalid { .. }
        | TickermapError::ConfigParse { .. } => StatusCode::BAD_REQUEST,
        TickermapError::UnknownTicker { .. } => StatusCode::NOT_FOUND,
        TickermapError::QuoteFetch { .. }
        | TickermapError::FeedUnavailable { .. }
        | TickermapError::NoQuotes => StatusCode::BAD_GATEWAY,
        TickermapError::Store { .. } | TickermapError::Io(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl From<TickermapError> for WebError {
    fn from(err: TickermapError) -> Self {
        Self::new(status_from_error(&err), err.to_string())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let template = super::templates::ErrorTemplate {
            message: &self.message,
            status: self.status.as_u16(),
        };
        match template.render() {
            Ok(html) => (self.status, Html(html)).into_response(),
            Err(_) => (self.status, self.message).into_response(),
        }
    }
}

#[derive(Template)]
#[template(path = "base.html")]
struct BasePage<'a> {
    title: &'a str,
    content: &'a str,
}

/// Render an error as a fragment for HTMX requests and as a full page for
/// plain navigation.
pub fn error_response(err: WebError, headers: &HeaderMap) -> Response {
    let template = super::templates::ErrorTemplate {
        message: &err.message,
        status: err.status.as_u16(),
    };

    let content = match template.render() {
        Ok(html) => html,
        Err(_) => return (err.status, err.message).into_response(),
    };

    if is_htmx_request(headers) {
        (err.status, Html(content)).into_response()
    } else {
        let page = BasePage {
            title: "Error",
            content: &content,
        };
        match page.render() {
            Ok(html) => (err.status, Html(html)).into_response(),
            Err(_) => (err.status, content).into_response(),
        }
    }
}
