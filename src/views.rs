//! View payloads handed to the external template renderer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::AppResult;

/// Outcome of a catalog controller: a template to render or a place to go
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Render { template: &'static str, context: Value },
    Redirect(String),
}

/// Wire shape of [`View::Render`]
#[derive(Serialize, ToSchema)]
pub struct RenderedView {
    /// Template name, e.g. `author_detail`
    pub template: String,
    /// Data passed to the template
    #[schema(value_type = Object)]
    pub context: Value,
}

impl View {
    pub fn render(template: &'static str, context: &impl Serialize) -> AppResult<Self> {
        Ok(View::Render {
            template,
            context: serde_json::to_value(context)?,
        })
    }

    pub fn redirect(to: impl Into<String>) -> Self {
        View::Redirect(to.into())
    }

    pub fn template(&self) -> Option<&'static str> {
        match self {
            View::Render { template, .. } => Some(*template),
            View::Redirect(_) => None,
        }
    }

    pub fn context(&self) -> Option<&Value> {
        match self {
            View::Render { context, .. } => Some(context),
            View::Redirect(_) => None,
        }
    }

    pub fn location(&self) -> Option<&str> {
        match self {
            View::Redirect(to) => Some(to),
            View::Render { .. } => None,
        }
    }
}

impl IntoResponse for View {
    fn into_response(self) -> Response {
        match self {
            View::Render { template, context } => (
                StatusCode::OK,
                Json(RenderedView {
                    template: template.to_string(),
                    context,
                }),
            )
                .into_response(),
            View::Redirect(to) => Redirect::to(&to).into_response(),
        }
    }
}
