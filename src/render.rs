//! # Page Rendering
//!
//! Handlers build a serializable view model and hand it to a [`PageRenderer`]
//! under a template name from [`crate::routes::templates`].
//!
//! The production [`PageShellRenderer`] emits a minimal HTML document that
//! embeds the model as JSON for the page's script to draw. Tests swap in
//! [`RecordingRenderer`] to assert on the model itself.

use std::sync::Mutex;

use axum::response::Html;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::routes::templates;

/// Errors raised while turning a view model into HTML.
#[derive(Debug, Error)]
pub enum RenderError {
    /// No template is registered under this name.
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    /// The view model failed to serialize to JSON.
    #[error("View model could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub trait PageRenderer: Send + Sync {
    fn render(&self, template: &str, model: &Value) -> Result<String, RenderError>;
}

/// Serializes `page` and renders it with `template`.
pub fn render_page<T: Serialize>(
    renderer: &dyn PageRenderer,
    template: &str,
    page: &T,
) -> Result<Html<String>, RenderError> {
    let model = serde_json::to_value(page)?;
    Ok(Html(renderer.render(template, &model)?))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PageShellRenderer;

impl PageRenderer for PageShellRenderer {
    fn render(&self, template: &str, model: &Value) -> Result<String, RenderError> {
        if !templates::ALL.contains(&template) {
            return Err(RenderError::UnknownTemplate(template.to_string()));
        }
        let stem = template.trim_end_matches(".html");
        let json = script_safe(&serde_json::to_string(model)?);

        Ok(format!(
            "<!DOCTYPE html>\n\
             <html>\n\
             <head><meta charset=\"utf-8\"><title>{stem}</title></head>\n\
             <body data-template=\"{template}\">\n\
             <div id=\"app\"></div>\n\
             <script type=\"application/json\" id=\"page-model\">{json}</script>\n\
             <script src=\"/static/{stem}.js\"></script>\n\
             </body>\n\
             </html>\n"
        ))
    }
}

// JSON stays valid with these escapes and cannot close the script element.
fn script_safe(json: &str) -> String {
    json.replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

/// Keeps every rendered `(template, model)` pair.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pages: Mutex<Vec<(String, Value)>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pages(&self) -> Vec<(String, Value)> {
        self.pages.lock().map(|p| p.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<(String, Value)> {
        self.pages().pop()
    }
}

impl PageRenderer for RecordingRenderer {
    fn render(&self, template: &str, model: &Value) -> Result<String, RenderError> {
        if let Ok(mut pages) = self.pages.lock() {
            pages.push((template.to_string(), model.clone()));
        }
        Ok(template.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shell_embeds_escaped_model() {
        let html = PageShellRenderer
            .render(
                templates::ADMIN_EDIT_ORDER,
                &json!({ "error": "</script><b>" }),
            )
            .unwrap();

        assert!(html.contains("data-template=\"editOrder.html\""));
        assert!(html.contains(r#"{"error":"\u003c/script\u003e\u003cb\u003e"}"#));
        assert!(!html.contains("</script><b>"));
    }

    #[test]
    fn test_unknown_template_rejected() {
        let err = PageShellRenderer.render("missing.html", &json!({})).unwrap_err();
        assert!(matches!(err, RenderError::UnknownTemplate(name) if name == "missing.html"));
    }

    #[test]
    fn test_recording_renderer_keeps_models() {
        let renderer = RecordingRenderer::new();
        render_page(&renderer, templates::CUSTOMER_CREATE, &json!({ "error": "x" })).unwrap();

        let (template, model) = renderer.last().unwrap();
        assert_eq!(template, templates::CUSTOMER_CREATE);
        assert_eq!(model["error"], "x");
    }
}
