//! HTML fragments for browser hosts, rendered with embedded Tera templates

use miette::Diagnostic;
use rust_embed::Embed;
use tera::{Context, Tera};
use thiserror::Error;

use crate::form::preview::Preview;
use crate::form::registry::{WidgetDescriptor, WidgetKind};
use crate::form::summary::Summary;
use crate::form::validator::Rule;

#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

const WIDGET_TEMPLATE: &str = "widget.html";
const PREVIEW_TEMPLATE: &str = "preview.html";
const SUMMARY_TEMPLATE: &str = "summary.html";

#[derive(Debug, Error, Diagnostic)]
pub enum RenderError {
    #[error("Template not found: {0}")]
    #[diagnostic(code(setwiz::render::not_found))]
    NotFound(String),

    #[error("Template rendering error: {0}")]
    #[diagnostic(code(setwiz::render::failed))]
    Render(String),
}

/// Renders widgets, previews and summaries as escaped HTML
pub struct HtmlRenderer {
    tera: Tera,
}

impl HtmlRenderer {
    /// Load the embedded templates. Names end in `.html`, so Tera escapes
    /// every interpolated value.
    pub fn new() -> Result<Self, RenderError> {
        let mut tera = Tera::default();

        for file in EmbeddedTemplates::iter() {
            let name = file.as_ref();
            if let Some(content) = EmbeddedTemplates::get(name) {
                let text = std::str::from_utf8(&content.data)
                    .map_err(|e| RenderError::Render(format!("{}: {}", name, e)))?;
                tera.add_raw_template(name, text)
                    .map_err(|e| RenderError::Render(e.to_string()))?;
            }
        }

        for required in [WIDGET_TEMPLATE, PREVIEW_TEMPLATE, SUMMARY_TEMPLATE] {
            if !tera.get_template_names().any(|n| n == required) {
                return Err(RenderError::NotFound(required.to_string()));
            }
        }

        Ok(Self { tera })
    }

    /// Value input for a descriptor, carrying its rule list as `data-validation`
    pub fn widget(
        &self,
        descriptor: &WidgetDescriptor,
        name: &str,
        value: &str,
    ) -> Result<String, RenderError> {
        let attributes: Vec<(&str, String)> =
            descriptor.constraints.iter().map(|c| c.attribute()).collect();

        let mut context = Context::new();
        context.insert("kind", descriptor.kind.as_str());
        context.insert("input_type", descriptor.input_type);
        context.insert("name", name);
        context.insert("value", value);
        context.insert("placeholder", descriptor.placeholder);
        context.insert("help", descriptor.help);
        context.insert("attributes", &attributes);
        context.insert("rules", &descriptor.rule_names().join(","));
        context.insert("checked", &(value == "true"));
        if descriptor.kind == WidgetKind::ColorPicker {
            // The native picker cannot show a partial hex code
            let swatch = if !value.is_empty() && Rule::Color.check(value) {
                value
            } else {
                "#000000"
            };
            context.insert("swatch", swatch);
        }

        self.render(WIDGET_TEMPLATE, &context)
    }

    pub fn preview(&self, preview: &Preview) -> Result<String, RenderError> {
        let context =
            Context::from_serialize(preview).map_err(|e| RenderError::Render(e.to_string()))?;
        self.render(PREVIEW_TEMPLATE, &context)
    }

    pub fn summary(&self, summary: &Summary) -> Result<String, RenderError> {
        let mut context = Context::new();
        context.insert("rows", &summary.rows());
        self.render(SUMMARY_TEMPLATE, &context)
    }

    fn render(&self, template: &str, context: &Context) -> Result<String, RenderError> {
        self.tera
            .render(template, context)
            .map_err(|e| RenderError::Render(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value_type::ValueTypeTag;
    use crate::form::preview::format_preview;
    use crate::form::registry::ValueTypeRegistry;

    fn renderer() -> HtmlRenderer {
        HtmlRenderer::new().unwrap()
    }

    #[test]
    fn test_widget_carries_rules_and_constraints() {
        let registry = ValueTypeRegistry::new();
        let html = renderer()
            .widget(registry.describe(ValueTypeTag::Decimal), "value", "3.5")
            .unwrap();
        assert!(html.contains(r#"type="number""#));
        assert!(html.contains(r#"step="0.01""#));
        assert!(html.contains(r#"data-validation="decimal""#));
        assert!(html.contains(r#"value="3.5""#));
    }

    #[test]
    fn test_toggle_widget_checked() {
        let registry = ValueTypeRegistry::new();
        let html = renderer()
            .widget(registry.describe(ValueTypeTag::Boolean), "value", "true")
            .unwrap();
        assert!(html.contains("checkbox"));
        assert!(html.contains(" checked"));
    }

    #[test]
    fn test_textarea_widget_escapes_value() {
        let registry = ValueTypeRegistry::new();
        let html = renderer()
            .widget(registry.describe(ValueTypeTag::Json), "value", "</textarea><b>")
            .unwrap();
        assert!(html.contains(r#"rows="4""#));
        assert!(html.contains("&lt;&#x2F;textarea&gt;&lt;b&gt;"));
    }

    #[test]
    fn test_preview_escapes_text() {
        let html = renderer()
            .preview(&format_preview(Some(ValueTypeTag::String), "<script>x</script>"))
            .unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_preview_link_and_chips() {
        let r = renderer();
        let link = r.preview(&format_preview(Some(ValueTypeTag::Email), "a@b.co")).unwrap();
        assert!(link.contains("mailto:a@b.co"));

        let chips = r.preview(&format_preview(Some(ValueTypeTag::List), "red, green")).unwrap();
        assert_eq!(chips.matches("badge").count(), 2);
    }

    #[test]
    fn test_preview_never_emits_unsafe_href_or_style() {
        let r = renderer();
        let link = r
            .preview(&format_preview(Some(ValueTypeTag::Url), "javascript:alert(document.cookie)"))
            .unwrap();
        assert!(!link.contains("href"));
        assert!(link.contains("javascript:alert(document.cookie)"));

        let swatch = r
            .preview(&format_preview(
                Some(ValueTypeTag::Color),
                "red;background:url(https://evil.example/x)",
            ))
            .unwrap();
        assert!(!swatch.contains("style="));

        let safe = r.preview(&format_preview(Some(ValueTypeTag::Color), "#112233")).unwrap();
        assert!(safe.contains("background-color: #112233"));
    }

    #[test]
    fn test_empty_preview_hidden() {
        let html = renderer().preview(&Preview::Empty).unwrap();
        assert!(html.contains("hidden"));
    }
}
