//! Message template rendering
//!
//! Rendering sits behind the [`TemplateRenderer`] trait so the resolver can be
//! exercised with a stub. [`BraceTemplate`] is the shipped renderer: it
//! substitutes `{name}` placeholders and leaves everything it cannot resolve
//! untouched.

use regex::{Captures, Regex};
use serde_json::{Map, Value};
use std::sync::OnceLock;

/// Substitutes named placeholders in a message template
pub trait TemplateRenderer {
    /// Render `template` against `params`. Must not fail.
    fn render(&self, template: &str, params: &Map<String, Value>) -> String;
}

impl<F> TemplateRenderer for F
where
    F: Fn(&str, &Map<String, Value>) -> String,
{
    fn render(&self, template: &str, params: &Map<String, Value>) -> String {
        self(template, params)
    }
}

/// `{name}` placeholder renderer
///
/// - `{name}` with `name` made of ASCII letters, digits and `_` is replaced by
///   the display form of `params[name]`
/// - `{name}` without a matching parameter stays literal
/// - `{{name}}` renders as the literal text `{name}`
/// - any other brace text is copied through unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct BraceTemplate;

fn placeholder_pattern() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    // Optional outer braces are captured so `{{name}}` can be told apart
    PLACEHOLDER.get_or_init(|| Regex::new(r"(\{)?\{([0-9A-Za-z_]+)\}(\})?").expect("Valid regex pattern"))
}

impl TemplateRenderer for BraceTemplate {
    fn render(&self, template: &str, params: &Map<String, Value>) -> String {
        placeholder_pattern()
            .replace_all(template, |caps: &Captures| {
                let name = &caps[2];
                let open = if caps.get(1).is_some() { "{" } else { "" };
                let close = if caps.get(3).is_some() { "}" } else { "" };

                if !open.is_empty() && !close.is_empty() {
                    return format!("{{{}}}", name);
                }

                let substituted = match params.get(name) {
                    Some(value) => display_value(value),
                    None => format!("{{{}}}", name),
                };
                format!("{}{}{}", open, substituted, close)
            })
            .into_owned()
    }
}

/// Human display form of a JSON value used in rendered messages
///
/// Strings render without quotes, `null` renders empty and arrays join their
/// elements with commas.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items.iter().map(display_value).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("params must be an object"),
        }
    }

    #[test]
    fn test_substitutes_known_placeholders() {
        let rendered = BraceTemplate.render(
            "{path} must be greater than or equal to {max}",
            &params(json!({"path": "age", "max": 60})),
        );
        assert_eq!(rendered, "age must be greater than or equal to 60");
    }

    #[test]
    fn test_unknown_placeholders_stay_literal() {
        let rendered = BraceTemplate.render("{path} vs {limit}", &params(json!({"path": "age"})));
        assert_eq!(rendered, "age vs {limit}");
    }

    #[test]
    fn test_double_braces_escape() {
        let rendered = BraceTemplate.render("{{path}} is {path}", &params(json!({"path": "age"})));
        assert_eq!(rendered, "{path} is age");
    }

    #[test]
    fn test_escape_decided_by_template_not_substituted_text() {
        let p = params(json!({"path": "x{", "value": "5"}));
        assert_eq!(BraceTemplate.render("{path}{value}}", &p), "x{5}");
        assert_eq!(BraceTemplate.render("{{path}", &p), "{x{");
        assert_eq!(BraceTemplate.render("{{unknown}} {unknown}", &p), "{unknown} {unknown}");
    }

    #[test]
    fn test_non_identifier_braces_copied_through() {
        let p = params(json!({"path": "age", "limit": 3}));
        assert_eq!(
            BraceTemplate.render("{path} must be less than or equal to {{#limit}}", &p),
            "age must be less than or equal to {{#limit}}"
        );
        assert_eq!(BraceTemplate.render("{ path }", &p), "{ path }");
        assert_eq!(BraceTemplate.render("open { and {path", &p), "open { and {path");
        assert_eq!(BraceTemplate.render("}{}{path}", &p), "}{}age");
    }

    #[test]
    fn test_prefix_characters_preserved() {
        let rendered = BraceTemplate.render("@{path}!", &params(json!({"path": "age"})));
        assert_eq!(rendered, "@age!");
    }

    #[test]
    fn test_multibyte_text_around_placeholders() {
        let rendered = BraceTemplate.render("«{path}» est invalide ✓", &params(json!({"path": "âge"})));
        assert_eq!(rendered, "«âge» est invalide ✓");
    }

    #[test]
    fn test_display_value_forms() {
        assert_eq!(display_value(&json!(null)), "");
        assert_eq!(display_value(&json!("x")), "x");
        assert_eq!(display_value(&json!(true)), "true");
        assert_eq!(display_value(&json!(1.5)), "1.5");
        assert_eq!(display_value(&json!(["a", "b", 3])), "a,b,3");
        assert_eq!(display_value(&json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn test_closure_renderer() {
        let upper = |template: &str, _: &Map<String, Value>| template.to_uppercase();
        assert_eq!(upper.render("abc", &Map::new()), "ABC");
    }
}
