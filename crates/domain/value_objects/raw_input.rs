use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RawInputError {
    #[error("request body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("request body must be a JSON object")]
    NotAnObject,
}

/// The untyped field mapping of a create request, as submitted by the client.
///
/// Values are kept verbatim; the accessors render them the way the record
/// builders need them without rejecting unexpected types.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawInput(Map<String, Value>);

impl RawInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn from_json_slice(body: &[u8]) -> Result<Self, RawInputError> {
        match serde_json::from_slice::<Value>(body)? {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(RawInputError::NotAnObject),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Value) {
        self.0.insert(field.into(), value);
    }

    /// Adds a form-encoded value. Repeated fields collect into a list and
    /// values that look like JSON arrays or objects are decoded.
    pub fn append_form_value(&mut self, field: &str, raw: String) {
        let value = decode_form_value(raw);
        match self.0.get_mut(field) {
            None => {
                self.0.insert(field.to_string(), value);
            }
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
        }
    }

    /// True when the field is absent or falsy.
    pub fn is_missing(&self, field: &str) -> bool {
        is_falsy(self.0.get(field))
    }

    pub fn text(&self, field: &str) -> String {
        self.0.get(field).map(render_text).unwrap_or_default()
    }

    /// Falls back to `default` when the field is missing.
    pub fn text_or(&self, field: &str, default: &str) -> String {
        if self.is_missing(field) {
            default.to_string()
        } else {
            self.text(field)
        }
    }

    pub fn text_list(&self, field: &str) -> Vec<String> {
        match self.0.get(field) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.iter().map(render_text).collect(),
            Some(other) => vec![render_text(other)],
        }
    }

    /// Nested objects of a list field. Non-object entries become empty inputs.
    pub fn object_list(&self, field: &str) -> Vec<RawInput> {
        match self.0.get(field) {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::Object(map) => RawInput(map.clone()),
                    _ => RawInput::default(),
                })
                .collect(),
            Some(Value::Object(map)) => vec![RawInput(map.clone())],
            _ => Vec::new(),
        }
    }
}

/// Mirrors loose truthiness: absent, `null`, `false`, `0`, `""` and empty
/// lists count as missing. Objects, even empty ones, are present.
pub fn is_falsy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(flag)) => !flag,
        Some(Value::Number(number)) => number.as_f64().map(|n| n == 0.0).unwrap_or(false),
        Some(Value::String(text)) => text.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(_)) => false,
    }
}

fn render_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        other => other.to_string(),
    }
}

fn decode_form_value(raw: String) -> Value {
    let trimmed = raw.trim_start();
    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        if let Ok(value) = serde_json::from_str::<Value>(&raw) {
            return value;
        }
    }
    Value::String(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(value: Value) -> RawInput {
        match value {
            Value::Object(map) => RawInput::from_map(map),
            _ => panic!("test input must be an object"),
        }
    }

    #[test]
    fn falsy_values_count_as_missing() {
        let raw = input(json!({
            "empty": "",
            "zero": 0,
            "off": false,
            "nothing": null,
            "list": [],
            "map": {},
            "name": "Basic",
            "count": 3,
        }));

        for field in ["empty", "zero", "off", "nothing", "list", "absent"] {
            assert!(raw.is_missing(field), "{field} should be missing");
        }
        assert!(!raw.is_missing("map"), "empty objects are present");
        assert!(!raw.is_missing("name"));
        assert!(!raw.is_missing("count"));
    }

    #[test]
    fn scalars_render_as_text() {
        let raw = input(json!({ "price": 1200, "flag": true, "name": "Premium" }));
        assert_eq!(raw.text("price"), "1200");
        assert_eq!(raw.text("flag"), "true");
        assert_eq!(raw.text("name"), "Premium");
        assert_eq!(raw.text("absent"), "");
    }

    #[test]
    fn text_or_replaces_missing_values() {
        let raw = input(json!({ "avatar": "", "other": "https://cdn.example.com/a.png" }));
        assert_eq!(raw.text_or("avatar", ""), "");
        assert_eq!(raw.text_or("missing", "fallback"), "fallback");
        assert_eq!(raw.text_or("other", ""), "https://cdn.example.com/a.png");
    }

    #[test]
    fn text_list_accepts_single_values() {
        let raw = input(json!({ "features": ["Full body scan", 2], "single": "Coaching" }));
        assert_eq!(raw.text_list("features"), vec!["Full body scan", "2"]);
        assert_eq!(raw.text_list("single"), vec!["Coaching"]);
        assert!(raw.text_list("absent").is_empty());
    }

    #[test]
    fn repeated_form_values_collect_into_a_list() {
        let mut raw = RawInput::new();
        raw.append_form_value("features", "Full body scan".to_string());
        raw.append_form_value("features", "Meal plans".to_string());
        raw.append_form_value("features", "Coaching".to_string());

        assert_eq!(
            raw.text_list("features"),
            vec!["Full body scan", "Meal plans", "Coaching"]
        );
    }

    #[test]
    fn json_looking_form_values_are_decoded() {
        let mut raw = RawInput::new();
        raw.append_form_value(
            "pricingPlans",
            r#"[{"name":"Basic","features":["Scan"]}]"#.to_string(),
        );
        raw.append_form_value("note", "[not json".to_string());

        let plans = raw.object_list("pricingPlans");
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].text("name"), "Basic");
        assert_eq!(raw.text("note"), "[not json");
    }

    #[test]
    fn non_object_bodies_are_rejected() {
        assert!(matches!(
            RawInput::from_json_slice(b"[1, 2]"),
            Err(RawInputError::NotAnObject)
        ));
        assert!(matches!(
            RawInput::from_json_slice(b"{ not json"),
            Err(RawInputError::InvalidJson(_))
        ));
        assert!(RawInput::from_json_slice(br#"{"name":"A"}"#).is_ok());
    }
}
