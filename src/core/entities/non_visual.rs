use serde_json::Value;

/// A top-level item kept verbatim (`beans`, `errorHandler`, unreadable flows).
#[derive(Debug, Clone, PartialEq)]
pub struct NonVisualEntity {
    raw: Value,
}

impl NonVisualEntity {
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Top-level key of a `{key: body}` item.
    pub fn kind_name(&self) -> Option<&str> {
        let object = self.raw.as_object()?;
        if object.len() != 1 {
            return None;
        }
        object.keys().next().map(String::as_str)
    }

    pub fn id(&self) -> Option<&str> {
        let body = self.raw.as_object()?.values().next()?;
        body.get("id").and_then(Value::as_str)
    }
}
