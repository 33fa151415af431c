use serde_json::Value;

/// Label fields arrive either as a bare value or wrapped in a list
/// (`"purpose": ["Pain reliever"]`). Most list-wrapped fields hold one entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Scalar(&'a Value),
    List(&'a [Value]),
}

impl<'a> From<&'a Value> for FieldValue<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Array(items) => Self::List(items),
            other => Self::Scalar(other),
        }
    }
}

impl<'a> FieldValue<'a> {
    pub fn first(&self) -> Option<&'a Value> {
        match self {
            Self::Scalar(value) => Some(value),
            Self::List(items) => items.first(),
        }
    }

    /// First string entry, trimmed, skipping blanks.
    pub fn first_str(&self) -> Option<&'a str> {
        self.first()
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}

/// Unwraps a non-empty list to its first element; anything else, including an
/// empty list, is returned unchanged.
pub fn flatten(value: &Value) -> &Value {
    match FieldValue::from(value) {
        FieldValue::List([first, ..]) => first,
        _ => value,
    }
}
