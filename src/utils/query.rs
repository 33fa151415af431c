//! Search-term construction for the openFDA `search` parameter.

use std::fmt;

use crate::error::DrugLabelError;

const OPENFDA_FIELD_PREFIX: &str = "openfda.";

/// A single `field:"value"` clause, ready to be AND-joined into a search.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchTerm(String);

impl SearchTerm {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SearchTerm {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for SearchTerm {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for SearchTerm {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

fn is_valid_field(field: &str) -> bool {
    !field.is_empty()
        && field
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// Escapes the characters that would end a quoted phrase early.
pub(crate) fn escape_phrase_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '"' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Builds a search clause against an `openfda.*` field.
///
/// `exact` targets the field's `.exact` keyword index, which only matches the
/// whole value; otherwise the API does a tokenized phrase match.
pub fn build_term(field: &str, value: &str, exact: bool) -> Result<SearchTerm, DrugLabelError> {
    let field = field.trim();
    if !is_valid_field(field) {
        return Err(DrugLabelError::InvalidArgument(format!(
            "search field '{field}' must be non-empty and contain only letters, digits, '_' or '.'"
        )));
    }
    let value = value.trim();
    if value.is_empty() {
        return Err(DrugLabelError::InvalidArgument(format!(
            "search value for '{field}' is required. Example: build_term(\"brand_name\", \"Advil\", true)"
        )));
    }

    let field = if field.starts_with(OPENFDA_FIELD_PREFIX) {
        field.to_string()
    } else {
        format!("{OPENFDA_FIELD_PREFIX}{field}")
    };
    let suffix = if exact { ".exact" } else { "" };
    let escaped = escape_phrase_value(value);

    Ok(SearchTerm(format!("{field}{suffix}:\"{escaped}\"")))
}
