//! Row and projection types for the directory

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Canonical field carrying the organisation's display name.
pub const NAME_FIELD: &str = "Organisation Name";

/// Alternate name field accepted for backward compatibility with one
/// data-source variant.
pub const ALT_NAME_FIELD: &str = "name";

/// One organisation's field-value record.
///
/// An open-ended mapping from field name to scalar value, sourced from one
/// CSV-parsed record or one remote document. Everything besides the display
/// name is pass-through metadata preserved verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrgRow(pub Map<String, Value>);

impl OrgRow {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Build a row from field/value pairs (test and fixture convenience).
    pub fn from_fields<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Set a field value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Get a field rendered as a display string.
    ///
    /// Strings pass through; numbers and booleans are formatted. Null and
    /// missing fields are absent.
    pub fn field_str(&self, key: &str) -> Option<String> {
        match self.0.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Bool(b)) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Extract the display name, preferring the canonical field and falling
    /// back to the alternate. Empty names count as missing.
    pub fn display_name(&self) -> Option<String> {
        self.field_str(NAME_FIELD)
            .or_else(|| self.field_str(ALT_NAME_FIELD))
            .filter(|name| !name.is_empty())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

/// Row projection returned to the host for display.
///
/// The name is always present; the optional fields are carried verbatim
/// from the source row when defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrgSummary {
    pub name: String,

    #[serde(rename = "Town/City", skip_serializing_if = "Option::is_none", default)]
    pub town_city: Option<String>,

    #[serde(rename = "County", skip_serializing_if = "Option::is_none", default)]
    pub county: Option<String>,

    #[serde(
        rename = "Type & Rating",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub type_rating: Option<String>,

    #[serde(rename = "Route", skip_serializing_if = "Option::is_none", default)]
    pub route: Option<String>,
}

impl OrgSummary {
    /// Project a row for display. Returns `None` when the row carries no
    /// usable display name.
    pub fn from_row(row: &OrgRow) -> Option<Self> {
        let name = row.display_name()?;
        Some(Self {
            name,
            town_city: row.field_str("Town/City"),
            county: row.field_str("County"),
            type_rating: row.field_str("Type & Rating"),
            route: row.field_str("Route"),
        })
    }
}
