//! Typed view of Notion property payloads.
//!
//! Each property is keyed on Notion's `type` discriminator. Only the types the
//! relay reads are modelled; everything else, and any payload that does not
//! match its declared shape, collapses into [`Property::Unsupported`].

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::extract;

/// One segment of a `title` or `rich_text` array.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RichText {
    pub plain_text: Option<String>,
}

impl RichText {
    pub fn plain(text: &str) -> Self {
        Self {
            plain_text: Some(text.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SelectOption {
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DateValue {
    pub start: Option<String>,
    pub end: Option<String>,
    pub time_zone: Option<String>,
}

/// Computed value of a `formula` property, tagged by its result type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormulaValue {
    String { string: Option<String> },
    Number { number: Option<serde_json::Number> },
    Boolean { boolean: Option<bool> },
    Date { date: Option<DateValue> },
    #[serde(other)]
    Unknown,
}

/// A database property value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Property {
    Title {
        #[serde(default)]
        title: Vec<RichText>,
    },
    RichText {
        #[serde(default)]
        rich_text: Vec<RichText>,
    },
    Select {
        select: Option<SelectOption>,
    },
    Date {
        date: Option<DateValue>,
    },
    Formula {
        formula: Option<FormulaValue>,
    },
    #[serde(other)]
    Unsupported,
}

impl Property {
    /// Decode a raw property payload. Never fails: malformed payloads become
    /// `Unsupported`.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or(Property::Unsupported)
    }

    /// Segments of a `title` property.
    pub fn title(&self) -> Option<&[RichText]> {
        match self {
            Property::Title { title } => Some(title),
            _ => None,
        }
    }

    /// Segments of a `rich_text` property.
    pub fn rich_text(&self) -> Option<&[RichText]> {
        match self {
            Property::RichText { rich_text } => Some(rich_text),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct RawPage {
    id: Option<String>,
    #[serde(default)]
    properties: HashMap<String, Value>,
}

/// One database row.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RawPage")]
pub struct Page {
    pub id: Option<String>,
    pub properties: HashMap<String, Property>,
}

impl From<RawPage> for Page {
    fn from(raw: RawPage) -> Self {
        Self {
            id: raw.id,
            properties: raw
                .properties
                .into_iter()
                .map(|(name, value)| (name, Property::from_value(value)))
                .collect(),
        }
    }
}

impl Page {
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    /// Text segments of a `rich_text` column, if the column has that type.
    pub fn rich_text(&self, name: &str) -> Option<&[RichText]> {
        self.property(name).and_then(Property::rich_text)
    }

    /// Text segments of a `title` column, if the column has that type.
    pub fn title(&self, name: &str) -> Option<&[RichText]> {
        self.property(name).and_then(Property::title)
    }

    /// Stringified result of a `formula` column.
    pub fn formula_text(&self, name: &str) -> String {
        extract::extract_formula(self.property(name))
    }
}

/// Body of a `databases/{id}/query` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub results: Vec<Page>,
    #[serde(default)]
    pub has_more: bool,
    pub next_cursor: Option<String>,
}
