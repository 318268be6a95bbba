//! Field extractors.
//!
//! All functions here are total: missing or oddly-shaped data resolves to a
//! sentinel string, never to an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use relay_common::types::NO_DATA;

use crate::property::{FormulaValue, Property, RichText};

const DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M";

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M%:z"];
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Join the plain text of every segment with single spaces.
///
/// Returns `default` when the list is absent or empty.
pub fn extract_text(segments: Option<&[RichText]>, default: &str) -> String {
    match segments {
        Some(segments) if !segments.is_empty() => segments
            .iter()
            .filter_map(|segment| segment.plain_text.as_deref())
            .collect::<Vec<_>>()
            .join(" "),
        _ => default.to_string(),
    }
}

/// ISO start string of a `date` property.
pub fn extract_date(property: Option<&Property>) -> String {
    match property {
        Some(Property::Date { date: Some(date) }) => {
            date.start.clone().unwrap_or_else(|| NO_DATA.to_string())
        }
        _ => NO_DATA.to_string(),
    }
}

/// Option name of a `select` property.
pub fn extract_select(property: Option<&Property>) -> String {
    match property {
        Some(Property::Select {
            select: Some(option),
        }) => option.name.clone().unwrap_or_else(|| NO_DATA.to_string()),
        _ => NO_DATA.to_string(),
    }
}

/// Result of a `formula` property, stringified according to its result type.
pub fn extract_formula(property: Option<&Property>) -> String {
    let Some(Property::Formula {
        formula: Some(formula),
    }) = property
    else {
        return NO_DATA.to_string();
    };

    let value = match formula {
        FormulaValue::String { string } => string.clone(),
        FormulaValue::Number { number } => number.as_ref().map(|n| n.to_string()),
        FormulaValue::Boolean { boolean } => boolean.map(|b| b.to_string()),
        FormulaValue::Date { date } => date.as_ref().and_then(|d| d.start.clone()),
        FormulaValue::Unknown => None,
    };

    value.unwrap_or_else(|| NO_DATA.to_string())
}

/// Render an ISO-8601 timestamp as `DD/MM/YYYY HH:MM`.
///
/// The wall-clock time is kept in the timestamp's own offset. A trailing `Z`
/// is read as UTC and a bare date is rendered at midnight. Anything that does
/// not parse is returned unchanged.
pub fn format_approval_date(raw: &str) -> String {
    match parse_iso8601(raw) {
        Some(parsed) => parsed.format(DISPLAY_FORMAT).to_string(),
        None => {
            tracing::error!(raw, "Error formatting approval date");
            raw.to_string()
        }
    }
}

fn parse_iso8601(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    let normalized = match trimmed.strip_suffix('Z') {
        Some(stripped) => format!("{stripped}+00:00"),
        None => trimmed.to_string(),
    };

    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(&normalized, format) {
            return Some(parsed.naive_local());
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(&normalized, format) {
            return Some(parsed);
        }
    }

    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}
