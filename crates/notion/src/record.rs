//! Mapping from database rows to [`ApprovalRecord`]s.

use relay_common::types::{ApprovalRecord, NO_DATA, NO_PROJECT};

use crate::extract::{extract_date, extract_select, extract_text, format_approval_date};
use crate::property::Page;

/// Column names in the approval database.
pub mod columns {
    pub const ACTIVITIES_NAME: &str = "Activities Name";
    pub const USER_NAME: &str = "User Name";
    pub const APPROVE_DECLINE: &str = "Approve / Decline";
    pub const APPROVAL_DATE: &str = "Approval Date";
    pub const ACTIVITY_ID: &str = "ID Activities";
    pub const PROJECT_NAME: &str = "Project Name";
    pub const WORK_PACKAGE_NAME: &str = "Work Package Name";
    pub const ACT_DURATION: &str = "Act. Duration";
    pub const DELIVERY_FLAG: &str = "ID Kirim FB";
    pub const RECIPIENT_ID: &str = "ID Telegram (As)";
}

impl From<&Page> for ApprovalRecord {
    fn from(page: &Page) -> Self {
        let approval_date = match extract_date(page.property(columns::APPROVAL_DATE)) {
            raw if raw == NO_DATA => raw,
            raw => format_approval_date(&raw),
        };

        Self {
            id: page.id.clone(),
            activities_name: extract_text(page.title(columns::ACTIVITIES_NAME), NO_DATA),
            user_name: extract_text(page.rich_text(columns::USER_NAME), NO_DATA),
            approve_decline: extract_select(page.property(columns::APPROVE_DECLINE)),
            approval_date,
            activity_id: extract_text(page.rich_text(columns::ACTIVITY_ID), NO_DATA),
            project_name: extract_text(page.rich_text(columns::PROJECT_NAME), NO_PROJECT),
            work_package_name: extract_text(page.rich_text(columns::WORK_PACKAGE_NAME), NO_DATA),
            act_duration: extract_text(page.rich_text(columns::ACT_DURATION), NO_DATA),
            delivery_flag: extract_text(page.rich_text(columns::DELIVERY_FLAG), NO_DATA),
            recipient_id: extract_text(page.rich_text(columns::RECIPIENT_ID), NO_DATA),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn rich_text(text: &str) -> serde_json::Value {
        json!({"type": "rich_text", "rich_text": [{"type": "text", "plain_text": text}]})
    }

    fn page(value: serde_json::Value) -> Page {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_full_row_maps_every_column() {
        let page = page(json!({
            "id": "r1",
            "properties": {
                "Activities Name": {"type": "title", "title": [{"plain_text": "Pengecoran"}, {"plain_text": "Lantai 2"}]},
                "User Name": rich_text("Siti"),
                "Approve / Decline": {"type": "select", "select": {"name": "Approve"}},
                "Approval Date": {"type": "date", "date": {"start": "2024-01-15T10:30:00Z"}},
                "ID Activities": rich_text("ACT-007"),
                "Project Name": rich_text("Gedung Serbaguna"),
                "Work Package Name": rich_text("Struktur"),
                "Act. Duration": rich_text("3 hari"),
                "ID Kirim FB": rich_text("FB1"),
                "ID Telegram (As)": rich_text("12345"),
                "Progress": {"type": "formula", "formula": {"type": "number", "number": 75}}
            }
        }));

        let record = ApprovalRecord::from(&page);
        assert_eq!(record.id.as_deref(), Some("r1"));
        assert_eq!(record.activities_name, "Pengecoran Lantai 2");
        assert_eq!(record.user_name, "Siti");
        assert_eq!(record.approve_decline, "Approve");
        assert_eq!(record.approval_date, "15/01/2024 10:30");
        assert_eq!(record.activity_id, "ACT-007");
        assert_eq!(record.project_name, "Gedung Serbaguna");
        assert_eq!(record.work_package_name, "Struktur");
        assert_eq!(record.act_duration, "3 hari");
        assert_eq!(record.delivery_flag, "FB1");
        assert_eq!(record.recipient_id, "12345");
        assert!(record.is_complete());

        assert_eq!(page.formula_text("Progress"), "75");
        assert_eq!(page.formula_text("Missing"), NO_DATA);
    }

    #[test]
    fn test_empty_row_falls_back_to_sentinels() {
        let record = ApprovalRecord::from(&page(json!({"id": "r2", "properties": {}})));
        assert_eq!(
            record,
            ApprovalRecord {
                id: Some("r2".to_string()),
                ..Default::default()
            }
        );
        assert!(!record.is_complete());
    }

    #[test]
    fn test_wrong_property_type_counts_as_missing() {
        let record = ApprovalRecord::from(&page(json!({
            "id": "r3",
            "properties": {
                // title column stored as rich_text and vice versa
                "Activities Name": rich_text("Not a title"),
                "ID Telegram (As)": {"type": "title", "title": [{"plain_text": "12345"}]},
                "ID Kirim FB": rich_text("FB1")
            }
        })));
        assert_eq!(record.activities_name, NO_DATA);
        assert_eq!(record.recipient_id, NO_DATA);
        assert_eq!(record.delivery_flag, "FB1");
        assert!(!record.is_complete());
    }

    #[test]
    fn test_unparseable_approval_date_is_kept_raw() {
        let record = ApprovalRecord::from(&page(json!({
            "id": "r4",
            "properties": {
                "Approval Date": {"type": "date", "date": {"start": "kemarin"}}
            }
        })));
        assert_eq!(record.approval_date, "kemarin");
    }
}
