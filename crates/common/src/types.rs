use serde::{Deserialize, Serialize};

/// Fallback shown when a field is missing or malformed in the source record.
pub const NO_DATA: &str = "Tidak ada data";

/// Fallback shown when a record has no project name.
pub const NO_PROJECT: &str = "-";

/// Display fields of one approval event, flattened from a database row.
///
/// Every field is already a printable string: absent data is represented by
/// [`NO_DATA`] (or [`NO_PROJECT`] for the project name), never by an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalRecord {
    /// Source row identifier, used as the dedup key
    pub id: Option<String>,
    pub activities_name: String,
    pub user_name: String,
    /// Approve / decline decision (single-select)
    pub approve_decline: String,
    /// Approval timestamp rendered as `DD/MM/YYYY HH:MM`, or the raw value if unparseable
    pub approval_date: String,
    pub activity_id: String,
    pub project_name: String,
    pub work_package_name: String,
    pub act_duration: String,
    /// Marks a row as ready for delivery
    pub delivery_flag: String,
    /// Telegram chat id of the recipient
    pub recipient_id: String,
}

impl ApprovalRecord {
    /// Both the delivery flag and the recipient are present.
    pub fn is_complete(&self) -> bool {
        self.delivery_flag != NO_DATA && self.recipient_id != NO_DATA
    }
}

impl Default for ApprovalRecord {
    fn default() -> Self {
        Self {
            id: None,
            activities_name: NO_DATA.to_string(),
            user_name: NO_DATA.to_string(),
            approve_decline: NO_DATA.to_string(),
            approval_date: NO_DATA.to_string(),
            activity_id: NO_DATA.to_string(),
            project_name: NO_PROJECT.to_string(),
            work_package_name: NO_DATA.to_string(),
            act_duration: NO_DATA.to_string(),
            delivery_flag: NO_DATA.to_string(),
            recipient_id: NO_DATA.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_is_incomplete() {
        let record = ApprovalRecord::default();
        assert!(!record.is_complete());
        assert_eq!(record.project_name, "-");
    }

    #[test]
    fn test_completeness_requires_flag_and_recipient() {
        let mut record = ApprovalRecord {
            delivery_flag: "FB1".to_string(),
            ..Default::default()
        };
        assert!(!record.is_complete());

        record.recipient_id = "12345".to_string();
        assert!(record.is_complete());

        record.delivery_flag = NO_DATA.to_string();
        assert!(!record.is_complete());
    }
}
