use relay_common::types::ApprovalRecord;

/// Render the Markdown approval notice for one record.
///
/// Field values are inserted verbatim, without Markdown escaping.
pub fn format_approval_message(record: &ApprovalRecord) -> String {
    format!(
        "*STATUS APPROVAL DELIVERABLE*\n\n\
         📅 *Tanggal Approve:* {}\n\
         🏗 *Nama Project:* {}\n\
         📦 *Work Package:* {}\n\
         📄 *Nama Activity:* {}\n\
         🆔 *ID Activity:* {}\n\
         ✅ *Status:* {}\n\
         👤 *Di approve oleh:* {}\n\
         ⏳ *Durasi Pekerjaan:* {}",
        record.approval_date,
        record.project_name,
        record.work_package_name,
        record.activities_name,
        record.activity_id,
        record.approve_decline,
        record.user_name,
        record.act_duration,
    )
}
