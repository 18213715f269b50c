//! Plain-text rendering of transcript records for `machine history`.

use crate::models::CommandRecord;

const GUTTER: &str = "    │ ";

/// Render records as a readable log.
///
/// Example output:
/// ```text
/// #3 2025-02-05 15:00:02 [1f0c9a2e] REWARD
///     │ Displayed reward ASCII art 'checkpoint'
/// ```
pub fn render_records(records: &[CommandRecord]) -> String {
    let mut output = String::new();
    for record in records {
        render_record(&mut output, record);
    }
    output
}

fn render_record(output: &mut String, record: &CommandRecord) {
    let session = record
        .session_id
        .map(|id| id.simple().to_string()[..8].to_string())
        .unwrap_or_else(|| "--------".to_string());

    output.push_str(&format!(
        "#{} {} [{}] {}\n",
        record.id,
        record.timestamp.format("%Y-%m-%d %H:%M:%S"),
        session,
        record.command
    ));

    // Narratives start and end with blank lines on screen; drop those here.
    for line in record.response.trim_matches('\n').lines() {
        output.push_str(GUTTER);
        output.push_str(line);
        output.push('\n');
    }
}
