//! Import result formatting

use std::path::Path;

use crate::services::ImportResult;

/// Summarize one imported file
pub fn format_import_result(path: &Path, result: &ImportResult) -> String {
    let mut output = String::new();

    let kind = result
        .transaction_type
        .map(|t| t.to_string())
        .unwrap_or_else(|| "Unknown".to_string());
    output.push_str(&format!("Imported {} ({})\n", path.display(), kind));
    output.push_str(&format!("  New transactions:   {}\n", result.imported));
    output.push_str(&format!("  Duplicates skipped: {}\n", result.duplicates_skipped));

    if !result.skipped.is_empty() {
        output.push_str(&format!("  Unreadable rows:    {}\n", result.skipped.len()));
        for row in result.skipped.iter().take(5) {
            output.push_str(&format!("    line {}: {}\n", row.line, row.reason));
        }
        if result.skipped.len() > 5 {
            output.push_str(&format!("    ... and {} more\n", result.skipped.len() - 5));
        }
    }

    if !result.months.is_empty() {
        let months: Vec<String> = result.months.iter().map(|m| m.to_string()).collect();
        output.push_str(&format!("  Months:             {}\n", months.join(", ")));
    }

    output
}
