//! Category memory display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct MemoryRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Category")]
    category: String,
}

/// Format memory entries as a table
pub fn format_memory_table(entries: &[(String, String)]) -> String {
    if entries.is_empty() {
        return "Category memory is empty.".to_string();
    }

    let rows = entries.iter().map(|(key, category)| MemoryRow {
        key: key.clone(),
        category: category.clone(),
    });
    Table::new(rows).with(Style::rounded()).to_string()
}
