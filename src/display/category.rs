//! Category display formatting
//!
//! Formats the taxonomy as a tree and the flat category list.

use crate::models::CategoryGroup;

/// Format categories as a tree grouped by parent
pub fn format_category_tree(groups: &[CategoryGroup]) -> String {
    if groups.is_empty() {
        return "No categories found.\n\nRun 'expense init' to create the starter categories."
            .to_string();
    }

    let mut output = String::new();

    for (i, group) in groups.iter().enumerate() {
        output.push_str(&format!("{}\n", group.name));

        for (j, sub) in group.subcategories.iter().enumerate() {
            let is_last = j == group.subcategories.len() - 1;
            let prefix = if is_last { "└── " } else { "├── " };
            output.push_str(&format!("  {}{}\n", prefix, sub));
        }

        // Add blank line between groups (except after last)
        if i < groups.len() - 1 {
            output.push('\n');
        }
    }

    output
}

/// One category per line, in parent order
pub fn format_flat_categories(categories: &[String]) -> String {
    if categories.is_empty() {
        return "No categories found.".to_string();
    }
    let mut output = categories.join("\n");
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree() {
        let groups = vec![
            CategoryGroup {
                name: "Living".into(),
                subcategories: vec!["Rent".into(), "Groceries".into()],
            },
            CategoryGroup {
                name: "Fees".into(),
                subcategories: vec!["Other Fees".into()],
            },
        ];
        let tree = format_category_tree(&groups);
        assert_eq!(
            tree,
            "Living\n  ├── Rent\n  └── Groceries\n\nFees\n  └── Other Fees\n"
        );
    }

    #[test]
    fn test_empty_tree() {
        assert!(format_category_tree(&[]).contains("expense init"));
    }
}
