//! Category taxonomy
//!
//! Categories are two levels deep: parent groups (e.g. "Living") holding
//! ordered subcategories (e.g. "Rent", "Groceries"). Transactions are always
//! assigned a subcategory name.
//!
//! On disk the taxonomy is a JSON object `{ parent: [sub, ...] }` whose key
//! order is the display order, so (de)serialization is done by hand to keep
//! that order stable.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::ExpenseError;

/// A parent category with its subcategories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup {
    pub name: String,
    pub subcategories: Vec<String>,
}

/// Validation failures when editing the taxonomy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryError {
    EmptyName,
    NoSubcategories,
    DuplicateParent(String),
    DuplicateSubcategory { parent: String, name: String },
    ParentNotFound(String),
    SubcategoryNotFound { parent: String, name: String },
}

impl fmt::Display for CategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NoSubcategories => write!(f, "At least one subcategory is required"),
            Self::DuplicateParent(name) => write!(f, "Parent category already exists: {}", name),
            Self::DuplicateSubcategory { parent, name } => {
                write!(f, "Subcategory '{}' already exists under '{}'", name, parent)
            }
            Self::ParentNotFound(name) => write!(f, "Parent category not found: {}", name),
            Self::SubcategoryNotFound { parent, name } => {
                write!(f, "Subcategory '{}' not found under '{}'", name, parent)
            }
        }
    }
}

impl std::error::Error for CategoryError {}

impl From<CategoryError> for ExpenseError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::EmptyName | CategoryError::NoSubcategories => {
                ExpenseError::Validation(err.to_string())
            }
            CategoryError::DuplicateParent(name) => ExpenseError::Duplicate {
                entity_type: "Parent category",
                identifier: name,
            },
            CategoryError::DuplicateSubcategory { parent, name } => ExpenseError::Duplicate {
                entity_type: "Subcategory",
                identifier: format!("{} / {}", parent, name),
            },
            CategoryError::ParentNotFound(name) => ExpenseError::parent_not_found(name),
            CategoryError::SubcategoryNotFound { parent, name } => {
                ExpenseError::category_not_found(format!("{} / {}", parent, name))
            }
        }
    }
}

/// Split comma-separated user input into trimmed, non-empty, unique names
pub fn parse_subcategory_list(input: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for part in input.split(',') {
        let part = part.trim();
        if !part.is_empty() && !names.iter().any(|n| n == part) {
            names.push(part.to_string());
        }
    }
    names
}

/// The full parent -> subcategory taxonomy, in display order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryStructure {
    groups: Vec<CategoryGroup>,
}

impl CategoryStructure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starter taxonomy covering every category the default rules assign
    pub fn starter() -> Self {
        let mut structure = Self::new();
        let defaults: [(&str, &[&str]); 5] = [
            ("Living", &["Rent", "Phone", "Groceries"]),
            ("Transportation", &["Public Transportation"]),
            ("Lifestyle", &["Dining Out", "Subscriptions"]),
            ("Fees", &["Other Fees"]),
            ("Miscellaneous", &["Other"]),
        ];
        for (parent, subs) in defaults {
            structure.groups.push(CategoryGroup {
                name: parent.to_string(),
                subcategories: subs.iter().map(|s| s.to_string()).collect(),
            });
        }
        structure
    }

    pub fn groups(&self) -> &[CategoryGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, parent: &str) -> Option<&CategoryGroup> {
        self.groups.iter().find(|g| g.name == parent)
    }

    fn get_mut(&mut self, parent: &str) -> Result<&mut CategoryGroup, CategoryError> {
        self.groups
            .iter_mut()
            .find(|g| g.name == parent)
            .ok_or_else(|| CategoryError::ParentNotFound(parent.to_string()))
    }

    /// Every subcategory, parents in order
    pub fn flat(&self) -> Vec<&str> {
        self.groups
            .iter()
            .flat_map(|g| g.subcategories.iter().map(String::as_str))
            .collect()
    }

    /// Whether any parent holds a subcategory with this name
    pub fn contains_category(&self, name: &str) -> bool {
        self.groups
            .iter()
            .any(|g| g.subcategories.iter().any(|s| s == name))
    }

    /// Parent of a subcategory (first one, if the name is reused)
    pub fn parent_of(&self, name: &str) -> Option<&str> {
        self.groups
            .iter()
            .find(|g| g.subcategories.iter().any(|s| s == name))
            .map(|g| g.name.as_str())
    }

    /// Add a new parent with at least one subcategory
    pub fn add_parent(&mut self, name: &str, subcategories: Vec<String>) -> Result<(), CategoryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CategoryError::EmptyName);
        }
        let subcategories = clean_names(subcategories);
        if subcategories.is_empty() {
            return Err(CategoryError::NoSubcategories);
        }
        if self.get(name).is_some() {
            return Err(CategoryError::DuplicateParent(name.to_string()));
        }

        self.groups.push(CategoryGroup {
            name: name.to_string(),
            subcategories,
        });
        Ok(())
    }

    /// Append a subcategory to an existing parent
    pub fn add_subcategory(&mut self, parent: &str, name: &str) -> Result<(), CategoryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CategoryError::EmptyName);
        }
        let group = self.get_mut(parent)?;
        if group.subcategories.iter().any(|s| s == name) {
            return Err(CategoryError::DuplicateSubcategory {
                parent: parent.to_string(),
                name: name.to_string(),
            });
        }
        group.subcategories.push(name.to_string());
        Ok(())
    }

    /// Replace a parent's subcategories wholesale
    pub fn set_subcategories(
        &mut self,
        parent: &str,
        subcategories: Vec<String>,
    ) -> Result<(), CategoryError> {
        let subcategories = clean_names(subcategories);
        if subcategories.is_empty() {
            return Err(CategoryError::NoSubcategories);
        }
        self.get_mut(parent)?.subcategories = subcategories;
        Ok(())
    }

    pub fn rename_parent(&mut self, parent: &str, new_name: &str) -> Result<(), CategoryError> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(CategoryError::EmptyName);
        }
        if new_name != parent && self.get(new_name).is_some() {
            return Err(CategoryError::DuplicateParent(new_name.to_string()));
        }
        self.get_mut(parent)?.name = new_name.to_string();
        Ok(())
    }

    /// Remove a parent and all of its subcategories
    pub fn remove_parent(&mut self, parent: &str) -> Result<CategoryGroup, CategoryError> {
        let idx = self
            .groups
            .iter()
            .position(|g| g.name == parent)
            .ok_or_else(|| CategoryError::ParentNotFound(parent.to_string()))?;
        Ok(self.groups.remove(idx))
    }

    pub fn remove_subcategory(&mut self, parent: &str, name: &str) -> Result<(), CategoryError> {
        let group = self.get_mut(parent)?;
        let idx = group
            .subcategories
            .iter()
            .position(|s| s == name)
            .ok_or_else(|| CategoryError::SubcategoryNotFound {
                parent: parent.to_string(),
                name: name.to_string(),
            })?;
        group.subcategories.remove(idx);
        Ok(())
    }
}

fn clean_names(names: Vec<String>) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let name = name.trim();
        if !name.is_empty() && !cleaned.iter().any(|n| n == name) {
            cleaned.push(name.to_string());
        }
    }
    cleaned
}

impl Serialize for CategoryStructure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(&group.name, &group.subcategories)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CategoryStructure {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StructureVisitor;

        impl<'de> Visitor<'de> for StructureVisitor {
            type Value = CategoryStructure;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of parent category to a list of subcategories")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut groups: Vec<CategoryGroup> = Vec::new();
                while let Some((name, subcategories)) = access.next_entry::<String, Vec<String>>()? {
                    // A repeated key replaces the earlier entry, like a JSON object would
                    if let Some(existing) = groups.iter_mut().find(|g| g.name == name) {
                        existing.subcategories = subcategories;
                    } else {
                        groups.push(CategoryGroup {
                            name,
                            subcategories,
                        });
                    }
                }
                Ok(CategoryStructure { groups })
            }
        }

        deserializer.deserialize_map(StructureVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CategoryStructure {
        let mut s = CategoryStructure::new();
        s.add_parent("Living", vec!["Rent".into(), "Groceries".into()]).unwrap();
        s.add_parent("Fun", vec!["Dining Out".into()]).unwrap();
        s
    }

    #[test]
    fn test_flat_keeps_order() {
        assert_eq!(sample().flat(), vec!["Rent", "Groceries", "Dining Out"]);
    }

    #[test]
    fn test_add_parent_validation() {
        let mut s = sample();
        assert_eq!(s.add_parent("  ", vec!["x".into()]), Err(CategoryError::EmptyName));
        assert_eq!(
            s.add_parent("Travel", vec![" ".into()]),
            Err(CategoryError::NoSubcategories)
        );
        assert_eq!(
            s.add_parent("Living", vec!["x".into()]),
            Err(CategoryError::DuplicateParent("Living".into()))
        );
    }

    #[test]
    fn test_add_subcategory() {
        let mut s = sample();
        s.add_subcategory("Fun", "Movies").unwrap();
        assert!(s.contains_category("Movies"));
        assert_eq!(s.parent_of("Movies"), Some("Fun"));

        assert!(matches!(
            s.add_subcategory("Fun", "Movies"),
            Err(CategoryError::DuplicateSubcategory { .. })
        ));
        assert_eq!(
            s.add_subcategory("Nope", "x"),
            Err(CategoryError::ParentNotFound("Nope".into()))
        );
    }

    #[test]
    fn test_set_and_remove() {
        let mut s = sample();
        s.set_subcategories("Living", vec!["Rent".into(), " Utilities ".into(), "Rent".into()])
            .unwrap();
        assert_eq!(s.get("Living").unwrap().subcategories, vec!["Rent", "Utilities"]);

        s.remove_subcategory("Living", "Rent").unwrap();
        assert!(!s.contains_category("Rent"));

        let removed = s.remove_parent("Fun").unwrap();
        assert_eq!(removed.subcategories, vec!["Dining Out"]);
        assert_eq!(s.groups().len(), 1);
    }

    #[test]
    fn test_rename_parent() {
        let mut s = sample();
        s.rename_parent("Fun", "Lifestyle").unwrap();
        assert!(s.get("Lifestyle").is_some());
        assert_eq!(
            s.rename_parent("Lifestyle", "Living"),
            Err(CategoryError::DuplicateParent("Living".into()))
        );
    }

    #[test]
    fn test_parse_subcategory_list() {
        assert_eq!(
            parse_subcategory_list("Gas, Hydro,, Water ,Gas"),
            vec!["Gas", "Hydro", "Water"]
        );
        assert!(parse_subcategory_list(" , ").is_empty());
    }

    #[test]
    fn test_json_preserves_order() {
        let json = r#"{"Zeta":["z"],"Alpha":["a","b"]}"#;
        let s: CategoryStructure = serde_json::from_str(json).unwrap();
        assert_eq!(s.groups()[0].name, "Zeta");
        assert_eq!(serde_json::to_string(&s).unwrap(), json);
    }

    #[test]
    fn test_starter_covers_rule_categories() {
        let s = CategoryStructure::starter();
        for cat in ["Groceries", "Public Transportation", "Dining Out", "Rent", "Subscriptions", "Phone", "Other Fees", "Other"] {
            assert!(s.contains_category(cat), "missing {}", cat);
        }
    }

    #[test]
    fn test_error_conversion() {
        let err: ExpenseError = CategoryError::DuplicateParent("Living".into()).into();
        assert!(err.is_duplicate());
        let err: ExpenseError = CategoryError::NoSubcategories.into();
        assert!(err.is_validation());
    }
}
