//! Navigation Model
//!
//! A fixed three-level tree: groups hold items, items hold sub-items. Only
//! sub-items carry a url. Any level may name a required permission; a
//! missing one means "no requirement".
//!
//! Trees are plain data and can be written in TOML:
//!
//! ```toml
//! [[groups]]
//! label = "Workforce"
//!
//! [[groups.items]]
//! title = "Employees"
//! icon = "users"
//!
//! [[groups.items.sub_items]]
//! title = "All Employees"
//! url = "/employees"
//! required_permission = "employees.view"
//! ```

use atrium_core::{AtriumError, AtriumResult, PermissionQuery, PermissionToken};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

/// Leaf entry pointing at a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavSubItem {
    /// Label shown in the menu
    pub title: String,
    /// Route this entry navigates to
    pub url: String,
    /// Optional icon name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Token required to see this entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_permission: Option<PermissionToken>,
}

impl NavSubItem {
    /// Create an ungated sub-item.
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            icon: None,
            required_permission: None,
        }
    }

    /// Set the icon.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Gate this sub-item behind `token`.
    pub fn requires(mut self, token: PermissionToken) -> Self {
        self.required_permission = Some(token);
        self
    }

    /// Visible when ungated, or when the query grants the token.
    pub fn is_visible<Q: PermissionQuery + ?Sized>(&self, query: &Q) -> bool {
        self.required_permission
            .as_ref()
            .map_or(true, |token| query.has_permission(token))
    }
}

/// Expandable menu entry.
///
/// `required_permission` is carried for consumers that want to display it,
/// but it does not take part in filtering: an item is visible exactly when
/// one of its sub-items is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    /// Label shown in the menu; also the expansion key
    pub title: String,
    /// Optional icon name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Item-level token (not used for filtering)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_permission: Option<PermissionToken>,
    /// Children, in display order
    #[serde(default)]
    pub sub_items: Vec<NavSubItem>,
}

impl NavItem {
    /// Create an item with the given children.
    pub fn new(title: impl Into<String>, sub_items: impl IntoIterator<Item = NavSubItem>) -> Self {
        Self {
            title: title.into(),
            icon: None,
            required_permission: None,
            sub_items: sub_items.into_iter().collect(),
        }
    }

    /// Set the icon.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Annotate the item with a token.
    pub fn requires(mut self, token: PermissionToken) -> Self {
        self.required_permission = Some(token);
        self
    }

    /// True if some sub-item's url equals `route`.
    pub fn links_to(&self, route: &str) -> bool {
        self.sub_items.iter().any(|sub| sub.url == route)
    }
}

/// Labelled section of the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavGroup {
    /// Section header
    pub label: String,
    /// Entries, in display order
    #[serde(default)]
    pub items: Vec<NavItem>,
}

impl NavGroup {
    /// Create a group.
    pub fn new(label: impl Into<String>, items: impl IntoIterator<Item = NavItem>) -> Self {
        Self {
            label: label.into(),
            items: items.into_iter().collect(),
        }
    }
}

/// Where a route sits in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// Group label
    pub group: String,
    /// Item title
    pub item: String,
    /// Sub-item title
    pub sub_item: String,
}

impl fmt::Display for Breadcrumb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {} / {}", self.group, self.item, self.sub_item)
    }
}

/// The complete static navigation structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationTree {
    /// Sections, in display order
    #[serde(default)]
    pub groups: Vec<NavGroup>,
}

impl NavigationTree {
    /// Create a tree.
    pub fn new(groups: impl IntoIterator<Item = NavGroup>) -> Self {
        Self {
            groups: groups.into_iter().collect(),
        }
    }

    /// Parse a tree from TOML text. Does not validate.
    pub fn from_toml(content: &str) -> AtriumResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read, parse and validate a tree file.
    pub fn load(path: &Path) -> AtriumResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AtriumError::io(format!("failed to read {}: {e}", path.display()))
        })?;
        let tree = Self::from_toml(&content).map_err(|e| {
            AtriumError::config(format!("failed to parse {}: {e}", path.display()))
        })?;
        tree.validate()?;
        tracing::debug!(
            path = %path.display(),
            groups = tree.groups.len(),
            "loaded navigation tree"
        );
        Ok(tree)
    }

    /// True if the tree has no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Every item with its group, in display order.
    pub fn items(&self) -> impl Iterator<Item = (&NavGroup, &NavItem)> {
        self.groups
            .iter()
            .flat_map(|group| group.items.iter().map(move |item| (group, item)))
    }

    /// Find the first sub-item whose url equals `route`.
    pub fn locate(&self, route: &str) -> Option<Breadcrumb> {
        self.items().find_map(|(group, item)| {
            item.sub_items
                .iter()
                .find(|sub| sub.url == route)
                .map(|sub| Breadcrumb {
                    group: group.label.clone(),
                    item: item.title.clone(),
                    sub_item: sub.title.clone(),
                })
        })
    }

    /// Check the configuration-time invariants.
    ///
    /// Item titles must be unique across the whole tree because expansion
    /// state is keyed by title.
    pub fn validate(&self) -> AtriumResult<()> {
        let mut titles = BTreeSet::new();
        for group in &self.groups {
            if group.label.trim().is_empty() {
                return Err(AtriumError::invalid("group label must not be empty"));
            }
            for item in &group.items {
                if item.title.trim().is_empty() {
                    return Err(AtriumError::invalid(format!(
                        "item title must not be empty (group '{}')",
                        group.label
                    )));
                }
                if !titles.insert(item.title.as_str()) {
                    return Err(AtriumError::invalid(format!(
                        "duplicate item title '{}'",
                        item.title
                    )));
                }
                for sub in &item.sub_items {
                    if sub.title.trim().is_empty() {
                        return Err(AtriumError::invalid(format!(
                            "sub-item title must not be empty (item '{}')",
                            item.title
                        )));
                    }
                    if !sub.url.starts_with('/') {
                        return Err(AtriumError::invalid(format!(
                            "url '{}' of '{}' must start with '/'",
                            sub.url, sub.title
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_core::permissions::{EMPLOYEES_VIEW, PAYROLL_VIEW};
    use atrium_core::Role;

    fn tree() -> NavigationTree {
        NavigationTree::new([NavGroup::new(
            "Workforce",
            [
                NavItem::new(
                    "Employees",
                    [
                        NavSubItem::new("All Employees", "/employees").requires(EMPLOYEES_VIEW),
                        NavSubItem::new("Directory", "/directory"),
                    ],
                ),
                NavItem::new(
                    "Payroll",
                    [NavSubItem::new("Payslips", "/payroll").requires(PAYROLL_VIEW)],
                ),
            ],
        )])
    }

    #[test]
    fn test_sub_item_visibility() {
        let role = Role::new("viewer", "Viewer", "", [EMPLOYEES_VIEW]);
        let tree = tree();
        let employees = &tree.groups[0].items[0];
        assert!(employees.sub_items[0].is_visible(&role));
        assert!(employees.sub_items[1].is_visible(&role));

        let none: Option<Role> = None;
        assert!(!employees.sub_items[0].is_visible(&none));
        assert!(employees.sub_items[1].is_visible(&none));
    }

    #[test]
    fn test_locate() {
        let crumb = tree().locate("/payroll").unwrap();
        assert_eq!(crumb.to_string(), "Workforce / Payroll / Payslips");
        assert!(tree().locate("/nowhere").is_none());
    }

    #[test]
    fn test_validate_rejects_defects() {
        tree().validate().unwrap();

        let mut dup = tree();
        dup.groups[0].items[1].title = "Employees".into();
        assert_eq!(dup.validate().unwrap_err().category(), "invalid");

        let mut bad_url = tree();
        bad_url.groups[0].items[0].sub_items[0].url = "employees".into();
        assert!(bad_url.validate().is_err());

        let mut blank = tree();
        blank.groups[0].label = " ".into();
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let text = r#"
[[groups]]
label = "Workforce"

[[groups.items]]
title = "Employees"
icon = "users"
required_permission = "employees.view"

[[groups.items.sub_items]]
title = "All Employees"
url = "/employees"
required_permission = "employees.view"

[[groups.items.sub_items]]
title = "Directory"
url = "/directory"
"#;
        let tree = NavigationTree::from_toml(text).unwrap();
        let item = &tree.groups[0].items[0];
        assert_eq!(item.icon.as_deref(), Some("users"));
        assert_eq!(item.required_permission, Some(EMPLOYEES_VIEW));
        assert_eq!(item.sub_items[1].required_permission, None);

        let reparsed = NavigationTree::from_toml(&toml::to_string(&tree).unwrap()).unwrap();
        assert_eq!(reparsed, tree);
    }

    #[test]
    fn test_malformed_token_is_a_parse_error() {
        let text = r#"
[[groups]]
label = "G"
[[groups.items]]
title = "I"
[[groups.items.sub_items]]
title = "S"
url = "/s"
required_permission = "NotAToken"
"#;
        assert!(NavigationTree::from_toml(text).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nav.toml");
        std::fs::write(&path, toml::to_string(&tree()).unwrap()).unwrap();
        assert_eq!(NavigationTree::load(&path).unwrap(), tree());
        assert_eq!(
            NavigationTree::load(&dir.path().join("missing.toml"))
                .unwrap_err()
                .category(),
            "io"
        );
    }
}
