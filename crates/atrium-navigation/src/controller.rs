//! Navigation controller
//!
//! Owns the static tree, the current route and the expansion state. Every
//! input change runs exactly one filter + reconciliation pass and returns the
//! resulting [`NavigationView`]. Permissions are not stored: pass the query
//! to each call so a session change is picked up by the next
//! [`refresh`](NavigationController::refresh).

use crate::expansion::ExpansionState;
use crate::filter::filter_navigation;
use crate::model::{Breadcrumb, NavItem, NavigationTree};
use atrium_core::PermissionQuery;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rendered sub-item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubItemView {
    /// Menu label
    pub title: String,
    /// Target route
    pub url: String,
    /// Optional icon name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Url equals the current route
    pub active: bool,
}

/// Rendered item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemView {
    /// Menu label
    pub title: String,
    /// Optional icon name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Branch renders expanded
    pub open: bool,
    /// One of the sub-items is the current route
    pub active: bool,
    /// Visible sub-items
    pub sub_items: Vec<SubItemView>,
}

/// Rendered group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupView {
    /// Section header
    pub label: String,
    /// Visible items
    pub items: Vec<ItemView>,
}

/// Filtered tree annotated with open/active flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationView {
    /// Visible groups
    pub groups: Vec<GroupView>,
}

impl NavigationView {
    fn build(visible: &NavigationTree, expansion: &ExpansionState, route: &str) -> Self {
        let groups = visible
            .groups
            .iter()
            .map(|group| GroupView {
                label: group.label.clone(),
                items: group
                    .items
                    .iter()
                    .map(|item| ItemView::build(item, expansion, route))
                    .collect(),
            })
            .collect();
        Self { groups }
    }

    /// Look up an item by title.
    pub fn item(&self, title: &str) -> Option<&ItemView> {
        self.groups
            .iter()
            .flat_map(|group| group.items.iter())
            .find(|item| item.title == title)
    }

    /// True when nothing is visible.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl ItemView {
    fn build(item: &NavItem, expansion: &ExpansionState, route: &str) -> Self {
        Self {
            title: item.title.clone(),
            icon: item.icon.clone(),
            open: expansion.is_expanded(item, route),
            active: ExpansionState::is_active(item, route),
            sub_items: item
                .sub_items
                .iter()
                .map(|sub| SubItemView {
                    title: sub.title.clone(),
                    url: sub.url.clone(),
                    icon: sub.icon.clone(),
                    active: sub.url == route,
                })
                .collect(),
        }
    }
}

impl fmt::Display for NavigationView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for group in &self.groups {
            writeln!(f, "{}", group.label)?;
            for item in &group.items {
                let marker = if item.open { 'v' } else { '>' };
                writeln!(f, "  {marker} {}", item.title)?;
                if !item.open {
                    continue;
                }
                for sub in &item.sub_items {
                    let pointer = if sub.active { '*' } else { '-' };
                    writeln!(f, "      {pointer} {} ({})", sub.title, sub.url)?;
                }
            }
        }
        Ok(())
    }
}

/// Route, expansion and tree behind one reconciliation entry point.
#[derive(Debug, Clone)]
pub struct NavigationController {
    tree: NavigationTree,
    route: String,
    expansion: ExpansionState,
}

impl NavigationController {
    /// Controller at route `/` with every branch collapsed.
    pub fn new(tree: NavigationTree) -> Self {
        Self {
            tree,
            route: "/".to_string(),
            expansion: ExpansionState::new(),
        }
    }

    /// The static tree.
    pub fn tree(&self) -> &NavigationTree {
        &self.tree
    }

    /// Current route.
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Current expansion state.
    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    /// Navigate to `route`, then reconcile.
    pub fn set_route<Q: PermissionQuery + ?Sized>(
        &mut self,
        route: impl Into<String>,
        query: &Q,
    ) -> NavigationView {
        self.route = route.into();
        self.refresh(query)
    }

    /// Manually toggle `title`, then reconcile.
    pub fn toggle<Q: PermissionQuery + ?Sized>(
        &mut self,
        title: &str,
        query: &Q,
    ) -> NavigationView {
        self.expansion.toggle(title);
        self.refresh(query)
    }

    /// Filter for the current permissions, reconcile and render.
    ///
    /// Call after every permission change.
    pub fn refresh<Q: PermissionQuery + ?Sized>(&mut self, query: &Q) -> NavigationView {
        let visible = filter_navigation(&self.tree, query);
        self.expansion.reconcile(&visible, &self.route);
        NavigationView::build(&visible, &self.expansion, &self.route)
    }

    /// Trail to the current route within the visible tree.
    pub fn breadcrumb<Q: PermissionQuery + ?Sized>(&self, query: &Q) -> Option<Breadcrumb> {
        filter_navigation(&self.tree, query).locate(&self.route)
    }
}
