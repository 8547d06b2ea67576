//! Navigation Visibility Filter
//!
//! Bottom-up pruning of a [`NavigationTree`] against a [`PermissionQuery`]:
//!
//! 1. a sub-item is visible when it is ungated or its token is granted
//! 2. an item is visible when at least one sub-item is visible
//! 3. a group is visible when at least one item is visible
//!
//! The item-level `required_permission` does not participate in rule 2.
//! Order is preserved at every level and nothing is re-sorted. The filter is
//! total: it never fails and never validates.

use crate::model::{NavGroup, NavItem, NavigationTree};
use atrium_core::PermissionQuery;

/// Visible subset of `tree` under `query`, in original order.
pub fn filter_navigation<Q: PermissionQuery + ?Sized>(
    tree: &NavigationTree,
    query: &Q,
) -> NavigationTree {
    NavigationTree {
        groups: tree
            .groups
            .iter()
            .filter_map(|group| filter_group(group, query))
            .collect(),
    }
}

/// The group with invisible items removed, or `None` if nothing remains.
pub fn filter_group<Q: PermissionQuery + ?Sized>(group: &NavGroup, query: &Q) -> Option<NavGroup> {
    let items: Vec<_> = group
        .items
        .iter()
        .filter_map(|item| filter_item(item, query))
        .collect();
    if items.is_empty() {
        return None;
    }
    Some(NavGroup {
        label: group.label.clone(),
        items,
    })
}

/// The item with invisible sub-items removed, or `None` if nothing remains.
pub fn filter_item<Q: PermissionQuery + ?Sized>(item: &NavItem, query: &Q) -> Option<NavItem> {
    let sub_items: Vec<_> = item
        .sub_items
        .iter()
        .filter(|sub| sub.is_visible(query))
        .cloned()
        .collect();
    if sub_items.is_empty() {
        return None;
    }
    Some(NavItem {
        sub_items,
        ..item.clone()
    })
}
