//! Expansion State Machine
//!
//! Tracks which items render open. An item is expanded when its title is in
//! the open set or when it is active (the route equals the url of one of its
//! visible sub-items).
//!
//! Two transitions change the open set:
//! - [`ExpansionState::toggle`] flips membership; the only user-driven change
//! - [`ExpansionState::reconcile`] inserts the title of every active item not
//!   already open
//!
//! Reconciliation never removes a title. An active branch toggled closed is
//! reopened by the next reconciliation, so it stays open for as long as its
//! route is current. Reconciling twice with unchanged inputs is a no-op.

use crate::model::{NavItem, NavigationTree};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Set of open item titles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionState {
    open: BTreeSet<String>,
}

impl ExpansionState {
    /// Empty state: every branch collapsed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `title`. Returns whether it is now open.
    pub fn toggle(&mut self, title: &str) -> bool {
        if self.open.remove(title) {
            false
        } else {
            self.open.insert(title.to_string());
            true
        }
    }

    /// Membership test on the open set.
    pub fn contains(&self, title: &str) -> bool {
        self.open.contains(title)
    }

    /// Open titles in sorted order.
    pub fn open_branches(&self) -> impl Iterator<Item = &str> {
        self.open.iter().map(String::as_str)
    }

    /// Number of open titles.
    pub fn len(&self) -> usize {
        self.open.len()
    }

    /// True when nothing is open.
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    /// True if `route` is the url of one of `item`'s sub-items.
    ///
    /// Pass an item from the filtered tree so only visible sub-items count.
    pub fn is_active(item: &NavItem, route: &str) -> bool {
        item.links_to(route)
    }

    /// Rendered state of `item`: open or active.
    pub fn is_expanded(&self, item: &NavItem, route: &str) -> bool {
        self.contains(&item.title) || Self::is_active(item, route)
    }

    /// Auto-expand step. Inserts the title of every active item in `visible`
    /// that is not already open and returns the inserted titles.
    ///
    /// `visible` must be the filtered tree for the current permissions.
    pub fn reconcile(&mut self, visible: &NavigationTree, route: &str) -> Vec<String> {
        let mut inserted = Vec::new();
        for (_, item) in visible.items() {
            if Self::is_active(item, route) && !self.open.contains(&item.title) {
                tracing::debug!(item = %item.title, route, "auto-expanding active branch");
                self.open.insert(item.title.clone());
                inserted.push(item.title.clone());
            }
        }
        inserted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NavGroup, NavSubItem};

    fn tree() -> NavigationTree {
        NavigationTree::new([NavGroup::new(
            "Time & Pay",
            [
                NavItem::new(
                    "Leave",
                    [
                        NavSubItem::new("My Leave", "/leave"),
                        NavSubItem::new("Approvals", "/leave/approvals"),
                    ],
                ),
                NavItem::new("Attendance", [NavSubItem::new("Timesheets", "/attendance")]),
            ],
        )])
    }

    #[test]
    fn test_toggle_flips_membership() {
        let mut state = ExpansionState::new();
        assert!(state.toggle("Leave"));
        assert!(state.contains("Leave"));
        assert!(!state.toggle("Leave"));
        assert!(state.is_empty());
    }

    #[test]
    fn test_reconcile_opens_active_branch_once() {
        let mut state = ExpansionState::new();
        assert_eq!(state.reconcile(&tree(), "/leave/approvals"), ["Leave"]);
        assert!(state.reconcile(&tree(), "/leave/approvals").is_empty());
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_reconcile_never_closes() {
        let mut state = ExpansionState::new();
        state.reconcile(&tree(), "/leave");
        state.reconcile(&tree(), "/attendance");
        let open: Vec<_> = state.open_branches().collect();
        assert_eq!(open, ["Attendance", "Leave"]);
    }

    #[test]
    fn test_expanded_when_active_or_open() {
        let mut state = ExpansionState::new();
        let tree = tree();
        let leave = &tree.groups[0].items[0];
        assert!(!state.is_expanded(leave, "/attendance"));
        assert!(state.is_expanded(leave, "/leave"));
        state.toggle("Leave");
        assert!(state.is_expanded(leave, "/attendance"));
    }

    #[test]
    fn test_unknown_route_changes_nothing() {
        let mut state = ExpansionState::new();
        assert!(state.reconcile(&tree(), "/does-not-exist").is_empty());
        assert!(state.is_empty());
    }
}
