//! Declarative Guard
//!
//! A guard is a pure conditional-render decision. It asks a
//! [`PermissionQuery`] at evaluation time and picks `content` or `fallback`.
//! It holds no session state and caches nothing: re-evaluate it whenever the
//! surrounding view re-renders after a session change.
//!
//! ```rust,ignore
//! use atrium_authorization::{Guard, Requirement};
//! use atrium_core::permissions::{EMPLOYEES_CREATE, EMPLOYEES_EDIT};
//!
//! let guard = Guard::new(Requirement::any_of([EMPLOYEES_CREATE, EMPLOYEES_EDIT]));
//! let toolbar = guard.render(&manager, "Add employee", "");
//! ```

use atrium_core::{PermissionQuery, PermissionToken};
use serde::{Deserialize, Serialize};

/// What a guard requires of the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Requirement {
    /// A single token
    Token(PermissionToken),
    /// At least one of the tokens; an empty list is never satisfied
    AnyOf(Vec<PermissionToken>),
    /// Every token; an empty list is always satisfied
    AllOf(Vec<PermissionToken>),
}

impl Requirement {
    /// Single-token requirement.
    pub fn token(token: PermissionToken) -> Self {
        Self::Token(token)
    }

    /// List requirement with the `require_all` combinator flag.
    pub fn list(tokens: impl IntoIterator<Item = PermissionToken>, require_all: bool) -> Self {
        let tokens = tokens.into_iter().collect();
        if require_all {
            Self::AllOf(tokens)
        } else {
            Self::AnyOf(tokens)
        }
    }

    /// OR over the tokens.
    pub fn any_of(tokens: impl IntoIterator<Item = PermissionToken>) -> Self {
        Self::list(tokens, false)
    }

    /// AND over the tokens.
    pub fn all_of(tokens: impl IntoIterator<Item = PermissionToken>) -> Self {
        Self::list(tokens, true)
    }

    /// Evaluate against the query's current state.
    pub fn is_satisfied_by<Q: PermissionQuery + ?Sized>(&self, query: &Q) -> bool {
        match self {
            Self::Token(token) => query.has_permission(token),
            Self::AnyOf(tokens) => query.has_any_permission(tokens),
            Self::AllOf(tokens) => query.has_all_permissions(tokens),
        }
    }
}

impl From<PermissionToken> for Requirement {
    fn from(token: PermissionToken) -> Self {
        Self::Token(token)
    }
}

/// Outcome of a guard evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Render the guarded content
    Visible,
    /// Render the fallback
    Hidden,
}

impl Visibility {
    /// True for [`Visibility::Visible`].
    pub fn is_visible(&self) -> bool {
        matches!(self, Self::Visible)
    }
}

impl From<bool> for Visibility {
    fn from(visible: bool) -> Self {
        if visible {
            Self::Visible
        } else {
            Self::Hidden
        }
    }
}

/// Conditional-render decision over a [`Requirement`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guard {
    requirement: Requirement,
}

impl Guard {
    /// Create a guard.
    pub fn new(requirement: impl Into<Requirement>) -> Self {
        Self {
            requirement: requirement.into(),
        }
    }

    /// The requirement this guard checks.
    pub fn requirement(&self) -> &Requirement {
        &self.requirement
    }

    /// Decide visibility against the query's current state.
    pub fn evaluate<Q: PermissionQuery + ?Sized>(&self, query: &Q) -> Visibility {
        self.requirement.is_satisfied_by(query).into()
    }

    /// `content` when visible, else `fallback`.
    pub fn render<Q: PermissionQuery + ?Sized, T>(&self, query: &Q, content: T, fallback: T) -> T {
        match self.evaluate(query) {
            Visibility::Visible => content,
            Visibility::Hidden => fallback,
        }
    }

    /// Like [`render`](Self::render), building only the chosen alternative.
    pub fn render_with<Q, T>(
        &self,
        query: &Q,
        content: impl FnOnce() -> T,
        fallback: impl FnOnce() -> T,
    ) -> T
    where
        Q: PermissionQuery + ?Sized,
    {
        match self.evaluate(query) {
            Visibility::Visible => content(),
            Visibility::Hidden => fallback(),
        }
    }

    /// `Some(content)` when visible; the default fallback is nothing.
    pub fn show<Q: PermissionQuery + ?Sized, T>(&self, query: &Q, content: T) -> Option<T> {
        self.evaluate(query).is_visible().then_some(content)
    }
}
