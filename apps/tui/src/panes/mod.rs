//! TUI pane definitions.
//!
//! Each pane encapsulates its own cursor/scroll state and rendering logic.
//! The browsing state itself (tree, selection, detail) lives in the
//! [`terradex_core::Browser`] owned by the app.

mod details;
mod fields;
mod navigator;
mod search;

use std::fmt;

pub(crate) use details::DetailsPane;
pub(crate) use fields::{FieldAction, FieldsPane};
pub(crate) use navigator::{NavigatorAction, NavigatorPane};
pub(crate) use search::{SearchAction, SearchPane};

/// Which pane receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Focus {
    Navigator,
    Search,
    Fields,
    Details,
}

impl Focus {
    pub(crate) fn next(self) -> Self {
        match self {
            Self::Navigator => Self::Search,
            Self::Search => Self::Fields,
            Self::Fields => Self::Details,
            Self::Details => Self::Navigator,
        }
    }

    pub(crate) fn prev(self) -> Self {
        match self {
            Self::Navigator => Self::Details,
            Self::Search => Self::Navigator,
            Self::Fields => Self::Search,
            Self::Details => Self::Fields,
        }
    }
}

impl fmt::Display for Focus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Navigator => write!(f, "schemas"),
            Self::Search => write!(f, "search"),
            Self::Fields => write!(f, "attributes"),
            Self::Details => write!(f, "details"),
        }
    }
}
