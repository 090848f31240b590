//! Editor selection state for single and split view.

use serde::{Deserialize, Serialize};

use super::NodeId;

/// Editor pane of the split view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Pane {
    /// Left pane (1), the only pane outside split view
    #[default]
    Primary,
    /// Right pane (2)
    Secondary,
}

/// Pane number outside `{1, 2}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid pane {0} (expected 1 or 2)")]
pub struct PaneError(pub u8);

impl TryFrom<u8> for Pane {
    type Error = PaneError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(Self::Primary),
            2 => Ok(Self::Secondary),
            other => Err(PaneError(other)),
        }
    }
}

impl From<Pane> for u8 {
    fn from(pane: Pane) -> Self {
        match pane {
            Pane::Primary => 1,
            Pane::Secondary => 2,
        }
    }
}

/// Which files the user is editing.
///
/// Slots hold ids only; callers resolve them against the current snapshot.
/// Outside split view `secondary` is always `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub(crate) primary: Option<NodeId>,
    pub(crate) secondary: Option<NodeId>,
    pub(crate) split_view: bool,
    pub(crate) active_pane: Pane,
}

impl Selection {
    pub fn primary(&self) -> Option<NodeId> {
        self.primary
    }

    pub fn secondary(&self) -> Option<NodeId> {
        self.secondary
    }

    pub fn split_view(&self) -> bool {
        self.split_view
    }

    pub fn active_pane(&self) -> Pane {
        self.active_pane
    }

    /// Id held by the given pane.
    pub fn slot(&self, pane: Pane) -> Option<NodeId> {
        match pane {
            Pane::Primary => self.primary,
            Pane::Secondary => self.secondary,
        }
    }

    /// Id shown in the active pane.
    pub fn active(&self) -> Option<NodeId> {
        self.slot(self.active_pane)
    }
}
