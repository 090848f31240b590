//! Selection rules for single and split view.
//!
//! Outside split view every selection lands in the primary pane. In split
//! view it lands in whichever pane is active; turning split view on makes
//! the right pane active so the next pick fills it.

use crate::core::Snapshot;
use crate::models::{NodeId, Pane, Selection};

impl Selection {
    /// Open `id` in the pane chosen by the split-view rules.
    ///
    /// Ids that are missing or not files are ignored. Returns whether the
    /// selection changed.
    pub fn select(&mut self, snapshot: &Snapshot, id: NodeId) -> bool {
        if !snapshot.is_file(id) {
            return false;
        }
        let pane = if self.split_view {
            self.active_pane
        } else {
            Pane::Primary
        };
        self.put(pane, Some(id))
    }

    /// Write `id` directly into a pane slot.
    ///
    /// The secondary slot only accepts ids in split view.
    pub fn assign(&mut self, snapshot: &Snapshot, pane: Pane, id: Option<NodeId>) -> bool {
        if id.is_some_and(|id| !snapshot.is_file(id)) {
            return false;
        }
        if pane == Pane::Secondary && !self.split_view {
            return false;
        }
        self.put(pane, id)
    }

    /// Switch between single and split view.
    pub fn toggle_split(&mut self) {
        if self.split_view {
            self.split_view = false;
            self.secondary = None;
            self.active_pane = Pane::Primary;
        } else {
            self.split_view = true;
            self.active_pane = Pane::Secondary;
        }
    }

    pub fn set_active_pane(&mut self, pane: Pane) {
        self.active_pane = pane;
    }

    /// Clear slots that no longer reference a file in `snapshot`.
    pub fn on_workspace_change(&mut self, snapshot: &Snapshot) -> bool {
        let mut changed = false;
        for pane in [Pane::Primary, Pane::Secondary] {
            if let Some(id) = self.slot(pane)
                && !snapshot.is_file(id)
            {
                changed |= self.put(pane, None);
            }
        }
        changed
    }

    /// Clear slots holding any of `removed`.
    pub fn forget(&mut self, removed: &[NodeId]) -> bool {
        let mut changed = false;
        for pane in [Pane::Primary, Pane::Secondary] {
            if self.slot(pane).is_some_and(|id| removed.contains(&id)) {
                changed |= self.put(pane, None);
            }
        }
        changed
    }

    fn put(&mut self, pane: Pane, id: Option<NodeId>) -> bool {
        let slot = match pane {
            Pane::Primary => &mut self.primary,
            Pane::Secondary => &mut self.secondary,
        };
        let changed = *slot != id;
        *slot = id;
        changed
    }
}
