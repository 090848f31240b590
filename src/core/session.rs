//! Editing session: the single owner of workspace and selection state.
//!
//! Every mutation is followed by the same notification sequence:
//! 1. the workspace produces its new snapshot
//! 2. selection slots pointing into removed or non-file nodes are cleared
//! 3. subscribers are called with the new snapshot and selection
//!
//! Derived storage variables are cached per workspace version, so the first
//! completion request after a mutation rebuilds them from the new tree.

use crate::config::{self, StorageOptions};
use crate::core::completion::{self, CompletionContext};
use crate::core::error::WorkspaceError;
use crate::core::export::{self, ExportStyle};
use crate::core::{Snapshot, StorageIndex, Workspace};
use crate::models::{
    NodeId, NodeType, Pane, SeedNode, Selection, Suggestion, VariablePath, WordRange,
};
use crate::utils::{char_column_from_utf16, prefix_at, utf16_column_from_char, word_range_at};

/// Handle returned by [`Session::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&Snapshot, &Selection)>;

/// Flattened storage variables, valid for one workspace version.
#[derive(Debug, Default)]
struct VariableCache {
    version: Option<u64>,
    paths: Vec<VariablePath>,
}

impl VariableCache {
    fn get(&mut self, workspace: &Workspace, options: &StorageOptions) -> &[VariablePath] {
        if self.version != Some(workspace.version()) {
            self.paths = StorageIndex::build(&workspace.snapshot(), options).flatten_paths();
            self.version = Some(workspace.version());
            tracing::trace!(
                version = workspace.version(),
                paths = self.paths.len(),
                "variable cache rebuilt"
            );
        }
        &self.paths
    }
}

/// Workspace, selection and derived state for one editor instance.
pub struct Session {
    workspace: Workspace,
    selection: Selection,
    options: StorageOptions,
    variables: VariableCache,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl Session {
    /// Start a session over `seed` with `main.yaml` (if present) selected.
    pub fn new(seed: Vec<SeedNode>, options: StorageOptions) -> Self {
        let workspace = Workspace::new(seed);
        let mut selection = Selection::default();

        let snapshot = workspace.snapshot();
        if let Some(main) = snapshot
            .root()
            .children()
            .iter()
            .find(|child| child.is_file() && child.name == config::DEFAULT_SELECTED_FILE)
        {
            selection.select(&snapshot, main.id);
        }

        Self {
            workspace,
            selection,
            options,
            variables: VariableCache::default(),
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    // ------------------------------------------------------------------------
    // Readers
    // ------------------------------------------------------------------------

    pub fn snapshot(&self) -> Snapshot {
        self.workspace.snapshot()
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn options(&self) -> &StorageOptions {
        &self.options
    }

    // ------------------------------------------------------------------------
    // Tree Mutations
    // ------------------------------------------------------------------------

    pub fn insert(&mut self, parent: NodeId, kind: NodeType) -> Result<NodeId, WorkspaceError> {
        let id = self.workspace.insert(parent, kind)?;
        self.after_mutation(&[]);
        Ok(id)
    }

    /// Remove a node; selection slots anywhere in its subtree are cleared.
    pub fn remove(&mut self, id: NodeId) -> Result<(), WorkspaceError> {
        let removed = self.workspace.remove(id)?;
        if !removed.is_empty() {
            self.after_mutation(&removed);
        }
        Ok(())
    }

    pub fn rename(&mut self, id: NodeId, name: &str) -> Result<(), WorkspaceError> {
        self.workspace.rename(id, name)?;
        self.after_mutation(&[]);
        Ok(())
    }

    pub fn set_content(&mut self, id: NodeId, text: &str) -> Result<(), WorkspaceError> {
        self.workspace.set_content(id, text)?;
        self.after_mutation(&[]);
        Ok(())
    }

    /// Write editor text into the file shown in `pane`.
    ///
    /// Returns `false` when the pane is empty.
    pub fn update_pane(&mut self, pane: Pane, text: &str) -> Result<bool, WorkspaceError> {
        let Some(id) = self.selection.slot(pane) else {
            return Ok(false);
        };
        self.set_content(id, text)?;
        Ok(true)
    }

    // ------------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------------

    pub fn select(&mut self, id: NodeId) -> bool {
        let changed = self.selection.select(&self.workspace.snapshot(), id);
        if changed {
            self.notify();
        }
        changed
    }

    pub fn assign(&mut self, pane: Pane, id: Option<NodeId>) -> bool {
        let changed = self.selection.assign(&self.workspace.snapshot(), pane, id);
        if changed {
            self.notify();
        }
        changed
    }

    pub fn toggle_split(&mut self) {
        self.selection.toggle_split();
        self.notify();
    }

    pub fn set_active_pane(&mut self, pane: Pane) {
        if self.selection.active_pane() != pane {
            self.selection.set_active_pane(pane);
            self.notify();
        }
    }

    // ------------------------------------------------------------------------
    // Completion & Export
    // ------------------------------------------------------------------------

    /// Suggestions for the caret at `caret_column` of `line`.
    ///
    /// `caret_column` and `range` are character columns.
    pub fn complete(
        &mut self,
        line: &str,
        caret_column: usize,
        range: WordRange,
    ) -> Vec<Suggestion> {
        let context = CompletionContext::classify(prefix_at(line, caret_column));
        let variables: &[VariablePath] = match context {
            CompletionContext::Variable => self.variables.get(&self.workspace, &self.options),
            _ => &[],
        };
        completion::suggest(context, range, variables)
    }

    /// Like [`complete`](Self::complete), for hosts that count columns in
    /// UTF-16 code units. The caret and the returned ranges use that unit;
    /// the range is the word under the caret.
    pub fn complete_utf16(&mut self, line: &str, caret_column: usize) -> Vec<Suggestion> {
        let caret = char_column_from_utf16(line, caret_column);
        let chars = word_range_at(line, caret);
        let units = WordRange::new(
            utf16_column_from_char(line, chars.start_column),
            utf16_column_from_char(line, chars.end_column),
        );
        let mut suggestions = self.complete(line, caret, chars);
        for suggestion in &mut suggestions {
            suggestion.range = units;
        }
        suggestions
    }

    pub fn export(&self, style: ExportStyle) -> String {
        export::export_script(&self.workspace.snapshot(), style)
    }

    // ------------------------------------------------------------------------
    // Subscribers
    // ------------------------------------------------------------------------

    /// Register a callback run after every state change.
    pub fn subscribe(
        &mut self,
        callback: impl FnMut(&Snapshot, &Selection) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback; returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    fn after_mutation(&mut self, removed: &[NodeId]) {
        let snapshot = self.workspace.snapshot();
        self.selection.forget(removed);
        self.selection.on_workspace_change(&snapshot);
        self.notify_with(&snapshot);
    }

    fn notify(&mut self) {
        let snapshot = self.workspace.snapshot();
        self.notify_with(&snapshot);
    }

    fn notify_with(&mut self, snapshot: &Snapshot) {
        for (_, callback) in &mut self.subscribers {
            callback(snapshot, &self.selection);
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(config::default_seed(), StorageOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const MAIN: NodeId = NodeId::Seq(1);
    const STORAGE: NodeId = NodeId::Seq(2);
    const CONFIG: NodeId = NodeId::Seq(3);

    fn labels(suggestions: &[Suggestion]) -> Vec<String> {
        suggestions.iter().map(|s| s.label.clone()).collect()
    }

    #[test]
    fn test_starts_with_main_selected() {
        let session = Session::default();
        assert_eq!(session.selection().primary(), Some(MAIN));
        assert!(!session.selection().split_view());
    }

    #[test]
    fn test_no_main_means_no_selection() {
        let session = Session::new(
            vec![SeedNode::file("other.yaml", "")],
            StorageOptions::default(),
        );
        assert_eq!(session.selection().primary(), None);
    }

    #[test]
    fn test_remove_clears_selection_in_subtree() {
        let mut session = Session::default();
        session.select(CONFIG);
        session.toggle_split();
        session.select(MAIN);

        session.remove(STORAGE).unwrap();
        assert_eq!(session.selection().primary(), None);
        assert_eq!(session.selection().secondary(), Some(MAIN));
    }

    #[test]
    fn test_remove_root_ignored() {
        let mut session = Session::default();
        let version = session.workspace().version();
        session.remove(NodeId::Root).unwrap();
        assert_eq!(session.workspace().version(), version);
        assert_eq!(session.selection().primary(), Some(MAIN));
    }

    #[test]
    fn test_new_storage_file_visible_to_next_completion() {
        let mut session = Session::default();
        let before = session.complete("${", 2, WordRange::at(2));
        assert!(!labels(&before).contains(&"${deploy.target}".to_string()));

        let file = session.insert(STORAGE, NodeType::File).unwrap();
        session.rename(file, "deploy.yaml").unwrap();
        session.set_content(file, "target: prod\n").unwrap();

        let after = session.complete("${", 2, WordRange::at(2));
        assert!(labels(&after).contains(&"${deploy.target}".to_string()));
    }

    #[test]
    fn test_cache_reused_between_requests() {
        let mut session = Session::default();
        session.complete("${", 2, WordRange::at(2));
        let version = session.variables.version;
        assert_eq!(version, Some(session.workspace().version()));
        session.complete("${con", 5, WordRange::new(2, 5));
        assert_eq!(session.variables.version, version);

        session.set_content(MAIN, "blocks: []").unwrap();
        assert_eq!(session.variables.version, version);
        session.complete("${", 2, WordRange::at(2));
        assert_eq!(session.variables.version, Some(session.workspace().version()));
        assert_ne!(session.variables.version, version);
    }

    #[test]
    fn test_utf16_caret_after_astral_char() {
        let mut session = Session::default();
        let line = "run: echo 😀 ${con";
        // 17 chars, 18 UTF-16 units; the caret sits at the end.
        let suggestions = session.complete_utf16(line, 18);
        let labels = labels(&suggestions);
        assert!(labels.contains(&"${config.app.name}".to_string()));
        assert!(suggestions.iter().all(|s| s.range == WordRange::new(15, 18)));

        // One unit short of the end still lands inside `${con`.
        let shorter = session.complete_utf16(line, 17);
        assert!(shorter.iter().all(|s| s.range == WordRange::new(15, 17)));
    }

    #[test]
    fn test_update_pane_writes_selected_file() {
        let mut session = Session::default();
        assert_eq!(session.update_pane(Pane::Primary, "blocks: []"), Ok(true));
        assert_eq!(session.snapshot().find(MAIN).unwrap().content(), Some("blocks: []"));
        assert_eq!(session.update_pane(Pane::Secondary, "x"), Ok(false));
    }

    #[test]
    fn test_subscribers_see_reconciled_selection() {
        let mut session = Session::default();
        session.select(CONFIG);

        let seen: Rc<RefCell<Vec<(u64, Option<NodeId>)>>> = Rc::default();
        let sink = Rc::clone(&seen);
        let sub = session.subscribe(move |snapshot, selection| {
            sink.borrow_mut().push((snapshot.version(), selection.primary()));
        });

        session.remove(STORAGE).unwrap();
        assert_eq!(seen.borrow().last(), Some(&(1, None)));

        assert!(session.unsubscribe(sub));
        session.set_content(MAIN, "x").unwrap();
        assert_eq!(seen.borrow().len(), 1);
        assert!(!session.unsubscribe(sub));
    }

    #[test]
    fn test_failed_mutation_does_not_notify() {
        let mut session = Session::default();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        session.subscribe(move |_, _| *sink.borrow_mut() += 1);

        assert!(session.rename(MAIN, " ").is_err());
        assert!(session.set_content(STORAGE, "x").is_err());
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn test_export_uses_current_tree() {
        let mut session = Session::default();
        session.remove(STORAGE).unwrap();
        session.set_content(MAIN, "blocks: []").unwrap();
        assert_eq!(
            session.export(ExportStyle::Newline),
            "cat > \"main.yaml\" << 'EOF'\nblocks: []\nEOF"
        );
    }
}
