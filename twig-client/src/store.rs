use std::sync::Arc;

use crate::api::{Comment, CommentId};

/// Which of the two mutually exclusive views the store currently holds
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ViewKind {
    /// A page of root comments, replies not expanded
    RootPage { page: usize, pages: usize },

    /// The replies of `root`, with their own replies nested
    Subtree { root: CommentId },
}

impl ViewKind {
    pub fn current_parent(&self) -> Option<CommentId> {
        match self {
            ViewKind::RootPage { .. } => None,
            ViewKind::Subtree { root } => Some(*root),
        }
    }

    pub fn is_subtree(&self) -> bool {
        matches!(self, ViewKind::Subtree { .. })
    }
}

/// What the user chose, as opposed to what the server sent
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ViewState {
    /// Only ever applied to the root view, empty means no filter
    pub search: String,

    /// Parent the next created comment will be attached to
    pub reply_target: Option<CommentId>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommentStore {
    forest: Arc<Vec<Comment>>,
    view: ViewKind,
    state: ViewState,
}

impl Default for CommentStore {
    fn default() -> CommentStore {
        CommentStore::new()
    }
}

impl CommentStore {
    pub fn new() -> CommentStore {
        CommentStore {
            forest: Arc::new(Vec::new()),
            view: ViewKind::RootPage { page: 1, pages: 0 },
            state: ViewState::default(),
        }
    }

    /// Replace the held forest, never merging with the previous one
    pub fn set_forest(&mut self, forest: Vec<Comment>, view: ViewKind) {
        self.forest = Arc::new(forest);
        self.view = view;
    }

    pub fn forest(&self) -> &Arc<Vec<Comment>> {
        &self.forest
    }

    pub fn view(&self) -> ViewKind {
        self.view
    }

    pub fn current_parent(&self) -> Option<CommentId> {
        self.view.current_parent()
    }

    pub fn set_search(&mut self, search: &str) {
        self.state.search = String::from(search.trim());
    }

    pub fn search(&self) -> &str {
        &self.state.search
    }

    pub fn set_reply_target(&mut self, id: Option<CommentId>) {
        self.state.reply_target = id;
    }

    pub fn reply_target(&self) -> Option<CommentId> {
        self.state.reply_target
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }
}
