use crate::api::{Comment, CommentId, Time};

/// Indentation added by each nesting level, in columns of the display
pub const INDENT_UNIT: usize = 3;

pub const REPLY_MARKER: &str = "↳";

pub const NO_COMMENTS: &str = "No comments.";

/// An action a rendered comment offers, for the display layer to bind
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Trigger {
    Delete(CommentId),
    ReplyTo(CommentId),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Fragment {
    /// Stands for an empty forest
    Placeholder,
    Nodes(Vec<Node>),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Node {
    pub id: CommentId,
    pub depth: usize,
    pub created_at: Time,
    pub content: String,
    pub triggers: [Trigger; 2],
    pub replies: Fragment,
}

impl Node {
    pub fn indent(&self) -> usize {
        self.depth * INDENT_UNIT
    }

    pub fn marker(&self) -> Option<&'static str> {
        (self.depth > 0).then(|| REPLY_MARKER)
    }
}

impl Fragment {
    pub fn nodes(&self) -> &[Node] {
        match self {
            Fragment::Placeholder => &[],
            Fragment::Nodes(n) => n,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Fragment::Placeholder)
    }
}

pub fn render(forest: &[Comment]) -> Fragment {
    render_at(forest, 0)
}

/// Describe `forest` as if it were nested `depth` levels deep. Siblings keep
/// the order they have in `forest`.
pub fn render_at(forest: &[Comment], depth: usize) -> Fragment {
    if forest.is_empty() {
        return Fragment::Placeholder;
    }
    Fragment::Nodes(
        forest
            .iter()
            .map(|c| Node {
                id: c.id,
                depth,
                created_at: c.created_at,
                content: c.content.clone(),
                triggers: [Trigger::Delete(c.id), Trigger::ReplyTo(c.id)],
                replies: render_at(&c.children, depth + 1),
            })
            .collect(),
    )
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pager {
    pub current: usize,
    pub buttons: Vec<usize>,
}

/// Page selector for a root listing, None when there is nothing to select
pub fn render_pager(pages: usize, current: usize) -> Option<Pager> {
    (pages > 1).then(|| Pager {
        current,
        buttons: (1..=pages).collect(),
    })
}
