use std::fmt;

use serde::Deserialize;

use crate::{Time, PAGE_SIZE};

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct CommentId(pub i64);

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Comment {
    pub id: CommentId,
    pub content: String,
    pub created_at: Time,

    /// None for root comments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CommentId>,

    /// Replies, in the order the server sent them. Only populated when they
    /// were explicitly fetched.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<Comment>,
}

impl Comment {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn find_in<'a>(comments: &'a [Comment], id: CommentId) -> Option<&'a Comment> {
        for c in comments {
            if c.id == id {
                return Some(c);
            }
            if let Some(res) = Comment::find_in(&c.children, id) {
                return Some(res);
            }
        }
        None
    }

    /// Number of comments in the forest, descendants included
    pub fn count_in(comments: &[Comment]) -> usize {
        comments
            .iter()
            .map(|c| 1 + Comment::count_in(&c.children))
            .sum()
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NewComment {
    pub content: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CommentId>,
}

/// Answer to a listing request
///
/// Some deployments of the service emit the pagination counters with
/// capitalized keys, hence the aliases.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Page {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub comments: Vec<Comment>,

    #[serde(default)]
    pub page: usize,

    #[serde(default, alias = "Limit")]
    pub limit: usize,

    #[serde(default, alias = "Total")]
    pub total: usize,

    #[serde(default, alias = "Pages")]
    pub pages: usize,
}

impl Page {
    /// Fill in the counters a terse answer to a request for `page` left out
    pub fn with_defaults(mut self, page: usize) -> Page {
        if self.page == 0 {
            self.page = page;
        }
        if self.limit == 0 {
            self.limit = PAGE_SIZE;
        }
        if self.total == 0 {
            self.total = self.comments.len();
        }
        self
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Deleted {
    pub deleted: usize,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
