use chrono::Utc;

mod comment;
pub use comment::{Comment, CommentId, Deleted, NewComment, Page};

mod error;
pub use error::Error;

mod gateway;
pub use gateway::Gateway;

mod query;
pub use query::{ListParams, SortOrder};

pub type Time = chrono::DateTime<Utc>;

/// Number of root comments per page, fixed by the comment service contract
pub const PAGE_SIZE: usize = 10;

pub const COMMENTS_PATH: &str = "/comments";

pub fn comment_path(id: CommentId) -> String {
    format!("{}/{}", COMMENTS_PATH, id)
}
