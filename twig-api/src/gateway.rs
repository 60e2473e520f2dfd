use async_trait::async_trait;

use crate::{Comment, CommentId, Deleted, Error, NewComment, Page};

/// The four round trips the comment service offers
///
/// Futures are not required to be `Send`, so that browser-backed transports
/// can implement this trait.
#[async_trait(?Send)]
pub trait Gateway {
    /// Fetch one page of root comments, filtered by `search` unless it is empty
    async fn list_page(&self, page: usize, search: &str) -> Result<Page, Error>;

    /// Fetch all the replies to `parent`, with their own replies nested
    async fn list_replies(&self, parent: CommentId) -> Result<Vec<Comment>, Error>;

    async fn create(&self, comment: &NewComment) -> Result<Comment, Error>;

    /// Delete `id` along with all of its descendants
    async fn delete(&self, id: CommentId) -> Result<Deleted, Error>;
}
