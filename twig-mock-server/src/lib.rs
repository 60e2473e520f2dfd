use std::{
    collections::{BTreeMap, VecDeque},
    sync::Arc,
};

use async_trait::async_trait;
use chrono::TimeZone;
use parking_lot::{Mutex, MutexGuard};
use twig_api::{
    Comment, CommentId, Deleted, Error, Gateway, ListParams, NewComment, Page, Time,
};

mod routes;
pub use routes::router;

/// Requests the mock received, in order
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Call {
    ListPage { page: usize, search: String },
    ListReplies(CommentId),
    Create(NewComment),
    Delete(CommentId),
}

#[derive(Debug)]
struct DbComment {
    content: String,
    created_at: Time,
    parent_id: Option<CommentId>,
}

/// In-memory comment service
///
/// Timestamps come from a fake clock that advances by one minute on each
/// creation, so that creation order and date order always agree.
#[derive(Debug)]
pub struct MockServer {
    comments: BTreeMap<CommentId, DbComment>,
    next_id: i64,
    clock: Time,
    calls: Vec<Call>,
    failures: VecDeque<Error>,
}

impl Default for MockServer {
    fn default() -> MockServer {
        MockServer::new()
    }
}

impl MockServer {
    pub fn new() -> MockServer {
        MockServer {
            comments: BTreeMap::new(),
            next_id: 1,
            clock: chrono::Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            calls: Vec::new(),
            failures: VecDeque::new(),
        }
    }

    /// Every request received so far
    pub fn test_calls(&self) -> &[Call] {
        &self.calls
    }

    pub fn test_clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Make the next request fail with `err`, whatever it is
    pub fn test_fail_next(&mut self, err: Error) {
        self.failures.push_back(err);
    }

    /// Return the current number of stored comments
    pub fn test_num_comments(&self) -> usize {
        self.comments.len()
    }

    fn record(&mut self, call: Call) -> Result<(), Error> {
        tracing::trace!(?call, "mock server received call");
        self.calls.push(call);
        match self.failures.pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn build(&self, id: CommentId, c: &DbComment, with_children: bool) -> Comment {
        Comment {
            id,
            content: c.content.clone(),
            created_at: c.created_at,
            parent_id: c.parent_id,
            children: match with_children {
                true => self.tree_under(id),
                false => Vec::new(),
            },
        }
    }

    fn tree_under(&self, parent: CommentId) -> Vec<Comment> {
        let mut res = self
            .comments
            .iter()
            .filter(|(_, c)| c.parent_id == Some(parent))
            .map(|(id, c)| self.build(*id, c, true))
            .collect::<Vec<_>>();
        res.sort_by_key(|c| (c.created_at, c.id));
        res
    }

    pub fn list(&mut self, params: &ListParams) -> Result<Page, Error> {
        if let Some(parent) = params.parent {
            self.record(Call::ListReplies(parent))?;
            let comments = self.tree_under(parent);
            return Ok(Page {
                page: 1,
                limit: comments.len(),
                total: comments.len(),
                pages: 1,
                comments,
            });
        }

        let page = params.page_or_default();
        let limit = params.limit_or_default();
        let search = params.search.as_deref().unwrap_or("").trim().to_lowercase();
        self.record(Call::ListPage {
            page,
            search: search.clone(),
        })?;

        let mut roots = self
            .comments
            .iter()
            .filter(|(_, c)| c.parent_id.is_none())
            .filter(|(_, c)| search.is_empty() || c.content.to_lowercase().contains(&search))
            .map(|(id, c)| self.build(*id, c, false))
            .collect::<Vec<_>>();
        roots.sort_by_key(|c| (c.created_at, c.id));
        if params.sort == Some(twig_api::SortOrder::Desc) {
            roots.reverse();
        }

        let total = roots.len();
        let comments = roots
            .into_iter()
            .skip((page - 1).saturating_mul(limit))
            .take(limit)
            .collect();
        Ok(Page {
            comments,
            page,
            limit,
            total,
            pages: total / limit + usize::from(total % limit != 0),
        })
    }

    pub fn create(&mut self, new: NewComment) -> Result<Comment, Error> {
        self.record(Call::Create(new.clone()))?;
        if new.content.trim().is_empty() {
            return Err(Error::bad_request("content is required"));
        }
        if let Some(parent) = new.parent_id {
            if !self.comments.contains_key(&parent) {
                return Err(Error::bad_request("parent comment not found"));
            }
        }

        let id = CommentId(self.next_id);
        self.next_id += 1;
        self.clock = self.clock + chrono::Duration::minutes(1);
        let c = DbComment {
            content: new.content,
            created_at: self.clock,
            parent_id: new.parent_id,
        };
        let res = self.build(id, &c, false);
        self.comments.insert(id, c);
        Ok(res)
    }

    pub fn delete(&mut self, id: CommentId) -> Result<Deleted, Error> {
        self.record(Call::Delete(id))?;
        if !self.comments.contains_key(&id) {
            return Err(Error::not_found("comment not found"));
        }

        let mut to_remove = vec![id];
        let mut i = 0;
        while i < to_remove.len() {
            let parent = to_remove[i];
            to_remove.extend(
                self.comments
                    .iter()
                    .filter(|(_, c)| c.parent_id == Some(parent))
                    .map(|(id, _)| *id),
            );
            i += 1;
        }
        for id in to_remove.iter() {
            self.comments.remove(id);
        }
        Ok(Deleted {
            deleted: to_remove.len(),
        })
    }
}

/// Handle on a mock server that can be shared between a client under test
/// and the test itself
#[derive(Clone, Debug, Default)]
pub struct SharedMock(Arc<Mutex<MockServer>>);

impl SharedMock {
    pub fn new(server: MockServer) -> SharedMock {
        SharedMock(Arc::new(Mutex::new(server)))
    }

    pub fn lock(&self) -> MutexGuard<'_, MockServer> {
        self.0.lock()
    }
}

#[async_trait(?Send)]
impl Gateway for SharedMock {
    async fn list_page(&self, page: usize, search: &str) -> Result<Page, Error> {
        self.lock().list(&ListParams::root_page(page, search))
    }

    async fn list_replies(&self, parent: CommentId) -> Result<Vec<Comment>, Error> {
        Ok(self.lock().list(&ListParams::replies(parent))?.comments)
    }

    async fn create(&self, comment: &NewComment) -> Result<Comment, Error> {
        self.lock().create(comment.clone())
    }

    async fn delete(&self, id: CommentId) -> Result<Deleted, Error> {
        self.lock().delete(id)
    }
}
