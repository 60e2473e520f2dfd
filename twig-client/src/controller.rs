use crate::{
    api::{Comment, CommentId, Deleted, Error, Gateway, NewComment, Page},
    render::{self, Fragment, Pager, Trigger},
    store::{CommentStore, ViewKind},
};

/// Sequence number of a load request
pub type Ticket = u64;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Intent {
    LoadPage(usize),
    ExpandReplies(CommentId),
    /// Go back to the root page last displayed
    BackToRoot,
    EditContent(String),
    EditSearch(String),
    Create,
    /// Ask for confirmation before deleting
    Delete(CommentId),
    ConfirmDelete,
    CancelDelete,
    Search(String),
    MarkReplyTarget(CommentId),
    ClearReplyTarget,
}

impl From<Trigger> for Intent {
    fn from(t: Trigger) -> Intent {
        match t {
            Trigger::Delete(id) => Intent::Delete(id),
            Trigger::ReplyTo(id) => Intent::MarkReplyTarget(id),
        }
    }
}

/// A round trip to perform against the comment service
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Request {
    ListPage {
        ticket: Ticket,
        page: usize,
        search: String,
    },
    ListReplies {
        ticket: Ticket,
        parent: CommentId,
    },
    Create(NewComment),
    Delete(CommentId),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    Page(Page),
    Replies(Vec<Comment>),
    Created(Comment),
    Deleted(Deleted),
}

impl Request {
    pub async fn send<G: Gateway + ?Sized>(&self, gateway: &G) -> Result<Outcome, Error> {
        tracing::debug!(req = ?self, "sending request");
        Ok(match self {
            Request::ListPage { page, search, .. } => {
                Outcome::Page(gateway.list_page(*page, search).await?)
            }
            Request::ListReplies { parent, .. } => {
                Outcome::Replies(gateway.list_replies(*parent).await?)
            }
            Request::Create(c) => Outcome::Created(gateway.create(c).await?),
            Request::Delete(id) => Outcome::Deleted(gateway.delete(*id).await?),
        })
    }
}

/// The slots of the display that are not the tree itself
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Surface {
    pub content: String,
    pub search: String,
    pub error: Option<String>,
    pub notice: Option<String>,
    /// Comment waiting for the user to confirm its deletion
    pub pending_delete: Option<CommentId>,
}

/// Turns user intents into requests, and request outcomes into store updates
///
/// The controller performs no I/O: `handle` returns the request to send, and
/// `resolve` must be called with its outcome. `dispatch` does both in a loop
/// for callers that can just await the gateway.
#[derive(Clone, Debug, Default)]
pub struct Controller {
    store: CommentStore,
    surface: Surface,
    last_ticket: Ticket,
    last_root_page: usize,
}

impl Controller {
    pub fn new() -> Controller {
        Controller {
            last_root_page: 1,
            ..Controller::default()
        }
    }

    pub fn store(&self) -> &CommentStore {
        &self.store
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn tree(&self) -> Fragment {
        render::render(self.store.forest())
    }

    /// Page selector, never shown on a subtree
    pub fn pager(&self) -> Option<Pager> {
        match self.store.view() {
            ViewKind::RootPage { page, pages } => render::render_pager(pages, page),
            ViewKind::Subtree { .. } => None,
        }
    }

    /// Request matching the initial display
    pub fn start(&mut self) -> Request {
        self.load_root(1)
    }

    fn next_ticket(&mut self) -> Ticket {
        self.last_ticket += 1;
        self.last_ticket
    }

    fn load_root(&mut self, page: usize) -> Request {
        self.surface.error = None;
        Request::ListPage {
            ticket: self.next_ticket(),
            page: page.max(1),
            search: String::from(self.store.search()),
        }
    }

    fn load_replies(&mut self, parent: CommentId) -> Request {
        self.surface.error = None;
        Request::ListReplies {
            ticket: self.next_ticket(),
            parent,
        }
    }

    /// Reload whatever view is displayed; root views restart at page 1
    fn reload(&mut self) -> Request {
        match self.store.current_parent() {
            None => self.load_root(1),
            Some(parent) => self.load_replies(parent),
        }
    }

    pub fn handle(&mut self, intent: Intent) -> Option<Request> {
        tracing::trace!(?intent, "handling intent");
        match intent {
            Intent::LoadPage(page) => {
                if self.store.view().is_subtree() {
                    tracing::debug!(page, "ignoring page navigation on a subtree");
                    return None;
                }
                Some(self.load_root(page))
            }
            Intent::ExpandReplies(id) => Some(self.load_replies(id)),
            Intent::BackToRoot => Some(self.load_root(self.last_root_page)),
            Intent::EditContent(c) => {
                self.surface.content = c;
                None
            }
            Intent::EditSearch(s) => {
                self.surface.search = s;
                None
            }
            Intent::Create => {
                self.surface.error = None;
                let content = self.surface.content.trim();
                if content.is_empty() {
                    self.surface.error = Some(Error::empty_content().to_string());
                    return None;
                }
                Some(Request::Create(NewComment {
                    content: String::from(content),
                    parent_id: self.store.reply_target(),
                }))
            }
            Intent::Delete(id) => {
                self.surface.pending_delete = Some(id);
                None
            }
            Intent::ConfirmDelete => {
                let id = self.surface.pending_delete.take()?;
                self.surface.error = None;
                Some(Request::Delete(id))
            }
            Intent::CancelDelete => {
                self.surface.pending_delete = None;
                None
            }
            Intent::Search(q) => {
                self.store.set_search(&q);
                self.surface.search = String::from(self.store.search());
                Some(self.load_root(1))
            }
            Intent::MarkReplyTarget(id) => {
                self.store.set_reply_target(Some(id));
                self.surface.notice = Some(format!("Replying to comment #{id}"));
                None
            }
            Intent::ClearReplyTarget => {
                self.store.set_reply_target(None);
                self.surface.notice = None;
                None
            }
        }
    }

    /// Apply the outcome of `req`, returning the follow-up request if any
    pub fn resolve(&mut self, req: &Request, res: Result<Outcome, Error>) -> Option<Request> {
        match req {
            Request::ListPage { ticket, .. } | Request::ListReplies { ticket, .. }
                if *ticket != self.last_ticket =>
            {
                tracing::debug!(
                    ticket,
                    latest = self.last_ticket,
                    "discarding superseded load response"
                );
                None
            }
            Request::ListPage { page, .. } => {
                match res {
                    Ok(Outcome::Page(p)) => {
                        self.last_root_page = *page;
                        self.store.set_forest(
                            p.comments,
                            ViewKind::RootPage {
                                page: *page,
                                pages: p.pages,
                            },
                        );
                    }
                    Ok(other) => self.mismatched(req, other),
                    Err(e) => self.fail("failed to load comments", e),
                }
                None
            }
            Request::ListReplies { parent, .. } => {
                match res {
                    Ok(Outcome::Replies(r)) => self
                        .store
                        .set_forest(r, ViewKind::Subtree { root: *parent }),
                    Ok(other) => self.mismatched(req, other),
                    Err(e) => self.fail("failed to load replies", e),
                }
                None
            }
            Request::Create(_) => match res {
                Ok(Outcome::Created(c)) => {
                    tracing::info!(id = %c.id, parent = ?c.parent_id, "created comment");
                    self.surface.content.clear();
                    self.store.set_reply_target(None);
                    self.surface.notice = None;
                    Some(self.reload())
                }
                Ok(other) => {
                    self.mismatched(req, other);
                    None
                }
                Err(e) => {
                    self.fail("failed to create comment", e);
                    None
                }
            },
            Request::Delete(id) => match res {
                Ok(Outcome::Deleted(d)) => {
                    tracing::info!(%id, deleted = d.deleted, "deleted comment");
                    Some(self.reload())
                }
                Ok(other) => {
                    self.mismatched(req, other);
                    None
                }
                Err(e) => {
                    self.fail("failed to delete comment", e);
                    None
                }
            },
        }
    }

    /// Show `e` in the error slot, prefixed with what was being attempted
    pub fn fail(&mut self, what: &str, e: Error) {
        tracing::warn!(error = %e, "{what}");
        self.surface.error = Some(format!("{what}: {e}"));
    }

    fn mismatched(&mut self, req: &Request, res: Outcome) {
        tracing::error!(?req, ?res, "outcome does not match request");
        self.surface.error = Some(String::from("received an unexpected answer from the server"));
    }

    /// Handle `intent` and run every resulting request to completion
    pub async fn dispatch<G: Gateway + ?Sized>(&mut self, gateway: &G, intent: Intent) {
        let next = self.handle(intent);
        self.run(gateway, next).await
    }

    pub async fn run<G: Gateway + ?Sized>(&mut self, gateway: &G, mut next: Option<Request>) {
        while let Some(req) = next {
            let res = req.send(gateway).await;
            next = self.resolve(&req, res);
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use twig_mock_server::{Call, MockServer, SharedMock};

    use super::*;
    use crate::text::tree_to_text;

    fn seeded(roots: usize) -> SharedMock {
        let mock = SharedMock::new(MockServer::new());
        for i in 0..roots {
            mock.lock()
                .create(NewComment {
                    content: format!("root {}", i + 1),
                    parent_id: None,
                })
                .unwrap();
        }
        mock.lock().test_clear_calls();
        mock
    }

    fn reply(mock: &SharedMock, parent: i64, content: &str) -> CommentId {
        let id = mock
            .lock()
            .create(NewComment {
                content: String::from(content),
                parent_id: Some(CommentId(parent)),
            })
            .unwrap()
            .id;
        mock.lock().test_clear_calls();
        id
    }

    fn started(mock: &SharedMock) -> Controller {
        let mut ctl = Controller::new();
        let req = ctl.start();
        block_on(ctl.run(mock, Some(req)));
        mock.lock().test_clear_calls();
        ctl
    }

    fn calls(mock: &SharedMock) -> Vec<Call> {
        mock.lock().test_calls().to_vec()
    }

    fn list_page(page: usize, search: &str) -> Call {
        Call::ListPage {
            page,
            search: String::from(search),
        }
    }

    #[test]
    fn first_page_with_pager() {
        let mock = seeded(25);
        let ctl = started(&mock);
        assert_eq!(ctl.tree().nodes().len(), 10);
        assert_eq!(ctl.pager().map(|p| p.buttons), Some(vec![1, 2, 3]));
        assert_eq!(ctl.surface().error, None);
    }

    #[test]
    fn single_comment_three_pages() {
        // The server may well report more pages than it returns comments for
        struct Fixed;
        #[async_trait::async_trait(?Send)]
        impl Gateway for Fixed {
            async fn list_page(&self, _: usize, _: &str) -> Result<Page, Error> {
                Ok(serde_json::from_str(
                    r#"{"comments": [{"id": 1, "content": "hi", "created_at": "2024-01-01T00:00:00Z", "children": []}], "pages": 3}"#,
                )
                .unwrap())
            }
            async fn list_replies(&self, _: CommentId) -> Result<Vec<Comment>, Error> {
                unreachable!()
            }
            async fn create(&self, _: &NewComment) -> Result<Comment, Error> {
                unreachable!()
            }
            async fn delete(&self, _: CommentId) -> Result<Deleted, Error> {
                unreachable!()
            }
        }

        let mut ctl = Controller::new();
        let req = ctl.start();
        block_on(ctl.run(&Fixed, Some(req)));
        let tree = ctl.tree();
        assert_eq!(tree.nodes().len(), 1);
        assert_eq!(tree.nodes()[0].id, CommentId(1));
        let pager = ctl.pager().expect("three pages need a pager");
        assert_eq!(pager.buttons, vec![1, 2, 3]);
        assert_eq!(pager.current, 1);
    }

    #[test]
    fn page_navigation() {
        let mock = seeded(25);
        let mut ctl = started(&mock);
        block_on(ctl.dispatch(&mock, Intent::LoadPage(3)));
        assert_eq!(calls(&mock), vec![list_page(3, "")]);
        assert_eq!(
            ctl.tree().nodes().iter().map(|n| n.id.0).collect::<Vec<_>>(),
            vec![21, 22, 23, 24, 25]
        );
        assert_eq!(ctl.pager().map(|p| p.current), Some(3));
    }

    #[test]
    fn expanding_replies_replaces_forest() {
        let mock = seeded(3);
        reply(&mock, 2, "first reply");
        reply(&mock, 4, "nested reply");
        let mut ctl = started(&mock);

        block_on(ctl.dispatch(&mock, Intent::ExpandReplies(CommentId(2))));
        assert_eq!(calls(&mock), vec![Call::ListReplies(CommentId(2))]);
        assert_eq!(ctl.store().current_parent(), Some(CommentId(2)));
        let tree = ctl.tree();
        assert_eq!(tree.nodes().len(), 1);
        assert_eq!(tree.nodes()[0].id, CommentId(4));
        assert_eq!(tree.nodes()[0].replies.nodes()[0].id, CommentId(5));
        assert_eq!(ctl.pager(), None);
    }

    #[test]
    fn page_navigation_ignored_on_subtree() {
        let mock = seeded(25);
        let mut ctl = started(&mock);
        block_on(ctl.dispatch(&mock, Intent::ExpandReplies(CommentId(1))));
        mock.lock().test_clear_calls();
        assert_eq!(ctl.handle(Intent::LoadPage(2)), None);
        assert!(calls(&mock).is_empty());
    }

    #[test]
    fn back_to_last_root_page() {
        let mock = seeded(25);
        let mut ctl = started(&mock);
        block_on(ctl.dispatch(&mock, Intent::LoadPage(2)));
        block_on(ctl.dispatch(&mock, Intent::ExpandReplies(CommentId(12))));
        mock.lock().test_clear_calls();
        block_on(ctl.dispatch(&mock, Intent::BackToRoot));
        assert_eq!(calls(&mock), vec![list_page(2, "")]);
        assert_eq!(ctl.store().current_parent(), None);
    }

    #[test]
    fn whitespace_content_never_reaches_server() {
        let mock = seeded(1);
        let mut ctl = started(&mock);
        ctl.handle(Intent::EditContent(String::from("  ")));
        assert_eq!(ctl.handle(Intent::Create), None);
        assert!(calls(&mock).is_empty());
        assert_eq!(
            ctl.surface().error.as_deref(),
            Some("comment content must not be empty")
        );
    }

    #[test]
    fn create_reloads_first_page() {
        let mock = seeded(25);
        let mut ctl = started(&mock);
        block_on(ctl.dispatch(&mock, Intent::LoadPage(3)));
        mock.lock().test_clear_calls();

        block_on(ctl.dispatch(&mock, Intent::EditContent(String::from("  hello  "))));
        block_on(ctl.dispatch(&mock, Intent::Create));
        assert_eq!(
            calls(&mock),
            vec![
                Call::Create(NewComment {
                    content: String::from("hello"),
                    parent_id: None,
                }),
                list_page(1, ""),
            ]
        );
        assert_eq!(ctl.surface().content, "");
        assert_eq!(ctl.pager().map(|p| p.current), Some(1));
    }

    #[test]
    fn viewing_a_subtree_does_not_target_it() {
        let mock = seeded(7);
        let mut ctl = started(&mock);
        block_on(ctl.dispatch(&mock, Intent::ExpandReplies(CommentId(7))));
        mock.lock().test_clear_calls();

        ctl.handle(Intent::EditContent(String::from("not a reply")));
        block_on(ctl.dispatch(&mock, Intent::Create));
        assert_eq!(
            calls(&mock),
            vec![
                Call::Create(NewComment {
                    content: String::from("not a reply"),
                    parent_id: None,
                }),
                Call::ListReplies(CommentId(7)),
            ]
        );
        assert!(ctl.tree().is_placeholder());
    }

    #[test]
    fn marked_target_receives_reply() {
        let mock = seeded(7);
        let mut ctl = started(&mock);
        block_on(ctl.dispatch(&mock, Intent::ExpandReplies(CommentId(7))));
        ctl.handle(Intent::MarkReplyTarget(CommentId(7)));
        assert_eq!(
            ctl.surface().notice.as_deref(),
            Some("Replying to comment #7")
        );
        mock.lock().test_clear_calls();

        ctl.handle(Intent::EditContent(String::from("a reply")));
        block_on(ctl.dispatch(&mock, Intent::Create));
        assert_eq!(
            calls(&mock)[0],
            Call::Create(NewComment {
                content: String::from("a reply"),
                parent_id: Some(CommentId(7)),
            })
        );
        assert_eq!(ctl.tree().nodes()[0].content, "a reply");
        assert_eq!(ctl.store().reply_target(), None);
    }

    #[test]
    fn reply_target_survives_search() {
        let mock = seeded(3);
        let mut ctl = started(&mock);
        ctl.handle(Intent::MarkReplyTarget(CommentId(2)));
        block_on(ctl.dispatch(&mock, Intent::Search(String::from("root"))));
        assert_eq!(ctl.store().reply_target(), Some(CommentId(2)));
    }

    #[test]
    fn declined_delete_sends_nothing() {
        let mock = seeded(3);
        let mut ctl = started(&mock);
        assert_eq!(ctl.handle(Intent::Delete(CommentId(2))), None);
        assert_eq!(ctl.surface().pending_delete, Some(CommentId(2)));
        assert_eq!(ctl.handle(Intent::CancelDelete), None);
        assert_eq!(ctl.surface().pending_delete, None);
        assert_eq!(ctl.handle(Intent::ConfirmDelete), None);
        assert!(calls(&mock).is_empty());
        assert_eq!(ctl.surface().error, None);
    }

    #[test]
    fn confirmed_delete_reloads() {
        let mock = seeded(3);
        reply(&mock, 2, "doomed reply");
        let mut ctl = started(&mock);
        ctl.handle(Intent::Delete(CommentId(2)));
        block_on(ctl.dispatch(&mock, Intent::ConfirmDelete));
        assert_eq!(
            calls(&mock),
            vec![Call::Delete(CommentId(2)), list_page(1, "")]
        );
        assert_eq!(mock.lock().test_num_comments(), 2);
        assert_eq!(
            ctl.tree().nodes().iter().map(|n| n.id.0).collect::<Vec<_>>(),
            vec![1, 3]
        );
    }

    #[test]
    fn delete_in_subtree_reloads_subtree() {
        let mock = seeded(3);
        let doomed = reply(&mock, 2, "doomed reply");
        let kept = reply(&mock, 2, "kept reply");
        let mut ctl = started(&mock);
        block_on(ctl.dispatch(&mock, Intent::ExpandReplies(CommentId(2))));
        mock.lock().test_clear_calls();

        ctl.handle(Intent::Delete(doomed));
        block_on(ctl.dispatch(&mock, Intent::ConfirmDelete));
        assert_eq!(
            calls(&mock),
            vec![Call::Delete(doomed), Call::ListReplies(CommentId(2))]
        );
        assert_eq!(ctl.store().current_parent(), Some(CommentId(2)));
        assert_eq!(
            ctl.tree().nodes().iter().map(|n| n.id).collect::<Vec<_>>(),
            vec![kept]
        );
    }

    #[test]
    fn confirming_delete_clears_stale_error() {
        let mock = seeded(1);
        let mut ctl = started(&mock);
        mock.lock()
            .test_fail_next(Error::Transport(String::from("connection refused")));
        block_on(ctl.dispatch(&mock, Intent::LoadPage(1)));
        assert!(ctl.surface().error.is_some());

        ctl.handle(Intent::Delete(CommentId(1)));
        assert!(ctl.surface().error.is_some());
        let req = ctl.handle(Intent::ConfirmDelete);
        assert_eq!(req, Some(Request::Delete(CommentId(1))));
        assert_eq!(ctl.surface().error, None);
    }

    #[test]
    fn reported_failure_fills_error_slot() {
        let mut ctl = Controller::new();
        ctl.fail(
            "cannot reach the comment service",
            Error::Transport(String::from("page origin is unknown")),
        );
        assert_eq!(
            ctl.surface().error.as_deref(),
            Some("cannot reach the comment service: network error: page origin is unknown")
        );
        assert!(ctl.tree().is_placeholder());
    }

    #[test]
    fn failed_delete_keeps_tree() {
        let mock = seeded(3);
        let mut ctl = started(&mock);
        let before_store = ctl.store().clone();
        let before_text = tree_to_text(&ctl.tree());

        ctl.handle(Intent::Delete(CommentId(5)));
        block_on(ctl.dispatch(&mock, Intent::ConfirmDelete));
        assert_eq!(calls(&mock), vec![Call::Delete(CommentId(5))]);
        let err = ctl.surface().error.clone().expect("delete should have failed");
        assert!(err.contains("404"), "{err}");
        assert_eq!(ctl.store(), &before_store);
        assert_eq!(tree_to_text(&ctl.tree()), before_text);
    }

    #[test]
    fn search_leaves_subtree() {
        let mock = SharedMock::new(MockServer::new());
        for content in ["foo", "bar", "food", "baz", "x", "y", "z", "w", "nine"] {
            mock.lock()
                .create(NewComment {
                    content: String::from(content),
                    parent_id: None,
                })
                .unwrap();
        }
        reply(&mock, 9, "reply to nine");
        let mut ctl = started(&mock);
        block_on(ctl.dispatch(&mock, Intent::ExpandReplies(CommentId(9))));
        mock.lock().test_clear_calls();

        block_on(ctl.dispatch(&mock, Intent::Search(String::from(" foo "))));
        assert_eq!(calls(&mock), vec![list_page(1, "foo")]);
        assert_eq!(ctl.store().current_parent(), None);
        assert_eq!(ctl.surface().search, "foo");
        assert_eq!(
            ctl.tree().nodes().iter().map(|n| n.content.clone()).collect::<Vec<_>>(),
            vec!["foo", "food"]
        );
    }

    #[test]
    fn superseded_load_is_discarded() {
        let mock = seeded(25);
        let mut ctl = started(&mock);
        let slow = ctl.handle(Intent::LoadPage(2)).unwrap();
        let fast = ctl.handle(Intent::LoadPage(3)).unwrap();

        let res = block_on(fast.send(&mock));
        assert_eq!(ctl.resolve(&fast, res), None);
        let res = block_on(slow.send(&mock));
        assert_eq!(ctl.resolve(&slow, res), None);

        assert_eq!(ctl.pager().map(|p| p.current), Some(3));
        assert_eq!(ctl.tree().nodes()[0].id, CommentId(21));
    }

    #[test]
    fn transport_failure_keeps_store() {
        let mock = seeded(3);
        let mut ctl = started(&mock);
        let before = ctl.store().clone();
        mock.lock()
            .test_fail_next(Error::Transport(String::from("connection refused")));
        block_on(ctl.dispatch(&mock, Intent::ExpandReplies(CommentId(1))));
        assert_eq!(ctl.store(), &before);
        assert_eq!(
            ctl.surface().error.as_deref(),
            Some("failed to load replies: network error: connection refused")
        );
    }

    #[test]
    fn new_load_clears_error() {
        let mock = seeded(3);
        let mut ctl = started(&mock);
        ctl.handle(Intent::Create);
        assert!(ctl.surface().error.is_some());
        block_on(ctl.dispatch(&mock, Intent::LoadPage(1)));
        assert_eq!(ctl.surface().error, None);
    }

    #[test]
    fn triggers_bind_to_intents() {
        assert_eq!(
            Intent::from(Trigger::Delete(CommentId(3))),
            Intent::Delete(CommentId(3))
        );
        assert_eq!(
            Intent::from(Trigger::ReplyTo(CommentId(3))),
            Intent::MarkReplyTarget(CommentId(3))
        );
    }
}
