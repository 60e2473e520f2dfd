mod controller;
pub use controller::{Controller, Intent, Outcome, Request, Surface, Ticket};

mod http;
pub use http::HttpGateway;

pub mod render;
pub use render::{Fragment, Node, Pager, Trigger};

mod store;
pub use store::{CommentStore, ViewKind, ViewState};

pub mod text;

#[cfg(test)]
mod test_util;

pub mod api {
    pub use twig_api::*;
}
