mod app;
pub use app::{App, AppMsg};

mod comment_tree;
pub use comment_tree::CommentTree;

mod composer;
pub use composer::Composer;

mod confirm_delete;
pub use confirm_delete::ConfirmDelete;

mod error_banner;
pub use error_banner::ErrorBanner;

mod pager;
pub use pager::PageSelector;

mod search_bar;
pub use search_bar::SearchBar;
