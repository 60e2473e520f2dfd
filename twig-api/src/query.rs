use crate::{CommentId, PAGE_SIZE};

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Query string of `GET /comments`
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ListParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortOrder>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<CommentId>,
}

impl ListParams {
    /// Root listing, always ascending by creation date with the fixed page size
    pub fn root_page(page: usize, search: &str) -> ListParams {
        let search = search.trim();
        ListParams {
            page: Some(page),
            limit: Some(PAGE_SIZE),
            sort: Some(SortOrder::Asc),
            search: (!search.is_empty()).then(|| String::from(search)),
            parent: None,
        }
    }

    pub fn replies(parent: CommentId) -> ListParams {
        ListParams {
            parent: Some(parent),
            ..ListParams::default()
        }
    }

    pub fn page_or_default(&self) -> usize {
        self.page.filter(|p| *p >= 1).unwrap_or(1)
    }

    pub fn limit_or_default(&self) -> usize {
        self.limit.filter(|l| *l >= 1).unwrap_or(PAGE_SIZE)
    }
}
