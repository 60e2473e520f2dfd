use async_trait::async_trait;

use crate::api::{
    self, Comment, CommentId, Deleted, Error, Gateway, ListParams, NewComment, Page,
};

/// Gateway talking to a comment service over HTTP
#[derive(Clone, Debug)]
pub struct HttpGateway {
    client: reqwest::Client,
    host: String,
}

impl HttpGateway {
    /// `host` is the base URL of the service, eg. `http://localhost:8080`
    pub fn new(host: impl Into<String>) -> HttpGateway {
        HttpGateway::with_client(reqwest::Client::new(), host)
    }

    pub fn with_client(client: reqwest::Client, host: impl Into<String>) -> HttpGateway {
        let host = host.into();
        HttpGateway {
            client,
            host: String::from(host.trim_end_matches('/')),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.host, path)
    }

    async fn list(&self, params: &ListParams) -> Result<Page, Error> {
        parse(
            self.client
                .get(self.url(api::COMMENTS_PATH))
                .query(params)
                .send()
                .await,
        )
        .await
    }
}

fn transport(err: reqwest::Error) -> Error {
    Error::Transport(err.to_string())
}

/// Any non-2xx answer is an error whatever its body, and a 2xx answer must
/// decode entirely for the result to be used
async fn parse<R>(resp: Result<reqwest::Response, reqwest::Error>) -> Result<R, Error>
where
    R: serde::de::DeserializeOwned,
{
    let resp = resp.map_err(transport)?;
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let err = Error::api(status, &body);
        tracing::debug!(%err, "comment service returned an error");
        return Err(err);
    }
    let body = resp.bytes().await.map_err(transport)?;
    decode(&body)
}

/// Reply chains may nest deeper than serde_json's default recursion limit
fn decode<R>(body: &[u8]) -> Result<R, Error>
where
    R: serde::de::DeserializeOwned,
{
    let mut de = serde_json::Deserializer::from_slice(body);
    de.disable_recursion_limit();
    #[cfg(not(target_arch = "wasm32"))]
    let res: Result<R, _> =
        serde::Deserialize::deserialize(serde_stacker::Deserializer::new(&mut de));
    #[cfg(target_arch = "wasm32")]
    let res: Result<R, _> = serde::Deserialize::deserialize(&mut de);
    res.and_then(|r| de.end().map(|()| r))
        .map_err(|e| Error::Transport(format!("error decoding response body: {e}")))
}

#[async_trait(?Send)]
impl Gateway for HttpGateway {
    async fn list_page(&self, page: usize, search: &str) -> Result<Page, Error> {
        let page = page.max(1);
        Ok(self
            .list(&ListParams::root_page(page, search))
            .await?
            .with_defaults(page))
    }

    async fn list_replies(&self, parent: CommentId) -> Result<Vec<Comment>, Error> {
        Ok(self.list(&ListParams::replies(parent)).await?.comments)
    }

    async fn create(&self, comment: &NewComment) -> Result<Comment, Error> {
        parse(
            self.client
                .post(self.url(api::COMMENTS_PATH))
                .json(comment)
                .send()
                .await,
        )
        .await
    }

    async fn delete(&self, id: CommentId) -> Result<Deleted, Error> {
        parse(
            self.client
                .delete(self.url(&api::comment_path(id)))
                .send()
                .await,
        )
        .await
    }
}
