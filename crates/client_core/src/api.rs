//! HTTP client for the blog's AJAX endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::{
    domain::{PostSlug, Username},
    error::{ApiError, ErrorCode},
    protocol::{
        AddCommentResponse, CommentPayload, FollowToggleResponse, PostViewResponse, RejectionBody,
        COMMENT_STATUS_OK,
    },
};
use tracing::{debug, warn};
use url::Url;

use crate::{cookie, cookie::CookieSource, error::ClientError};

pub const CSRF_HEADER: &str = "X-CSRFToken";
pub const CSRF_COOKIE: &str = "csrftoken";

/// Fallback alert text when the server rejects a comment without a reason.
pub const GENERIC_COMMENT_ERROR: &str = "Error posting comment";

/// Application-level outcome of a comment submission. A rejection is a
/// normal outcome (the server said no), not a transport failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentOutcome {
    Posted {
        comment: CommentPayload,
        comments_count: Option<u64>,
    },
    Rejected {
        message: String,
    },
}

/// Seam between the page controller and the transport.
#[async_trait]
pub trait PageApi: Send + Sync {
    async fn toggle_follow(&self, username: &Username)
        -> Result<FollowToggleResponse, ClientError>;
    async fn record_view(&self, slug: &PostSlug) -> Result<PostViewResponse, ClientError>;
    async fn add_comment(&self, slug: &PostSlug, body: &str)
        -> Result<CommentOutcome, ClientError>;
}

pub struct PageApiClient {
    http: Client,
    base_url: Url,
    cookies: Arc<dyn CookieSource>,
}

impl PageApiClient {
    pub fn new(base_url: &str, cookies: Arc<dyn CookieSource>) -> Result<Self, ClientError> {
        let parsed = Url::parse(base_url)
            .map_err(|_| ClientError::InvalidBaseUrl(base_url.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            http: Client::new(),
            base_url: parsed,
            cookies,
        })
    }

    /// Form-urlencoded POST with the CSRF header. The token is read from the
    /// cookie string freshly per request, never cached.
    async fn post_form(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<reqwest::Response, ClientError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|_| ClientError::InvalidBaseUrl(format!("{}{path}", self.base_url)))?;
        let mut request = self.http.post(url).form(form);
        match cookie::cookie_value(&self.cookies.cookies(), CSRF_COOKIE) {
            Some(token) => request = request.header(CSRF_HEADER, token),
            None => warn!("no {CSRF_COOKIE} cookie available; sending without {CSRF_HEADER}"),
        }
        Ok(request.send().await?)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            let body: RejectionBody = serde_json::from_str(&text).unwrap_or_default();
            return Err(ClientError::Api(ApiError::new(
                ErrorCode::from_http_status(status.as_u16()),
                body.error
                    .unwrap_or_else(|| format!("request failed with status {status}")),
            )));
        }
        serde_json::from_str(&text).map_err(ClientError::Decode)
    }
}

#[async_trait]
impl PageApi for PageApiClient {
    async fn toggle_follow(
        &self,
        username: &Username,
    ) -> Result<FollowToggleResponse, ClientError> {
        debug!("toggling follow for {username}");
        let response = self
            .post_form("/ajax/toggle-follow/", &[("username", username.as_str())])
            .await?;
        Self::decode(response).await
    }

    async fn record_view(&self, slug: &PostSlug) -> Result<PostViewResponse, ClientError> {
        let response = self
            .post_form("/ajax/post-view/", &[("slug", slug.as_str())])
            .await?;
        Self::decode(response).await
    }

    async fn add_comment(
        &self,
        slug: &PostSlug,
        body: &str,
    ) -> Result<CommentOutcome, ClientError> {
        let response = self
            .post_form(&format!("/ajax/add-comment/{slug}/"), &[("body", body)])
            .await?;
        // Rejections arrive both as 400s with an `error` body and as 2xx
        // bodies with `status != "ok"`; decode the body either way.
        let text = response.text().await?;
        let payload: AddCommentResponse =
            serde_json::from_str(&text).map_err(ClientError::Decode)?;
        Ok(interpret_comment_response(payload))
    }
}

fn interpret_comment_response(payload: AddCommentResponse) -> CommentOutcome {
    match payload {
        AddCommentResponse {
            status: Some(status),
            comment: Some(comment),
            comments_count,
            ..
        } if status == COMMENT_STATUS_OK => CommentOutcome::Posted {
            comment,
            comments_count,
        },
        AddCommentResponse { error, .. } => CommentOutcome::Rejected {
            message: error.unwrap_or_else(|| GENERIC_COMMENT_ERROR.to_string()),
        },
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
