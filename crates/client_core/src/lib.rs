//! Page-interaction controller: wires the follow toggle, view counter, and
//! comment form of a server-rendered blog page to the AJAX endpoints.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use shared::{
    domain::{FollowState, PostSlug, Username},
    protocol::CommentPayload,
};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub mod api;
pub mod cookie;
pub mod error;

pub use api::{CommentOutcome, PageApi, PageApiClient, GENERIC_COMMENT_ERROR};
pub use cookie::{cookie_value, CookieSource, StaticCookies};
pub use error::ClientError;

/// A control whose label tracks the follow relationship.
pub trait FollowControl: Send + Sync {
    fn set_state(&self, state: FollowState);
}

/// A node whose text content can be replaced wholesale.
pub trait TextSurface: Send + Sync {
    fn set_text(&self, text: &str);
}

/// The comment input field: read at submit time, cleared on success only.
pub trait CommentInput: Send + Sync {
    fn body(&self) -> String;
    fn clear(&self);
}

/// Append-only comment list. Receives structured payloads, never markup;
/// surfaces must build their rendering structurally.
pub trait CommentList: Send + Sync {
    fn append(&self, comment: &CommentPayload);
}

/// Blocking user notification for server-side comment rejections.
pub trait AlertSink: Send + Sync {
    fn alert(&self, message: &str);
}

/// No-op surface for optional fixtures the page does not carry.
pub struct MissingTextSurface;

impl TextSurface for MissingTextSurface {
    fn set_text(&self, _text: &str) {}
}

pub struct MissingAlertSink;

impl AlertSink for MissingAlertSink {
    fn alert(&self, message: &str) {
        warn!("comment rejected with no alert surface bound: {message}");
    }
}

/// Follow button plus the author it targets; the follower-count display is
/// optional on the page and defaults to a no-op.
pub struct FollowRegion {
    pub control: Arc<dyn FollowControl>,
    pub username: Username,
    pub follower_count: Arc<dyn TextSurface>,
}

impl FollowRegion {
    pub fn new(control: Arc<dyn FollowControl>, username: Username) -> Self {
        Self {
            control,
            username,
            follower_count: Arc::new(MissingTextSurface),
        }
    }

    pub fn with_follower_count(mut self, surface: Arc<dyn TextSurface>) -> Self {
        self.follower_count = surface;
        self
    }
}

/// Comment form fixtures. Input and list are required when the region
/// exists; the count display and alert sink degrade to defaults.
pub struct CommentRegion {
    pub input: Arc<dyn CommentInput>,
    pub list: Arc<dyn CommentList>,
    pub count: Arc<dyn TextSurface>,
    pub alerts: Arc<dyn AlertSink>,
}

impl CommentRegion {
    pub fn new(input: Arc<dyn CommentInput>, list: Arc<dyn CommentList>) -> Self {
        Self {
            input,
            list,
            count: Arc::new(MissingTextSurface),
            alerts: Arc::new(MissingAlertSink),
        }
    }

    pub fn with_count(mut self, surface: Arc<dyn TextSurface>) -> Self {
        self.count = surface;
        self
    }

    pub fn with_alerts(mut self, alerts: Arc<dyn AlertSink>) -> Self {
        self.alerts = alerts;
        self
    }
}

/// Page identity, injected explicitly instead of read from an ambient
/// global. Pages without a post (home, search) leave `post_slug` empty.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub post_slug: Option<PostSlug>,
}

/// States which optional interactive regions the rendered page carries.
/// Absent regions make the matching operations no-ops.
#[derive(Default)]
pub struct PageBindings {
    pub follow: Option<FollowRegion>,
    pub view_counter: Option<Arc<dyn TextSurface>>,
    pub comments: Option<CommentRegion>,
}

/// Installed once per page session. Each operation is an independent
/// fire-and-forget task; the returned handle is only for callers that want
/// to join.
pub struct PageInteractionController {
    api: Arc<dyn PageApi>,
    context: PageContext,
    bindings: PageBindings,
    follow_inflight: AtomicBool,
}

impl PageInteractionController {
    pub fn new(api: Arc<dyn PageApi>, context: PageContext, bindings: PageBindings) -> Arc<Self> {
        Arc::new(Self {
            api,
            context,
            bindings,
            follow_inflight: AtomicBool::new(false),
        })
    }

    /// View increment, fired once per page session when a post is under
    /// view. No client-side de-duplication; the server owns idempotence.
    pub fn on_page_load(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        let slug = self.context.post_slug.clone()?;
        let client = Arc::clone(self);
        Some(tokio::spawn(async move {
            match client.api.record_view(&slug).await {
                Ok(response) => {
                    if let (Some(surface), Some(views)) =
                        (client.bindings.view_counter.as_ref(), response.views)
                    {
                        surface.set_text(&format!("Views: {views}"));
                    }
                }
                Err(err) => warn!("view increment failed for {slug}: {err}"),
            }
        }))
    }

    /// Follow toggle. Clicks landing while a toggle is in flight are
    /// dropped, so out-of-order responses cannot clobber the label.
    pub fn on_follow_click(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        let region = self.bindings.follow.as_ref()?;
        if self.follow_inflight.swap(true, Ordering::SeqCst) {
            debug!("follow toggle already in flight; dropping click");
            return None;
        }
        let username = region.username.clone();
        let client = Arc::clone(self);
        Some(tokio::spawn(async move {
            let result = client.api.toggle_follow(&username).await;
            client.follow_inflight.store(false, Ordering::SeqCst);
            let Some(region) = client.bindings.follow.as_ref() else {
                return;
            };
            match result {
                Ok(response) => {
                    region.control.set_state(response.status.follow_state());
                    // Server count is authoritative; rendered verbatim.
                    if let Some(count) = response.followers_count {
                        region.follower_count.set_text(&count.to_string());
                    }
                }
                Err(err) => warn!("follow toggle failed for {username}: {err}"),
            }
        }))
    }

    /// Comment submission. The body is read from the bound input at submit
    /// time; the input is cleared on acceptance only.
    pub fn on_comment_submit(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        let (region, slug) = match (
            self.bindings.comments.as_ref(),
            self.context.post_slug.clone(),
        ) {
            (Some(region), Some(slug)) => (region, slug),
            _ => return None,
        };
        let body = region.input.body();
        let client = Arc::clone(self);
        Some(tokio::spawn(async move {
            let result = client.api.add_comment(&slug, &body).await;
            let Some(region) = client.bindings.comments.as_ref() else {
                return;
            };
            match result {
                Ok(CommentOutcome::Posted {
                    comment,
                    comments_count,
                }) => {
                    region.list.append(&comment);
                    if let Some(count) = comments_count {
                        region.count.set_text(&count.to_string());
                    }
                    region.input.clear();
                }
                Ok(CommentOutcome::Rejected { message }) => {
                    region.alerts.alert(&message);
                }
                Err(err) => warn!("comment submission failed for {slug}: {err}"),
            }
        }))
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
