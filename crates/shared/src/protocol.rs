use serde::{Deserialize, Serialize};

use crate::domain::FollowState;

/// `status` value marking an accepted comment submission.
pub const COMMENT_STATUS_OK: &str = "ok";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowStatus {
    Followed,
    Unfollowed,
}

impl FollowStatus {
    pub fn follow_state(self) -> FollowState {
        match self {
            FollowStatus::Followed => FollowState::Following,
            FollowStatus::Unfollowed => FollowState::NotFollowing,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowToggleResponse {
    pub status: FollowStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followers_count: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostViewResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
}

/// One rendered comment. `created_at` arrives pre-formatted by the server
/// and is displayed verbatim, never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentPayload {
    pub author: String,
    pub created_at: String,
    pub body: String,
}

/// Loose shape of the add-comment endpoint: accepted submissions carry
/// `status == "ok"` plus `comment` and `comments_count`, rejections carry
/// an `error` string (with or without a `status` field).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddCommentResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<CommentPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Body of a non-2xx rejection from any of the endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RejectionBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
