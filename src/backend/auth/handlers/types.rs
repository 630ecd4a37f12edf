/**
 * Authentication Handler Types
 *
 * Request and response bodies for the account endpoints. Public user data
 * is returned as `shared::user::UserProfile`; these types cover the rest.
 */

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::user::RelationFlags;

/// Sign up request
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    /// Display name
    pub full_name: String,
    /// Email address
    pub email: String,
    /// Plain password (hashed before storage)
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Profile update request (PUT /api/auth/profile)
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub full_name: String,
}

/// Credentials update request (PUT /api/auth/credentials)
///
/// The current password is always required; at least one of the new
/// values must be present.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCredentialsRequest {
    pub current_password: String,
    #[serde(default)]
    pub new_email: Option<String>,
    #[serde(default)]
    pub new_password: Option<String>,
}

/// Group membership update request (POST /api/auth/groups/{id})
#[derive(Debug, Deserialize, Serialize)]
pub struct GroupUpdateRequest {
    /// Group tag: friends, work, or family
    pub group: String,
    /// "add" or "remove"
    pub action: String,
}

/// Simple acknowledgment body
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Group update response: acknowledgment plus the viewer's updated
/// relation flags for the target user
#[derive(Debug, Serialize, Deserialize)]
pub struct GroupUpdateResponse {
    pub message: String,
    pub flags: RelationFlags,
}

/// Block toggle response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockResponse {
    pub message: String,
    /// Full blocked set after the toggle
    pub blocked_users: Vec<Uuid>,
}

/// Mute toggle response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MuteResponse {
    pub message: String,
    /// Full muted set after the toggle
    pub muted_users: Vec<Uuid>,
}
