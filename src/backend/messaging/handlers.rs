//! Messaging HTTP Handlers
//!
//! REST surface of the message service: the user directory, conversation
//! fetch (with its read-marking side effect), and message creation.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::auth::users;
use crate::backend::error::ApiError;
use crate::backend::messaging::{db, status};
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::message::{Message, MessagePayload};
use crate::shared::user::DirectoryUser;

/// Body of `POST /api/message/{receiver_id}`: one of text or image
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub text: Option<String>,
    pub image: Option<String>,
}

impl SendMessageRequest {
    /// Enforce the text-XOR-image invariant at the validation layer
    fn into_payload(self) -> Result<MessagePayload, ApiError> {
        match (self.text, self.image) {
            (Some(text), None) if !text.trim().is_empty() => Ok(MessagePayload::Text { text }),
            (None, Some(image)) if !image.trim().is_empty() => {
                Ok(MessagePayload::Image { image })
            }
            (Some(_), Some(_)) => Err(ApiError::validation(
                "text",
                "Message must carry either text or an image, not both",
            )),
            _ => Err(ApiError::validation(
                "text",
                "Message text or image is required",
            )),
        }
    }
}

fn require_pool(pool: &Option<PgPool>) -> Result<&PgPool, ApiError> {
    pool.as_ref()
        .ok_or_else(|| ApiError::internal("database not configured"))
}

/// Get all users except self, annotated with the viewer's relation flags
///
/// The response is marked non-cacheable so stale friend/block state never
/// lingers in an HTTP cache.
pub async fn get_users(
    State(app): State<AppState>,
    AuthUser(current_user): AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let pool = require_pool(&app.db_pool)?;

    let users = users::list_directory(pool, current_user.id).await?;

    let directory: Vec<DirectoryUser> = users
        .into_iter()
        .map(|user| DirectoryUser {
            flags: current_user.flags_for(user.id),
            profile: user.profile(),
        })
        .collect();

    let headers = [
        (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
        (header::PRAGMA, "no-cache"),
        (header::EXPIRES, "0"),
    ];

    Ok((headers, Json(directory)))
}

/// Get the conversation with a counterpart
///
/// As a side effect, every message the counterpart sent that is not yet
/// `read` is transitioned to `read` (and the counterpart notified) before
/// the conversation is returned, so the response already reflects the
/// transition. Fetching is the authoritative acknowledgment; there is no
/// separate mark-read endpoint.
pub async fn get_messages(
    State(app): State<AppState>,
    AuthUser(current_user): AuthUser,
    Path(counterpart_id): Path<Uuid>,
) -> Result<Json<Vec<Message>>, ApiError> {
    let pool = require_pool(&app.db_pool)?;

    users::get_user_by_id(pool, counterpart_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    status::mark_conversation_read(pool, &app.presence, current_user.id, counterpart_id).await?;

    let messages = db::conversation(pool, current_user.id, counterpart_id).await?;

    Ok(Json(messages))
}

/// Send a message to a receiver
///
/// The message is persisted as `sent`; when the receiver has a live push
/// connection it is pushed immediately and persisted as `delivered`, and
/// the sender is notified of the transition. Response status reflects
/// whichever state the message ended up in.
pub async fn send_message(
    State(app): State<AppState>,
    AuthUser(current_user): AuthUser,
    Path(receiver_id): Path<Uuid>,
    Json(request): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    let pool = require_pool(&app.db_pool)?;

    let payload = request.into_payload()?;

    if receiver_id == current_user.id {
        return Err(ApiError::validation(
            "receiverId",
            "Cannot message yourself",
        ));
    }

    let receiver = users::get_user_by_id(pool, receiver_id)
        .await?
        .filter(|user| user.active)
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    if current_user.has_blocked(receiver.id) {
        return Err(ApiError::Forbidden(
            "You have blocked this user".to_string(),
        ));
    }
    if receiver.has_blocked(current_user.id) {
        return Err(ApiError::Forbidden(
            "You cannot message this user".to_string(),
        ));
    }

    let mut message = db::insert_message(pool, current_user.id, receiver.id, &payload).await?;

    status::deliver_if_online(pool, &app.presence, &mut message).await?;

    tracing::debug!(
        "Message {} from {} to {} created as {:?}",
        message.id,
        message.sender_id,
        message.receiver_id,
        message.status
    );

    Ok((StatusCode::CREATED, Json(message)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_payload_text_only() {
        let request = SendMessageRequest {
            text: Some("hi".to_string()),
            image: None,
        };
        assert_eq!(
            request.into_payload().unwrap(),
            MessagePayload::Text {
                text: "hi".to_string()
            }
        );
    }

    #[test]
    fn test_payload_image_only() {
        let request = SendMessageRequest {
            text: None,
            image: Some("img123".to_string()),
        };
        assert_eq!(
            request.into_payload().unwrap(),
            MessagePayload::Image {
                image: "img123".to_string()
            }
        );
    }

    #[test]
    fn test_payload_rejects_both_and_neither() {
        let both = SendMessageRequest {
            text: Some("hi".to_string()),
            image: Some("img".to_string()),
        };
        assert!(both.into_payload().is_err());

        let neither = SendMessageRequest {
            text: None,
            image: None,
        };
        assert!(neither.into_payload().is_err());

        let blank = SendMessageRequest {
            text: Some("   ".to_string()),
            image: None,
        };
        assert!(blank.into_payload().is_err());
    }
}
