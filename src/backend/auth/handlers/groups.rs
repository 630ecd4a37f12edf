/**
 * Group, Block, and Mute Handlers
 *
 * Relation management against other users: explicit add/remove for the
 * fixed contact groups, and toggles for block and mute. Each operation
 * rewrites the owning user's id-set and reports the resulting state.
 */

use axum::{
    extract::{Path, State},
    Json,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::auth::handlers::types::{
    BlockResponse, GroupUpdateRequest, GroupUpdateResponse, MuteResponse,
};
use crate::backend::auth::users::{self, User};
use crate::backend::error::ApiError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::user::Group;

fn require_pool(app: &AppState) -> Result<&PgPool, ApiError> {
    app.db_pool
        .as_ref()
        .ok_or_else(|| ApiError::internal("database not configured"))
}

async fn require_target(pool: &PgPool, target_id: Uuid, user: &User) -> Result<(), ApiError> {
    if target_id == user.id {
        return Err(ApiError::validation("id", "Cannot target yourself"));
    }
    users::get_user_by_id(pool, target_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    Ok(())
}

/// Toggle membership of a set; returns the new vec and whether the id is
/// now present
fn toggled(ids: &[Uuid], target: Uuid) -> (Vec<Uuid>, bool) {
    if ids.contains(&target) {
        (ids.iter().copied().filter(|id| *id != target).collect(), false)
    } else {
        let mut next = ids.to_vec();
        next.push(target);
        (next, true)
    }
}

/// Add or remove a user from one of the fixed groups
/// (POST /api/auth/groups/{id})
pub async fn update_group_membership(
    State(app): State<AppState>,
    AuthUser(mut user): AuthUser,
    Path(target_id): Path<Uuid>,
    Json(request): Json<GroupUpdateRequest>,
) -> Result<Json<GroupUpdateResponse>, ApiError> {
    let pool = require_pool(&app)?;

    let group = Group::parse(&request.group)
        .ok_or_else(|| ApiError::validation("group", "Unknown group"))?;

    require_target(pool, target_id, &user).await?;

    let ids = user.group_ids(group);
    let present = ids.contains(&target_id);

    let (next, message) = match request.action.as_str() {
        "add" if present => (ids.clone(), format!("Already in {}", group.as_str())),
        "add" => {
            let mut next = ids.clone();
            next.push(target_id);
            (next, format!("Added to {}", group.as_str()))
        }
        "remove" => (
            ids.iter().copied().filter(|id| *id != target_id).collect(),
            format!("Removed from {}", group.as_str()),
        ),
        _ => {
            return Err(ApiError::validation(
                "action",
                "Action must be add or remove",
            ))
        }
    };

    users::set_group_ids(pool, user.id, group, &next).await?;

    match group {
        Group::Friends => user.friend_ids = next,
        Group::Work => user.work_ids = next,
        Group::Family => user.family_ids = next,
    }

    Ok(Json(GroupUpdateResponse {
        message,
        flags: user.flags_for(target_id),
    }))
}

/// Toggle block on a user (POST /api/auth/block/{id})
pub async fn toggle_block(
    State(app): State<AppState>,
    AuthUser(user): AuthUser,
    Path(target_id): Path<Uuid>,
) -> Result<Json<BlockResponse>, ApiError> {
    let pool = require_pool(&app)?;
    require_target(pool, target_id, &user).await?;

    let (next, now_blocked) = toggled(&user.blocked_ids, target_id);
    users::set_blocked_ids(pool, user.id, &next).await?;

    let message = if now_blocked {
        "User blocked"
    } else {
        "User unblocked"
    };

    Ok(Json(BlockResponse {
        message: message.to_string(),
        blocked_users: next,
    }))
}

/// Toggle mute on a user (POST /api/auth/mute/{id})
pub async fn toggle_mute(
    State(app): State<AppState>,
    AuthUser(user): AuthUser,
    Path(target_id): Path<Uuid>,
) -> Result<Json<MuteResponse>, ApiError> {
    let pool = require_pool(&app)?;
    require_target(pool, target_id, &user).await?;

    let (next, now_muted) = toggled(&user.muted_ids, target_id);
    users::set_muted_ids(pool, user.id, &next).await?;

    let message = if now_muted {
        "Notifications muted"
    } else {
        "Notifications unmuted"
    };

    Ok(Json(MuteResponse {
        message: message.to_string(),
        muted_users: next,
    }))
}
