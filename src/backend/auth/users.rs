/**
 * User Model and Database Operations
 *
 * The stored account record and its queries. Accounts are created
 * unverified at signup and are never hard-deleted: deactivation flips the
 * `active` flag. Relation sets (groups, mutes, blocks) are stored as uuid
 * arrays on the user row and rewritten wholesale by the toggle handlers.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::shared::user::{Group, RelationFlags, UserProfile};

/// User struct representing an account in the database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Display name
    pub full_name: String,
    /// Email address (unique)
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Whether the email address has been verified
    pub verified: bool,
    /// Outstanding email verification token, cleared on verification
    pub verification_token: Option<String>,
    /// Soft-deactivation flag; inactive accounts cannot log in
    pub active: bool,
    /// Friend set
    pub friend_ids: Vec<Uuid>,
    /// Work group set
    pub work_ids: Vec<Uuid>,
    /// Family group set
    pub family_ids: Vec<Uuid>,
    /// Users whose notifications are muted
    pub muted_ids: Vec<Uuid>,
    /// Users this account has blocked
    pub blocked_ids: Vec<Uuid>,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Public view of this account
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            full_name: self.full_name.clone(),
            email: self.email.clone(),
        }
    }

    /// The id-set backing a group
    pub fn group_ids(&self, group: Group) -> &Vec<Uuid> {
        match group {
            Group::Friends => &self.friend_ids,
            Group::Work => &self.work_ids,
            Group::Family => &self.family_ids,
        }
    }

    /// How this account relates to `other`, as directory annotation flags
    pub fn flags_for(&self, other: Uuid) -> RelationFlags {
        RelationFlags {
            is_friend: self.friend_ids.contains(&other),
            is_work: self.work_ids.contains(&other),
            is_family: self.family_ids.contains(&other),
            is_muted: self.muted_ids.contains(&other),
            is_blocked: self.blocked_ids.contains(&other),
        }
    }

    /// Whether this account has blocked `other`
    pub fn has_blocked(&self, other: Uuid) -> bool {
        self.blocked_ids.contains(&other)
    }
}

const USER_COLUMNS: &str = "id, full_name, email, password_hash, verified, verification_token, \
     active, friend_ids, work_ids, family_ids, muted_ids, blocked_ids, created_at, updated_at";

/// Create a new (unverified) user
pub async fn create_user(
    pool: &PgPool,
    full_name: String,
    email: String,
    password_hash: String,
    verification_token: String,
) -> Result<User, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (id, full_name, email, password_hash, verified, verification_token, active, created_at, updated_at)
        VALUES ($1, $2, $3, $4, FALSE, $5, TRUE, $6, $6)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&full_name)
    .bind(&email)
    .bind(&password_hash)
    .bind(&verification_token)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Get user by email
pub async fn get_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        SELECT {USER_COLUMNS}
        FROM users
        WHERE email = $1
        "#
    ))
    .bind(email)
    .fetch_optional(pool)
    .await
}

/// Get user by ID
pub async fn get_user_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        SELECT {USER_COLUMNS}
        FROM users
        WHERE id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Mark the account holding `token` as verified.
///
/// Returns the updated user, or `None` when no account carries the token
/// (already verified, or the token never existed).
pub async fn verify_by_token(pool: &PgPool, token: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users
        SET verified = TRUE, verification_token = NULL, updated_at = $1
        WHERE verification_token = $2
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(Utc::now())
    .bind(token)
    .fetch_optional(pool)
    .await
}

/// Update the display name
pub async fn update_full_name(
    pool: &PgPool,
    user_id: Uuid,
    full_name: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users
        SET full_name = $1, updated_at = $2
        WHERE id = $3
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(full_name)
    .bind(Utc::now())
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// Replace email and/or password hash
pub async fn update_credentials(
    pool: &PgPool,
    user_id: Uuid,
    email: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users
        SET email = $1, password_hash = $2, updated_at = $3
        WHERE id = $4
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(email)
    .bind(password_hash)
    .bind(Utc::now())
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// Soft-deactivate an account
pub async fn deactivate(pool: &PgPool, user_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE users
        SET active = FALSE, updated_at = $1
        WHERE id = $2
        "#,
    )
    .bind(Utc::now())
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Rewrite one group's id-set
pub async fn set_group_ids(
    pool: &PgPool,
    user_id: Uuid,
    group: Group,
    ids: &[Uuid],
) -> Result<(), sqlx::Error> {
    let column = match group {
        Group::Friends => "friend_ids",
        Group::Work => "work_ids",
        Group::Family => "family_ids",
    };

    sqlx::query(&format!(
        r#"
        UPDATE users
        SET {column} = $1, updated_at = $2
        WHERE id = $3
        "#
    ))
    .bind(ids)
    .bind(Utc::now())
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Rewrite the muted id-set
pub async fn set_muted_ids(pool: &PgPool, user_id: Uuid, ids: &[Uuid]) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE users
        SET muted_ids = $1, updated_at = $2
        WHERE id = $3
        "#,
    )
    .bind(ids)
    .bind(Utc::now())
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Rewrite the blocked id-set
pub async fn set_blocked_ids(
    pool: &PgPool,
    user_id: Uuid,
    ids: &[Uuid],
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE users
        SET blocked_ids = $1, updated_at = $2
        WHERE id = $3
        "#,
    )
    .bind(ids)
    .bind(Utc::now())
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// All active users except `excluding`, for the directory listing
pub async fn list_directory(pool: &PgPool, excluding: Uuid) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        SELECT {USER_COLUMNS}
        FROM users
        WHERE id <> $1 AND active = TRUE
        ORDER BY full_name ASC
        "#
    ))
    .bind(excluding)
    .fetch_all(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "$2b$10$hash".to_string(),
            verified: true,
            verification_token: None,
            active: true,
            friend_ids: vec![],
            work_ids: vec![],
            family_ids: vec![],
            muted_ids: vec![],
            blocked_ids: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_profile_drops_sensitive_fields() {
        let user = sample_user();
        let profile = user.profile();
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "ada@example.com");
    }

    #[test]
    fn test_flags_for_counterpart() {
        let mut user = sample_user();
        let other = Uuid::new_v4();
        user.friend_ids.push(other);
        user.muted_ids.push(other);

        let flags = user.flags_for(other);
        assert!(flags.is_friend);
        assert!(flags.is_muted);
        assert!(!flags.is_blocked);
        assert!(!flags.is_work);
    }

    #[test]
    fn test_group_ids_selects_matching_set() {
        let mut user = sample_user();
        let colleague = Uuid::new_v4();
        user.work_ids.push(colleague);

        assert!(user.group_ids(Group::Work).contains(&colleague));
        assert!(!user.group_ids(Group::Friends).contains(&colleague));
    }
}
