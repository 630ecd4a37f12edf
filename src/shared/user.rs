//! User-Facing Account Types
//!
//! Public views of an account as returned by the REST API. The stored user
//! record (with credential hash and id-sets) lives in `backend::auth::users`;
//! these types carry only the fields that are safe to hand to clients.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed set of contact groups a counterpart can be placed in.
///
/// Group membership is a closed enumeration, so annotation flags are a
/// fixed field per group rather than dynamically named keys.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Group {
    Friends,
    Work,
    Family,
}

impl Group {
    /// All groups, in display order
    pub const ALL: [Group; 3] = [Group::Friends, Group::Work, Group::Family];

    pub fn as_str(&self) -> &'static str {
        match self {
            Group::Friends => "friends",
            Group::Work => "work",
            Group::Family => "family",
        }
    }

    /// Parse a group tag from a request parameter
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "friends" => Some(Group::Friends),
            "work" => Some(Group::Work),
            "family" => Some(Group::Family),
            _ => None,
        }
    }
}

/// Public profile of an account (no credential or moderation data)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Display name
    pub full_name: String,
    /// Email address
    pub email: String,
}

/// Per-counterpart annotation flags, one fixed field per relation
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RelationFlags {
    pub is_friend: bool,
    pub is_work: bool,
    pub is_family: bool,
    pub is_muted: bool,
    pub is_blocked: bool,
}

impl RelationFlags {
    /// Read the flag for a given group
    pub fn in_group(&self, group: Group) -> bool {
        match group {
            Group::Friends => self.is_friend,
            Group::Work => self.is_work,
            Group::Family => self.is_family,
        }
    }
}

/// A directory entry: another user's profile annotated with the viewer's
/// relation flags. This is the element type of `GET /api/message/users`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryUser {
    #[serde(flatten)]
    pub profile: UserProfile,
    #[serde(flatten)]
    pub flags: RelationFlags,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_parse_roundtrip() {
        for group in Group::ALL {
            assert_eq!(Group::parse(group.as_str()), Some(group));
        }
        assert_eq!(Group::parse("isFriends"), None);
        assert_eq!(Group::parse(""), None);
    }

    #[test]
    fn test_in_group_reads_matching_flag() {
        let flags = RelationFlags {
            is_work: true,
            ..Default::default()
        };
        assert!(flags.in_group(Group::Work));
        assert!(!flags.in_group(Group::Friends));
        assert!(!flags.in_group(Group::Family));
    }

    #[test]
    fn test_directory_user_flattens_flags() {
        let entry = DirectoryUser {
            profile: UserProfile {
                id: Uuid::new_v4(),
                full_name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            },
            flags: RelationFlags {
                is_friend: true,
                ..Default::default()
            },
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["fullName"], "Ada");
        assert_eq!(json["isFriend"], true);
        assert_eq!(json["isBlocked"], false);
    }
}
