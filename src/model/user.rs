use serde::{Deserialize, Serialize};

use crate::model::discord::cdn_image_url;

/// Authenticated Discord user as stored in the session.
///
/// Holds the OAuth access token alongside the profile, so it must never be handed to a view
/// directly. Use [`UserDto`] for rendering.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SessionUser {
    /// Discord user ID.
    pub id: String,
    pub username: String,
    /// Avatar hash, `a_` prefixed when animated.
    pub avatar: Option<String>,
    /// OAuth2 bearer token for Discord REST calls on behalf of this user.
    pub access_token: String,
}

impl SessionUser {
    pub fn avatar_url(&self) -> Option<String> {
        cdn_image_url("avatars", &self.id, self.avatar.as_deref())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserDto {
    pub id: String,
    pub username: String,
    pub avatar_url: Option<String>,
}

impl From<&SessionUser> for UserDto {
    fn from(user: &SessionUser) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            avatar_url: user.avatar_url(),
        }
    }
}
