use serde_json::{json, Value};

/// Creates a `GET /users/@me` payload for an account without a legacy discriminator.
pub fn create_discord_user(id: &str, username: &str, avatar: Option<&str>) -> Value {
    json!({
        "id": id,
        "username": username,
        "discriminator": "0",
        "global_name": username,
        "avatar": avatar,
        "bot": false,
        "banner": null,
        "accent_color": null,
        "public_flags": 0,
        "flags": 0
    })
}
