use serde_json::{json, Value};

/// Discord's ADMINISTRATOR permission bit as sent by the API.
pub const ADMINISTRATOR: &str = "8";

/// Factory for creating guild entries with customizable fields.
///
/// Provides a builder pattern for a single element of the `GET /users/@me/guilds` response.
/// Defaults to a guild without an icon where the user has no permissions.
pub struct GuildFactory {
    id: String,
    name: String,
    icon: Option<String>,
    permissions: Value,
}

impl GuildFactory {
    /// Creates a new GuildFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Test Guild {id}"`
    /// - icon: `null`
    /// - permissions: `"0"`
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: format!("Test Guild {}", id),
            icon: None,
            permissions: json!("0"),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }

    /// Sets permissions as a decimal string, the way Discord v10 sends them.
    pub fn permissions(mut self, permissions: &str) -> Self {
        self.permissions = json!(permissions);
        self
    }

    /// Sets permissions to an arbitrary JSON value, e.g. a number or garbage.
    pub fn raw_permissions(mut self, permissions: Value) -> Self {
        self.permissions = permissions;
        self
    }

    /// Builds the guild JSON object.
    pub fn build(self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "icon": self.icon,
            "owner": false,
            "permissions": self.permissions,
            "features": []
        })
    }
}

/// Creates a guild where the user holds the ADMINISTRATOR bit.
pub fn create_admin_guild(id: &str) -> Value {
    GuildFactory::new(id).permissions(ADMINISTRATOR).build()
}

/// Creates a guild where the user has no permissions.
pub fn create_member_guild(id: &str) -> Value {
    GuildFactory::new(id).build()
}

/// Wraps guild entries into the JSON array Discord returns.
pub fn guild_list(guilds: &[Value]) -> Value {
    Value::Array(guilds.to_vec())
}
