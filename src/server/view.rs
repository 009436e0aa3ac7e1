//! HTML views rendered with Tera.
//!
//! Templates are compiled into the binary and registered once at startup. Tera escapes every
//! interpolated value in `.html` templates, so guild and user names are safe to render.

use std::sync::Arc;
use tera::{Context, Tera};

use crate::{
    model::{discord::DiscordGuildDto, user::UserDto},
    server::error::AppError,
};

/// Shown on the dashboard when the guild list could not be loaded.
pub const DASHBOARD_LOAD_ERROR_MESSAGE: &str =
    "Could not load your servers. Please try again later.";

/// Shown on the server page when the permission check failed for a reason other than access.
pub const SERVER_LOAD_ERROR_MESSAGE: &str = "Could not verify your permissions. Please try again.";

const TEMPLATES: [(&str, &str); 4] = [
    ("base.html", include_str!("../../templates/base.html")),
    ("index.html", include_str!("../../templates/index.html")),
    ("dashboard.html", include_str!("../../templates/dashboard.html")),
    ("server.html", include_str!("../../templates/server.html")),
];

/// Registered page templates. Cheap to clone.
#[derive(Clone)]
pub struct Views {
    tera: Arc<Tera>,
}

impl Views {
    /// Parses the built-in templates.
    ///
    /// # Returns
    /// - `Ok(Views)` - All templates parsed
    /// - `Err(AppError::TemplateErr(_))` - A template failed to parse
    pub fn new() -> Result<Self, AppError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)?;

        tracing::debug!("Loaded {} templates", TEMPLATES.len());

        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    /// Home page, with a login link when `user` is `None`.
    pub fn render_index(&self, user: Option<&UserDto>) -> Result<String, AppError> {
        let mut context = Context::new();
        context.insert("user", &user);

        self.render("index.html", &context)
    }

    /// Dashboard listing the guilds the user administers.
    ///
    /// With `error_message` set the page renders the message above an empty list.
    pub fn render_dashboard(
        &self,
        user: &UserDto,
        guilds: &[DiscordGuildDto],
        error_message: Option<&str>,
    ) -> Result<String, AppError> {
        let mut context = Context::new();
        context.insert("user", user);
        context.insert("guilds", guilds);
        context.insert("error_message", &error_message);

        self.render("dashboard.html", &context)
    }

    /// Single guild page. Renders `error_message` instead when `guild` is `None`.
    pub fn render_server(
        &self,
        user: &UserDto,
        guild: Option<&DiscordGuildDto>,
        error_message: Option<&str>,
    ) -> Result<String, AppError> {
        let mut context = Context::new();
        context.insert("user", user);
        context.insert("guild", &guild);
        context.insert("error_message", &error_message);

        self.render("server.html", &context)
    }

    fn render(&self, template: &str, context: &Context) -> Result<String, AppError> {
        Ok(self.tera.render(template, context)?)
    }
}
