//! HTTP request handlers.
//!
//! - `auth` - Discord login, OAuth callback and logout
//! - `dashboard` - Home page, admin guild list and single guild page

pub mod auth;
pub mod dashboard;

#[cfg(test)]
pub(crate) mod test;
