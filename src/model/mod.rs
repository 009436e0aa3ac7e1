//! Domain models shared between the request handlers, services and views.

pub mod discord;
pub mod user;
