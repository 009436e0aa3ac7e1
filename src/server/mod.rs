//! Server-side web application.
//!
//! The backend uses Axum as the web framework, tower-sessions for login state, the oauth2
//! crate for the Discord handshake and Tera for HTML rendering.
//!
//! # Architecture
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers and view selection
//! - **Service Layer** (`service/`) - OAuth flow, guild fetching, caching and admin checks
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Typed session access and authentication guards
//! - **Views** (`view`) - Tera templates for every page
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (HTTP clients, guild cache, views)
//! - **Startup** (`startup`) - Initialization of tracing, sessions, clients and the cache
//! - **Router** (`router`) - Axum route configuration
//!
//! # Request Flow
//!
//! 1. **Router** receives the HTTP request and routes it to a controller
//! 2. **Middleware** loads the session and the logged-in user
//! 3. **Controller** asks `GuildService` for the user's guilds
//! 4. **Service** serves them from the cache or fetches them from Discord with backoff
//! 5. **Controller** converts the result to DTOs and renders a view

pub mod config;
pub mod controller;
pub mod error;
pub mod middleware;
pub mod router;
pub mod service;
pub mod startup;
pub mod state;
pub mod view;
