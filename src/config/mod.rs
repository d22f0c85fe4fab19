//! Configuration modules for the Hanapbuhay API.
//!
//! Each submodule loads one aspect of configuration from environment
//! variables at startup. The resulting structs are plain data passed into
//! [`crate::state::AppState`] — nothing reads the environment after boot.
//!
//! # Modules
//!
//! - [`backend`]: hosted auth-and-database backend endpoint and API key
//! - [`cors`]: CORS allowed origins
//! - [`session`]: session router policy knobs (public routes, unknown-role
//!   fallback)

pub mod backend;
pub mod cors;
pub mod session;
