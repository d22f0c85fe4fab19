//! # Hanapbuhay API
//!
//! A job-marketplace gateway built with Rust and Axum, backed by a hosted
//! auth-and-database service. The service does two things:
//!
//! - **Role-gated page routing**: every page navigation passes through a
//!   session router that resolves the caller's session against the hosted
//!   backend, confines each role to its own path namespace, and forces
//!   incomplete profiles through onboarding.
//! - **API surface**: auth, profile, job-posting, and lookup endpoints
//!   that proxy validated payloads to the backend.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── backend/          # Client boundary to the hosted backend
//! ├── config/           # Environment-driven configuration structs
//! ├── middleware/       # Session router, routing policy, API extractor
//! ├── modules/          # Feature modules
//! │   ├── auth/        # Sign in/up/out, current caller
//! │   ├── profiles/    # Profile setup and public profiles
//! │   ├── jobs/        # Job postings
//! │   ├── lookups/     # Skills and address reference data
//! │   └── pages.rs     # Client-app shell behind the session router
//! └── utils/           # Shared utilities
//! ```
//!
//! Each feature module follows a consistent structure: `model.rs`,
//! `service.rs`, `controller.rs`, `router.rs`.
//!
//! ## Roles and namespaces
//!
//! | Role | Code | Namespace | Onboarding |
//! |----------|-------|-----------|------------|
//! | Seeker | `SKR` | `/skr` | `/skr/setup` |
//! | Provider | `PDR` | `/pdr` | `/pdr/setup` |
//! | Admin | `admin` | `/admin` | none |
//!
//! ## Environment Variables
//!
//! ```bash
//! BACKEND_URL=https://project.example.co
//! BACKEND_ANON_KEY=public-api-key
//! PUBLIC_ROUTES=/,/about/
//! # UNKNOWN_ROLE_REDIRECT=/
//! ALLOWED_ORIGINS=http://localhost:3000
//! ```
//!
//! ## API Documentation
//!
//! When the server is running, API documentation is available at
//! `/swagger-ui` and `/scalar`.

pub mod backend;
pub mod config;
pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;
