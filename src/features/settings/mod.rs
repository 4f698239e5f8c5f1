//! Account and site settings: profile, password, and the site icon.
//!
//! Profile and password changes also refresh the user snapshot kept in
//! the session. The icon is a single systemdata row seeded by the
//! migrations.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/settings/profile` | Yes | Current profile |
//! | POST | `/settings/profile` | Yes | Update name and email |
//! | POST | `/settings/password` | Yes | Change the password |
//! | GET | `/settings/icon` | Yes | Selected icon and catalog |
//! | POST | `/settings/icon` | Yes | Change the site icon |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{SystemdataService, UserService};
