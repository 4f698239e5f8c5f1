//! Session authentication feature.
//!
//! Login verifies credentials against the users table and stores an
//! authenticated flag plus a user snapshot in the server-side session;
//! logout empties the session and leaves a flash alert for the login page.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/login` | No | Pending flash alert for the login page |
//! | POST | `/login` | No | Establish a session |
//! | GET | `/logout` | No | Clear the session |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod session;

pub use services::AuthService;
