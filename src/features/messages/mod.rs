//! Message lifecycle: announcements that are either immediately active or
//! scheduled to become active at a future datetime.
//!
//! Activation and scheduling are mutually exclusive. Updates are applied
//! as a minimal diff against the stored row; a request that changes
//! nothing is answered with 204 and never touches the database.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/message` | Yes | List messages, active first |
//! | POST | `/api/message` | Yes | Create a message |
//! | GET | `/api/message/{message_id}` | Yes | Get one message |
//! | POST | `/api/message/{message_id}` | Yes | Update a message |
//! | DELETE | `/api/message/{message_id}` | Yes | Delete a message |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::MessageService;
