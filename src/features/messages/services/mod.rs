mod message_service;

pub use message_service::{MessageService, UpdateOutcome};
