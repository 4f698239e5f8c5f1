mod message_handler;

pub use message_handler::{
    __path_create_message, __path_delete_message, __path_get_message, __path_list_messages,
    __path_update_message, create_message, delete_message, get_message, list_messages,
    update_message,
};
