mod auth_handler;

pub use auth_handler::{__path_login, __path_logout, login, login_page, logout};
