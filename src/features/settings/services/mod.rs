mod systemdata_service;
mod user_service;

pub use systemdata_service::SystemdataService;
pub use user_service::{check_passwd_complexity, UserService};
