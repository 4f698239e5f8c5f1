mod settings_handler;

pub use settings_handler::{
    __path_change_password, __path_get_icon, __path_get_profile, __path_update_icon,
    __path_update_profile, change_password, get_icon, get_profile, update_icon, update_profile,
};
