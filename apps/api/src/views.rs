mod role_buttons;

pub use role_buttons::{RoleActionButtons, RoleRoutes};
