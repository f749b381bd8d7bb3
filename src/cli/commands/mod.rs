mod session;
mod user;

pub use session::{cmd_login, cmd_logout, cmd_whoami};
pub use user::{cmd_user_check, cmd_user_create, cmd_user_delete, cmd_user_show, cmd_user_update};
