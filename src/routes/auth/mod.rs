pub mod admin;
pub mod claims;
pub mod login;
pub mod logout;
pub mod session;
pub mod verify;

pub use admin::admin_profile;
pub use login::handle_login;
pub use logout::handle_logout;
pub use verify::handle_verify;
