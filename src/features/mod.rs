pub mod auth;
pub mod email;
pub mod files;
pub mod home;
