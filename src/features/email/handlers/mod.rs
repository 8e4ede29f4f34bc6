pub mod email_handler;

pub use email_handler::{__path_send_email, send_email};
