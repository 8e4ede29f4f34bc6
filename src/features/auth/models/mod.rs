mod session;
mod user;

pub use session::SessionRecord;
pub use user::User;
