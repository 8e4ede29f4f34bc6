use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating username fields
    /// Must start with letter or underscore, then alphanumerics, underscores, dots or hyphens
    /// - Valid: "john_doe", "user123", "_admin", "jane.doe", "JohnDoe"
    /// - Invalid: "123user", "-user", "user name", "user/name"
    pub static ref USERNAME_REGEX: Regex = Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_.\-]*$").unwrap();

    /// Characters that may not appear in a stored filename
    pub static ref UNSAFE_FILENAME_CHARS: Regex = Regex::new(r"[^A-Za-z0-9_.\-]").unwrap();
}
