/// Product name used in email content
pub const APP_NAME: &str = "MediaDrop";

/// Plain-text body of `GET /`
pub const WELCOME_TEXT: &str = "Welcome to the Flask API!";

/// Message of `GET /hello`
pub const HELLO_MESSAGE: &str = "Hello from Flask!";

/// Value of `extracted_text` in upload responses.
///
/// Text extraction from uploaded media is not implemented yet; this fixed
/// marker stands in for it and carries no information about the file.
pub const PLACEHOLDER_EXTRACTED_TEXT: &str = "TS241464";
