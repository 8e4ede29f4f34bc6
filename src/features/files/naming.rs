//! Storage names for uploaded files.
//!
//! A stored name is `<unix seconds>_<sanitized original name>`. Two uploads of
//! the same sanitized name within one second map to the same stored name and
//! the later write wins.

use chrono::Utc;
use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::shared::validation::UNSAFE_FILENAME_CHARS;

/// Used when nothing of the original name survives sanitizing
pub const FALLBACK_FILENAME: &str = "upload";

/// Longest stored name the filesystem accepts, in bytes
pub const MAX_FILENAME_LENGTH: usize = 255;

/// Widest `<unix seconds>_` prefix: 20 chars for any i64 plus the underscore
const TIMESTAMP_PREFIX_LENGTH: usize = 21;

/// Longest sanitized name, so the timestamped name stays within the limit
pub const MAX_SANITIZED_LENGTH: usize = MAX_FILENAME_LENGTH - TIMESTAMP_PREFIX_LENGTH;

lazy_static! {
    static ref DOT_RUNS: Regex = Regex::new(r"\.{2,}").unwrap();
}

/// Reduce an untrusted client filename to a single safe path component.
///
/// Accented letters fold to their ASCII base (NFKD) and other non-ASCII
/// characters are dropped. Path separators become word breaks, whitespace
/// runs collapse to `_`, anything outside `[A-Za-z0-9_.-]` is dropped, dot
/// runs collapse to one dot and leading/trailing dots and underscores are
/// trimmed. Long names are cut to `MAX_SANITIZED_LENGTH` keeping the
/// extension. The result never contains a separator or `..` and never
/// starts with a dot.
pub fn sanitize_filename(original: &str) -> String {
    let spaced: String = original
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned = UNSAFE_FILENAME_CHARS.replace_all(&joined, "");
    let collapsed = DOT_RUNS.replace_all(&cleaned, ".");
    let trimmed = collapsed.trim_matches(|c| c == '.' || c == '_');

    if trimmed.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        truncate_keeping_extension(trimmed, MAX_SANITIZED_LENGTH)
    }
}

/// Shorten the stem of an ASCII name so the whole name fits in `max` bytes
fn truncate_keeping_extension(name: &str, max: usize) -> String {
    if name.len() <= max {
        return name.to_string();
    }

    if let Some((stem, ext)) = name.rsplit_once('.') {
        if !stem.is_empty() && ext.len() + 1 < max {
            let stem = stem[..max - ext.len() - 1].trim_end_matches(['.', '_']);
            if !stem.is_empty() {
                return format!("{}.{}", stem, ext);
            }
        }
    }

    name[..max].trim_end_matches(['.', '_']).to_string()
}

pub fn unique_filename(timestamp: i64, sanitized: &str) -> String {
    format!("{}_{}", timestamp, sanitized)
}

/// Stored name for `sanitized` using the current Unix time in seconds
pub fn timestamped_filename(sanitized: &str) -> String {
    unique_filename(Utc::now().timestamp(), sanitized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_simple_names() {
        assert_eq!(sanitize_filename("cat.png"), "cat.png");
        assert_eq!(sanitize_filename("Holiday-2024_v2.JPG"), "Holiday-2024_v2.JPG");
    }

    #[test]
    fn test_sanitize_joins_whitespace() {
        assert_eq!(sanitize_filename("my cat  photo.png"), "my_cat_photo.png");
    }

    #[test]
    fn test_sanitize_strips_directories_and_traversal() {
        assert_eq!(sanitize_filename("../../etc/passwd.png"), "etc_passwd.png");
        assert_eq!(sanitize_filename("/var/www/shell.gif"), "var_www_shell.gif");
        assert_eq!(sanitize_filename("..\\..\\boot.ini.jpg"), "boot.ini.jpg");
        assert_eq!(sanitize_filename("a..b.png"), "a.b.png");
    }

    #[test]
    fn test_sanitize_drops_unsafe_characters() {
        assert_eq!(sanitize_filename("caf\u{e9}<>|?.png"), "cafe.png");
        assert_eq!(sanitize_filename(".hidden.mp4"), "hidden.mp4");
    }

    #[test]
    fn test_sanitize_folds_accents_to_ascii() {
        assert_eq!(sanitize_filename("caf\u{e9}.png"), "cafe.png");
        assert_eq!(
            sanitize_filename("na\u{ef}ve r\u{e9}sum\u{e9}.jpg"),
            "naive_resume.jpg"
        );
    }

    #[test]
    fn test_sanitize_caps_length_and_keeps_extension() {
        let long = format!("{}.png", "a".repeat(300));
        let sanitized = sanitize_filename(&long);

        assert_eq!(sanitized.len(), MAX_SANITIZED_LENGTH);
        assert!(sanitized.ends_with(".png"));
        assert!(timestamped_filename(&sanitized).len() <= MAX_FILENAME_LENGTH);

        let no_ext = "b".repeat(400);
        assert_eq!(sanitize_filename(&no_ext).len(), MAX_SANITIZED_LENGTH);
    }

    #[test]
    fn test_sanitize_falls_back_when_empty() {
        assert_eq!(sanitize_filename("..."), FALLBACK_FILENAME);
        assert_eq!(sanitize_filename("\u{65e5}\u{672c}"), FALLBACK_FILENAME);
    }

    #[test]
    fn test_sanitized_names_are_single_components() {
        let hostile = [
            "../x.png",
            "/abs/path.png",
            "..",
            "./.././a.gif",
            "C:\\Windows\\x.jpg",
            "a/../../b.mp4",
        ];
        for name in hostile {
            let sanitized = sanitize_filename(name);
            assert!(!sanitized.contains('/'), "{} -> {}", name, sanitized);
            assert!(!sanitized.contains('\\'), "{} -> {}", name, sanitized);
            assert!(!sanitized.contains(".."), "{} -> {}", name, sanitized);
            assert!(!sanitized.starts_with('.'), "{} -> {}", name, sanitized);
        }
    }

    #[test]
    fn test_unique_filename_format() {
        assert_eq!(unique_filename(1700000000, "cat.png"), "1700000000_cat.png");
    }

    #[test]
    fn test_timestamped_filename_uses_current_time() {
        let before = Utc::now().timestamp();
        let name = timestamped_filename("cat.png");
        let after = Utc::now().timestamp();

        let (prefix, rest) = name.split_once('_').expect("underscore separator");
        let ts: i64 = prefix.parse().expect("numeric timestamp");
        assert!(ts >= before && ts <= after);
        assert_eq!(rest, "cat.png");
    }
}
