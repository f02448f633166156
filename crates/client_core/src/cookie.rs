//! Cookie-string access for CSRF token lookup.

use percent_encoding::percent_decode_str;

/// Ambient cookie string of the page session, read fresh on every call.
pub trait CookieSource: Send + Sync {
    fn cookies(&self) -> String;
}

/// Fixed cookie string handed to the process at startup.
pub struct StaticCookies(pub String);

impl CookieSource for StaticCookies {
    fn cookies(&self) -> String {
        self.0.clone()
    }
}

/// Returns the decoded value of the first cookie named `name`.
///
/// `cookies` is a semicolon-delimited `name=value` string, entries possibly
/// padded with leading whitespace. The full string is re-parsed on every
/// call; nothing is cached.
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    for entry in cookies.split(';') {
        let entry = entry.trim();
        if let Some(rest) = entry.strip_prefix(name) {
            if let Some(value) = rest.strip_prefix('=') {
                return Some(percent_decode_str(value).decode_utf8_lossy().into_owned());
            }
        }
    }
    None
}

#[cfg(test)]
#[path = "tests/cookie_tests.rs"]
mod tests;
