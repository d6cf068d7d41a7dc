//! Scope token and redirect URI syntax checks for client registration.

use url::Url;

/// Check a scope token against the RFC 6749 `scope-token` character class:
/// `%x21 / %x23-5B / %x5D-7E`.
pub fn validate_scope(scope: &str) -> bool {
    scope
        .chars()
        .all(|c| matches!(c, '\u{21}' | '\u{23}'..='\u{5B}' | '\u{5D}'..='\u{7E}'))
}

/// Base for resolving relative redirect references; never part of the result.
const RELATIVE_REFERENCE_BASE: &str = "http://relative.invalid/";

/// A redirect URI must be an RFC 3986 URI reference without a fragment component.
///
/// Relative references (`/callback`, `//host/cb`) are accepted. An empty
/// fragment (`https://cb#`) still counts as a fragment.
pub fn validate_redirect_uri(redirect_uri: &str) -> bool {
    if !has_uri_characters_only(redirect_uri) {
        return false;
    }
    let parsed = match Url::parse(redirect_uri) {
        Ok(parsed) => parsed,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let Ok(base) = Url::parse(RELATIVE_REFERENCE_BASE) else {
                return false;
            };
            match Url::options().base_url(Some(&base)).parse(redirect_uri) {
                Ok(parsed) => parsed,
                Err(_) => return false,
            }
        }
        Err(_) => return false,
    };
    parsed.fragment().is_none()
}

/// Only unreserved, reserved, and `%HH` escapes are allowed (RFC 3986 §2).
fn has_uri_characters_only(value: &str) -> bool {
    let bytes = value.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let escaped = bytes.get(i + 1..i + 3);
                if !escaped.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
                    return false;
                }
                i += 3;
            }
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => i += 1,
            b':' | b'/' | b'?' | b'#' | b'[' | b']' | b'@' => i += 1,
            b'!' | b'$' | b'&' | b'\'' | b'(' | b')' | b'*' | b'+' | b',' | b';' | b'=' => i += 1,
            _ => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_scopes() {
        assert!(validate_scope("openid"));
        assert!(validate_scope("message.read"));
        assert!(validate_scope("transition:generic"));
        assert!(validate_scope("!#[]~"));
        assert!(validate_scope("a~z"));
    }

    #[test]
    fn test_invalid_scopes() {
        // space, double quote, backslash, and anything outside printable ASCII
        assert!(!validate_scope("read write"));
        assert!(!validate_scope("say\"hi\""));
        assert!(!validate_scope("back\\slash"));
        assert!(!validate_scope("tab\there"));
        assert!(!validate_scope("café"));
        assert!(!validate_scope("del\u{7F}"));
    }

    #[test]
    fn test_every_ascii_character() {
        for byte in 0u8..=0x7F {
            let scope = (byte as char).to_string();
            let expected = byte == 0x21 || (0x23..=0x5B).contains(&byte) || (0x5D..=0x7E).contains(&byte);
            assert_eq!(validate_scope(&scope), expected, "byte {:#04x}", byte);
        }
    }

    #[test]
    fn test_redirect_uris() {
        assert!(validate_redirect_uri("https://cb"));
        assert!(validate_redirect_uri("https://example.com/callback?state=1"));
        assert!(validate_redirect_uri("http://localhost:8080/authorized"));
        assert!(validate_redirect_uri("com.example.app:/oauth2redirect"));
        assert!(validate_redirect_uri("https://example.com/call%20back"));

        assert!(!validate_redirect_uri("https://example.com/callback#token"));
        assert!(!validate_redirect_uri("https://example.com/callback#"));
        assert!(!validate_redirect_uri("https://"));
        assert!(!validate_redirect_uri("not a uri"));
        assert!(!validate_redirect_uri("https://exa mple.com"));
    }

    #[test]
    fn test_relative_redirect_references() {
        assert!(validate_redirect_uri("/callback"));
        assert!(validate_redirect_uri("callback"));
        assert!(validate_redirect_uri("//example.com/cb"));
        assert!(validate_redirect_uri("../cb?x=1"));
        // empty relative reference
        assert!(validate_redirect_uri(""));

        assert!(!validate_redirect_uri("/callback#x"));
        assert!(!validate_redirect_uri("#x"));
    }

    #[test]
    fn test_redirect_uris_outside_uri_characters() {
        for redirect_uri in [
            "https://example.com/call back",
            "https://example.com/a|b",
            "https://example.com/{x}",
            "https://example.com/a\"b",
            "https:\\\\example.com\\cb",
            " https://example.com/cb",
            "https://example.com/cb ",
            "https://example.com/cb\n",
            "https://example.com/a<b>",
            "https://example.com/café",
            "https://example.com/%zz",
            "https://example.com/%2",
        ] {
            assert!(!validate_redirect_uri(redirect_uri), "{:?}", redirect_uri);
        }
    }
}
