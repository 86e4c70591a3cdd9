//! CSRF token lookup

/// Name of the cookie carrying the CSRF token
pub const CSRF_COOKIE_NAME: &str = "csrftoken";

/// Header the token is echoed back in
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Find the `csrftoken` value in a `Cookie` header string.
///
/// Pairs are `;`-separated; the value is percent-decoded. Returns `None`
/// when the cookie is absent. A value that fails to decode is returned raw.
pub fn csrf_token_from_cookies(cookie_header: &str) -> Option<String> {
    cookie_header
        .split(';')
        .map(str::trim)
        .find_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            (name == CSRF_COOKIE_NAME).then_some(value)
        })
        .map(|raw| {
            urlencoding::decode(raw)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| raw.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_token_among_other_cookies() {
        let header = "sessionid=xyz; csrftoken=AbC123; theme=dark";
        assert_eq!(csrf_token_from_cookies(header), Some("AbC123".to_string()));
    }

    #[test]
    fn decodes_percent_encoding() {
        assert_eq!(
            csrf_token_from_cookies("csrftoken=a%2Bb%3D"),
            Some("a+b=".to_string())
        );
    }

    #[test]
    fn ignores_cookies_with_similar_names() {
        assert_eq!(csrf_token_from_cookies("xcsrftoken=nope; csrftoken2=nope"), None);
    }

    #[test]
    fn missing_or_empty_header() {
        assert_eq!(csrf_token_from_cookies(""), None);
        assert_eq!(csrf_token_from_cookies("sessionid=xyz"), None);
    }
}
