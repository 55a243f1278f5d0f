use axum::http::HeaderMap;

/// Client identity used when no forwarding header is present.
pub const FALLBACK_CLIENT: &str = "127.0.0.1";

/// Derives the rate-limit key from forwarding headers: the first non-empty
/// `x-forwarded-for` entry, then `x-real-ip`, then the loopback placeholder.
pub fn client_key(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').map(str::trim).find(|ip| !ip.is_empty()))
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|h| h.to_str().ok())
                .map(str::trim)
                .filter(|ip| !ip.is_empty())
        })
        .unwrap_or(FALLBACK_CLIENT)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn forwarded_for_wins() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(" 203.0.113.9 , 10.0.0.1"));
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.2"));
        assert_eq!(client_key(&headers), "203.0.113.9");
    }

    #[test]
    fn skips_empty_forwarded_entries() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(", ,10.0.0.1"));
        assert_eq!(client_key(&headers), "10.0.0.1");
    }

    #[test]
    fn falls_back_to_real_ip() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("  "));
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.2"));
        assert_eq!(client_key(&headers), "198.51.100.2");
    }

    #[test]
    fn falls_back_to_loopback() {
        assert_eq!(client_key(&HeaderMap::new()), FALLBACK_CLIENT);
    }
}
