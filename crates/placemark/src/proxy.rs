//! Geocoder proxy: requests under `/nominatim` are forwarded upstream.

pub const PROXY_PREFIX: &str = "/nominatim";

/// The upstream URL for a proxied request.
///
/// `query` is the raw query string, with or without its leading `?`.
pub fn proxy_destination(upstream: &str, request_path: &str, query: Option<&str>) -> String {
    let path = request_path.strip_prefix(PROXY_PREFIX).unwrap_or(request_path);
    let mut dest = format!("{}{}", upstream.trim_end_matches('/'), path);
    if let Some(query) = query.map(|q| q.trim_start_matches('?')).filter(|q| !q.is_empty()) {
        dest.push('?');
        dest.push_str(query);
    }
    dest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_GEOCODER;

    #[test]
    fn strips_the_prefix_and_keeps_the_query() {
        assert_eq!(
            proxy_destination(DEFAULT_GEOCODER, "/nominatim/search", Some("?q=berlin&format=json")),
            "https://nominatim.openstreetmap.org/search?q=berlin&format=json"
        );
    }

    #[test]
    fn empty_query_is_dropped() {
        assert_eq!(
            proxy_destination("https://geo.example.org/", "/nominatim/reverse", Some("")),
            "https://geo.example.org/reverse"
        );
        assert_eq!(
            proxy_destination("https://geo.example.org", "/nominatim", None),
            "https://geo.example.org"
        );
    }

    #[test]
    fn only_a_leading_prefix_is_stripped() {
        assert_eq!(
            proxy_destination("https://geo.example.org", "/search/nominatim", None),
            "https://geo.example.org/search/nominatim"
        );
    }
}
