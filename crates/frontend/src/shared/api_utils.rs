//! URL helpers for frontend-backend communication

/// Port the backend listens on when served next to the frontend
pub const BACKEND_PORT: u16 = 5000;

/// Backend origin derived from the current window location.
///
/// Returns an empty string outside a browser, which turns every API path
/// into a relative URL.
pub fn api_base_from_window() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    origin(&protocol, &hostname, BACKEND_PORT)
}

/// `origin("https:", "example.com", 5000)` -> `"https://example.com:5000"`
pub fn origin(protocol: &str, hostname: &str, port: u16) -> String {
    let protocol = protocol.trim_end_matches(':');
    format!("{}://{}:{}", protocol, hostname, port)
}

pub fn normalize_base(base: &str) -> String {
    base.trim().trim_end_matches('/').to_string()
}

/// Joins path segments, e.g. `api_path(&["surveys", id, "publish"])`
pub fn api_path(segments: &[&str]) -> String {
    let mut path = String::new();
    for segment in segments {
        let segment = segment.trim_matches('/');
        if segment.is_empty() {
            continue;
        }
        path.push('/');
        path.push_str(segment);
    }
    if path.is_empty() {
        path.push('/');
    }
    path
}

/// Collection roots take a trailing slash: `/surveys/`, `/responses/`
pub fn collection_path(segments: &[&str]) -> String {
    let mut path = api_path(segments);
    if !path.ends_with('/') {
        path.push('/');
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin() {
        assert_eq!(origin("http:", "localhost", 5000), "http://localhost:5000");
        assert_eq!(origin("https", "example.com", 8443), "https://example.com:8443");
    }

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base(" http://a.b/// "), "http://a.b");
        assert_eq!(normalize_base(""), "");
    }

    #[test]
    fn test_api_path() {
        assert_eq!(api_path(&["surveys", "42", "publish"]), "/surveys/42/publish");
        assert_eq!(api_path(&["/questions/", "", "by-survey", "7"]), "/questions/by-survey/7");
        assert_eq!(api_path(&[]), "/");
    }

    #[test]
    fn test_collection_path() {
        assert_eq!(collection_path(&["surveys"]), "/surveys/");
        assert_eq!(collection_path(&["responses/"]), "/responses/");
    }
}
