use once_cell::sync::Lazy;
use regex::Regex;

static POST_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(www\.)?(twitter\.com|x\.com)/.+/status/\d+")
        .expect("post URL pattern is valid")
});

/// Returns true when `url` looks like a Twitter/X post URL.
///
/// Only the prefix is checked: trailing query strings or photo/video
/// suffixes after the status id are accepted.
pub fn is_valid_post_url(url: &str) -> bool {
    POST_URL.is_match(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_post_urls() {
        assert!(is_valid_post_url("https://twitter.com/user/status/12345"));
        assert!(is_valid_post_url("https://x.com/user/status/999"));
        assert!(is_valid_post_url("http://www.twitter.com/user/status/1"));
        assert!(is_valid_post_url("https://x.com/user/status/42?s=20"));
        assert!(is_valid_post_url("https://x.com/i/web/status/42/video/1"));
    }

    #[test]
    fn test_rejects_other_urls() {
        assert!(!is_valid_post_url("https://example.com/status/1"));
        assert!(!is_valid_post_url("https://x.com/status/abc"));
        assert!(!is_valid_post_url("https://x.com/user/status/"));
        assert!(!is_valid_post_url("ftp://x.com/user/status/1"));
        assert!(!is_valid_post_url(""));
    }

    #[test]
    fn test_match_is_anchored_at_start() {
        assert!(!is_valid_post_url(" https://x.com/user/status/1"));
        assert!(!is_valid_post_url("see https://x.com/user/status/1"));
    }
}
