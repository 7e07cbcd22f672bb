//! Session identifiers: the opaque key tying quota, reports and calls together.

use uuid::Uuid;

/// Session used by read endpoints when the caller sends none.
pub const ANONYMOUS_SESSION: &str = "anonymous";

/// Session for a read endpoint.
pub fn read_session(supplied: Option<String>) -> String {
    non_blank(supplied).unwrap_or_else(|| ANONYMOUS_SESSION.to_string())
}

/// Session for a write endpoint. A caller without one gets a fresh random id.
pub fn write_session(supplied: Option<String>) -> String {
    non_blank(supplied).unwrap_or_else(|| Uuid::new_v4().to_string())
}

fn non_blank(supplied: Option<String>) -> Option<String> {
    supplied
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_defaults_to_anonymous() {
        assert_eq!(read_session(None), "anonymous");
        assert_eq!(read_session(Some("  ".into())), "anonymous");
        assert_eq!(read_session(Some("s1".into())), "s1");
    }

    #[test]
    fn test_write_generates_uuid() {
        let a = write_session(None);
        let b = write_session(None);
        assert_ne!(a, b);
        assert_eq!(Uuid::parse_str(&a).unwrap().get_version_num(), 4);
        assert_eq!(write_session(Some(" s1 ".into())), "s1");
    }
}
