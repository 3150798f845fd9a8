use lazy_static::lazy_static;
use regex::Regex;

/// Host-relative paths embedded in a message body as `href="/..."` or
/// `src="/..."`, in order of appearance. Duplicates are kept; the file
/// archiver's existence check takes care of them.
pub fn resource_paths(body: &str) -> Vec<&str> {
    lazy_static! {
        static ref RE: Regex = Regex::new(r#"(?:href|src)="(/[^"]+)"#).unwrap();
    }
    RE.captures_iter(body)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str())
        .collect()
}
