/// A downloaded upload or avatar, keyed by the path it was fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub path: String,
    pub content_type: String,
    pub size: u64,
    pub data: Vec<u8>,
}

impl File {
    #[inline]
    pub fn new(path: &str, content_type: String, data: Vec<u8>) -> File {
        File {
            path: path.to_string(),
            content_type,
            size: data.len() as u64,
            data,
        }
    }
}
