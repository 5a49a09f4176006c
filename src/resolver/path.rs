use percent_encoding::percent_decode_str;

const FILE_SCHEME: &str = "file://";

/// A local filesystem path reduced to the segments worth looking up.
///
/// Empty segments and bare drive letters (`C:`) are dropped; the last
/// remaining segment names a file, every other segment a folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalPath {
    segments: Vec<String>,
}

impl LocalPath {
    /// Parse a slash-separated path
    pub fn parse(path: &str) -> Self {
        let segments = path
            .split('/')
            .filter(|s| !s.is_empty() && !is_drive_letter(s))
            .map(String::from)
            .collect();

        LocalPath { segments }
    }

    /// Parse a `file://` URL, percent-decoding it first.
    /// Returns `None` for any other scheme or undecodable input.
    pub fn from_file_url(url: &str) -> Option<Self> {
        let rest = url.strip_prefix(FILE_SCHEME)?;
        let rest = rest.split(['?', '#']).next().unwrap_or_default();
        let decoded = percent_decode_str(rest).decode_utf8().ok()?;
        Some(Self::parse(&decoded))
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// The file name segment
    pub fn leaf(&self) -> Option<&str> {
        self.segments.last().map(|s| s.as_str())
    }

    /// Folder segments leading to the leaf, outermost first
    pub fn ancestors(&self) -> &[String] {
        match self.segments.split_last() {
            Some((_, ancestors)) => ancestors,
            None => &[],
        }
    }
}

impl std::fmt::Display for LocalPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "/{}", self.segments.join("/"))
    }
}

fn is_drive_letter(segment: &str) -> bool {
    matches!(segment.as_bytes(), [letter, b':'] if letter.is_ascii_alphabetic())
}
