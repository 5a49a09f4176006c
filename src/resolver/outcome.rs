use std::fmt;

/// Classification of a resolution, without the file id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchType {
    /// The whole folder chain was verified up to the root
    Full,
    /// The file name matched but its folder chain could not be fully verified
    Partial,
    /// No file with that name exists
    None,
    /// No usable credential
    Login,
}

impl MatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::Full => "full",
            MatchType::Partial => "partial",
            MatchType::None => "none",
            MatchType::Login => "login",
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of resolving a local path; a file id is carried exactly when
/// the outcome is [`Full`](MatchResult::Full) or [`Partial`](MatchResult::Partial)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    Full {
        file_id: String,
    },
    Partial {
        file_id: String,
        /// Number of folder segments verified above the file
        depth: usize,
    },
    None,
    Login,
}

impl MatchResult {
    pub fn match_type(&self) -> MatchType {
        match self {
            MatchResult::Full { .. } => MatchType::Full,
            MatchResult::Partial { .. } => MatchType::Partial,
            MatchResult::None => MatchType::None,
            MatchResult::Login => MatchType::Login,
        }
    }

    pub fn file_id(&self) -> Option<&str> {
        match self {
            MatchResult::Full { file_id } | MatchResult::Partial { file_id, .. } => {
                Some(file_id.as_str())
            }
            MatchResult::None | MatchResult::Login => None,
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.file_id() {
            Some(id) => write!(f, "{} ({id})", self.match_type()),
            None => write!(f, "{}", self.match_type()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_id_only_for_matches() {
        let full = MatchResult::Full { file_id: "a".into() };
        let partial = MatchResult::Partial { file_id: "b".into(), depth: 1 };
        assert_eq!(full.file_id(), Some("a"));
        assert_eq!(partial.file_id(), Some("b"));
        assert_eq!(MatchResult::None.file_id(), None);
        assert_eq!(MatchResult::Login.file_id(), None);
    }

    #[test]
    fn test_display() {
        let partial = MatchResult::Partial { file_id: "b".into(), depth: 0 };
        assert_eq!(partial.to_string(), "partial (b)");
        assert_eq!(MatchResult::Login.to_string(), "login");
        assert_eq!(MatchType::Full.to_string(), "full");
    }
}
