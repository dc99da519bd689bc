//! Pipeline stages
//!
//! ```text
//! Retrieving → Synthesizing → ResolvingLanguage → Persisting → Done
//!      │             │                                 │
//!      └─────────────┴──────────── Failed(kind) ───────┘
//! ```

use crate::error::ErrorKind;
use std::fmt;

/// Where a pipeline run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Fetching evidence
    Retrieving,
    /// Producing the answer
    Synthesizing,
    /// Settling the question's language
    ResolvingLanguage,
    /// Writing the record
    Persisting,
    /// Record stored
    Done,
    /// Run ended with an error
    Failed(ErrorKind),
}

impl Stage {
    /// The stage that follows a successful one, `None` once terminal
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Retrieving => Some(Stage::Synthesizing),
            Stage::Synthesizing => Some(Stage::ResolvingLanguage),
            Stage::ResolvingLanguage => Some(Stage::Persisting),
            Stage::Persisting => Some(Stage::Done),
            Stage::Done | Stage::Failed(_) => None,
        }
    }

    /// Whether the run has ended
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Done | Stage::Failed(_))
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Retrieving => f.write_str("retrieving"),
            Stage::Synthesizing => f.write_str("synthesizing"),
            Stage::ResolvingLanguage => f.write_str("resolving_language"),
            Stage::Persisting => f.write_str("persisting"),
            Stage::Done => f.write_str("done"),
            Stage::Failed(kind) => write!(f, "failed({})", kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_order() {
        let mut stage = Stage::Retrieving;
        let mut seen = vec![stage];
        while let Some(next) = stage.next() {
            seen.push(next);
            stage = next;
        }
        assert_eq!(
            seen,
            vec![
                Stage::Retrieving,
                Stage::Synthesizing,
                Stage::ResolvingLanguage,
                Stage::Persisting,
                Stage::Done
            ]
        );
    }

    #[test]
    fn test_terminal_stages() {
        assert!(Stage::Done.is_terminal());
        assert!(Stage::Failed(ErrorKind::NoEvidence).is_terminal());
        assert!(Stage::Failed(ErrorKind::NoEvidence).next().is_none());
        assert!(!Stage::Persisting.is_terminal());
    }
}
