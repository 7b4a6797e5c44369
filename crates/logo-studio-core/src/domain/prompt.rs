//! User prompts.

use serde::{Deserialize, Serialize};

/// A prompt that passed submit-time validation.
///
/// Holds the trimmed text that is sent to the generator. The untrimmed input
/// stays in the presentation prompt slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt(String);

impl Prompt {
    /// Trim `raw` and reject it if nothing is left.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_surrounding_whitespace() {
        let p = Prompt::parse("  A fox in a circle \n").unwrap();
        assert_eq!(p.as_str(), "A fox in a circle");
    }

    #[test]
    fn test_parse_rejects_blank_input() {
        for raw in ["", " ", "\t\n", "   \r\n  "] {
            assert!(Prompt::parse(raw).is_none(), "{raw:?} should be rejected");
        }
    }
}
