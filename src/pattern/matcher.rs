// Mon Oct 19 2026 - Alex

use crate::pattern::error::PatternError;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// `PUSH1 0x8 GAS STATICCALL`: the call preamble for the pairing precompile at address 8.
pub const STATICCALL_PREAMBLE: &str = "PUSH1 0x8 GAS STATICCALL";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternMode {
    #[default]
    Literal,
    Regex,
}

/// Tests disassembled text for an instruction sequence.
///
/// Matching runs over the rendered string, not over tokens, so a pattern can
/// match inside a longer hex literal (`PUSH1 0x8` also matches `PUSH1 0x80`).
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    pattern: String,
    regex: Option<Regex>,
}

impl PatternMatcher {
    pub fn new(pattern: &str, mode: PatternMode) -> Result<Self, PatternError> {
        if pattern.is_empty() {
            return Err(PatternError::Empty);
        }

        let regex = match mode {
            PatternMode::Literal => None,
            PatternMode::Regex => Some(Regex::new(pattern)?),
        };

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn literal(pattern: &str) -> Result<Self, PatternError> {
        Self::new(pattern, PatternMode::Literal)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn mode(&self) -> PatternMode {
        if self.regex.is_some() {
            PatternMode::Regex
        } else {
            PatternMode::Literal
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        match &self.regex {
            Some(regex) => regex.is_match(text),
            None => text.contains(self.pattern.as_str()),
        }
    }
}

impl Default for PatternMatcher {
    fn default() -> Self {
        Self {
            pattern: STATICCALL_PREAMBLE.to_string(),
            regex: None,
        }
    }
}
