//! Verdicts derived from validator output.
//!
//! Validators answer in free text. A verdict line (`VERDICT: PASS` /
//! `VERDICT: CRITICAL`, trailing `.`, `!` or `:` allowed) decides when present;
//! otherwise standalone sentinel words are looked for, matched case-sensitively on word
//! boundaries so `BYPASS` or `FAILURE` never count. A negated sentinel (`does not PASS`,
//! `no CRITICAL issues`) makes the word scan inconclusive. Anything that is not clearly
//! one polarity is [`Verdict::Ambiguous`].

use crate::errors::{MedAgentError, MedAgentResult};
use crate::models::message::CompletionResult;
use regex::Regex;
use std::sync::LazyLock;

pub const PASS_SENTINEL: &str = "PASS";
pub const CRITICAL_SENTINEL: &str = "CRITICAL";

static VERDICT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[`*]*VERDICT:\s*[`*]*(PASS|CRITICAL|FAIL)[`*]*[.!:]*[`*]*\s*$")
        .expect("verdict line pattern")
});
static PASS_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bPASS\b").expect("pass pattern"));
static CRITICAL_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(CRITICAL|FAIL)\b").expect("critical pattern"));
static NEGATED_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i:\b(?:not|no|never|cannot|without)\b|n't)\s+(?i:[a-z]+\s+)?\b(?:PASS|CRITICAL|FAIL)\b")
        .expect("negated sentinel pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Critical,
    Ambiguous,
}

impl Verdict {
    /// Classify validator output.
    pub fn parse(content: &str) -> Self {
        let declared = content.lines().rev().find_map(|line| {
            VERDICT_LINE
                .captures(line)
                .and_then(|caps| caps.get(1))
                .map(|token| match token.as_str() {
                    "PASS" => Verdict::Pass,
                    _ => Verdict::Critical,
                })
        });
        if let Some(verdict) = declared {
            return verdict;
        }

        if NEGATED_WORD.is_match(content) {
            return Verdict::Ambiguous;
        }

        match (PASS_WORD.is_match(content), CRITICAL_WORD.is_match(content)) {
            (true, false) => Verdict::Pass,
            (false, true) => Verdict::Critical,
            _ => Verdict::Ambiguous,
        }
    }
}

/// A validator's answer together with the verdict read from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub agent: String,
    pub verdict: Verdict,
    pub result: CompletionResult,
}

impl ValidationReport {
    pub fn new(agent: impl Into<String>, result: CompletionResult) -> Self {
        Self {
            agent: agent.into(),
            verdict: Verdict::parse(&result.content),
            result,
        }
    }

    /// The report when it reached a pass or critical verdict,
    /// [`MedAgentError::ValidationAmbiguous`] otherwise.
    pub fn decisive(self) -> MedAgentResult<Self> {
        match self.verdict {
            Verdict::Ambiguous => Err(MedAgentError::ValidationAmbiguous { agent: self.agent }),
            _ => Ok(self),
        }
    }
}
