//! Pre-agent short-circuit classifier.
//!
//! A small ordered rule set applied to the raw user text before any model
//! or tool call: greeting keywords, name introductions, and too-short
//! input each get a fixed reply. First match wins; only unmatched input
//! reaches the agent pipeline.

use regex::Regex;
use std::sync::OnceLock;

use crate::tools::country::title_case;

const GREETING_KEYWORDS: &[&str] = &["hi", "hello", "hey", "salam", "assalamualaikum"];

const GREETING_REPLY: &str =
    "👋 Hello! I'm your Country Info Bot.\nPlease type a country name you'd like to know about.";

const TOO_SHORT_REPLY: &str =
    "❗ Please enter a valid country name like `Pakistan`, `USA`, or `India`.";

/// A short-circuit match that replaces the agent pipeline for this turn.
#[derive(Debug, Clone, PartialEq)]
pub enum Intercept {
    /// A greeting keyword appeared in the input.
    Greeting(String),
    /// The user introduced themselves.
    Introduction(String),
    /// The input is too short to be a country name.
    TooShort(String),
}

impl Intercept {
    /// The fixed reply to send for this intercept.
    pub fn reply(&self) -> &str {
        match self {
            Intercept::Greeting(r) | Intercept::Introduction(r) | Intercept::TooShort(r) => r,
        }
    }
}

fn intro_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"my name is|i am").expect("valid intro pattern"))
}

/// Classify raw user input, returning `None` when it should reach the agent.
///
/// Rules are evaluated in fixed priority order on the lowercased text and
/// the first match wins.
pub fn classify(input: &str) -> Option<Intercept> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if GREETING_KEYWORDS.iter().any(|greet| lower.contains(greet)) {
        return Some(Intercept::Greeting(GREETING_REPLY.to_string()));
    }

    if lower.contains("my name is") || lower.contains("i am") {
        let name = title_case(intro_pattern().replace_all(&lower, "").trim());
        let reply = if name.split_whitespace().count() == 1 && !name.is_empty() {
            format!("😊 Nice to meet you, {name}!\nPlease type a country name to continue.")
        } else {
            "😊 Nice to meet you!\nPlease type a country name to get started.".to_string()
        };
        return Some(Intercept::Introduction(reply));
    }

    if trimmed.chars().count() < 3 {
        return Some(Intercept::TooShort(TOO_SHORT_REPLY.to_string()));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greetings_match_case_insensitively() {
        for input in ["hi", "Hello there", "HEY", "salam", "Assalamualaikum"] {
            assert!(
                matches!(classify(input), Some(Intercept::Greeting(_))),
                "expected greeting intercept for {input:?}"
            );
        }
    }

    #[test]
    fn single_word_introduction_is_personalized() {
        let intercept = classify("my name is ayesha").unwrap();
        match intercept {
            Intercept::Introduction(reply) => assert!(reply.contains("Ayesha")),
            other => panic!("expected introduction, got {other:?}"),
        }
    }

    #[test]
    fn multi_word_introduction_gets_generic_reply() {
        let intercept = classify("i am john doe").unwrap();
        match intercept {
            Intercept::Introduction(reply) => {
                assert!(!reply.contains("John"));
                assert!(reply.contains("Nice to meet you"));
            }
            other => panic!("expected introduction, got {other:?}"),
        }
    }

    #[test]
    fn short_input_is_rejected() {
        assert!(matches!(classify("pk"), Some(Intercept::TooShort(_))));
        assert!(matches!(classify(" x "), Some(Intercept::TooShort(_))));
    }

    #[test]
    fn country_names_pass_through() {
        assert_eq!(classify("Pakistan"), None);
        assert_eq!(classify("new zealand"), None);
    }

    #[test]
    fn rules_apply_in_priority_order() {
        // Contains a greeting keyword and an introduction; greeting wins.
        assert!(matches!(
            classify("hello, my name is sam"),
            Some(Intercept::Greeting(_))
        ));
    }
}
