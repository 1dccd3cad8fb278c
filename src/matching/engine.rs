//! Match decision and alert construction.
//!
//! # Responsibilities
//! - Decide match/no-match for one message against the live keyword set
//! - Build the alert payload for a matching message
//!
//! # Design Decisions
//! - Keywords are lowercased at load time, so only the message text is
//!   lowercased here; the reported message text stays unaltered
//! - An empty message or an empty keyword set never matches

use serde::{Deserialize, Serialize};

use crate::keywords::KeywordSet;

/// The outbound alert built for a matching message.
///
/// Constructed fresh per match, never retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertPayload {
    /// The keyword that matched, in its normalized (lowercase) form.
    pub keyword: String,
    /// The original message text, unaltered.
    pub message: String,
    /// The chat/room the message came from.
    pub origin: String,
    /// Where the alert is addressed: the origin, or the fixed override.
    pub destination: String,
}

/// Pure match/no-match decision plus payload construction.
pub struct MatchEngine {
    destination_override: Option<String>,
}

impl MatchEngine {
    pub fn new(destination_override: Option<String>) -> Self {
        Self {
            destination_override,
        }
    }

    /// Return the first keyword (in set order) contained in the message,
    /// case-insensitively. Pure: no I/O, no clock, no state.
    pub fn decide<'a>(&self, text: &str, keywords: &'a KeywordSet) -> Option<&'a str> {
        if text.is_empty() {
            return None;
        }
        let haystack = text.to_lowercase();
        keywords.iter().find(|keyword| haystack.contains(keyword))
    }

    /// Build the single alert payload for a match.
    pub fn alert_for(&self, keyword: &str, text: &str, origin: &str) -> AlertPayload {
        let destination = self
            .destination_override
            .clone()
            .unwrap_or_else(|| origin.to_string());
        AlertPayload {
            keyword: keyword.to_string(),
            message: text.to_string(),
            origin: origin.to_string(),
            destination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> KeywordSet {
        KeywordSet::new(words.iter().map(|w| w.to_string()).collect())
    }

    #[test]
    fn test_case_insensitive_match() {
        let engine = MatchEngine::new(None);
        let keywords = set(&["buy"]);
        assert_eq!(engine.decide("BUY now", &keywords), Some("buy"));
    }

    #[test]
    fn test_first_match_in_keyword_order() {
        let engine = MatchEngine::new(None);
        // Both substrings present; set order decides.
        let keywords = set(&["rsi 30", "매수"]);
        let text = "alert: RSI 30 breached, 매수 signal";
        assert_eq!(engine.decide(text, &keywords), Some("rsi 30"));
    }

    #[test]
    fn test_empty_inputs_never_match() {
        let engine = MatchEngine::new(None);
        assert_eq!(engine.decide("", &set(&["buy"])), None);
        assert_eq!(engine.decide("anything", &set(&[])), None);
    }

    #[test]
    fn test_decide_is_deterministic() {
        let engine = MatchEngine::new(None);
        let keywords = set(&["hold", "sell"]);
        let text = "sell and hold";
        assert_eq!(engine.decide(text, &keywords), engine.decide(text, &keywords));
        assert_eq!(engine.decide(text, &keywords), Some("hold"));
    }

    #[test]
    fn test_alert_addressed_to_origin_by_default() {
        let engine = MatchEngine::new(None);
        let alert = engine.alert_for("buy", "BUY now", "room-7");
        assert_eq!(
            alert,
            AlertPayload {
                keyword: "buy".to_string(),
                message: "BUY now".to_string(),
                origin: "room-7".to_string(),
                destination: "room-7".to_string(),
            }
        );
    }

    #[test]
    fn test_alert_override_destination() {
        let engine = MatchEngine::new(Some("ops-room".to_string()));
        let alert = engine.alert_for("buy", "BUY now", "room-7");
        assert_eq!(alert.origin, "room-7");
        assert_eq!(alert.destination, "ops-room");
        // Message text is reported unaltered.
        assert_eq!(alert.message, "BUY now");
    }
}
