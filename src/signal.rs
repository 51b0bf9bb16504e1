use serde::{Deserialize, Serialize};

/// Sentiment category assigned to a recorded incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Negative,
    Positive,
    Interested,
}

impl Signal {
    pub fn as_str(self) -> &'static str {
        match self {
            Signal::Negative => "negative",
            Signal::Positive => "positive",
            Signal::Interested => "interested",
        }
    }

    pub fn parse(s: &str) -> Option<Signal> {
        match s {
            "negative" => Some(Signal::Negative),
            "positive" => Some(Signal::Positive),
            "interested" => Some(Signal::Interested),
            _ => None,
        }
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const NEGATIVE_PHRASES: &[&str] = &[
    "not satisfied",
    "unsatisfying",
    "disappointed",
    "frustrated",
    "that's not what i",
    "you don't understand",
    "no that's wrong",
    "i'm worried about your ability",
    "concerning",
    "this is a problem",
    "you missed",
    "you forgot",
    "you didn't",
    "why didn't you",
];

const POSITIVE_PHRASES: &[&str] = &[
    "perfect",
    "exactly",
    "great",
    "excellent",
    "love it",
    "that's what i wanted",
    "super interested",
    "this is good",
    "nice",
    "well done",
    "impressive",
    "smart",
];

const INTEREST_PHRASES: &[&str] = &[
    "interesting",
    "tell me more",
    "i want to know",
    "curious about",
    "what about",
    "can you explain",
];

/// Classify a user message by substring match against the fixed phrase
/// lists. Priority order is negative > positive > interested; the first
/// list containing a match wins regardless of later matches.
pub fn detect_signal(message: &str) -> Option<Signal> {
    let lower = message.to_lowercase();

    if NEGATIVE_PHRASES.iter().any(|p| lower.contains(p)) {
        return Some(Signal::Negative);
    }
    if POSITIVE_PHRASES.iter().any(|p| lower.contains(p)) {
        return Some(Signal::Positive);
    }
    if INTEREST_PHRASES.iter().any(|p| lower.contains(p)) {
        return Some(Signal::Interested);
    }
    None
}
