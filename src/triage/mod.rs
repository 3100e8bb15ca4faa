//! Message triage heuristics
//!
//! Two keyword gates run on every request: a relevance check on the latest
//! message deciding whether the upstream model is consulted at all, and an
//! interest check over the recent history flagging buying intent. Matching is
//! plain case-insensitive substring containment, no tokenization or word
//! boundaries.

use rand::seq::SliceRandom;
use rand::Rng;

/// Casual greetings that should get a reply even without a domain keyword.
const FRIENDLY_OPENERS: [&str; 7] = [
    "hello",
    "hi",
    "hey",
    "how are you",
    "good morning",
    "good evening",
    "thank you",
];

const VISA_KEYWORDS: [&str; 9] = [
    "visa",
    "apply",
    "application",
    "document",
    "canada",
    "sop",
    "deadline",
    "graduate",
    "dtv",
];

/// Phrases signalling the caller is ready to move forward.
const INTEREST_KEYWORDS: [&str; 6] = [
    "ready",
    "apply now",
    "send documents",
    "next step",
    "book a call",
    "how soon",
];

/// How many of the most recent messages the interest check examines.
const INTEREST_WINDOW: usize = 3;

/// Returns true if the message looks in-domain or is a friendly opener.
pub fn is_relevant(message: &str) -> bool {
    let message = message.to_lowercase();
    VISA_KEYWORDS
        .iter()
        .chain(FRIENDLY_OPENERS.iter())
        .any(|kw| message.contains(kw))
}

/// Returns true if any of the last [`INTEREST_WINDOW`] messages contains a
/// high-intent phrase. Earlier messages are never examined.
pub fn detect_interest(messages: &[String]) -> bool {
    let start = messages.len().saturating_sub(INTEREST_WINDOW);
    messages[start..].iter().any(|msg| {
        let msg = msg.to_lowercase();
        INTEREST_KEYWORDS.iter().any(|kw| msg.contains(kw))
    })
}

const FALLBACK_REPLIES: [&str; 2] = [
    "I might not be great with that, but ask me anything about visas!",
    "Let’s stick to visa support — ask me anything on that!",
];

/// Fixed set of replies used when a message is out of domain. The pick is
/// uniformly random; tests can supply a seeded generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackReplies;

impl FallbackReplies {
    pub fn pick(&self) -> &'static str {
        self.pick_with(&mut rand::thread_rng())
    }

    pub fn pick_with(&self, rng: &mut impl Rng) -> &'static str {
        FALLBACK_REPLIES
            .choose(rng)
            .copied()
            .unwrap_or(FALLBACK_REPLIES[0])
    }

    pub fn contains(&self, reply: &str) -> bool {
        FALLBACK_REPLIES.contains(&reply)
    }
}
