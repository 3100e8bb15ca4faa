//! Few-shot prompt composition
//!
//! Builds the text prompt sent to the upstream model: a fixed persona
//! preamble, up to [`MAX_EXAMPLES`] customer/agent exchanges pulled from the
//! corpus, then the new message left open for the model to continue.

use crate::corpus::{Corpus, Sender};

/// Persona instruction placed at the top of every prompt.
const PREAMBLE: &str =
    "You are a visa support agent. Speak casually and naturally like a human — no AI tone.\nHere are some examples:\n\n";

/// Hard cap on example pairs across the whole corpus.
pub const MAX_EXAMPLES: usize = 3;

/// Collect (customer, agent) pairs: a customer turn immediately followed by a
/// turn from the other party. Scanning stops the moment the cap is reached.
fn example_pairs(corpus: &Corpus) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    'conversations: for convo in corpus.conversations() {
        for window in convo.turns.windows(2) {
            if window[0].sender == Sender::Customer && window[1].sender == Sender::Other {
                pairs.push((
                    window[0].text.replace('\n', " "),
                    window[1].text.replace('\n', " "),
                ));
                if pairs.len() >= MAX_EXAMPLES {
                    break 'conversations;
                }
            }
        }
    }
    pairs
}

/// Pure function of the corpus and the latest message; no hidden state.
pub fn build_prompt(corpus: &Corpus, latest_message: &str) -> String {
    let mut prompt = String::from(PREAMBLE);

    for (customer, agent) in example_pairs(corpus) {
        prompt.push_str(&format!("Customer: {}\nAgent: {}\n\n", customer, agent));
    }

    prompt.push_str(&format!(
        "Now respond to this:\nCustomer: {}\nAgent:",
        latest_message
    ));
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(json: &str) -> Corpus {
        Corpus::from_json(json).unwrap()
    }

    #[test]
    fn empty_corpus_yields_preamble_and_tail_only() {
        let prompt = build_prompt(&Corpus::default(), "hello");
        let expected = format!(
            "{}Now respond to this:\nCustomer: hello\nAgent:",
            PREAMBLE
        );
        assert_eq!(prompt, expected);
    }

    #[test]
    fn pairs_require_customer_then_other_ordering() {
        let c = corpus(
            r#"{"c1": {"messages": [
                {"sender": "other", "text": "welcome"},
                {"sender": "customer", "text": "hi, can I apply?"},
                {"sender": "other", "text": "Of course, what country?"},
                {"sender": "customer", "text": "Canada"}
            ]}}"#,
        );
        let pairs = example_pairs(&c);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0, "hi, can I apply?");
        assert_eq!(pairs[0].1, "Of course, what country?");
    }

    #[test]
    fn never_collects_more_than_the_cap() {
        // Two conversations with two eligible pairs each; only 3 survive.
        let c = corpus(
            r#"{
                "c1": {"messages": [
                    {"sender": "customer", "text": "q1"},
                    {"sender": "other", "text": "a1"},
                    {"sender": "customer", "text": "q2"},
                    {"sender": "other", "text": "a2"}
                ]},
                "c2": {"messages": [
                    {"sender": "customer", "text": "q3"},
                    {"sender": "other", "text": "a3"},
                    {"sender": "customer", "text": "q4"},
                    {"sender": "other", "text": "a4"}
                ]}
            }"#,
        );
        let pairs = example_pairs(&c);
        assert_eq!(pairs.len(), MAX_EXAMPLES);
        assert_eq!(pairs[2].0, "q3");
    }

    #[test]
    fn newlines_in_turns_become_spaces() {
        let c = corpus(
            r#"{"c1": {"messages": [
                {"sender": "customer", "text": "line one\nline two"},
                {"sender": "other", "text": "reply\nhere"}
            ]}}"#,
        );
        let prompt = build_prompt(&c, "hi");
        assert!(prompt.contains("Customer: line one line two\nAgent: reply here\n\n"));
    }

    #[test]
    fn composition_is_idempotent() {
        let c = corpus(
            r#"{"c1": {"messages": [
                {"sender": "customer", "text": "when is the deadline?"},
                {"sender": "other", "text": "End of March."}
            ]}}"#,
        );
        assert_eq!(build_prompt(&c, "hello"), build_prompt(&c, "hello"));
    }
}
