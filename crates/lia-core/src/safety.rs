use crate::tables::BANNED_TOPICS;

/// First banned term found anywhere in `text`, compared case-insensitively.
///
/// Plain substring search: "tv" also hits "outvoted". Over-blocking is the
/// accepted failure mode here.
pub fn banned_term(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    BANNED_TOPICS.iter().copied().find(|term| lower.contains(term))
}

pub fn is_banned(text: &str) -> bool {
    banned_term(text).is_some()
}
