use crate::{
    links::anchor,
    tables::{LEGAL_REFERRAL_KEYWORDS, REFERRAL_FIRM, REFERRAL_LABEL, REFERRAL_URL},
    topics::TopicSet,
    types::CaseMatch,
};

/// True if the text asks for, or offers, legal help.
pub fn has_legal_intent(text: &str) -> bool {
    let lower = text.to_lowercase();
    LEGAL_REFERRAL_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// The call-to-action block appended to qualifying replies.
pub fn referral_fragment(description: &str) -> String {
    format!(
        "<br><br><strong>➡️ {REFERRAL_FIRM} is currently handling {}. \
         You can start your claim at {}.</strong>",
        description.to_lowercase(),
        anchor(REFERRAL_URL, REFERRAL_LABEL),
    )
}

/// Append the referral when `case` is active and the text shows legal intent.
/// Returns `None` when nothing is appended.
pub fn referral_for(text: &str, case: &CaseMatch) -> Option<String> {
    if !case.is_active || !has_legal_intent(text) {
        return None;
    }
    let description = case.description.as_deref().unwrap_or_default();
    Some(format!("{text}{}", referral_fragment(description)))
}

pub fn should_include_referral(text: &str, topics: &TopicSet) -> bool {
    topics.classify(text).is_active && has_legal_intent(text)
}

pub fn maybe_append_referral(text: &str, topics: &TopicSet) -> String {
    let case = topics.classify(text);
    referral_for(text, &case).unwrap_or_else(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_topic_with_intent_gets_referral() {
        let topics = TopicSet::fallback();
        let text = "If you have mesothelioma, talk to an attorney.";
        let out = maybe_append_referral(text, &topics);
        assert!(out.starts_with(text));
        assert!(out.ends_with(&referral_fragment("Mesothelioma and asbestos exposure cases")));
        assert!(out.contains("currently handling mesothelioma and asbestos exposure cases"));
        assert!(out.contains(r#"<a href="https://legalinjuryadvocates.com" target="_blank">legalinjuryadvocates.com</a>"#));
    }

    #[test]
    fn no_intent_means_no_referral() {
        let topics = TopicSet::fallback();
        let text = "Mesothelioma is a rare cancer.";
        assert_eq!(maybe_append_referral(text, &topics), text);
        assert!(!should_include_referral(text, &topics));
    }

    #[test]
    fn intent_without_active_topic_means_no_referral() {
        let topics = TopicSet::fallback();
        let text = "Consult a lawyer about your car accident.";
        assert!(has_legal_intent(text));
        assert_eq!(maybe_append_referral(text, &topics), text);
    }

    #[test]
    fn settlement_counts_as_intent() {
        assert!(has_legal_intent("Average SETTLEMENT amounts vary"));
        assert!(!has_legal_intent("Symptoms include chest pain"));
    }
}
