//! End-to-end behaviour of the reply post-processing stages.

use lia_core::{
    links::annotate,
    markdown::render,
    referral::{maybe_append_referral, referral_fragment},
    safety::is_banned,
    tables::BANNED_TOPICS,
    topics::TopicSet,
};

#[test]
fn every_banned_term_is_caught_in_any_case() {
    for term in BANNED_TOPICS {
        assert!(is_banned(&format!("xx {} yy", term.to_uppercase())), "{term}");
    }
}

#[test]
fn ordinary_legal_answers_are_not_banned() {
    let samples = [
        "Mesothelioma is a cancer caused by asbestos exposure.",
        "You may be entitled to compensation. Consult an attorney.",
        "Class action lawsuits group similar claims together.",
    ];
    for s in samples {
        assert!(!is_banned(s), "{s}");
    }
}

#[test]
fn render_empty_and_bold() {
    assert_eq!(render(""), "");
    let out = render("**hi**");
    assert!(out.contains("<strong>hi</strong>"));
    assert!(out.starts_with("<p>") && out.ends_with("</p>"));
}

#[test]
fn annotate_learn_more_yields_single_anchor() {
    let out = annotate("Learn more about mesothelioma symptoms.");
    assert_eq!(out.matches("<a ").count(), 1);
    assert_eq!(out.matches(r#"href="/mesothelioma.html""#).count(), 1);
    assert!(!out.contains("<a href=\"/mesothelioma.html\" target=\"_blank\"><a"));
}

#[test]
fn annotate_twice_equals_once() {
    let text = "For more detailed information on mass tort cases, see below.\n\
                Read more about caregiver support. Ovarian cancer and lymphoma are covered too.\n\
                More information about medical costs";
    let once = annotate(text);
    assert_ne!(once, text);
    assert_eq!(annotate(&once), once);
}

#[test]
fn referral_needs_topic_and_intent() {
    let topics = TopicSet::fallback();
    let with_intent = "Mesothelioma claims move fast; an attorney can help.";
    let out = maybe_append_referral(with_intent, &topics);
    let fragment = referral_fragment("Mesothelioma and asbestos exposure cases");
    assert!(out.ends_with(&fragment));
    assert!(fragment.to_lowercase().contains("mesothelioma"));

    let without_intent = "Mesothelioma claims move fast.";
    assert_eq!(maybe_append_referral(without_intent, &topics), without_intent);
}

#[test]
fn linked_then_rendered_reply_keeps_anchors_intact() {
    let linked = annotate("Learn more about lymphoma, and mass tort options.");
    let html = render(&linked);
    assert!(html.contains(r#"<a href="/lymphoma.html" target="_blank">lymphoma</a>"#));
    assert!(html.contains(r#"<a href="/mass-tort.html" target="_blank">mass tort</a>"#));
    assert!(!html.contains("<em>"));
}
