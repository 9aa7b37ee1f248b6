use lia_core::tables::{REFERRAL_FIRM, REFERRAL_URL};
use lia_core::types::Origin;

use crate::models::{Article, LawFirm, SettlementData};

fn article(slug: &str, title: &str, category: &str, summary: &str, content: &str) -> Article {
    Article {
        slug: slug.into(),
        title: title.into(),
        summary: summary.into(),
        content: content.into(),
        category: category.into(),
        url: format!("/{slug}.html"),
        source: Origin::Fallback,
    }
}

/// Built-in articles backing the static pages the linker points at.
pub fn articles() -> Vec<Article> {
    vec![
        article(
            "mesothelioma",
            "Mesothelioma: Symptoms, Diagnosis and Asbestos Exposure",
            "Conditions",
            "A rare cancer of the lining of the lungs or abdomen, almost always caused by asbestos.",
            "Mesothelioma develops decades after asbestos exposure. Common symptoms include \
             shortness of breath, chest pain and fatigue. Diagnosis relies on imaging and a biopsy. \
             People exposed at work may be entitled to compensation from asbestos trust funds.",
        ),
        article(
            "legal-options",
            "Understanding Your Legal Options After an Injury",
            "Legal",
            "How personal injury claims work and when to talk to an attorney.",
            "Most injury claims are handled on contingency. Filing deadlines vary by state, so \
             speaking with an attorney early protects your rights.",
        ),
        article(
            "compensation",
            "Compensation for Injury Victims",
            "Legal",
            "What damages can cover: medical bills, lost wages, pain and suffering.",
            "Compensation may come from a settlement, a verdict or a trust fund. Amounts depend \
             on the severity of the injury and the strength of the evidence.",
        ),
        article(
            "caregivers",
            "Support for Caregivers",
            "Support",
            "Resources for family members caring for someone with a serious illness.",
            "Caregivers carry practical and emotional load. Support groups, respite care and \
             financial help can ease it.",
        ),
        article(
            "cost-of-care",
            "The Cost of Care",
            "Support",
            "Treatment, travel and home-care costs and how families cover them.",
            "Serious illness brings costs that insurance may not cover. Legal compensation can \
             help pay for treatment and ongoing care.",
        ),
        article(
            "ovarian-cancer",
            "Ovarian Cancer and Talc Exposure",
            "Conditions",
            "Research linking talc products to ovarian cancer and the lawsuits that followed.",
            "Long-term talc use has been studied as a risk factor for ovarian cancer. Thousands \
             of claims have been filed against talc manufacturers.",
        ),
        article(
            "lymphoma",
            "Lymphoma and Chemical Exposure",
            "Conditions",
            "Non-Hodgkin lymphoma and its links to herbicide exposure.",
            "Some herbicides have been associated with non-Hodgkin lymphoma. Affected users have \
             pursued claims against manufacturers.",
        ),
        article(
            "mass-tort",
            "What Is a Mass Tort?",
            "Legal",
            "Many individual claims against the same defendant, handled together.",
            "In a mass tort each plaintiff keeps an individual case while pretrial work is shared. \
             Settlements reflect each person's injuries.",
        ),
        article(
            "class-action",
            "Class Action Lawsuits Explained",
            "Legal",
            "One case brought on behalf of a whole group with similar claims.",
            "A class action bundles similar claims into a single suit. Members usually share a \
             settlement and do not need to file on their own.",
        ),
    ]
}

pub fn law_firms() -> Vec<LawFirm> {
    vec![LawFirm {
        name: REFERRAL_FIRM.into(),
        specialties: vec![
            "Mesothelioma".into(),
            "Personal Injury".into(),
            "Mass Tort".into(),
        ],
        location: "Nationwide".into(),
        phone: String::new(),
        website: REFERRAL_URL.into(),
        rating: None,
        source: Origin::Fallback,
    }]
}

pub fn settlements() -> Vec<SettlementData> {
    Vec::new()
}
