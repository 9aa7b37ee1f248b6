//! Compiled-in lookup tables shared by the response post-processing stages.

/// Terms that make a model response unfit to show on the site.
/// Matched as plain lowercase substrings.
pub const BANNED_TOPICS: &[&str] = &[
    "epstein",
    "sex trafficking",
    "politics",
    "celebrity",
    "conspiracy",
    "terrorism",
    "violence",
    "murder",
    "suicide",
    "drugs",
    "gambling",
    "weapons",
    "extremism",
    "porn",
    "adult",
    "crypto",
    "bitcoin",
    "stock",
    "finance",
    "entertainment",
    "music",
    "movie",
    "tv",
    "sports",
    "dating",
    "relationship",
    "religion",
    "spiritual",
    "astrology",
    "horoscope",
    "alien",
    "ufo",
    "paranormal",
    "lottery",
    "casino",
    "scam",
    "fraud",
    "hacking",
    "malware",
    "phishing",
    "dark web",
    "black market",
    "escort",
];

/// Lowercase phrase → article path. Order is significant: the first key that
/// matches a captured phrase wins.
pub const ARTICLE_MAPPINGS: &[(&str, &str)] = &[
    ("mesothelioma symptoms and diagnosis", "/mesothelioma.html"),
    ("mesothelioma symptoms", "/mesothelioma.html"),
    ("mesothelioma diagnosis", "/mesothelioma.html"),
    ("mesothelioma signs", "/mesothelioma.html"),
    ("mesothelioma warning signs", "/mesothelioma.html"),
    ("mesothelioma early signs", "/mesothelioma.html"),
    ("mesothelioma", "/mesothelioma.html"),
    ("asbestos exposure", "/mesothelioma.html"),
    ("asbestos exposure risks", "/mesothelioma.html"),
    ("asbestos related diseases", "/mesothelioma.html"),
    ("asbestos", "/mesothelioma.html"),
    ("legal options", "/legal-options.html"),
    ("legal advice", "/legal-options.html"),
    ("injury diagnosis", "/legal-options.html"),
    ("compensation options", "/compensation.html"),
    ("settlement options", "/compensation.html"),
    ("compensation", "/compensation.html"),
    ("settlement", "/compensation.html"),
    ("caregiver support", "/caregivers.html"),
    ("caring for someone", "/caregivers.html"),
    ("medical costs", "/cost-of-care.html"),
    ("cost of treatment", "/cost-of-care.html"),
    ("treatment costs", "/cost-of-care.html"),
    ("financial support", "/cost-of-care.html"),
    ("ovarian cancer", "/ovarian-cancer.html"),
    ("lymphoma", "/lymphoma.html"),
    ("mass tort", "/mass-tort.html"),
    ("class action", "/class-action.html"),
];

/// Phrases linked wherever they appear in free text.
///
/// A phrase must come before every shorter phrase it contains, otherwise the
/// shorter one claims the words first and the longer link is never made.
pub const LITERAL_TOPIC_PHRASES: &[&str] = &[
    "mesothelioma symptoms and diagnosis",
    "mesothelioma symptoms",
    "mesothelioma diagnosis",
    "mesothelioma",
    "asbestos exposure risks",
    "asbestos exposure",
    "legal options",
    "compensation options",
    "medical costs",
    "ovarian cancer",
    "lymphoma",
    "mass tort",
    "class action",
];

/// Phrases signalling the reader wants legal help.
pub const LEGAL_REFERRAL_KEYWORDS: &[&str] = &[
    "consult",
    "speak to",
    "talk to",
    "meet with",
    "attorney",
    "lawyer",
    "file a claim",
    "legal advice",
    "legal options",
    "seek legal",
    "recommend",
    "contact a lawyer",
    "contact an attorney",
    "how to file",
    "where to file",
    "get compensation",
    "payout",
    "settlement",
];

pub const REFERRAL_URL: &str = "https://legalinjuryadvocates.com";
pub const REFERRAL_LABEL: &str = "legalinjuryadvocates.com";
pub const REFERRAL_FIRM: &str = "Legal Injury Advocates";

/// Look up the article path for an exact lowercase phrase.
pub fn article_url(phrase: &str) -> Option<&'static str> {
    ARTICLE_MAPPINGS
        .iter()
        .find(|(key, _)| *key == phrase)
        .map(|(_, url)| *url)
}
