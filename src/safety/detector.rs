//! Per-message risk-language detection.
//!
//! A fixed, hand-curated pattern set covering self-harm, suicide ideation,
//! violence, stalking/surveillance/coercive control, and panic/crisis
//! language. A match on any pattern flags the message. Coverage is
//! inherently incomplete; a flag triggers the heightened protocol, it is
//! not a safety guarantee, and a miss falls through to normal counseling.

use std::sync::LazyLock;

use regex::Regex;

static RISK_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // Self-harm / suicide ideation
        r"자해",
        r"자살",
        r"죽고\s*싶",
        r"살\s*의미",
        // Violence
        r"폭력",
        r"때리",
        r"죽여",
        // Stalking / surveillance / coercive control
        r"스토킹",
        r"위치\s*추적",
        r"감시",
        r"통제",
        r"협박",
        r"가스라이팅",
        // Panic / crisis
        r"숨이\s*막혀",
        r"패닉",
        r"공황",
        r"아무것도\s*못\s*하겠",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("risk pattern must compile"))
    .collect()
});

/// Scan one user message for risk language. Stateless: conversation
/// history never feeds detection.
pub fn detect_risk(message: &str) -> bool {
    RISK_PATTERNS.iter().any(|p| p.is_match(message))
}
