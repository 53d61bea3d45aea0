//! Verdict cards and footers.

use crate::{model::Verdict, Locale, StatCategory};

use super::color::{verdict_tone, Painter, Tone};

/// One coloured line per category: `▌ POINTS  ✅ Likely  <detail>`.
pub fn verdict_card(
    painter: &Painter,
    locale: Locale,
    stat: StatCategory,
    verdict: Verdict,
    detail: &str,
) -> String {
    let tone = verdict_tone(verdict);
    let head = format!("▌ {:<9}", stat.to_string());
    let label = format!("{} {}", verdict.mark(), verdict.label(locale));
    if detail.is_empty() {
        format!("{} {}", painter.paint(&head, tone), painter.paint(&label, Tone::Bold))
    } else {
        format!(
            "{} {}  {}",
            painter.paint(&head, tone),
            painter.paint(&label, Tone::Bold),
            detail
        )
    }
}

pub fn defense_footer(locale: Locale, team_name: &str, rank: u8, teams: u8) -> String {
    match locale {
        Locale::En => format!("Defense of {}: rank {} of {}", team_name, rank, teams),
        Locale::Pt => format!("Defesa do {}: Rank {}º de {}.", team_name, rank, teams),
    }
}
