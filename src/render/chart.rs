//! Text bar and line charts.

use crate::StatCategory;

const FULL: char = '█';
const EMPTY: char = '░';
const SPARKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// A horizontal bar of `width` cells, filled in proportion to `value / max`.
pub fn bar(value: f64, max: f64, width: usize) -> String {
    let filled = if max > 0.0 && value.is_finite() && value > 0.0 {
        ((value / max) * width as f64).round().clamp(0.0, width as f64) as usize
    } else {
        0
    };
    let mut s = String::with_capacity(width * 3);
    s.extend(std::iter::repeat(FULL).take(filled));
    s.extend(std::iter::repeat(EMPTY).take(width - filled));
    s
}

/// One category's bars: labelled values sharing a scale.
#[derive(Debug, Clone, PartialEq)]
pub struct BarGroup {
    pub stat: StatCategory,
    pub bars: Vec<(&'static str, f64)>,
}

/// Grouped bar chart. Each group is scaled to its own largest value, so
/// blocks and points are both readable.
pub fn bar_chart(groups: &[BarGroup], width: usize) -> Vec<String> {
    let label_width = groups
        .iter()
        .flat_map(|g| g.bars.iter().map(|(label, _)| label.chars().count()))
        .max()
        .unwrap_or(0);

    let mut lines = Vec::new();
    for group in groups {
        let max = group
            .bars
            .iter()
            .map(|(_, v)| *v)
            .fold(0.0_f64, f64::max);
        for (i, (label, value)) in group.bars.iter().enumerate() {
            let head = if i == 0 { group.stat.short_label() } else { "" };
            lines.push(format!(
                "{:<4} {:<lw$} {} {:>5.1}",
                head,
                label,
                bar(*value, max, width),
                value,
                lw = label_width
            ));
        }
    }
    lines
}

/// One character per value, scaled between the series minimum and maximum.
pub fn sparkline(values: &[f64]) -> String {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let Some(min) = finite.iter().copied().reduce(f64::min) else {
        return String::new();
    };
    let max = finite.iter().copied().fold(min, f64::max);
    let span = max - min;

    finite
        .iter()
        .map(|v| {
            if span <= 0.0 {
                SPARKS[SPARKS.len() / 2]
            } else {
                let idx = ((v - min) / span * (SPARKS.len() - 1) as f64).round() as usize;
                SPARKS[idx.min(SPARKS.len() - 1)]
            }
        })
        .collect()
}
