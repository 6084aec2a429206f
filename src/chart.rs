/// Text chart drawn one line per observation
use crate::models::Observation;

const OPEN: char = '○';
const FILLED: char = '●';
const PAUSE_MARKER: char = '★';

pub const LEGEND: &str = "

How to read the chart?

○○○○○○○ ← Circles mean more humidity
○○○○○○○●●●● ← Filled circles mean humidity is slightly above ambient baseline
○○○○○○○●●●● 75% ← Number represents humidity percentage
○○○○○○○●●● 70% ★ ← Star appears on the beginning of whispering pause*

*After crossing ambient baseline, first decrease in humidity is considered a whispering pause.

";

/// One circle per percentage point: open up to the baseline, filled above it
pub fn render_bar(current: u32, baseline: u32) -> String {
    let open = current.min(baseline) as usize;
    let filled = current.saturating_sub(baseline) as usize;

    let mut bar = String::with_capacity((open + filled) * OPEN.len_utf8());
    bar.extend(std::iter::repeat(OPEN).take(open));
    bar.extend(std::iter::repeat(FILLED).take(filled));
    bar
}

/// Bar, percentage label and, on a pause, the marker
pub fn render_line(observation: &Observation) -> String {
    let marker = if observation.pause {
        PAUSE_MARKER.to_string()
    } else {
        String::new()
    };

    format!(
        "{} {}% {}",
        render_bar(observation.humidity, observation.baseline),
        observation.humidity,
        marker
    )
}
