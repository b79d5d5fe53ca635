//! Line-chart rendering. Builds a self-contained SVG document from
//! (label, value) pairs; the transport ships it as a document attachment.

/// A rendered chart ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartImage {
    pub bytes: Vec<u8>,
    pub filename: &'static str,
    pub mime: &'static str,
}

const WIDTH: f64 = 600.0;
const HEIGHT: f64 = 260.0;
const PADDING_X: f64 = 44.0;
const PADDING_Y: f64 = 34.0;
const TOP: f64 = 24.0;
const TICKS: u32 = 4;

const LINE_COLOR: &str = "#ff6b4a";
const LABEL_COLOR: &str = "#7a746d";
const GRID_STROKE: &str = "rgba(47, 72, 88, 0.12)";
const AXIS_STROKE: &str = "rgba(47, 72, 88, 0.25)";

/// Render a line chart, or `None` when there is nothing to plot.
///
/// The y range always includes zero so a run of equal values still reads as
/// a level line above the axis.
pub fn line_chart(title: &str, points: &[(String, i64)]) -> Option<ChartImage> {
    if points.is_empty() {
        return None;
    }

    let values: Vec<f64> = points.iter().map(|&(_, value)| value as f64).collect();
    let mut min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    min = min.min(0.0);
    max = max.max(0.0);
    if min == max {
        min -= 1.0;
        max += 1.0;
    }

    let range = max - min;
    let x_step = if points.len() > 1 {
        (WIDTH - PADDING_X * 2.0) / (points.len() - 1) as f64
    } else {
        0.0
    };
    let scale_y = (HEIGHT - TOP - PADDING_Y) / range;
    let x = |index: usize| PADDING_X + index as f64 * x_step;
    let y = |value: f64| HEIGHT - PADDING_Y - (value - min) * scale_y;

    let mut svg = String::with_capacity(4096);
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {WIDTH} {HEIGHT}\" \
         font-family=\"'Trebuchet MS', sans-serif\">"
    ));
    svg.push_str("<rect width=\"100%\" height=\"100%\" fill=\"white\"/>");
    svg.push_str(&format!(
        "<text x=\"{:.0}\" y=\"16\" text-anchor=\"middle\" font-size=\"14\" \
         font-weight=\"bold\" fill=\"#2f4858\">{title}</text>",
        WIDTH / 2.0
    ));

    for i in 0..=TICKS {
        let value = min + range * f64::from(i) / f64::from(TICKS);
        let y_pos = y(value);
        svg.push_str(&format!(
            "<line x1=\"{PADDING_X:.2}\" y1=\"{y_pos:.2}\" x2=\"{:.2}\" y2=\"{y_pos:.2}\" \
             stroke=\"{GRID_STROKE}\"/>",
            WIDTH - PADDING_X
        ));
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"end\" font-size=\"11\" \
             fill=\"{LABEL_COLOR}\">{}</text>",
            PADDING_X - 10.0,
            y_pos + 4.0,
            format_axis(value)
        ));
    }

    svg.push_str(&format!(
        "<line x1=\"{PADDING_X:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" \
         stroke=\"{AXIS_STROKE}\" stroke-dasharray=\"4 6\"/>",
        y(0.0),
        WIDTH - PADDING_X,
        y(0.0)
    ));

    let path: Vec<String> = values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            let op = if index == 0 { 'M' } else { 'L' };
            format!("{op} {:.2} {:.2}", x(index), y(value))
        })
        .collect();
    svg.push_str(&format!(
        "<path d=\"{}\" fill=\"none\" stroke=\"{LINE_COLOR}\" stroke-width=\"3\"/>",
        path.join(" ")
    ));

    for (index, &value) in values.iter().enumerate() {
        svg.push_str(&format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"4\" fill=\"white\" \
             stroke=\"{LINE_COLOR}\" stroke-width=\"2\"/>",
            x(index),
            y(value)
        ));
    }

    let label_every = if points.len() > 8 { 2 } else { 1 };
    for (index, (label, _)) in points.iter().enumerate() {
        if index % label_every != 0 {
            continue;
        }
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-size=\"11\" \
             fill=\"{LABEL_COLOR}\">{label}</text>",
            x(index),
            HEIGHT - PADDING_Y + 18.0
        ));
    }

    svg.push_str("</svg>");

    Some(ChartImage {
        bytes: svg.into_bytes(),
        filename: "progress.svg",
        mime: "image/svg+xml",
    })
}

fn format_axis(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded:.1}")
    }
}
