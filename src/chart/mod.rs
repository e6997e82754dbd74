//! Bar chart output for the top-N words
//!
//! The chart is an SVG document rendered from a tera template, so no native
//! plotting library is needed.

use crate::core::wordcount::WordCount;
use crate::error::{ErrorCode, ErrorExt, Result, SiftError};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};
use tracing::debug;

const CHART_TEMPLATE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="{{ width }}" height="{{ height }}" viewBox="0 0 {{ width }} {{ height }}" font-family="sans-serif">
  <rect width="100%" height="100%" fill="#ffffff"/>
  <text x="{{ center_x }}" y="32" font-size="20" text-anchor="middle">{{ title }}</text>
  <line x1="{{ plot_left }}" y1="{{ plot_bottom }}" x2="{{ plot_right }}" y2="{{ plot_bottom }}" stroke="#333333"/>
  <line x1="{{ plot_left }}" y1="{{ plot_top }}" x2="{{ plot_left }}" y2="{{ plot_bottom }}" stroke="#333333"/>
{%- for tick in ticks %}
  <line x1="{{ plot_left - 5 }}" y1="{{ tick.y }}" x2="{{ plot_left }}" y2="{{ tick.y }}" stroke="#333333"/>
  <text x="{{ plot_left - 8 }}" y="{{ tick.y }}" font-size="12" text-anchor="end" dominant-baseline="middle">{{ tick.value }}</text>
{%- endfor %}
{%- for bar in bars %}
  <rect x="{{ bar.x }}" y="{{ bar.y }}" width="{{ bar.width }}" height="{{ bar.height }}" fill="#1f77b4"><title>{{ bar.word }}: {{ bar.count }}</title></rect>
  <text x="{{ bar.label_x }}" y="{{ label_y }}" font-size="12" text-anchor="end" transform="rotate(-45 {{ bar.label_x }} {{ label_y }})">{{ bar.word }}</text>
{%- endfor %}
  <text x="{{ center_x }}" y="{{ height - 12 }}" font-size="14" text-anchor="middle">Words</text>
  <text x="20" y="{{ center_y }}" font-size="14" text-anchor="middle" transform="rotate(-90 20 {{ center_y }})">Frequency</text>
</svg>
"##;

const WIDTH: u32 = 1200;
const HEIGHT: u32 = 600;
const MARGIN_LEFT: u32 = 80;
const MARGIN_RIGHT: u32 = 20;
const MARGIN_TOP: u32 = 60;
const MARGIN_BOTTOM: u32 = 150;
const TICK_COUNT: u64 = 5;
/// Narrowest horizontal slot a bar gets; wider charts grow the canvas
const MIN_SLOT: u32 = 12;

/// Draws the top-N words somewhere and reports where
pub trait ChartRenderer: Send + Sync {
    fn render(&self, pairs: &[WordCount], top_n: usize) -> Result<PathBuf>;
}

/// Writes an SVG bar chart to a fixed path
pub struct SvgChartRenderer {
    output: PathBuf,
}

#[derive(Debug, Serialize)]
struct Bar {
    word: String,
    count: u64,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    label_x: u32,
}

#[derive(Debug, Serialize)]
struct Tick {
    y: u32,
    value: u64,
}

impl SvgChartRenderer {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
        }
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Produce the SVG document without touching the filesystem
    pub fn render_svg(&self, pairs: &[WordCount], top_n: usize) -> Result<String> {
        if pairs.is_empty() {
            return Err(SiftError::empty_input("nothing to chart"));
        }

        let bar_count = u32::try_from(pairs.len()).unwrap_or(u32::MAX);
        let width = WIDTH.max(
            MIN_SLOT
                .saturating_mul(bar_count)
                .saturating_add(MARGIN_LEFT + MARGIN_RIGHT),
        );

        let plot_left = MARGIN_LEFT;
        let plot_right = width - MARGIN_RIGHT;
        let plot_top = MARGIN_TOP;
        let plot_bottom = HEIGHT - MARGIN_BOTTOM;
        let plot_height = plot_bottom - plot_top;

        let max_count = pairs.iter().map(|p| p.count).max().unwrap_or(1).max(1);
        let axis_max = axis_ceiling(max_count);
        let scale = |value: u64| -> u32 { (value * u64::from(plot_height) / axis_max) as u32 };

        let slot = ((plot_right - plot_left) / bar_count).max(1);
        let bar_width = (slot * 4 / 5).max(1);
        let bars: Vec<Bar> = pairs
            .iter()
            .enumerate()
            .map(|(i, pair)| {
                let x = plot_left + slot * i as u32 + (slot - bar_width) / 2;
                let height = scale(pair.count);
                Bar {
                    word: pair.word.clone(),
                    count: pair.count,
                    x,
                    y: plot_bottom - height,
                    width: bar_width,
                    height,
                    label_x: x + bar_width / 2,
                }
            })
            .collect();

        let step = axis_max / TICK_COUNT;
        let ticks: Vec<Tick> = (0..=TICK_COUNT)
            .map(|i| Tick {
                y: plot_bottom - scale(step * i),
                value: step * i,
            })
            .collect();

        let mut context = Context::new();
        context.insert("title", &format!("Top-{} Most Frequent Words", top_n));
        context.insert("width", &width);
        context.insert("height", &HEIGHT);
        context.insert("center_x", &(width / 2));
        context.insert("center_y", &((plot_top + plot_bottom) / 2));
        context.insert("plot_left", &plot_left);
        context.insert("plot_right", &plot_right);
        context.insert("plot_top", &plot_top);
        context.insert("plot_bottom", &plot_bottom);
        context.insert("label_y", &(plot_bottom + 16));
        context.insert("bars", &bars);
        context.insert("ticks", &ticks);

        Ok(Tera::one_off(CHART_TEMPLATE, &context, true)?)
    }
}

impl ChartRenderer for SvgChartRenderer {
    fn render(&self, pairs: &[WordCount], top_n: usize) -> Result<PathBuf> {
        let svg = self.render_svg(pairs, top_n)?;

        let failure = || format!("cannot write {}", self.output.display());
        if let Some(parent) = self.output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).to_render_error(ErrorCode::RENDER_WRITE, failure())?;
        }
        std::fs::write(&self.output, svg).to_render_error(ErrorCode::RENDER_WRITE, failure())?;

        debug!("Wrote chart with {} bars to {}", pairs.len(), self.output.display());
        Ok(self.output.clone())
    }
}

/// Smallest multiple of the tick count that is >= `max`
fn axis_ceiling(max: u64) -> u64 {
    max.div_ceil(TICK_COUNT) * TICK_COUNT
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Vec<WordCount> {
        vec![
            WordCount::from(("cat".to_string(), 2)),
            WordCount::from(("the".to_string(), 2)),
            WordCount::from(("ran".to_string(), 1)),
        ]
    }

    #[test]
    fn test_axis_ceiling() {
        assert_eq!(axis_ceiling(1), 5);
        assert_eq!(axis_ceiling(5), 5);
        assert_eq!(axis_ceiling(6), 10);
        assert_eq!(axis_ceiling(1234), 1235);
    }

    #[test]
    fn test_render_svg_contents() {
        let renderer = SvgChartRenderer::new("unused.svg");
        let svg = renderer.render_svg(&sample(), 3).unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Top-3 Most Frequent Words"));
        assert!(svg.contains(">Words</text>"));
        assert!(svg.contains(">Frequency</text>"));
        assert!(svg.contains("<title>cat: 2</title>"));
        assert!(svg.contains("<title>ran: 1</title>"));
        assert_eq!(svg.matches("<rect x=").count(), 3);
    }

    #[test]
    fn test_tallest_bar_height_scales_to_axis() {
        let renderer = SvgChartRenderer::new("unused.svg");
        let pairs = vec![WordCount::from(("only".to_string(), 10))];
        let svg = renderer.render_svg(&pairs, 1).unwrap();

        let plot_height = HEIGHT - MARGIN_BOTTOM - MARGIN_TOP;
        assert!(svg.contains(&format!("height=\"{}\" fill=\"#1f77b4\"", plot_height)));
    }

    #[test]
    fn test_many_bars_widen_the_canvas() {
        let renderer = SvgChartRenderer::new("unused.svg");
        let pairs: Vec<WordCount> = (0..2000)
            .map(|i| WordCount::from((format!("w{}", i), 1)))
            .collect();
        let svg = renderer.render_svg(&pairs, 2000).unwrap();

        let width = MIN_SLOT * 2000 + MARGIN_LEFT + MARGIN_RIGHT;
        assert!(svg.starts_with(&format!("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\"", width)));

        let last_x = MARGIN_LEFT + MIN_SLOT * 1999;
        assert!(svg.contains(&format!("<rect x=\"{}\"", last_x + 1)));
        assert!(last_x + MIN_SLOT <= width - MARGIN_RIGHT);
    }

    #[test]
    fn test_render_empty_is_empty_input() {
        let renderer = SvgChartRenderer::new("unused.svg");
        let err = renderer.render_svg(&[], 10).unwrap_err();
        assert!(matches!(err, SiftError::EmptyInput { .. }));
    }

    #[test]
    fn test_render_writes_file() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("charts").join("words.svg");
        let renderer = SvgChartRenderer::new(&output);

        let written = renderer.render(&sample(), 3).unwrap();
        assert_eq!(written, output);
        let content = std::fs::read_to_string(&output).unwrap();
        assert!(content.contains("</svg>"));
    }
}
