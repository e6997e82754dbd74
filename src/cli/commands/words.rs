//! Words command implementation
//!
//! Counts the words of a page, prints the most frequent ones and charts them.

use crate::analyzer::{CountEngine, WordAnalyzer, WordReport};
use crate::chart::SvgChartRenderer;
use crate::config::SiftConfig;
use crate::fetch::source_for;
use crate::error::ErrorExt;
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

/// Parameters for the words command
#[derive(Debug, Clone, Default)]
pub struct WordsParams {
    pub location: Option<String>,
    pub top: Option<usize>,
    pub output: Option<PathBuf>,
    pub no_chart: bool,
    pub json: bool,
    pub threads: Option<usize>,
}

pub async fn run_words_command(params: WordsParams, mut settings: SiftConfig) -> Result<()> {
    if let Some(threads) = params.threads {
        settings.words.worker_threads = Some(threads);
    }
    if let Some(output) = params.output {
        settings.words.chart_path = output;
    }
    settings.validate()?;

    let location = params
        .location
        .unwrap_or_else(|| settings.words.default_url.clone());
    let top_n = params.top.unwrap_or(settings.words.top_n);

    let source = source_for(&location, &settings.fetch)?;
    let engine = CountEngine::new(settings.words.effective_worker_threads())?;
    let mut analyzer = WordAnalyzer::new(Arc::from(source), engine);
    if !params.no_chart {
        analyzer =
            analyzer.with_renderer(Arc::new(SvgChartRenderer::new(&settings.words.chart_path)));
    }

    let report = analyzer.analyze(&location, top_n).await?;

    if params.json {
        let json = serde_json::to_string_pretty(&report).to_other_error("Failed to encode report")?;
        println!("{}", json);
    } else {
        print!("{}", format_word_report(&report, top_n));
    }
    Ok(())
}

/// Human-readable table of the top words
pub fn format_word_report(report: &WordReport, top_n: usize) -> String {
    let mut out = String::new();

    if report.is_empty() {
        out.push_str(&format!("No words found in {}\n", report.source));
    } else if !report.top.is_empty() {
        out.push_str(&format!("Top-{} Most Frequent Words\n", top_n));
        let width = report
            .top
            .iter()
            .map(|entry| entry.word.chars().count())
            .max()
            .unwrap_or(0);
        for (rank, entry) in report.top.iter().enumerate() {
            out.push_str(&format!(
                "{:>4}. {:<width$}  {}\n",
                rank + 1,
                entry.word,
                entry.count,
                width = width
            ));
        }
    }

    if let Some(chart) = &report.chart {
        out.push_str(&format!("Plot saved as '{}'\n", chart.display()));
    }
    out.push_str(&format!("Total unique words: {}\n", report.unique_words));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::wordcount::WordCount;

    #[test]
    fn test_format_word_report() {
        let report = WordReport {
            source: "page.txt".into(),
            total_words: 6,
            unique_words: 4,
            top: vec![
                WordCount::from(("cat".to_string(), 2)),
                WordCount::from(("the".to_string(), 2)),
            ],
            chart: Some(PathBuf::from("word_frequency.svg")),
        };

        let text = format_word_report(&report, 2);
        assert!(text.starts_with("Top-2 Most Frequent Words\n"));
        assert!(text.contains("   1. cat  2\n"));
        assert!(text.contains("   2. the  2\n"));
        assert!(text.contains("Plot saved as 'word_frequency.svg'\n"));
        assert!(text.ends_with("Total unique words: 4\n"));
    }

    #[test]
    fn test_format_empty_report() {
        let report = WordReport {
            source: "blank.txt".into(),
            total_words: 0,
            unique_words: 0,
            top: vec![],
            chart: None,
        };

        let text = format_word_report(&report, 10);
        assert_eq!(text, "No words found in blank.txt\nTotal unique words: 0\n");
    }
}
