//! Word frequency pipeline
//!
//! Fetch text, count it on the worker pool, select the top-N words and hand
//! them to the chart renderer. Any failure aborts the run.

pub mod engine;

pub use engine::CountEngine;

use crate::chart::ChartRenderer;
use crate::core::wordcount::{top_n, total_tokens, WordCount};
use crate::error::{ErrorCode, ErrorExt, Result, SiftError};
use crate::fetch::TextSource;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of one word analysis run
#[derive(Debug, Clone, Serialize)]
pub struct WordReport {
    pub source: String,
    pub total_words: u64,
    pub unique_words: usize,
    pub top: Vec<WordCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<PathBuf>,
}

impl WordReport {
    pub fn is_empty(&self) -> bool {
        self.total_words == 0
    }
}

pub struct WordAnalyzer {
    source: Arc<dyn TextSource>,
    engine: Arc<CountEngine>,
    renderer: Option<Arc<dyn ChartRenderer>>,
}

impl WordAnalyzer {
    pub fn new(source: Arc<dyn TextSource>, engine: CountEngine) -> Self {
        Self {
            source,
            engine: Arc::new(engine),
            renderer: None,
        }
    }

    /// Draw the top-N words after counting
    pub fn with_renderer(mut self, renderer: Arc<dyn ChartRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub async fn analyze(&self, location: &str, n: usize) -> Result<WordReport> {
        let text = self.source.fetch(location).await?;

        let engine = Arc::clone(&self.engine);
        let frequencies = tokio::task::spawn_blocking(move || engine.count(&text))
            .await
            .to_stage_error(
                ErrorCode::STAGE_JOIN_FAILED,
                "count",
                "counting task did not complete".to_string(),
            )??;

        let mut report = WordReport {
            source: location.to_string(),
            total_words: total_tokens(&frequencies),
            unique_words: frequencies.len(),
            top: top_n(&frequencies, n),
            chart: None,
        };

        if report.is_empty() {
            warn!("{}", SiftError::empty_input(format!("{} has no words", location)));
            return Ok(report);
        }
        info!(
            "Counted {} words ({} distinct) from {}",
            report.total_words, report.unique_words, location
        );

        match &self.renderer {
            Some(renderer) if !report.top.is_empty() => {
                let renderer = Arc::clone(renderer);
                let top = report.top.clone();
                let path = tokio::task::spawn_blocking(move || renderer.render(&top, n))
                    .await
                    .to_stage_error(
                        ErrorCode::STAGE_JOIN_FAILED,
                        "render",
                        "chart task did not complete".to_string(),
                    )??;
                report.chart = Some(path);
            }
            Some(_) => debug!("Top-{} selection is empty, skipping chart", n),
            None => {}
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StaticSource(&'static str);

    #[async_trait]
    impl TextSource for StaticSource {
        async fn fetch(&self, _location: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl TextSource for FailingSource {
        async fn fetch(&self, location: &str) -> Result<String> {
            Err(crate::error::common::http_status(location, 500))
        }
    }

    #[derive(Default)]
    struct RecordingRenderer {
        calls: Mutex<Vec<(Vec<WordCount>, usize)>>,
    }

    impl ChartRenderer for RecordingRenderer {
        fn render(&self, pairs: &[WordCount], top_n: usize) -> Result<PathBuf> {
            self.calls.lock().unwrap().push((pairs.to_vec(), top_n));
            Ok(PathBuf::from("chart.svg"))
        }
    }

    fn analyzer(source: Arc<dyn TextSource>) -> WordAnalyzer {
        WordAnalyzer::new(source, CountEngine::new(2).unwrap())
    }

    #[tokio::test]
    async fn test_analyze_end_to_end() {
        let renderer = Arc::new(RecordingRenderer::default());
        let report = analyzer(Arc::new(StaticSource("The cat sat. The cat ran!")))
            .with_renderer(renderer.clone())
            .analyze("memory", 2)
            .await
            .unwrap();

        assert_eq!(report.total_words, 6);
        assert_eq!(report.unique_words, 4);
        assert_eq!(
            report.top,
            vec![
                WordCount::from(("cat".to_string(), 2)),
                WordCount::from(("the".to_string(), 2)),
            ]
        );
        assert_eq!(report.chart, Some(PathBuf::from("chart.svg")));

        let calls = renderer.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, 2);
    }

    #[tokio::test]
    async fn test_analyze_empty_text_skips_chart() {
        let renderer = Arc::new(RecordingRenderer::default());
        let report = analyzer(Arc::new(StaticSource("")))
            .with_renderer(renderer.clone())
            .analyze("memory", 5)
            .await
            .unwrap();

        assert!(report.is_empty());
        assert!(report.top.is_empty());
        assert!(report.chart.is_none());
        assert!(renderer.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_analyze_top_zero_skips_chart() {
        let renderer = Arc::new(RecordingRenderer::default());
        let report = analyzer(Arc::new(StaticSource("a b c")))
            .with_renderer(renderer.clone())
            .analyze("memory", 0)
            .await
            .unwrap();

        assert_eq!(report.unique_words, 3);
        assert!(report.top.is_empty());
        assert!(renderer.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_analyze_propagates_fetch_failure() {
        let err = analyzer(Arc::new(FailingSource))
            .analyze("https://example.invalid/", 10)
            .await
            .unwrap_err();
        assert!(matches!(err, SiftError::Fetch { .. }));
    }

    #[test]
    fn test_report_serializes_without_chart() {
        let report = WordReport {
            source: "page.txt".into(),
            total_words: 3,
            unique_words: 1,
            top: vec![WordCount::from(("hi".to_string(), 3))],
            chart: None,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["top"][0]["word"], "hi");
        assert_eq!(json["top"][0]["count"], 3);
        assert!(json.get("chart").is_none());
    }
}
