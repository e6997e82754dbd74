use super::loader::merge_tables;
use super::*;
use std::collections::HashMap;
use std::time::Duration;
use tempfile::TempDir;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_defaults() {
    let config = SiftConfig::new();
    assert_eq!(config.fetch.timeout, Duration::from_secs(30));
    assert_eq!(config.fetch.retries, 2);
    assert_eq!(config.words.top_n, 10);
    assert_eq!(config.words.default_url, DEFAULT_URL);
    assert_eq!(config.words.chart_path, PathBuf::from("word_frequency.svg"));
    assert_eq!(config.sort.output_dir, PathBuf::from("sorted_files"));
    assert_eq!(config.sort.copy_concurrency, 16);
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let toml_str = r#"
[fetch]
timeout = "5s"

[words]
top_n = 25
"#;
    let config: SiftConfig = toml::from_str(toml_str).unwrap();
    assert_eq!(config.fetch.timeout, Duration::from_secs(5));
    assert_eq!(config.fetch.retries, 2);
    assert_eq!(config.words.top_n, 25);
    assert_eq!(config.sort.copy_concurrency, 16);
}

#[test]
fn test_env_overrides() {
    let mut config = SiftConfig::new();
    config
        .merge_env_vars_from(env_from(&[
            ("SIFT_FETCH_TIMEOUT", "1m 30s"),
            ("SIFT_FETCH_RETRIES", "0"),
            ("SIFT_WORKER_THREADS", "3"),
            ("SIFT_TOP_N", " 7 "),
            ("SIFT_CHART_PATH", "out/chart.svg"),
            ("SIFT_COPY_CONCURRENCY", "4"),
        ]))
        .unwrap();

    assert_eq!(config.fetch.timeout, Duration::from_secs(90));
    assert_eq!(config.fetch.retries, 0);
    assert_eq!(config.words.worker_threads, Some(3));
    assert_eq!(config.words.top_n, 7);
    assert_eq!(config.words.chart_path, PathBuf::from("out/chart.svg"));
    assert_eq!(config.sort.copy_concurrency, 4);
}

#[test]
fn test_env_override_rejects_garbage() {
    let mut config = SiftConfig::new();
    let err = config
        .merge_env_vars_from(env_from(&[("SIFT_TOP_N", "lots")]))
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::CONFIG_INVALID_VALUE);
    assert!(err.to_string().contains("SIFT_TOP_N"));

    let err = config
        .merge_env_vars_from(env_from(&[("SIFT_FETCH_TIMEOUT", "soon")]))
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::CONFIG_INVALID_VALUE);
}

#[test]
fn test_validate_rejects_zero_limits() {
    let mut config = SiftConfig::new();
    config.words.worker_threads = Some(0);
    assert!(matches!(
        config.validate(),
        Err(SiftError::Validation { .. })
    ));

    let mut config = SiftConfig::new();
    config.sort.copy_concurrency = 0;
    assert!(config.validate().is_err());

    let mut config = SiftConfig::new();
    config.words.chart_path = PathBuf::new();
    assert!(config.validate().is_err());
}

#[test]
fn test_effective_worker_threads() {
    let mut settings = WordSettings::default();
    assert!(settings.effective_worker_threads() >= 1);
    settings.worker_threads = Some(6);
    assert_eq!(settings.effective_worker_threads(), 6);
}

#[test]
fn test_merge_tables_is_deep() {
    let mut base: toml::Table = toml::from_str("[fetch]\nretries = 1\ntimeout = \"10s\"").unwrap();
    let overlay: toml::Table = toml::from_str("[fetch]\nretries = 4").unwrap();
    merge_tables(&mut base, overlay);

    let fetch = base["fetch"].as_table().unwrap();
    assert_eq!(fetch["retries"].as_integer(), Some(4));
    assert_eq!(fetch["timeout"].as_str(), Some("10s"));
}

#[tokio::test]
async fn test_loader_layers_global_and_project() {
    let temp = TempDir::new().unwrap();
    let global = temp.path().join("global.toml");
    std::fs::write(&global, "[words]\ntop_n = 3\n[sort]\ncopy_concurrency = 2\n").unwrap();
    std::fs::write(temp.path().join(PROJECT_CONFIG_FILE), "[words]\ntop_n = 12\n").unwrap();

    let config = ConfigLoader::new(temp.path())
        .with_global_path(Some(global))
        .load()
        .await
        .unwrap();

    assert_eq!(config.words.top_n, 12);
    assert_eq!(config.sort.copy_concurrency, 2);
}

#[tokio::test]
async fn test_loader_missing_explicit_file() {
    let temp = TempDir::new().unwrap();
    let err = ConfigLoader::new(temp.path())
        .with_global_path(None)
        .with_explicit_path(Some(temp.path().join("absent.toml")))
        .load()
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::CONFIG_NOT_FOUND);
}

#[tokio::test]
async fn test_loader_reports_bad_toml_with_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.toml");
    std::fs::write(&path, "[words\ntop_n = ").unwrap();

    let err = ConfigLoader::new(temp.path())
        .with_global_path(None)
        .with_explicit_path(Some(path.clone()))
        .load()
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::CONFIG_INVALID_TOML);
    assert!(err.user_message().contains("broken.toml"));
}
