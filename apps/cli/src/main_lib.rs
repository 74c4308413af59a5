use std::io::{self, Write};

use anyhow::{bail, Context};
use lltrade_market_data::{read_catalog, CodeLister, SinaClient};
use tracing::{error, info, warn, Dispatch};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Layer, Registry};

use crate::config::{Config, LogConfig, LogFormat};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Build the log dispatcher for this run: stderr and/or daily rotated files.
/// The caller scopes it with `tracing::dispatcher::with_default`, so no global
/// subscriber is installed.
pub fn build_dispatch(config: &LogConfig) -> anyhow::Result<Dispatch> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .with_context(|| format!("Invalid log level: {}", config.level))?;

    let mut layers: Vec<BoxedLayer> = Vec::new();
    if config.console {
        layers.push(format_layer(config.format, io::stderr, true));
    }
    if let Some(dir) = &config.dir {
        let appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(&config.file_prefix)
            .filename_suffix("log")
            .max_log_files(config.max_files)
            .build(dir)
            .with_context(|| format!("Cannot open log directory {}", dir.display()))?;
        layers.push(format_layer(config.format, appender, false));
    }

    let subscriber = tracing_subscriber::registry().with(layers).with(filter);
    Ok(Dispatch::new(subscriber))
}

fn format_layer<W>(format: LogFormat, writer: W, ansi: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    match format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(false)
            .with_writer(writer)
            .boxed(),
        LogFormat::Text => fmt::layer()
            .with_target(true)
            .with_line_number(true)
            .with_ansi(ansi)
            .with_writer(writer)
            .boxed(),
    }
}

/// Fetch quotes for `ids` and print one JSON object per line.
pub fn run_quotes(config: &Config, ids: &[String]) -> anyhow::Result<()> {
    let client = SinaClient::new(config.sina.clone())?;
    let report = client.get_quotes_with_report(ids)?;

    let mut out = io::stdout().lock();
    for record in &report.records {
        serde_json::to_writer(&mut out, record)?;
        writeln!(out)?;
    }
    out.flush()?;

    if report.is_clean() {
        info!("Quotes: {}", report.summary());
    } else {
        warn!("Quotes: {}", report.summary());
    }
    Ok(())
}

/// Write a catalog file per segment. A failing segment does not stop the
/// others; the run fails if any segment failed.
pub fn run_codes(config: &Config, segments: &[String], check: bool) -> anyhow::Result<()> {
    let client = SinaClient::new(config.sina.clone())?;
    let lister = CodeLister::new(&client, config.lister.clone());

    let mut failed = Vec::new();
    for segment in segments {
        let result = lister
            .list_codes(segment)
            .map_err(anyhow::Error::from)
            .and_then(|summary| {
                if check {
                    let entries = read_catalog(&summary.path)
                        .with_context(|| format!("Reading back {}", summary.path.display()))?;
                    if entries.len() != summary.entries_written {
                        bail!(
                            "{} holds {} entries, expected {}",
                            summary.path.display(),
                            entries.len(),
                            summary.entries_written
                        );
                    }
                }
                Ok(())
            });

        if let Err(e) = result {
            error!("Segment {} failed: {:#}", segment, e);
            failed.push(segment.as_str());
        }
    }

    if !failed.is_empty() {
        bail!("{} segment(s) failed: {}", failed.len(), failed.join(", "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_file_sink_receives_events() {
        let dir = tempfile::tempdir().unwrap();
        let config = LogConfig {
            console: false,
            dir: Some(dir.path().to_path_buf()),
            file_prefix: "unit".to_string(),
            ..Default::default()
        };

        let dispatch = build_dispatch(&config).unwrap();
        tracing::dispatcher::with_default(&dispatch, || info!("catalog written"));
        drop(dispatch);

        let files: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        assert_eq!(files.len(), 1);
        let name = files[0].file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("unit.") && name.ends_with(".log"), "{name}");

        let content = fs::read_to_string(&files[0]).unwrap();
        assert!(content.contains("catalog written"));
    }

    #[test]
    fn test_json_file_lines() {
        let dir = tempfile::tempdir().unwrap();
        let config = LogConfig {
            format: LogFormat::Json,
            console: false,
            dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        };

        let dispatch = build_dispatch(&config).unwrap();
        tracing::dispatcher::with_default(&dispatch, || warn!("page skipped"));
        drop(dispatch);

        let path = fs::read_dir(dir.path()).unwrap().next().unwrap().unwrap().path();
        let content = fs::read_to_string(path).unwrap();
        let line: serde_json::Value =
            serde_json::from_str(content.lines().next().unwrap()).unwrap();
        assert_eq!(line["level"], "WARN");
        assert_eq!(line["fields"]["message"], "page skipped");
    }

    #[test]
    fn test_invalid_level_rejected() {
        let config = LogConfig {
            level: "lltrade=loud".to_string(),
            console: false,
            ..Default::default()
        };
        if std::env::var_os("RUST_LOG").is_none() {
            assert!(build_dispatch(&config).is_err());
        }
    }
}
