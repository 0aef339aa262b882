//! Tail — read a client log into entries and write them out.
//!
//! This is blocking code. It owns the log file handle for the whole run and
//! drops it on every exit path; the sources only borrow it.

use std::fs::File;
use std::io::{self, BufReader, Write};

use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::conf::{OutputFormat, ReaderConfig};
use crate::cursor::{CursorStats, LineCursor};
use crate::filter::{self, FilterError, FilterSnapshot};
use crate::hearthstone::{self, LogEntry};
use crate::reader::{EntryReader, NotReadable, ReadError, ReadStats};
use crate::source::{FileSource, MonitoringSource};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid filter: {0}")]
    Filter(#[from] FilterError),

    #[error("failed to write entry: {0}")]
    Output(#[from] io::Error),

    #[error("failed to encode entry: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub read: ReadStats,
    pub cursor: CursorStats,
    pub filters: Vec<FilterSnapshot>,
}

/// Read `config.log_path` until the input ends, writing each entry to `out`.
///
/// With `follow` set the file is tailed until `shutdown_rx` carries `true`
/// (or its sender goes away). Unreadable lines are logged and skipped.
pub fn run<W: Write>(
    config: &ReaderConfig,
    shutdown_rx: watch::Receiver<bool>,
    out: &mut W,
) -> Result<RunSummary, RunError> {
    let file = File::open(&config.log_path).map_err(|source| RunError::Open {
        path: config.log_path.clone(),
        source,
    })?;
    let mut handle = BufReader::new(file);

    let engines = config.filter.engines()?;

    let cursor = if config.follow {
        LineCursor::new(
            MonitoringSource::new(&mut handle)
                .with_poll_interval(config.poll_interval())
                .with_shutdown(shutdown_rx),
        )
    } else {
        LineCursor::new(FileSource::new(&mut handle))
    };
    let cursor = cursor.with_filter(filter::all_of(&engines));

    let mut reader = EntryReader::new(cursor, hearthstone::entry_parsers());
    info!(
        path = %config.log_path,
        follow = config.follow,
        parsers = reader.parser_count(),
        filters = engines.len(),
        "tail: reading log"
    );

    loop {
        match reader.read_entry() {
            Ok(entry) => write_entry(out, config.output, &entry)?,
            Err(ReadError::NotReadable(e)) => report_unreadable(&e),
            Err(ReadError::NoMoreInput(reason)) => {
                info!(reason = %reason, "tail: input ended");
                break;
            }
        }
    }

    let read = reader.stats();
    let cursor = reader.into_inner().stats();
    let summary = RunSummary {
        read,
        cursor,
        filters: engines.iter().map(|e| e.snapshot()).collect(),
    };
    info!(
        entries = summary.read.entries,
        not_readable = summary.read.not_readable,
        lines = summary.read.lines,
        filtered = summary.cursor.lines_filtered,
        "tail: done"
    );
    Ok(summary)
}

fn write_entry<W: Write>(out: &mut W, format: OutputFormat, entry: &LogEntry) -> Result<(), RunError> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, entry)?;
            writeln!(out)?;
        }
        OutputFormat::Debug => writeln!(out, "{:#?}", entry)?,
    }
    out.flush()?;
    Ok(())
}

fn report_unreadable(e: &NotReadable) {
    let causes: Vec<String> = e.causes.iter().map(|c| c.to_string()).collect();
    warn!(
        lines = e.lines.len(),
        first = e.lines.first().map(String::as_str).unwrap_or(""),
        causes = ?causes,
        "tail: skipped unreadable lines"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hearthstone::testing::{power, zone};
    use std::fs::OpenOptions;
    use std::thread;
    use std::time::Duration;

    fn write_log(lines: &[String]) -> tempfile::NamedTempFile {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(tmp, "{}", line).unwrap();
        }
        tmp.flush().unwrap();
        tmp
    }

    fn config_for(tmp: &tempfile::NamedTempFile) -> ReaderConfig {
        ReaderConfig {
            log_path: tmp.path().to_string_lossy().into_owned(),
            poll_interval_ms: 10,
            ..Default::default()
        }
    }

    fn sample() -> Vec<String> {
        vec![
            "Initialize engine version: 5.1.3p2".to_string(),
            power("TAG_CHANGE Entity=GameEntity tag=TURN value=1"),
            power("FULL_ENTITY - Creating ID=34 CardID=CS2_064"),
            power("    tag=HEALTH value=6"),
            power("BLOCK_START BlockType=TRIGGER"),
            zone("TRANSITIONING card [name=Gul'dan id=4 zone=PLAY zonePos=0 cardId=HERO_07 player=1] to FRIENDLY PLAY (Hero)"),
        ]
    }

    fn json_lines(out: &[u8]) -> Vec<serde_json::Value> {
        String::from_utf8(out.to_vec())
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    // ── Finite file ─────────────────────────────────────────────

    #[test]
    fn test_run_writes_json_lines() {
        let tmp = write_log(&sample());
        let (_tx, rx) = watch::channel(false);
        let mut out = Vec::new();

        let summary = run(&config_for(&tmp), rx, &mut out).unwrap();

        let entries = json_lines(&out);
        let types: Vec<_> = entries.iter().map(|e| e["type"].as_str().unwrap().to_string()).collect();
        assert_eq!(types, ["tag_change", "full_entity", "transitioning"]);
        assert_eq!(entries[1]["tags"][0]["value"], "6");

        assert_eq!(summary.read.entries, 3);
        assert_eq!(summary.read.not_readable, 1);
        assert_eq!(summary.cursor.lines_pulled, 6);
        assert_eq!(summary.cursor.lines_filtered, 1);
        assert_eq!(summary.filters.len(), 1);
    }

    #[test]
    fn test_run_debug_output() {
        let tmp = write_log(&[power("TAG_CHANGE Entity=GameEntity tag=TURN value=1")]);
        let (_tx, rx) = watch::channel(false);
        let mut out = Vec::new();
        let cfg = ReaderConfig {
            output: OutputFormat::Debug,
            ..config_for(&tmp)
        };

        run(&cfg, rx, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("TagChange"));
        assert!(text.contains("\"TURN\""));
    }

    #[test]
    fn test_run_with_pattern_filter() {
        let tmp = write_log(&sample());
        let (_tx, rx) = watch::channel(false);
        let mut out = Vec::new();
        let mut cfg = config_for(&tmp);
        cfg.filter.pattern = Some("^\\[Zone\\]".to_string());
        cfg.filter.case_sensitive = true;

        let summary = run(&cfg, rx, &mut out).unwrap();
        assert_eq!(json_lines(&out).len(), 1);
        assert_eq!(summary.read.not_readable, 0);
        assert_eq!(summary.filters[1].lines_matched, 1);
    }

    #[test]
    fn test_run_missing_file() {
        let cfg = ReaderConfig {
            log_path: "/nonexistent/output_log.txt".to_string(),
            ..Default::default()
        };
        let (_tx, rx) = watch::channel(false);
        let err = run(&cfg, rx, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, RunError::Open { .. }));
        assert!(err.to_string().contains("/nonexistent/output_log.txt"));
    }

    #[test]
    fn test_run_invalid_filter() {
        let tmp = write_log(&sample());
        let mut cfg = config_for(&tmp);
        cfg.filter.pattern = Some("[broken".to_string());
        let (_tx, rx) = watch::channel(false);
        let err = run(&cfg, rx, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, RunError::Filter(_)));
    }

    // ── Follow ──────────────────────────────────────────────────

    #[test]
    fn test_follow_reads_appended_entries_until_shutdown() {
        let tmp = write_log(&[power("TAG_CHANGE Entity=GameEntity tag=TURN value=1")]);
        let cfg = ReaderConfig {
            follow: true,
            ..config_for(&tmp)
        };
        let (tx, rx) = watch::channel(false);

        let path = tmp.path().to_path_buf();
        let writer = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            let mut file = OpenOptions::new().append(true).open(&path).unwrap();
            writeln!(file, "{}", power("TAG_CHANGE Entity=GameEntity tag=TURN value=2")).unwrap();
            file.flush().unwrap();
            thread::sleep(Duration::from_millis(150));
            tx.send(true).unwrap();
            thread::sleep(Duration::from_millis(100));
        });

        let mut out = Vec::new();
        let summary = run(&cfg, rx, &mut out).unwrap();
        writer.join().unwrap();

        let entries = json_lines(&out);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1]["value"], "2");
        assert_eq!(summary.read.entries, 2);
    }
}
