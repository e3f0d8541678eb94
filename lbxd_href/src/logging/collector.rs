//! Per-file event collection for batch runs, with cargo-style reporting

use super::config;
use super::events::{HrefLocation, LogEvent};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// The batch input currently being processed on this thread
#[derive(Debug, Clone)]
pub struct FileProcessingContext {
    pub file_path: PathBuf,
    pub file_id: usize,
    pub start_time: Instant,
}

impl FileProcessingContext {
    pub fn new(file_path: PathBuf, file_id: usize) -> Self {
        Self {
            file_path,
            file_id,
            start_time: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProcessingSummary {
    pub total_files: usize,
    pub successful_files: usize,
    pub failed_files: usize,
    pub files_with_warnings: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
    pub total_processing_time: Duration,
}

impl ProcessingSummary {
    pub fn success_rate(&self) -> f64 {
        if self.total_files == 0 {
            0.0
        } else {
            self.successful_files as f64 / self.total_files as f64
        }
    }

    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.total_warnings > 0
    }
}

/// Thread-safe event store keyed by input file
pub struct ErrorCollector {
    file_events: Mutex<BTreeMap<PathBuf, Vec<LogEvent>>>,
    file_contexts: Mutex<BTreeMap<PathBuf, FileProcessingContext>>,
    processing_start: Instant,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self {
            file_events: Mutex::new(BTreeMap::new()),
            file_contexts: Mutex::new(BTreeMap::new()),
            processing_start: Instant::now(),
        }
    }

    /// Record an event; per-file and global caps come from the build profile
    pub fn record_event(&self, file_path: &Path, event: LogEvent) {
        let mut events = lock(&self.file_events);

        let total: usize = events.values().map(Vec::len).sum();
        if total >= config::get_max_error_collection() {
            return;
        }

        let max_events_per_file = config::get_max_log_events_per_file();
        let file_events = events.entry(file_path.to_path_buf()).or_default();

        if file_events.len() < max_events_per_file {
            file_events.push(event);
        } else if file_events.len() == max_events_per_file {
            file_events.push(LogEvent::warning(&format!(
                "Too many events for file (limit: {})",
                max_events_per_file
            )));
        }
    }

    /// Register a file so clean files still count in the summary
    pub fn record_file_context(&self, context: FileProcessingContext) {
        lock(&self.file_events)
            .entry(context.file_path.clone())
            .or_default();
        lock(&self.file_contexts).insert(context.file_path.clone(), context);
    }

    pub fn get_file_events(&self, file_path: &Path) -> Vec<LogEvent> {
        lock(&self.file_events)
            .get(file_path)
            .cloned()
            .unwrap_or_default()
    }

    pub fn get_file_errors(&self, file_path: &Path) -> Vec<LogEvent> {
        self.get_file_events(file_path)
            .into_iter()
            .filter(LogEvent::is_error)
            .collect()
    }

    pub fn get_file_warnings(&self, file_path: &Path) -> Vec<LogEvent> {
        self.get_file_events(file_path)
            .into_iter()
            .filter(LogEvent::is_warning)
            .collect()
    }

    pub fn file_has_errors(&self, file_path: &Path) -> bool {
        !self.get_file_errors(file_path).is_empty()
    }

    pub fn get_all_file_events(&self) -> BTreeMap<PathBuf, Vec<LogEvent>> {
        lock(&self.file_events).clone()
    }

    pub fn get_summary(&self) -> ProcessingSummary {
        let events = lock(&self.file_events);

        let mut summary = ProcessingSummary {
            total_files: events.len(),
            total_processing_time: self.processing_start.elapsed(),
            ..ProcessingSummary::default()
        };

        for file_events in events.values() {
            let errors = file_events.iter().filter(|e| e.is_error()).count();
            let warnings = file_events.iter().filter(|e| e.is_warning()).count();

            if errors > 0 {
                summary.failed_files += 1;
            } else if warnings > 0 {
                summary.files_with_warnings += 1;
            } else {
                summary.successful_files += 1;
            }

            summary.total_errors += errors;
            summary.total_warnings += warnings;
        }

        summary
    }

    /// Errors whose code requires halting the batch
    pub fn get_critical_errors(&self) -> Vec<(PathBuf, LogEvent)> {
        lock(&self.file_events)
            .iter()
            .flat_map(|(path, events)| {
                events
                    .iter()
                    .filter(|e| e.is_error() && e.requires_halt())
                    .map(move |e| (path.clone(), e.clone()))
            })
            .collect()
    }

    pub fn total_event_count(&self) -> usize {
        lock(&self.file_events).values().map(Vec::len).sum()
    }

    /// (current, max, fraction) against the global cap
    pub fn get_capacity_info(&self) -> (usize, usize, f64) {
        let current = self.total_event_count();
        let max = config::get_max_error_collection();
        let fraction = if max > 0 {
            current as f64 / max as f64
        } else {
            0.0
        };
        (current, max, fraction)
    }

    pub fn clear(&self) {
        lock(&self.file_events).clear();
        lock(&self.file_contexts).clear();
    }
}

impl Default for ErrorCollector {
    fn default() -> Self {
        Self::new()
    }
}

fn location_suffix(file_path: &Path, location: Option<HrefLocation>) -> String {
    match location {
        Some(HrefLocation {
            line,
            piece: Some(piece),
        }) => format!("\n  --> {}:{}:{}", file_path.display(), line, piece),
        Some(HrefLocation { line, piece: None }) => {
            format!("\n  --> {}:{}", file_path.display(), line)
        }
        None => String::new(),
    }
}

fn push_context(output: &mut String, event: &LogEvent) {
    let mut keys: Vec<_> = event
        .context
        .keys()
        .filter(|key| *key != "file" && *key != "file_id")
        .collect();
    keys.sort();
    for key in keys {
        output.push_str(&format!("  = {}: {}\n", key, event.context[key]));
    }
}

/// Render collected events grouped by file, errors before warnings
pub fn format_cargo_style_errors(collector: &ErrorCollector) -> String {
    let mut output = String::new();

    for (file_path, events) in &collector.get_all_file_events() {
        let errors: Vec<_> = events.iter().filter(|e| e.is_error()).collect();
        let warnings: Vec<_> = events.iter().filter(|e| e.is_warning()).collect();

        if errors.is_empty() && warnings.is_empty() {
            continue;
        }

        output.push_str(&format!("Checking {}...\n", file_path.display()));

        for event in errors {
            output.push_str(&format!(
                "error[{}]: {}{}\n",
                event.code.as_str(),
                event.message,
                location_suffix(file_path, event.location)
            ));
            output.push_str(&format!(
                "  = severity: {}, category: {}\n",
                event.severity(),
                event.category()
            ));
            push_context(&mut output, event);

            let action = event.recommended_action();
            if action != "No specific action available" {
                output.push_str(&format!("  = help: {}\n", action));
            }
        }

        for event in warnings {
            output.push_str(&format!(
                "warning[{}]: {}{}\n",
                event.code.as_str(),
                event.message,
                location_suffix(file_path, event.location)
            ));
            push_context(&mut output, event);
        }

        output.push('\n');
    }

    let summary = collector.get_summary();
    if summary.total_errors > 0 {
        output.push_str(&format!("Total errors: {}\n", summary.total_errors));
    }
    if summary.total_warnings > 0 {
        output.push_str(&format!("Total warnings: {}\n", summary.total_warnings));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_error_collector_basic() {
        let collector = ErrorCollector::new();
        let file_path = PathBuf::from("watchlists.hrefs");

        collector.record_event(
            &file_path,
            LogEvent::error(codes::href::MALFORMED_HREF, "Invalid href: films"),
        );

        assert_eq!(collector.get_file_events(&file_path).len(), 1);
        assert!(collector.file_has_errors(&file_path));
        assert!(collector.get_file_warnings(&file_path).is_empty());
    }

    #[test]
    fn test_processing_summary() {
        let collector = ErrorCollector::new();
        let failed = PathBuf::from("a.hrefs");
        let warned = PathBuf::from("b.hrefs");
        let clean = PathBuf::from("c.hrefs");

        collector.record_event(
            &failed,
            LogEvent::error(codes::href::STRUCTURAL_PARSE_ERROR, "Error"),
        );
        collector.record_event(
            &warned,
            LogEvent::warning_with_code(codes::lint::UNKNOWN_FILTER_VALUE, "Warning"),
        );
        collector.record_file_context(FileProcessingContext::new(clean, 2));

        let summary = collector.get_summary();
        assert_eq!(summary.total_files, 3);
        assert_eq!(summary.failed_files, 1);
        assert_eq!(summary.files_with_warnings, 1);
        assert_eq!(summary.successful_files, 1);
        assert_eq!(summary.total_errors, 1);
        assert_eq!(summary.total_warnings, 1);
        assert!(summary.has_errors());
    }

    #[test]
    fn test_critical_errors() {
        let collector = ErrorCollector::new();
        let file_path = PathBuf::from("a.hrefs");

        collector.record_event(
            &file_path,
            LogEvent::error(codes::system::INTERNAL_ERROR, "Critical error"),
        );
        collector.record_event(
            &file_path,
            LogEvent::error(codes::href::INVALID_HOST, "Normal error"),
        );

        let critical = collector.get_critical_errors();
        assert_eq!(critical.len(), 1);
        assert_eq!(critical[0].1.code.as_str(), "ERR001");
    }

    #[test]
    fn test_per_file_cap_adds_one_marker() {
        let collector = ErrorCollector::new();
        let file_path = PathBuf::from("noisy.hrefs");
        let cap = config::get_max_log_events_per_file();

        for _ in 0..cap + 5 {
            collector.record_event(&file_path, LogEvent::warning("again"));
        }

        let events = collector.get_file_events(&file_path);
        assert_eq!(events.len(), cap + 1);
        assert!(events[cap].message.starts_with("Too many events"));
    }

    #[test]
    fn test_cargo_style_output() {
        let collector = ErrorCollector::new();
        let file_path = PathBuf::from("lists.hrefs");

        collector.record_event(
            &file_path,
            LogEvent::error(codes::href::STRUCTURAL_PARSE_ERROR, "Unknown href filter")
                .with_location(HrefLocation::piece(3, 2))
                .with_context("href", "/films/bogus/")
                .with_context("file", "lists.hrefs"),
        );

        let output = format_cargo_style_errors(&collector);
        assert!(output.contains("Checking lists.hrefs..."));
        assert!(output.contains("error[E050]: Unknown href filter\n  --> lists.hrefs:3:2"));
        assert!(output.contains("  = href: /films/bogus/"));
        assert!(!output.contains("  = file:"));
        assert!(output.contains("Total errors: 1"));
    }

    #[test]
    fn test_clear() {
        let collector = ErrorCollector::new();
        collector.record_event(Path::new("a.hrefs"), LogEvent::warning("w"));
        collector.clear();
        assert_eq!(collector.total_event_count(), 0);
        assert_eq!(collector.get_capacity_info().0, 0);
    }
}
