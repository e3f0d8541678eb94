//! Batch parsing of href list files
//!
//! Inputs are `.hrefs` or `.txt` files holding one href per line. Blank lines
//! and `#` comments are skipped. Files run sequentially or in thread chunks,
//! each under a logging file context so failures land in the cargo-style
//! summary grouped by file.

use crate::config::compile_time::{batch_processing, grammar};
use crate::config::runtime::RuntimeConfig;
use crate::grammar::route::Route;
use crate::lint::{lint_filters, LintWarning};
use crate::logging::{self, codes, Code, HrefLocation};
use crate::serializer;
use crate::syntax::{parse_href_with, parse_tokens, HrefError, ParseOptions};
use crate::tokens::{tokenize_href, NormalizedHref};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

const HREF_FILE_EXTENSIONS: &[&str] = &["hrefs", "txt"];

// ============================================================================
// BATCH PROCESSING TYPES
// ============================================================================

#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub max_threads: usize,
    pub recursive: bool,
    pub max_files: Option<usize>,
    pub progress_reporting: bool,
    pub fail_fast: bool,
    /// Lint filter values and log unknown ones as warnings
    pub strict: bool,
    /// Re-render every route and check it parses back to the same descriptor
    pub verify_round_trip: bool,
    pub parse_options: ParseOptions,
}

impl BatchConfig {
    /// Defaults overlaid with environment preferences
    pub fn from_runtime(runtime: &RuntimeConfig) -> Self {
        let max_threads = runtime
            .batch
            .worker_threads
            .unwrap_or_else(|| {
                thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(4)
            })
            .clamp(1, batch_processing::MAX_WORKER_THREADS);

        Self {
            max_threads,
            recursive: true,
            max_files: None,
            progress_reporting: runtime.batch.progress_reporting,
            fail_fast: false,
            strict: runtime.parser.strict_values,
            verify_round_trip: false,
            parse_options: runtime.parser.parse_options(),
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self::from_runtime(&RuntimeConfig::default())
    }
}

/// One href that parsed
#[derive(Debug, Clone)]
pub struct ParsedHref {
    pub line: usize,
    pub href: String,
    pub route: Route,
    pub lint: Vec<LintWarning>,
}

/// One href that did not
#[derive(Debug, Clone)]
pub struct HrefFailure {
    pub line: usize,
    pub href: String,
    pub code: Code,
    pub message: String,
    /// Implicated path segment for structural parse errors
    pub piece: Option<usize>,
}

impl HrefFailure {
    fn from_error(line: usize, href: &str, error: &HrefError) -> Self {
        Self {
            line,
            href: href.to_string(),
            code: error.error_code(),
            message: error.to_string(),
            piece: error.as_parse_error().map(|e| e.failing_position()),
        }
    }

    fn location(&self) -> HrefLocation {
        match self.piece {
            Some(piece) => HrefLocation::piece(self.line, piece),
            None => HrefLocation::line(self.line),
        }
    }
}

/// Per-file outcome once the file itself was readable
#[derive(Debug, Clone, Default)]
pub struct FileReport {
    pub parsed: Vec<ParsedHref>,
    pub failures: Vec<HrefFailure>,
}

impl FileReport {
    pub fn total(&self) -> usize {
        self.parsed.len() + self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn lint_count(&self) -> usize {
        self.parsed.iter().map(|p| p.lint.len()).sum()
    }
}

#[derive(Debug)]
pub struct BatchResults {
    pub successful_files: Vec<(PathBuf, FileReport)>,
    pub failed_files: Vec<(PathBuf, BatchError)>,
    pub processing_duration: Duration,
    pub files_processed: usize,
    pub files_discovered: usize,
}

impl BatchResults {
    pub fn new() -> Self {
        Self {
            successful_files: Vec::new(),
            failed_files: Vec::new(),
            processing_duration: Duration::new(0, 0),
            files_processed: 0,
            files_discovered: 0,
        }
    }

    pub fn success_count(&self) -> usize {
        self.successful_files.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failed_files.len()
    }

    pub fn success_rate(&self) -> f64 {
        if self.files_processed == 0 {
            0.0
        } else {
            self.successful_files.len() as f64 / self.files_processed as f64
        }
    }

    pub fn href_count(&self) -> usize {
        self.successful_files.iter().map(|(_, r)| r.total()).sum::<usize>()
            + self
                .failed_files
                .iter()
                .filter_map(|(_, e)| e.report())
                .map(FileReport::total)
                .sum::<usize>()
    }

    pub fn add_success(&mut self, file_path: PathBuf, report: FileReport) {
        self.successful_files.push((file_path, report));
        self.files_processed += 1;
    }

    pub fn add_failure(&mut self, file_path: PathBuf, error: BatchError) {
        self.failed_files.push((file_path, error));
        self.files_processed += 1;
    }

    pub fn merge(&mut self, other: BatchResults) {
        self.successful_files.extend(other.successful_files);
        self.failed_files.extend(other.failed_files);
        self.files_processed += other.files_processed;
    }

    pub fn summary(&self) -> String {
        format!(
            "Batch processing completed: {} files processed ({} hrefs), {} successful ({:.1}%), {} failed, {:.2}s total",
            self.files_processed,
            self.href_count(),
            self.success_count(),
            self.success_rate() * 100.0,
            self.failure_count(),
            self.processing_duration.as_secs_f64()
        )
    }
}

impl Default for BatchResults {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Path not found: {path}")]
    PathNotFound { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Unsupported input file {path} (expected .hrefs or .txt)")]
    InvalidExtension { path: String },

    #[error("No href files found in: {path}")]
    NoFilesFound { path: String },

    #[error("Too many files found: {count} (max: {max})")]
    TooManyFiles { count: usize, max: usize },

    #[error("{path} is not valid UTF-8")]
    InvalidEncoding { path: String },

    #[error("{path} holds {count} hrefs (max: {max})")]
    TooManyHrefs { path: String, count: usize, max: usize },

    #[error("{path} contains no hrefs")]
    EmptyFile { path: String },

    #[error("{failed} of {} hrefs failed to parse", .report.total())]
    InvalidHrefs { failed: usize, report: FileReport },

    #[error("IO error: {error}")]
    IoError { error: String },

    #[error("Thread pool error: {message}")]
    ThreadError { message: String },
}

impl BatchError {
    pub fn error_code(&self) -> Code {
        use codes::file_processing::*;
        match self {
            BatchError::PathNotFound { .. } | BatchError::NoFilesFound { .. } => FILE_NOT_FOUND,
            BatchError::PermissionDenied { .. } => PERMISSION_DENIED,
            BatchError::InvalidExtension { .. } => INVALID_EXTENSION,
            BatchError::TooManyFiles { .. } => INVALID_PATH,
            BatchError::InvalidEncoding { .. } => INVALID_ENCODING,
            BatchError::TooManyHrefs { .. } => TOO_MANY_HREFS,
            BatchError::EmptyFile { .. } => EMPTY_FILE,
            BatchError::InvalidHrefs { .. } => codes::href::STRUCTURAL_PARSE_ERROR,
            BatchError::IoError { .. } => IO_ERROR,
            BatchError::ThreadError { .. } => codes::system::INTERNAL_ERROR,
        }
    }

    /// Href-level detail when the file was readable
    pub fn report(&self) -> Option<&FileReport> {
        match self {
            BatchError::InvalidHrefs { report, .. } => Some(report),
            _ => None,
        }
    }

    fn from_io(path: &Path, error: io::Error) -> Self {
        let path = path.display().to_string();
        match error.kind() {
            io::ErrorKind::NotFound => BatchError::PathNotFound { path },
            io::ErrorKind::PermissionDenied => BatchError::PermissionDenied { path },
            _ => BatchError::IoError {
                error: format!("{}: {}", path, error),
            },
        }
    }
}

// ============================================================================
// FILE DISCOVERY
// ============================================================================

/// Href list files under `path`, or `path` itself when it is a file
pub fn discover_href_files(path: &Path, config: &BatchConfig) -> Result<Vec<PathBuf>, BatchError> {
    crate::log_info!("Starting file discovery",
        "path" => path.display(),
        "recursive" => config.recursive
    );

    if !path.exists() {
        return Err(BatchError::PathNotFound {
            path: path.display().to_string(),
        });
    }

    if path.is_file() {
        if !is_href_file(path) {
            return Err(BatchError::InvalidExtension {
                path: path.display().to_string(),
            });
        }
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    visit_directory(path, &mut files, config)?;

    if files.is_empty() {
        return Err(BatchError::NoFilesFound {
            path: path.display().to_string(),
        });
    }

    if files.len() > batch_processing::MAX_FILES_PER_BATCH {
        return Err(BatchError::TooManyFiles {
            count: files.len(),
            max: batch_processing::MAX_FILES_PER_BATCH,
        });
    }

    files.sort();

    crate::log_info!("File discovery completed",
        "files_found" => files.len(),
        "path" => path.display()
    );

    Ok(files)
}

fn visit_directory(
    dir_path: &Path,
    files: &mut Vec<PathBuf>,
    config: &BatchConfig,
) -> Result<(), BatchError> {
    let entries = fs::read_dir(dir_path).map_err(|e| BatchError::from_io(dir_path, e))?;

    for entry in entries {
        let path = entry.map_err(|e| BatchError::from_io(dir_path, e))?.path();

        if path.is_dir() {
            if config.recursive {
                visit_directory(&path, files, config)?;
            }
        } else if is_href_file(&path) {
            files.push(path);
        }

        if let Some(max_files) = config.max_files {
            if files.len() >= max_files {
                crate::log_warning!(
                    codes::file_processing::TOO_MANY_HREFS,
                    "Reached maximum file limit",
                    "files_found" => files.len(),
                    "limit" => max_files
                );
                files.truncate(max_files);
                return Ok(());
            }
        }
    }

    Ok(())
}

fn is_href_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                HREF_FILE_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            })
            .unwrap_or(false)
}

/// Non-blank, non-comment lines with their 1-based line numbers
fn href_lines(content: &str) -> Vec<(usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

// ============================================================================
// PER-HREF AND PER-FILE PROCESSING
// ============================================================================

/// Parse one href under the configured limits
pub fn process_href(line: usize, href: &str, config: &BatchConfig) -> Result<ParsedHref, HrefFailure> {
    if href.len() > grammar::MAX_HREF_LENGTH {
        return Err(HrefFailure {
            line,
            href: href.to_string(),
            code: codes::file_processing::HREF_TOO_LONG,
            message: format!(
                "Href is {} bytes (max: {})",
                href.len(),
                grammar::MAX_HREF_LENGTH
            ),
            piece: None,
        });
    }

    let route = match tokenize_href(href) {
        Ok(NormalizedHref::Root) => Route::Root,
        Ok(NormalizedHref::Path(tokens)) => {
            if tokens.len() > grammar::MAX_TOKEN_COUNT {
                return Err(HrefFailure {
                    line,
                    href: href.to_string(),
                    code: codes::file_processing::HREF_TOO_LONG,
                    message: format!(
                        "Href has {} segments (max: {})",
                        tokens.len(),
                        grammar::MAX_TOKEN_COUNT
                    ),
                    piece: None,
                });
            }
            parse_tokens(tokens, &config.parse_options)
                .map_err(|e| HrefFailure::from_error(line, href, &HrefError::from(e)))?
        }
        Err(error) => return Err(HrefFailure::from_error(line, href, &error)),
    };

    if config.verify_round_trip {
        verify_round_trip(line, href, &route, &config.parse_options)?;
    }

    let lint = if config.strict {
        route.filters().map(lint_filters).unwrap_or_default()
    } else {
        Vec::new()
    };

    Ok(ParsedHref {
        line,
        href: href.to_string(),
        route,
        lint,
    })
}

fn verify_round_trip(
    line: usize,
    href: &str,
    route: &Route,
    options: &ParseOptions,
) -> Result<(), HrefFailure> {
    let rendered =
        serializer::to_href(route).map_err(|e| HrefFailure::from_error(line, href, &e))?;

    match parse_href_with(&rendered, options) {
        Ok(reparsed) if reparsed == *route => Ok(()),
        Ok(_) => Err(HrefFailure {
            line,
            href: href.to_string(),
            code: codes::serializer::ROUND_TRIP_MISMATCH,
            message: format!("Rendered href {} parses to a different route", rendered),
            piece: None,
        }),
        Err(error) => Err(HrefFailure::from_error(line, &rendered, &error)),
    }
}

/// Read and parse one href list file
pub fn process_file(file_path: &Path, config: &BatchConfig) -> Result<FileReport, BatchError> {
    let bytes = fs::read(file_path).map_err(|e| BatchError::from_io(file_path, e))?;
    let content = String::from_utf8(bytes).map_err(|_| BatchError::InvalidEncoding {
        path: file_path.display().to_string(),
    })?;

    let lines = href_lines(&content);
    if lines.is_empty() {
        return Err(BatchError::EmptyFile {
            path: file_path.display().to_string(),
        });
    }
    if lines.len() > batch_processing::MAX_HREFS_PER_FILE {
        return Err(BatchError::TooManyHrefs {
            path: file_path.display().to_string(),
            count: lines.len(),
            max: batch_processing::MAX_HREFS_PER_FILE,
        });
    }

    let mut report = FileReport::default();

    for (line, href) in lines {
        match process_href(line, href, config) {
            Ok(parsed) => {
                for warning in &parsed.lint {
                    crate::log_warning!(warning.code(), &warning.message,
                        at = HrefLocation::line(line),
                        "href" => href,
                        "value" => warning.value
                    );
                }
                report.parsed.push(parsed);
            }
            Err(failure) => {
                crate::log_error!(failure.code, &failure.message,
                    at = failure.location(),
                    "href" => failure.href
                );
                report.failures.push(failure);
            }
        }
    }

    if report.is_clean() {
        Ok(report)
    } else {
        Err(BatchError::InvalidHrefs {
            failed: report.failures.len(),
            report,
        })
    }
}

/// Process under a logging file context and record the outcome
fn process_file_into(
    file_path: &Path,
    file_id: usize,
    config: &BatchConfig,
    results: &mut BatchResults,
) -> bool {
    logging::with_file_context(file_path.to_path_buf(), file_id, || {
        match process_file(file_path, config) {
            Ok(report) => {
                crate::log_success!(
                    codes::success::FILE_PROCESSING_SUCCESS,
                    "File processed successfully",
                    "hrefs" => report.total(),
                    "lint_warnings" => report.lint_count()
                );
                results.add_success(file_path.to_path_buf(), report);
                true
            }
            Err(error) => {
                if error.report().is_none() {
                    crate::log_error!(error.error_code(), &error.to_string());
                }
                results.add_failure(file_path.to_path_buf(), error);
                !config.fail_fast
            }
        }
    })
}

// ============================================================================
// BATCH PROCESSING
// ============================================================================

pub fn process_path_sequential(
    path: &Path,
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    let start_time = Instant::now();

    crate::log_info!("Starting sequential batch processing",
        "path" => path.display()
    );

    let files = discover_href_files(path, config)?;

    let mut results = BatchResults::new();
    results.files_discovered = files.len();

    for (file_id, file_path) in files.iter().enumerate() {
        if config.progress_reporting {
            println!(
                "Processing file {} of {}: {}",
                file_id + 1,
                files.len(),
                file_path.display()
            );
        }

        if !process_file_into(file_path, file_id, config, &mut results) {
            crate::log_info!("Fail-fast mode enabled, stopping batch processing");
            break;
        }
    }

    results.processing_duration = start_time.elapsed();

    crate::log_performance!(
        codes::success::BATCH_COMPLETED,
        "Sequential batch processing completed",
        duration = results.processing_duration,
        "files_processed" => results.files_processed,
        "successful" => results.success_count(),
        "failed" => results.failure_count()
    );

    Ok(results)
}

pub fn process_path_parallel(
    path: &Path,
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    let start_time = Instant::now();

    crate::log_info!("Starting parallel batch processing",
        "path" => path.display(),
        "max_threads" => config.max_threads
    );

    let files = discover_href_files(path, config)?;

    let mut results = BatchResults::new();
    results.files_discovered = files.len();

    let chunk_size = calculate_chunk_size(files.len(), config.max_threads);

    crate::log_debug!("Parallel processing configuration",
        "total_files" => files.len(),
        "chunk_size" => chunk_size,
        "threads" => config.max_threads
    );

    for (chunk_index, chunk) in files.chunks(chunk_size).enumerate() {
        let chunk_results = process_chunk_parallel(chunk, chunk_index * chunk_size, config)?;
        results.merge(chunk_results);

        if config.fail_fast && results.failure_count() > 0 {
            crate::log_info!("Fail-fast mode enabled, stopping batch processing");
            break;
        }
    }

    results.processing_duration = start_time.elapsed();

    crate::log_performance!(
        codes::success::BATCH_COMPLETED,
        "Parallel batch processing completed",
        duration = results.processing_duration,
        "files_processed" => results.files_processed,
        "successful" => results.success_count(),
        "failed" => results.failure_count(),
        "threads_used" => config.max_threads
    );

    Ok(results)
}

fn process_chunk_parallel(
    files: &[PathBuf],
    first_file_id: usize,
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    let results = Arc::new(Mutex::new(BatchResults::new()));
    let threads = config.max_threads.max(1);
    let files_per_thread = files.len().div_ceil(threads);

    let mut handles = Vec::new();

    for thread_id in 0..threads {
        let start_idx = thread_id * files_per_thread;
        if start_idx >= files.len() {
            break;
        }
        let end_idx = ((thread_id + 1) * files_per_thread).min(files.len());

        let thread_files: Vec<PathBuf> = files[start_idx..end_idx].to_vec();
        let results_clone = Arc::clone(&results);
        let thread_config = config.clone();

        handles.push(thread::spawn(move || {
            let mut local = BatchResults::new();
            for (offset, file_path) in thread_files.iter().enumerate() {
                let file_id = first_file_id + start_idx + offset;
                if !process_file_into(file_path, file_id, &thread_config, &mut local) {
                    break;
                }
            }
            results_clone
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .merge(local);
        }));
    }

    for handle in handles {
        handle.join().map_err(|_| BatchError::ThreadError {
            message: "Thread panicked during processing".to_string(),
        })?;
    }

    let mut merged = Arc::try_unwrap(results)
        .map_err(|_| BatchError::ThreadError {
            message: "Failed to extract results from thread pool".to_string(),
        })?
        .into_inner()
        .unwrap_or_else(PoisonError::into_inner);

    // Threads finish in any order
    merged.successful_files.sort_by(|a, b| a.0.cmp(&b.0));
    merged.failed_files.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(merged)
}

fn calculate_chunk_size(file_count: usize, max_threads: usize) -> usize {
    const MIN_CHUNK_SIZE: usize = 1;
    const MAX_CHUNK_SIZE: usize = 50;

    file_count
        .div_ceil(max_threads.max(1))
        .clamp(MIN_CHUNK_SIZE, MAX_CHUNK_SIZE)
}

// ============================================================================
// PUBLIC API
// ============================================================================

pub fn process_path(path: &Path) -> Result<BatchResults, BatchError> {
    process_path_with_config(path, &BatchConfig::default())
}

/// Sequential when one thread is configured, parallel otherwise
pub fn process_path_with_config(
    path: &Path,
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    if config.max_threads <= 1 {
        process_path_sequential(path, config)
    } else {
        process_path_parallel(path, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    fn test_config() -> BatchConfig {
        BatchConfig {
            max_threads: 2,
            recursive: true,
            max_files: None,
            progress_reporting: false,
            fail_fast: false,
            strict: false,
            verify_round_trip: true,
            parse_options: ParseOptions::for_year(2024),
        }
    }

    #[test]
    fn test_file_discovery() {
        let temp_dir = tempdir().unwrap();
        let temp_path = temp_dir.path();

        fs::write(temp_path.join("a.hrefs"), "/films/\n").unwrap();
        fs::write(temp_path.join("b.txt"), "/lists/\n").unwrap();
        fs::write(temp_path.join("c.json"), "{}").unwrap();
        fs::create_dir(temp_path.join("nested")).unwrap();
        fs::write(temp_path.join("nested").join("d.hrefs"), "/members/\n").unwrap();

        let files = discover_href_files(temp_path, &test_config()).unwrap();
        assert_eq!(files.len(), 3);

        let shallow = BatchConfig {
            recursive: false,
            ..test_config()
        };
        assert_eq!(discover_href_files(temp_path, &shallow).unwrap().len(), 2);
    }

    #[test]
    fn test_discovery_errors() {
        let temp_dir = tempdir().unwrap();
        let config = test_config();

        assert_matches!(
            discover_href_files(&temp_dir.path().join("missing"), &config),
            Err(BatchError::PathNotFound { .. })
        );
        assert_matches!(
            discover_href_files(temp_dir.path(), &config),
            Err(BatchError::NoFilesFound { .. })
        );

        let json = temp_dir.path().join("routes.json");
        fs::write(&json, "[]").unwrap();
        assert_matches!(
            discover_href_files(&json, &config),
            Err(BatchError::InvalidExtension { .. })
        );
    }

    #[test]
    fn test_max_files_limit() {
        let temp_dir = tempdir().unwrap();
        for name in ["a", "b", "c"] {
            fs::write(temp_dir.path().join(format!("{name}.hrefs")), "/films/\n").unwrap();
        }

        let config = BatchConfig {
            max_files: Some(2),
            ..test_config()
        };
        assert_eq!(discover_href_files(temp_dir.path(), &config).unwrap().len(), 2);
    }

    #[test]
    fn test_href_lines_skip_blanks_and_comments() {
        let content = "# watchlist pages\n\n/someuser/watchlist/\n  /films/by/rating/  \n#/ignored/\n";
        assert_eq!(
            href_lines(content),
            vec![(3, "/someuser/watchlist/"), (4, "/films/by/rating/")]
        );
    }

    #[test]
    fn test_process_file_success() {
        let temp_dir = tempdir().unwrap();
        let file = temp_dir.path().join("ok.hrefs");
        fs::write(
            &file,
            "/films/genre/action+-horror/by/rating/\nhttps://letterboxd.com/someuser/films/diary/\n/\n",
        )
        .unwrap();

        let report = process_file(&file, &test_config()).unwrap();
        assert_eq!(report.total(), 3);
        assert!(report.is_clean());
        assert_matches!(report.parsed[2].route, Route::Root);
    }

    #[test]
    fn test_process_file_collects_failures() {
        let temp_dir = tempdir().unwrap();
        let file = temp_dir.path().join("mixed.hrefs");
        fs::write(
            &file,
            "/films/\n/films/bogus/\nhttps://example.com/films/\nfilms\n",
        )
        .unwrap();

        let error = process_file(&file, &test_config()).unwrap_err();
        assert_matches!(error, BatchError::InvalidHrefs { failed: 3, .. });

        let report = error.report().unwrap();
        assert_eq!(report.parsed.len(), 1);
        assert_eq!(report.failures[0].line, 2);
        assert_eq!(report.failures[0].code, codes::href::STRUCTURAL_PARSE_ERROR);
        assert_eq!(report.failures[0].piece, Some(1));
        assert_eq!(report.failures[1].code, codes::href::INVALID_HOST);
        assert_eq!(report.failures[2].code, codes::href::MALFORMED_HREF);
    }

    #[test]
    fn test_process_file_rejects_empty_and_non_utf8() {
        let temp_dir = tempdir().unwrap();

        let empty = temp_dir.path().join("empty.hrefs");
        fs::write(&empty, "# nothing here\n\n").unwrap();
        assert_matches!(
            process_file(&empty, &test_config()),
            Err(BatchError::EmptyFile { .. })
        );

        let binary = temp_dir.path().join("binary.hrefs");
        fs::write(&binary, [0xff, 0xfe, 0x00]).unwrap();
        assert_matches!(
            process_file(&binary, &test_config()),
            Err(BatchError::InvalidEncoding { .. })
        );
    }

    #[test]
    fn test_process_href_limits() {
        let config = test_config();

        let long = format!("/films/like/{}/", "x".repeat(grammar::MAX_HREF_LENGTH));
        let failure = process_href(1, &long, &config).unwrap_err();
        assert_eq!(failure.code, codes::file_processing::HREF_TOO_LONG);

        let deep = format!("/journal/{}", "a/".repeat(grammar::MAX_TOKEN_COUNT));
        let failure = process_href(2, &deep, &config).unwrap_err();
        assert_eq!(failure.code, codes::file_processing::HREF_TOO_LONG);
    }

    #[test]
    fn test_strict_mode_lints() {
        let config = BatchConfig {
            strict: true,
            ..test_config()
        };
        let parsed = process_href(1, "/films/decade/1850s/by/loudest/", &config).unwrap();
        assert_eq!(parsed.lint.len(), 2);

        let relaxed = process_href(1, "/films/decade/1850s/", &test_config()).unwrap();
        assert!(relaxed.lint.is_empty());
    }

    #[test]
    fn test_sequential_and_parallel_agree() {
        let temp_dir = tempdir().unwrap();
        for i in 0..5 {
            fs::write(
                temp_dir.path().join(format!("f{i}.hrefs")),
                "/films/\n/someuser/list/faves/detail/\n",
            )
            .unwrap();
        }
        fs::write(temp_dir.path().join("bad.hrefs"), "/someuser/nope/\n").unwrap();

        let sequential = process_path_sequential(temp_dir.path(), &test_config()).unwrap();
        let parallel = process_path_parallel(temp_dir.path(), &test_config()).unwrap();

        assert_eq!(sequential.files_processed, 6);
        assert_eq!(parallel.files_processed, 6);
        assert_eq!(sequential.success_count(), parallel.success_count());
        assert_eq!(sequential.failure_count(), 1);
        assert_eq!(parallel.failure_count(), 1);
        assert_eq!(sequential.href_count(), 11);
    }

    #[test]
    fn test_fail_fast_stops_sequential_batch() {
        let temp_dir = tempdir().unwrap();
        fs::write(temp_dir.path().join("a.hrefs"), "films\n").unwrap();
        fs::write(temp_dir.path().join("b.hrefs"), "/films/\n").unwrap();

        let config = BatchConfig {
            fail_fast: true,
            ..test_config()
        };
        let results = process_path_sequential(temp_dir.path(), &config).unwrap();
        assert_eq!(results.files_processed, 1);
        assert_eq!(results.failure_count(), 1);
    }

    #[test]
    fn test_chunk_size_calculation() {
        assert_eq!(calculate_chunk_size(100, 4), 25);
        assert_eq!(calculate_chunk_size(10, 4), 3);
        assert_eq!(calculate_chunk_size(1, 4), 1);
        assert_eq!(calculate_chunk_size(200, 4), 50);
        assert_eq!(calculate_chunk_size(0, 0), 1);
    }

    #[test]
    fn test_batch_results_summary() {
        let mut results = BatchResults::new();
        assert_eq!(results.success_rate(), 0.0);

        results.add_success(PathBuf::from("a.hrefs"), FileReport::default());
        results.add_failure(
            PathBuf::from("b.hrefs"),
            BatchError::EmptyFile {
                path: "b.hrefs".to_string(),
            },
        );

        assert_eq!(results.success_rate(), 0.5);
        assert!(results.summary().contains("2 files processed"));
    }
}
