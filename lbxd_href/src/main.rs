use lbxd_href::config::runtime::RuntimeConfig;
use lbxd_href::logging::codes;
use lbxd_href::{batch, lint, logging, serializer, syntax};
use std::env;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let runtime = RuntimeConfig::default();

    logging::config::init_runtime_preferences(runtime.logging.clone())?;
    logging::init_global_logging()?;

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <href|file|directory> [options]", args[0]);
        eprintln!("       {} --help", args[0]);
        std::process::exit(1);
    }

    if args[1] == "--help" {
        print_help(&args[0]);
        return Ok(());
    }

    let config = match parse_batch_options(&args[2..], batch::BatchConfig::from_runtime(&runtime)) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("Error: {}", message);
            std::process::exit(2);
        }
    };

    let input = &args[1];
    let input_path = Path::new(input);

    // Existing paths win; anything else is treated as an href
    if input_path.exists() {
        process_batch(input_path, &config)?;
    } else {
        process_single_href(input, &config)?;
    }

    Ok(())
}

fn print_help(program_name: &str) {
    println!("lbxd_href v{}", env!("CARGO_PKG_VERSION"));
    println!("Parse letterboxd.com hrefs into typed routes and render them back");
    println!();
    println!("USAGE:");
    println!(
        "    {} <href> [options]               # Parse one href",
        program_name
    );
    println!(
        "    {} <file|directory> [options]     # Parse href list files",
        program_name
    );
    println!();
    println!("ARGUMENTS:");
    println!("    <href>         Site path (/films/by/rating/) or full site URL");
    println!("    <file>         .hrefs or .txt file, one href per line, # comments");
    println!("    <directory>    Directory searched for href list files");
    println!();
    println!("OPTIONS:");
    println!("    --help              Show this help message");
    println!("    --year N            Current year for year-in-review routes (default: clock)");
    println!("    --strict            Lint filter values against known vocabularies");
    println!("    --verify            Check every route re-renders to an equal route");
    println!("    --sequential        Force sequential processing (no parallelism)");
    println!("    --threads N         Set maximum number of threads (default: auto)");
    println!("    --no-recursive      Don't search subdirectories");
    println!("    --max-files N       Limit maximum files to process");
    println!("    --fail-fast         Stop on first failing file");
    println!("    --quiet             Suppress progress reporting");
    println!();
    println!("ENVIRONMENT:");
    println!("    LBXD_LOG_LEVEL, LBXD_LOG_STRUCTURED, LBXD_LOG_CONSOLE,");
    println!("    LBXD_CURRENT_YEAR, LBXD_STRICT, LBXD_BATCH_THREADS");
    println!();
    println!("EXAMPLES:");
    println!(
        "    {} /films/genre/action+-horror/by/rating/",
        program_name
    );
    println!(
        "    {} https://letterboxd.com/someuser/films/diary/ --strict",
        program_name
    );
    println!(
        "    {} scraped/ --threads 4 --verify",
        program_name
    );
    println!();
    println!("BUILD:");
    println!("    {}", lbxd_href::config::build_info::source_info());
    println!("    Base URL: {}", lbxd_href::config::base_url());
}

fn next_number<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> Result<T, String> {
    let value = args
        .get(i + 1)
        .ok_or_else(|| format!("{} requires a number", flag))?;
    value
        .parse::<T>()
        .map_err(|_| format!("Invalid value '{}' for {}", value, flag))
}

fn parse_batch_options(
    args: &[String],
    mut config: batch::BatchConfig,
) -> Result<batch::BatchConfig, String> {
    let max_threads = lbxd_href::config::compile_time::batch_processing::MAX_WORKER_THREADS;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--year" => {
                config.parse_options = syntax::ParseOptions::for_year(next_number(args, i, "--year")?);
                i += 1;
            }
            "--strict" => config.strict = true,
            "--verify" => config.verify_round_trip = true,
            "--sequential" => config.max_threads = 1,
            "--threads" => {
                let threads: usize = next_number(args, i, "--threads")?;
                config.max_threads = threads.clamp(1, max_threads);
                i += 1;
            }
            "--no-recursive" => config.recursive = false,
            "--max-files" => {
                config.max_files = Some(next_number(args, i, "--max-files")?);
                i += 1;
            }
            "--fail-fast" => config.fail_fast = true,
            "--quiet" => config.progress_reporting = false,
            other => {
                eprintln!("Warning: Unknown option '{}'", other);
            }
        }
        i += 1;
    }

    Ok(config)
}

fn process_single_href(
    href: &str,
    config: &batch::BatchConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let route = match syntax::parse_href_with(href, &config.parse_options) {
        Ok(route) => route,
        Err(error) => {
            eprintln!("error[{}]: {}", error.error_code(), error);
            eprintln!("  = help: {}", error.recommended_action());
            std::process::exit(1);
        }
    };

    println!("{}", serde_json::to_string_pretty(&route)?);

    match serializer::to_href(&route) {
        Ok(canonical) => println!("canonical: {}", canonical),
        Err(error) => eprintln!("error[{}]: {}", error.error_code(), error),
    }

    if config.strict {
        for warning in route.filters().map(lint::lint_filters).unwrap_or_default() {
            eprintln!("warning[{}]: {}", warning.code(), warning.message);
        }
    }

    lbxd_href::log_success!(codes::success::HREF_PARSED, "Href parsed",
        "route" => route.kind()
    );

    Ok(())
}

fn process_batch(
    path: &Path,
    config: &batch::BatchConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    if config.progress_reporting {
        println!("Starting batch processing: {}", path.display());
        println!(
            "Configuration: {} threads, recursive={}, fail_fast={}, strict={}, verify={}",
            config.max_threads,
            config.recursive,
            config.fail_fast,
            config.strict,
            config.verify_round_trip
        );
    }

    match batch::process_path_with_config(path, config) {
        Ok(results) => {
            print_batch_results(&results);
            logging::print_cargo_style_summary();

            if results.failure_count() > 0 {
                std::process::exit(1);
            }
        }
        Err(error) => {
            eprintln!("Batch processing failed: {}", error);
            logging::print_cargo_style_summary();
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_batch_results(results: &batch::BatchResults) {
    println!("Batch Processing Summary:");
    println!("  Files discovered: {}", results.files_discovered);
    println!("  Files processed: {}", results.files_processed);
    println!("  Hrefs read: {}", results.href_count());
    println!(
        "  Successful: {} ({:.1}%)",
        results.success_count(),
        results.success_rate() * 100.0
    );
    println!("  Failed: {}", results.failure_count());
    println!(
        "  Total time: {:.2}s",
        results.processing_duration.as_secs_f64()
    );

    let seconds = results.processing_duration.as_secs_f64();
    if seconds > 0.0 {
        println!(
            "  Processing rate: {:.0} hrefs/sec",
            results.href_count() as f64 / seconds
        );
    }

    if results.failure_count() > 0 {
        println!("\nFailed Files:");
        for (file_path, error) in &results.failed_files {
            println!("  {}: {}", file_path.display(), error);
        }
    }

    let lint_total: usize = results
        .successful_files
        .iter()
        .map(|(_, report)| report.lint_count())
        .sum();
    if lint_total > 0 {
        println!("\nLint warnings: {}", lint_total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> batch::BatchConfig {
        batch::BatchConfig {
            max_threads: 4,
            recursive: true,
            max_files: None,
            progress_reporting: true,
            fail_fast: false,
            strict: false,
            verify_round_trip: false,
            parse_options: syntax::ParseOptions::for_year(2024),
        }
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_batch_options() {
        let config = parse_batch_options(
            &args(&["--threads", "2", "--fail-fast", "--no-recursive", "--year", "2019"]),
            base_config(),
        )
        .unwrap();

        assert_eq!(config.max_threads, 2);
        assert!(config.fail_fast);
        assert!(!config.recursive);
        assert_eq!(config.parse_options.current_year, 2019);
    }

    #[test]
    fn test_flags() {
        let config = parse_batch_options(
            &args(&["--strict", "--verify", "--sequential", "--quiet", "--max-files", "7"]),
            base_config(),
        )
        .unwrap();

        assert!(config.strict);
        assert!(config.verify_round_trip);
        assert_eq!(config.max_threads, 1);
        assert!(!config.progress_reporting);
        assert_eq!(config.max_files, Some(7));
    }

    #[test]
    fn test_invalid_numbers_are_errors() {
        assert!(parse_batch_options(&args(&["--threads", "many"]), base_config()).is_err());
        assert!(parse_batch_options(&args(&["--year"]), base_config()).is_err());
    }

    #[test]
    fn test_unknown_options_are_ignored() {
        let config = parse_batch_options(&args(&["--bogus"]), base_config()).unwrap();
        assert_eq!(config.max_threads, 4);
    }
}
