// build.rs - TOML-driven constant generation for the href grammar
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    site: SiteSettings,
    grammar: GrammarLimits,
    batch_processing: BatchProcessingLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct SiteSettings {
    host: String,
    scheme: String,
}

#[derive(serde::Deserialize)]
struct GrammarLimits {
    first_year_in_review: i32,
    max_href_length: usize,
    max_token_count: usize,
}

#[derive(serde::Deserialize)]
struct BatchProcessingLimits {
    max_worker_threads: usize,
    max_files_per_batch: usize,
    max_hrefs_per_file: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    max_error_collection: usize,
    log_buffer_size: usize,
    max_log_message_length: usize,
    max_log_events_per_file: usize,
    max_log_level: u8,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=LBXD_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=LBXD_CONFIG_DIR");

    let profile = env::var("LBXD_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("LBXD_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Workspace root is the parent of the lbxd_href directory
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_constraints(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_constraints(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_HREF_LENGTH: usize = 65_536;
    const ABSOLUTE_MAX_WORKER_THREADS: usize = 256;

    if config.site.host.is_empty() || config.site.host.contains('/') {
        panic!("CONFIG: site.host must be a bare host name");
    }

    if config.site.scheme != "https" && config.site.scheme != "http" {
        panic!("CONFIG: site.scheme must be http or https");
    }

    if config.grammar.first_year_in_review < 1900 {
        panic!("CONFIG: grammar.first_year_in_review is implausibly early");
    }

    if config.grammar.max_href_length > ABSOLUTE_MAX_HREF_LENGTH {
        panic!("CONFIG: max_href_length exceeds absolute maximum");
    }

    if config.grammar.max_token_count == 0 {
        panic!("CONFIG: max_token_count must be positive");
    }

    if config.batch_processing.max_worker_threads == 0
        || config.batch_processing.max_worker_threads > ABSOLUTE_MAX_WORKER_THREADS
    {
        panic!("CONFIG: max_worker_threads out of range (1..=256)");
    }

    if config.logging.max_log_level > 3 {
        panic!("CONFIG: max_log_level too high (max: 3)");
    }

    if profile == "production" && config.logging.max_log_level > 2 {
        panic!("PRODUCTION: debug logging is not permitted in production builds");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod site {{
        pub const HOST: &str = {:?};
        pub const SCHEME: &str = {:?};
    }}

    pub mod grammar {{
        pub const FIRST_YEAR_IN_REVIEW: i32 = {};
        pub const MAX_HREF_LENGTH: usize = {};
        pub const MAX_TOKEN_COUNT: usize = {};
    }}

    pub mod batch_processing {{
        pub const MAX_WORKER_THREADS: usize = {};
        pub const MAX_FILES_PER_BATCH: usize = {};
        pub const MAX_HREFS_PER_FILE: usize = {};
    }}

    pub mod logging {{
        pub const MAX_ERROR_COLLECTION: usize = {};
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
        pub const MAX_LOG_EVENTS_PER_FILE: usize = {};
        pub const MAX_LOG_LEVEL: u8 = {};
    }}
}}
"#,
        profile,
        // Site
        config.site.host,
        config.site.scheme,
        // Grammar
        config.grammar.first_year_in_review,
        config.grammar.max_href_length,
        config.grammar.max_token_count,
        // Batch Processing
        config.batch_processing.max_worker_threads,
        config.batch_processing.max_files_per_batch,
        config.batch_processing.max_hrefs_per_file,
        // Logging
        config.logging.max_error_collection,
        config.logging.log_buffer_size,
        config.logging.max_log_message_length,
        config.logging.max_log_events_per_file,
        config.logging.max_log_level,
    );

    fs::write(output_path, constants_code).unwrap();
}
