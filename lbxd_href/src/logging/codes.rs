//! Error and success codes with their classification metadata
//!
//! Single source of truth for every code the crate logs or attaches to an error.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Code wrapper shared by error, warning and success events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Critical" => Some(Severity::Critical),
            "High" => Some(Severity::High),
            "Medium" => Some(Severity::Medium),
            "Low" => Some(Severity::Low),
            _ => None,
        }
    }
}

/// Metadata for one error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub const fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
    pub const CONFIGURATION_ERROR: Code = Code::new("ERR003");
}

/// Batch input file errors
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const INVALID_EXTENSION: Code = Code::new("E006");
    pub const TOO_MANY_HREFS: Code = Code::new("E007");
    pub const EMPTY_FILE: Code = Code::new("E008");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
    pub const HREF_TOO_LONG: Code = Code::new("E013");
}

/// Href parsing errors
pub mod href {
    use super::Code;

    pub const MALFORMED_HREF: Code = Code::new("E040");
    pub const INVALID_HOST: Code = Code::new("E041");
    pub const STRUCTURAL_PARSE_ERROR: Code = Code::new("E050");
}

/// Serializer errors
pub mod serializer {
    use super::Code;

    pub const LOGIC_ERROR: Code = Code::new("E090");
    pub const ROUND_TRIP_MISMATCH: Code = Code::new("E091");
}

/// Advisory warnings
pub mod lint {
    use super::Code;

    pub const UNKNOWN_FILTER_VALUE: Code = Code::new("W010");
    pub const RELATIVE_HREF: Code = Code::new("W011");
}

/// Success codes
pub mod success {
    use super::Code;

    pub const OPERATION_COMPLETED_SUCCESSFULLY: Code = Code::new("I001");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const HREF_PARSED: Code = Code::new("I040");
    pub const ROUND_TRIP_VERIFIED: Code = Code::new("I041");
    pub const BATCH_COMPLETED: Code = Code::new("I090");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

const REGISTERED: &[ErrorMetadata] = &[
    // System
    ErrorMetadata::new(
        "ERR001",
        "System",
        Severity::Critical,
        false,
        true,
        "Critical internal error",
        "File a bug report with the failing input",
    ),
    ErrorMetadata::new(
        "ERR002",
        "System",
        Severity::Critical,
        false,
        true,
        "Logging or runtime initialization failure",
        "Check environment configuration",
    ),
    ErrorMetadata::new(
        "ERR003",
        "System",
        Severity::High,
        false,
        true,
        "Invalid configuration",
        "Check LBXD_* environment variables and the build profile",
    ),
    // File processing
    ErrorMetadata::new(
        "E005",
        "FileProcessing",
        Severity::Medium,
        false,
        false,
        "Input file or directory not found",
        "Check the path exists",
    ),
    ErrorMetadata::new(
        "E006",
        "FileProcessing",
        Severity::Low,
        true,
        false,
        "Unsupported input file extension",
        "Use .hrefs or .txt files",
    ),
    ErrorMetadata::new(
        "E007",
        "FileProcessing",
        Severity::Medium,
        false,
        false,
        "Input file holds more hrefs than allowed",
        "Split the file",
    ),
    ErrorMetadata::new(
        "E008",
        "FileProcessing",
        Severity::Low,
        true,
        false,
        "Input file contains no hrefs",
        "Add hrefs or remove the file",
    ),
    ErrorMetadata::new(
        "E009",
        "FileProcessing",
        Severity::High,
        false,
        false,
        "Permission denied",
        "Check file permissions",
    ),
    ErrorMetadata::new(
        "E010",
        "FileProcessing",
        Severity::Medium,
        false,
        false,
        "Input file is not valid UTF-8",
        "Re-save the file as UTF-8",
    ),
    ErrorMetadata::new(
        "E011",
        "FileProcessing",
        Severity::High,
        false,
        false,
        "I/O error while reading input",
        "Check disk and file system state",
    ),
    ErrorMetadata::new(
        "E012",
        "FileProcessing",
        Severity::Medium,
        false,
        false,
        "Invalid input path",
        "Pass a file or directory path",
    ),
    ErrorMetadata::new(
        "E013",
        "FileProcessing",
        Severity::Low,
        true,
        false,
        "Href longer than the configured maximum",
        "Shorten the href or raise grammar.max_href_length",
    ),
    // Href
    ErrorMetadata::new(
        "E040",
        "Href",
        Severity::Medium,
        true,
        false,
        "Href is neither a site path nor a site URL",
        "Hrefs must start with '/' or be a full site URL",
    ),
    ErrorMetadata::new(
        "E041",
        "Href",
        Severity::Medium,
        true,
        false,
        "URL host is not the site host",
        "Only site URLs can be parsed",
    ),
    ErrorMetadata::new(
        "E050",
        "Href",
        Severity::Medium,
        true,
        false,
        "Href does not match any route shape",
        "Check the token named in the message against the route grammar",
    ),
    // Serializer
    ErrorMetadata::new(
        "E090",
        "Serializer",
        Severity::High,
        false,
        false,
        "Route descriptor has no rendering rule",
        "Construct descriptors the grammar can read back",
    ),
    ErrorMetadata::new(
        "E091",
        "Serializer",
        Severity::High,
        false,
        false,
        "Re-parsing the rendered href produced a different descriptor",
        "File a bug report with the failing input",
    ),
    // Lint
    ErrorMetadata::new(
        "W010",
        "Lint",
        Severity::Low,
        true,
        false,
        "Filter value outside the known vocabulary",
        "Check the value spelling",
    ),
    ErrorMetadata::new(
        "W011",
        "Lint",
        Severity::Low,
        true,
        false,
        "Href is not an absolute path",
        "Prefix the href with '/'",
    ),
];

/// Registry keyed by code string
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        REGISTERED
            .iter()
            .map(|metadata| (metadata.code, metadata.clone()))
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from error code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for error code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for error code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get error category from error code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

/// Verify every error code constant has registry metadata
pub fn validate_registry() -> Result<(), Vec<&'static str>> {
    let declared = [
        system::INTERNAL_ERROR,
        system::INITIALIZATION_FAILURE,
        system::CONFIGURATION_ERROR,
        file_processing::FILE_NOT_FOUND,
        file_processing::INVALID_EXTENSION,
        file_processing::TOO_MANY_HREFS,
        file_processing::EMPTY_FILE,
        file_processing::PERMISSION_DENIED,
        file_processing::INVALID_ENCODING,
        file_processing::IO_ERROR,
        file_processing::INVALID_PATH,
        file_processing::HREF_TOO_LONG,
        href::MALFORMED_HREF,
        href::INVALID_HOST,
        href::STRUCTURAL_PARSE_ERROR,
        serializer::LOGIC_ERROR,
        serializer::ROUND_TRIP_MISMATCH,
        lint::UNKNOWN_FILTER_VALUE,
        lint::RELATIVE_HREF,
    ];

    let missing: Vec<_> = declared
        .iter()
        .map(Code::as_str)
        .filter(|code| get_error_metadata(code).is_none())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(missing)
    }
}
