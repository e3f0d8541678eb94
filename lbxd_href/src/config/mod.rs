//! Configuration for the href grammar
//! Build-time constants come from the TOML profile; runtime preferences from the environment

// Generated by build.rs from config/<profile>.toml
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("LBXD_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("LBXD_CONFIG_DIR").unwrap_or("config")
    }

    /// Returns configuration source information
    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}

/// Site base URL, e.g. `https://letterboxd.com`
pub fn base_url() -> String {
    format!("{}://{}", compile_time::site::SCHEME, compile_time::site::HOST)
}
