//! Build-time helper that pulls the OTA password out of a credentials
//! header so the upload step can authenticate against the device.
//!
//! The extractor takes the target mapping as an explicit parameter, so it
//! can be driven from a build script, the `ota-export` binary, or a test
//! without a real build environment present.

pub mod extract;

pub use extract::{
    default_header_path, export_password, scan_header, ExtractError, MacroMatch,
    OTA_PASSWORD_KEY, OTA_PASSWORD_PATTERN,
};
