use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment key the extractor writes under.
pub const OTA_PASSWORD_KEY: &str = "OTA_PASSWORD";

/// Pattern for the macro line. The value is everything up to the first
/// closing double quote on the line.
pub const OTA_PASSWORD_PATTERN: &str = r#"#define\s+OTA_PASSWORD\s*"([^"]*)""#;

/// A matched macro definition: 1-based line number plus the captured value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroMatch {
    pub line: usize,
    pub value: String,
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no line in {path} matches `{pattern}`")]
    MacroNotFound { path: PathBuf, pattern: String },
}

/// Default location of the credentials header, joined portably.
pub fn default_header_path() -> PathBuf {
    Path::new("include").join("credentials.h")
}

/// Scan a header for `#define OTA_PASSWORD "<value>"` lines.
///
/// Returns one match per matching line (first match on each line), in file
/// order. An empty result is not an error at this layer; callers that need
/// the value present should use [`export_password`].
pub fn scan_header(path: &Path) -> Result<Vec<MacroMatch>, ExtractError> {
    let contents = fs::read_to_string(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    // Pattern is a known-good literal, compiled once per scan.
    let pattern = Regex::new(OTA_PASSWORD_PATTERN).expect("macro pattern is valid");

    log::debug!("scanning {} for OTA_PASSWORD", path.display());

    let mut matches = Vec::new();
    for (i, line) in contents.lines().enumerate() {
        if let Some(caps) = pattern.captures(line) {
            let m = MacroMatch {
                line: i + 1,
                value: caps[1].to_string(),
            };
            log::debug!("matched OTA_PASSWORD on line {}", m.line);
            matches.push(m);
        }
    }

    Ok(matches)
}

/// Extract the OTA password from `path` and write it into `env` under
/// [`OTA_PASSWORD_KEY`].
///
/// When several lines match, the last one wins; the full match list is
/// returned so callers can report every line that was seen. If nothing
/// matches, the mapping is left untouched and an error is returned so the
/// enclosing build step aborts instead of proceeding without a password.
pub fn export_password(
    path: &Path,
    env: &mut HashMap<String, String>,
) -> Result<Vec<MacroMatch>, ExtractError> {
    let matches = scan_header(path)?;

    let winner = matches.last().ok_or_else(|| ExtractError::MacroNotFound {
        path: path.to_path_buf(),
        pattern: OTA_PASSWORD_PATTERN.to_string(),
    })?;

    env.insert(OTA_PASSWORD_KEY.to_string(), winner.value.clone());
    Ok(matches)
}
