//! Clipboard transport
//!
//! The primary path goes through the system clipboard provider; when that is
//! unavailable (headless session, missing display server) the text is piped
//! to a platform helper command instead. Landing on either path counts as a
//! successful copy.

use std::io::Write;
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum CopyError {
    #[error("Clipboard provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("No clipboard helper succeeded: {0}")]
    HelperFailed(String),
}

/// Which path landed the text on the clipboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Primary,
    Fallback,
}

/// Platform helper commands to try, in order
#[cfg(target_os = "linux")]
const HELPER_CANDIDATES: &[&[&str]] = &[
    &["wl-copy"],
    &["xclip", "-selection", "clipboard"],
    &["xsel", "--clipboard", "--input"],
];

#[cfg(target_os = "macos")]
const HELPER_CANDIDATES: &[&[&str]] = &[&["pbcopy"]];

#[cfg(target_os = "windows")]
const HELPER_CANDIDATES: &[&[&str]] = &[&["clip"]];

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
const HELPER_CANDIDATES: &[&[&str]] = &[];

/// Place text on the system clipboard
///
/// Tries the primary provider first, then the helper commands. `helper`
/// replaces the candidate list with an explicit command line.
pub fn copy_text(text: &str, helper: Option<&str>) -> Result<CopyOutcome, CopyError> {
    debug!(chars = text.len(), "copy_text: called");
    match copy_primary(text) {
        Ok(()) => {
            debug!("copy_text: primary provider succeeded");
            return Ok(CopyOutcome::Primary);
        }
        Err(e) => {
            warn!("Primary clipboard provider failed: {}", e);
        }
    }
    copy_fallback(text, helper).map(|()| CopyOutcome::Fallback)
}

fn copy_primary(text: &str) -> Result<(), CopyError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| CopyError::ProviderUnavailable(e.to_string()))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| CopyError::ProviderUnavailable(e.to_string()))
}

/// Pipe the text to the first helper command that accepts it
pub fn copy_fallback(text: &str, helper: Option<&str>) -> Result<(), CopyError> {
    let candidates: Vec<Vec<String>> = match helper {
        Some(command) => vec![command.split_whitespace().map(String::from).collect()],
        None => HELPER_CANDIDATES
            .iter()
            .map(|argv| argv.iter().map(|s| s.to_string()).collect())
            .collect(),
    };

    let mut tried: Vec<String> = Vec::new();
    for argv in &candidates {
        let Some((program, args)) = argv.split_first() else {
            continue;
        };
        debug!(%program, "copy_fallback: trying helper");
        match pipe_to_helper(program, args, text) {
            Ok(()) => {
                debug!(%program, "copy_fallback: helper succeeded");
                return Ok(());
            }
            Err(e) => {
                debug!(%program, "copy_fallback: helper failed: {}", e);
                tried.push(format!("{program} ({e})"));
            }
        }
    }

    Err(CopyError::HelperFailed(if tried.is_empty() {
        "no helper available for this platform".to_string()
    } else {
        tried.join(", ")
    }))
}

fn pipe_to_helper(program: &str, args: &[String], text: &str) -> std::io::Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    if let Some(stdin) = child.stdin.as_mut() {
        stdin.write_all(text.as_bytes())?;
    }
    // close stdin so the helper sees EOF
    drop(child.stdin.take());
    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(std::io::Error::other(format!("exit status {status}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helper_candidates_exist_for_platform() {
        #[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
        assert!(!HELPER_CANDIDATES.is_empty());
    }

    #[test]
    fn test_fallback_with_unknown_helper_fails() {
        let result = copy_fallback("hello", Some("definitely-not-a-real-helper-xyz"));
        assert!(matches!(result, Err(CopyError::HelperFailed(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_fallback_pipes_to_helper() {
        // cat consumes stdin and exits 0, standing in for a real helper
        assert!(copy_fallback("hello", Some("cat")).is_ok());
    }

    #[test]
    fn test_copy_error_display() {
        let err = CopyError::ProviderUnavailable("no display".to_string());
        assert_eq!(err.to_string(), "Clipboard provider unavailable: no display");
    }
}
