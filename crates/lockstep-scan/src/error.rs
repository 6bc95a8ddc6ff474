//! Scanner error types for lockstep-scan.

/// Errors that can occur while building recognizers.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Pattern '{name}' failed to compile: {source}")]
    Pattern {
        name: &'static str,
        #[source]
        source: regex::Error,
    },
}
