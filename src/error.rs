/// Error type for fetch operations that callers need to tell apart.
///
/// Everything else (network, IO, decoding) travels as `anyhow::Error`
/// with context attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// No manifest line matched the requested channel and triple
    InvalidRelease { channel: String, triple: String },
    /// An external command exited with a non-zero status
    CommandFailed,
    /// An external command was requested with no program
    EmptyCommand,
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::InvalidRelease { channel, triple } => {
                write!(f, "Invalid release: channel={}, triple={}", channel, triple)
            }
            FetchError::CommandFailed => write!(f, "failed to fetch url"),
            FetchError::EmptyCommand => write!(f, "no command given"),
        }
    }
}

impl std::error::Error for FetchError {}
