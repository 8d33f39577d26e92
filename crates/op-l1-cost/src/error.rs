//! Errors of the L1 info calldata extraction.

/// An error extracting L1 fee parameters from L1 info transaction calldata.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum L1InfoError {
    /// Bedrock calldata is shorter than the selector and the 8 ABI words.
    #[error("expected at least {expected} L1 info bytes, got {got}")]
    InsufficientData {
        /// Minimum number of bytes.
        expected: usize,
        /// Number of bytes received.
        got: usize,
    },
    /// Ecotone calldata does not have the exact expected length.
    #[error("expected {expected} L1 info bytes, got {got}")]
    MalformedData {
        /// Exact number of bytes.
        expected: usize,
        /// Number of bytes received.
        got: usize,
    },
}
