//! Runtime decode errors.

/// Errors produced while decoding a `cod` byte sequence.
///
/// Decoding never panics on malformed input; every failure surfaces as one
/// of these variants and propagates unchanged through every enclosing
/// decode call.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, thiserror::Error,
)]
pub enum Error {
    /// The buffer ended before the encoding was complete, or a varint never
    /// terminated within ten bytes.
    #[error("cod: unmarshal encountered truncated data")]
    TruncatedData,

    /// A union tag byte did not match any member of the union definition.
    #[error("cod: unknown union type tag {0}")]
    UnknownUnionType(u8),

    /// A length-prefixed string did not contain valid UTF-8.
    #[error("cod: string data is not valid UTF-8")]
    InvalidUtf8,

    /// A well-formed varint decoded to a value that does not fit the integer
    /// type being read.
    #[error("cod: varint overflows the target integer width")]
    VarintOverflow,
}
