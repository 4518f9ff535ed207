//! Binary-to-text decoding for previews
//!
//! The strategy is chosen once per process by [`DecodeStrategy::global`] and
//! reused for every call to [`decode`]. Use [`Decoder`] to pin a strategy
//! explicitly.

use bytes::Bytes;
use std::sync::OnceLock;
use tracing::debug;

/// Environment variable consulted by strategy detection
pub const DECODE_STRATEGY_ENV: &str = "FORMPART_DECODE_STRATEGY";

/// How encoded bytes are turned into text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeStrategy {
    /// Lossy UTF-8; invalid sequences become U+FFFD
    #[default]
    Utf8,
    /// One char per byte, code point equal to the byte value.
    ///
    /// Not UTF-8 aware: multi-byte sequences are rendered byte by byte.
    Bytewise,
}

impl DecodeStrategy {
    /// Parse a strategy name (case-insensitive)
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Some(Self::Utf8),
            "bytewise" | "latin1" => Some(Self::Bytewise),
            _ => None,
        }
    }

    /// Detect the strategy from the environment
    ///
    /// Unset or unrecognised values select `Utf8`.
    pub fn detect() -> Self {
        let strategy = std::env::var(DECODE_STRATEGY_ENV)
            .ok()
            .and_then(|value| Self::parse(&value))
            .unwrap_or_default();
        debug!(?strategy, "Detected decode strategy");
        strategy
    }

    /// Process-wide strategy, detected on first use
    pub fn global() -> Self {
        static STRATEGY: OnceLock<DecodeStrategy> = OnceLock::new();
        *STRATEGY.get_or_init(Self::detect)
    }
}

/// Binary input to the decoder
#[derive(Debug, Clone)]
pub enum BinaryInput {
    /// A buffer that owns its whole range
    Buffer(Bytes),
    /// A window over a larger shared buffer
    View {
        buffer: Bytes,
        offset: usize,
        len: usize,
    },
}

impl BinaryInput {
    /// Create a view over `buffer`
    pub fn view(buffer: impl Into<Bytes>, offset: usize, len: usize) -> Self {
        BinaryInput::View {
            buffer: buffer.into(),
            offset,
            len,
        }
    }

    /// Copy a view into its own isolated buffer
    ///
    /// The window is clamped to the backing buffer, so bytes outside it are
    /// never read.
    pub fn normalize(self) -> Bytes {
        match self {
            BinaryInput::Buffer(bytes) => bytes,
            BinaryInput::View {
                buffer,
                offset,
                len,
            } => {
                let start = offset.min(buffer.len());
                let end = start.saturating_add(len).min(buffer.len());
                Bytes::copy_from_slice(&buffer[start..end])
            }
        }
    }
}

impl From<Bytes> for BinaryInput {
    fn from(bytes: Bytes) -> Self {
        BinaryInput::Buffer(bytes)
    }
}

impl From<Vec<u8>> for BinaryInput {
    fn from(bytes: Vec<u8>) -> Self {
        BinaryInput::Buffer(Bytes::from(bytes))
    }
}

impl From<&[u8]> for BinaryInput {
    fn from(bytes: &[u8]) -> Self {
        BinaryInput::Buffer(Bytes::copy_from_slice(bytes))
    }
}

/// Decoder bound to a single strategy
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder {
    strategy: DecodeStrategy,
}

impl Decoder {
    /// Create a decoder with an explicit strategy
    pub fn new(strategy: DecodeStrategy) -> Self {
        Self { strategy }
    }

    /// Create a decoder using the process-wide strategy
    pub fn global() -> Self {
        Self::new(DecodeStrategy::global())
    }

    /// The strategy in use
    pub fn strategy(&self) -> DecodeStrategy {
        self.strategy
    }

    /// Decode binary input into text. Never fails.
    pub fn decode(&self, input: impl Into<BinaryInput>) -> String {
        let bytes = input.into().normalize();
        match self.strategy {
            DecodeStrategy::Utf8 => String::from_utf8_lossy(&bytes).into_owned(),
            DecodeStrategy::Bytewise => bytes.iter().map(|&b| char::from(b)).collect(),
        }
    }
}

/// Decode binary input with the process-wide strategy
pub fn decode(input: impl Into<BinaryInput>) -> String {
    Decoder::global().decode(input)
}
