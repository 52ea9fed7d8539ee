//! Peer connection encryption policy.

use std::fmt;

/// Encryption policy the daemon applies to peer connections.
///
/// The wire form is one of three fixed strings. Decoding is fail-closed:
/// anything unrecognized becomes [`EncryptionMode::Required`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncryptionMode {
    /// Plaintext and encrypted peers are both accepted (`"tolerated"`).
    Allowed,
    /// Encrypted connections are preferred (`"preferred"`).
    Preferred,
    /// Only encrypted connections are accepted (`"required"`).
    #[default]
    Required,
}

impl EncryptionMode {
    /// Wire string for [`EncryptionMode::Allowed`].
    pub const ALLOWED_WIRE: &'static str = "tolerated";
    /// Wire string for [`EncryptionMode::Preferred`].
    pub const PREFERRED_WIRE: &'static str = "preferred";
    /// Wire string for [`EncryptionMode::Required`].
    pub const REQUIRED_WIRE: &'static str = "required";

    /// Parses a wire string, case-sensitively.
    ///
    /// Unknown and empty strings map to [`EncryptionMode::Required`].
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        Self::parse_wire(value).unwrap_or_default()
    }

    /// Parses one of the three wire strings exactly.
    #[must_use]
    pub fn parse_wire(value: &str) -> Option<Self> {
        match value {
            Self::ALLOWED_WIRE => Some(Self::Allowed),
            Self::PREFERRED_WIRE => Some(Self::Preferred),
            Self::REQUIRED_WIRE => Some(Self::Required),
            _ => None,
        }
    }

    /// Returns the wire string for this mode.
    #[must_use]
    pub const fn as_wire(self) -> &'static str {
        match self {
            Self::Allowed => Self::ALLOWED_WIRE,
            Self::Preferred => Self::PREFERRED_WIRE,
            Self::Required => Self::REQUIRED_WIRE,
        }
    }
}

impl fmt::Display for EncryptionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}
