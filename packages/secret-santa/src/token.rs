//! Reveal tokens.
//!
//! After a draw, each giver gets a short opaque code instead of an account
//! or a login. Whoever holds the code can look up who they drew, so codes
//! are random, unique within a round, and never derived from participant
//! data.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TokenError;

/// Number of characters in a reveal token.
pub const TOKEN_LEN: usize = 8;

/// Token alphabet: digits and uppercase letters.
const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// An opaque code a giver uses to privately look up who they drew.
///
/// Tokens are [`TOKEN_LEN`] characters over `0-9A-Z`, short enough to read
/// over the phone while leaving ~2.8 trillion combinations. The stored form
/// is always uppercase; [`RevealToken::parse`] accepts lowercase input and
/// normalizes it, so lookups are effectively case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RevealToken(String);

impl RevealToken {
    /// Generates a fresh random token from the thread-local RNG.
    pub fn generate() -> Self {
        Self::generate_with_rng(&mut rand::thread_rng())
    }

    /// Generates a fresh random token from a caller-supplied RNG.
    pub fn generate_with_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let code = (0..TOKEN_LEN)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect();
        Self(code)
    }

    /// Parses token text as a user typed it.
    ///
    /// Uppercases the input, then requires exactly [`TOKEN_LEN`]
    /// alphanumeric ASCII characters. Whitespace is not stripped; a code
    /// with a stray space is rejected, not guessed at.
    pub fn parse(input: &str) -> Result<Self, TokenError> {
        let normalized = input.to_ascii_uppercase();

        let count = normalized.chars().count();
        if count != TOKEN_LEN {
            return Err(TokenError::WrongLength {
                expected: TOKEN_LEN,
                actual: count,
            });
        }
        if let Some(found) = normalized.chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(TokenError::InvalidCharacter { found });
        }

        Ok(Self(normalized))
    }

    /// The canonical uppercase text of the token.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RevealToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RevealToken {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for RevealToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

// Deserialization goes through `parse` so malformed tokens cannot enter
// through stored data either.
impl<'de> Deserialize<'de> for RevealToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
