//! Identifier validation for entry and object names.
//!
//! Valid words:
//! - Must be non-empty
//! - Must not contain whitespace
//! - Must not contain any of `"` `'` `/` `;` `{` `}` `(` `)`
//!
//! These are the characters that would make a name ambiguous inside a
//! dictionary file or a scoped lookup path.

use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::TypeError;

/// Characters that are forbidden anywhere in a word.
const FORBIDDEN_CHARS: &[char] = &['"', '\'', '/', ';', '{', '}', '(', ')'];

/// Validate a word, returning `Ok(())` if valid.
///
/// # Examples
///
/// ```
/// use fos_types::validate_word;
///
/// assert!(validate_word("forceCoeffs1").is_ok());
/// assert!(validate_word("Cd").is_ok());
/// assert!(validate_word("").is_err());
/// assert!(validate_word("two words").is_err());
/// assert!(validate_word("a/b").is_err());
/// ```
pub fn validate_word(word: &str) -> Result<(), TypeError> {
    if word.is_empty() {
        return Err(TypeError::InvalidWord {
            word: word.to_string(),
            reason: "word must not be empty".into(),
        });
    }

    if let Some(ch) = word.chars().find(|c| c.is_whitespace()) {
        return Err(TypeError::InvalidWord {
            word: word.to_string(),
            reason: format!("contains whitespace: {ch:?}"),
        });
    }

    if let Some(ch) = word.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
        return Err(TypeError::InvalidWord {
            word: word.to_string(),
            reason: format!("contains forbidden character: {ch:?}"),
        });
    }

    Ok(())
}

/// A validated identifier.
///
/// Construction always goes through [`validate_word`], so holding a `Word`
/// means the name is safe to use as a dictionary key.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Word(String);

impl Word {
    /// Create a word, validating it first.
    pub fn new(word: impl Into<String>) -> Result<Self, TypeError> {
        let word = word.into();
        validate_word(&word)?;
        Ok(Self(word))
    }

    /// The word as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the word, returning the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word({})", self.0)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Deref for Word {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Word {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Word {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Word {
    type Error = TypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for Word {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for Word {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Word::new(raw).map_err(serde::de::Error::custom)
    }
}
