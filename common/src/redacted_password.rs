//! Login and signup passwords.
//!
//! The password typed into a form travels through a handful of places before
//! it reaches a request body: a parsed command, a `Credentials` or
//! `SignupForm`, maybe a `{:?}` in a log line. Only the request body should
//! ever see the characters.

use crate::{ErrorLocation, RedactError};

use std::fmt;
use std::panic::Location;

use serde::ser::Error;
use zeroize::Zeroize;

const MASK: &str = "********";

/// A password held only long enough to submit one form.
///
/// Formatting prints a fixed mask, so neither the value nor its length shows
/// in logs. The buffer is wiped when the form is dropped.
#[derive(Clone)]
pub struct RedactedPassword {
    inner: String,
}

impl RedactedPassword {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            inner: password.into(),
        }
    }

    /// The typed characters.
    ///
    /// Only the form serializers call this, when writing the request body.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Forms treat an empty password as missing.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl fmt::Debug for RedactedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RedactedPassword").field(&MASK).finish()
    }
}

impl fmt::Display for RedactedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

impl Drop for RedactedPassword {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

// A form that embeds a password writes it with as_str(); anything else
// (config, logs, debug dumps) gets an error instead of the secret.
impl serde::Serialize for RedactedPassword {
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Err(S::Error::custom(RedactError::ImplicitSerialization {
            type_name: "RedactedPassword",
            location: ErrorLocation::from(Location::caller()),
        }))
    }
}
