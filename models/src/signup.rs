use crate::ErrorLocation;
use crate::credentials::{PASSWORD_FIELD, USERNAME_FIELD};
use crate::error::model_error::ModelError;

use common::{HttpStatusCode, RedactedPassword};

use std::fmt;
use std::panic::Location;

use serde::ser::{Serialize, SerializeMap, Serializer};

pub const AGE_FIELD: &str = "age";

/// Body the signup page answers with when the name is taken.
pub const USER_EXISTS_MARKER: &str = "User already exists";

/// The account creation form, posted form-encoded.
#[derive(Clone)]
pub struct SignupForm {
    username: String,
    password: RedactedPassword,
    age: u32,
}

impl SignupForm {
    /// All three fields are required; the age must be a whole number.
    #[track_caller]
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        age: &str,
    ) -> Result<Self, ModelError> {
        let username = username.into();
        let password = RedactedPassword::new(password);

        if username.is_empty() || password.is_empty() {
            return Err(ModelError::Validation {
                message: String::from("Username and password are required"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let age = age.trim().parse().map_err(|_| ModelError::Validation {
            message: format!("Age must be a whole number, got: {age}"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(Self {
            username,
            password,
            age,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn age(&self) -> u32 {
        self.age
    }
}

impl fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupForm")
            .field("username", &self.username)
            .field("password", &self.password)
            .field("age", &self.age)
            .finish()
    }
}

impl Serialize for SignupForm {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry(USERNAME_FIELD, &self.username)?;
        map.serialize_entry(PASSWORD_FIELD, self.password.as_str())?;
        map.serialize_entry(AGE_FIELD, &self.age)?;
        map.end()
    }
}

/// How the signup page answered.
///
/// The page speaks HTML, not JSON: a created account redirects to the login
/// page, a taken name comes back as a short text body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupReply {
    Created,
    UserExists,
    Failed(HttpStatusCode),
}
