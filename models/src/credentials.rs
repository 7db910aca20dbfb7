use crate::error::model_error::ModelError;
use crate::ErrorLocation;

use common::RedactedPassword;

use std::collections::BTreeMap;
use std::fmt;
use std::panic::Location;

use serde::ser::{Serialize, SerializeMap, Serializer};

pub const USERNAME_FIELD: &str = "username";
pub const PASSWORD_FIELD: &str = "password";

/// Login form contents, sent verbatim as one flat JSON object.
///
/// Lives only for the duration of a single submit.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: RedactedPassword,
    extra: BTreeMap<String, String>,
}

impl Credentials {
    pub fn builder() -> CredentialsBuilder {
        CredentialsBuilder::default()
    }

    /// Build from serialized form pairs, routing the username and password
    /// fields and passing everything else through.
    #[track_caller]
    pub fn from_form_pairs<I, K, V>(pairs: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        pairs
            .into_iter()
            .fold(Self::builder(), |builder, (key, value)| {
                builder.with_field(key, value)
            })
            .build()
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &RedactedPassword {
        &self.password
    }

    pub fn extra_fields(&self) -> &BTreeMap<String, String> {
        &self.extra
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password)
            .field("extra", &self.extra.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Serialize for Credentials {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(2 + self.extra.len()))?;
        map.serialize_entry(USERNAME_FIELD, &self.username)?;
        map.serialize_entry(PASSWORD_FIELD, self.password.as_str())?;
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Builder for [`Credentials`].
///
/// Enforces only what the login form itself requires: a non-empty username
/// and password. Other fields are carried untouched.
#[derive(Default)]
pub struct CredentialsBuilder {
    username: Option<String>,
    password: Option<RedactedPassword>,
    extra: BTreeMap<String, String>,
}

impl CredentialsBuilder {
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(RedactedPassword::new(password));
        self
    }

    pub fn with_field(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        match key.as_str() {
            USERNAME_FIELD => self.with_username(value),
            PASSWORD_FIELD => self.with_password(value),
            _ => {
                let mut builder = self;
                builder.extra.insert(key, value.into());
                builder
            }
        }
    }

    #[track_caller]
    pub fn build(self) -> Result<Credentials, ModelError> {
        let username = self.username.ok_or_else(|| ModelError::Validation {
            message: String::from("Username is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if username.is_empty() {
            return Err(ModelError::Validation {
                message: String::from("Username cannot be empty"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let password = self.password.ok_or_else(|| ModelError::Validation {
            message: String::from("Password is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if password.is_empty() {
            return Err(ModelError::Validation {
                message: String::from("Password cannot be empty"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Credentials {
            username,
            password,
            extra: self.extra,
        })
    }
}
