//! Provider credentials

use std::fmt;

use crate::domain::communication::errors::CredentialError;

/// The secret a provider expects, tagged by its shape.
///
/// Owned by the caller and handed to the provider on every send.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// A bearer token sent in the `Authorization` header
    Bearer(String),

    /// An API key sent in a provider-specific header or body field
    ApiKey(String),

    /// A username/password pair sent as HTTP Basic auth
    Basic {
        /// The username (public key for some providers)
        username: String,

        /// The password (private key for some providers)
        password: String,
    },
}

impl Credential {
    /// Splits a pre-joined `user:pass` secret into a basic-auth pair.
    pub fn basic_from_pair(raw: &str) -> Result<Self, CredentialError> {
        if raw.is_empty() {
            return Err(CredentialError::Empty);
        }

        let (username, password) = raw
            .split_once(':')
            .ok_or(CredentialError::MissingSeparator)?;

        Ok(Self::Basic {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    /// The kind of credential, safe to log
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bearer(_) => "bearer",
            Self::ApiKey(_) => "api-key",
            Self::Basic { .. } => "basic",
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bearer(_) => f.write_str("Bearer(***)"),
            Self::ApiKey(_) => f.write_str("ApiKey(***)"),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"***")
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_basic_from_pair() -> TestResult {
        let credential = Credential::basic_from_pair("public:private:part")?;

        assert_eq!(
            credential,
            Credential::Basic {
                username: "public".to_string(),
                password: "private:part".to_string(),
            }
        );

        Ok(())
    }

    #[test]
    fn test_basic_from_pair_without_separator() {
        assert_eq!(
            Credential::basic_from_pair("public"),
            Err(CredentialError::MissingSeparator)
        );
        assert_eq!(Credential::basic_from_pair(""), Err(CredentialError::Empty));
    }

    #[test]
    fn test_debug_hides_secrets() {
        let bearer = format!("{:?}", Credential::Bearer("re_secret".to_string()));
        let basic = format!(
            "{:?}",
            Credential::Basic {
                username: "public".to_string(),
                password: "private".to_string(),
            }
        );

        assert_eq!(bearer, "Bearer(***)");
        assert!(!basic.contains("private"));
        assert!(basic.contains("public"));
    }
}
