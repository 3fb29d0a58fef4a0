use crate::{ConfigError, FromEnv};

/// Cross-origin policy for the HTTP layer.
///
/// `CORS_ALLOWED_ORIGIN` holds a comma-separated allowlist. When it is unset
/// every origin is accepted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Option<Vec<String>>,
}

impl CorsConfig {
    pub fn permissive() -> Self {
        Self {
            allowed_origins: None,
        }
    }

    pub fn allowlist<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_origins: Some(origins.into_iter().map(Into::into).collect()),
        }
    }

    pub fn is_permissive(&self) -> bool {
        self.allowed_origins.is_none()
    }
}

impl FromEnv for CorsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let Ok(raw) = std::env::var("CORS_ALLOWED_ORIGIN") else {
            return Ok(Self::permissive());
        };

        let origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        if origins.is_empty() {
            return Err(ConfigError::Invalid(
                "CORS_ALLOWED_ORIGIN is set but lists no origins".to_string(),
            ));
        }

        Ok(Self::allowlist(origins))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_unset_is_permissive() {
        temp_env::with_var_unset("CORS_ALLOWED_ORIGIN", || {
            assert!(CorsConfig::from_env().unwrap().is_permissive());
        });
    }

    #[test]
    fn test_cors_parses_allowlist() {
        temp_env::with_var(
            "CORS_ALLOWED_ORIGIN",
            Some("http://localhost:5173, https://shop.example.com ,"),
            || {
                let config = CorsConfig::from_env().unwrap();
                assert_eq!(
                    config.allowed_origins,
                    Some(vec![
                        "http://localhost:5173".to_string(),
                        "https://shop.example.com".to_string()
                    ])
                );
            },
        );
    }

    #[test]
    fn test_cors_empty_list_is_rejected() {
        temp_env::with_var("CORS_ALLOWED_ORIGIN", Some(" , "), || {
            assert!(CorsConfig::from_env().is_err());
        });
    }
}
