use crate::GarminError;
use secrecy::SecretString;

#[derive(Clone, Debug)]
pub struct Config {
    pub email: String,
    pub password: SecretString,
    pub base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, GarminError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function. This avoids mutating global environment in tests and keeps
    /// `from_env()` small and safe.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, GarminError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let email =
            get("GARMIN_EMAIL").ok_or_else(|| GarminError::Config("GARMIN_EMAIL missing".into()))?;
        let password = get("GARMIN_PASSWORD")
            .ok_or_else(|| GarminError::Config("GARMIN_PASSWORD missing".into()))?;
        let base_url =
            get("GARMIN_BASE_URL").unwrap_or_else(|| "https://connectapi.garmin.com".into());
        Ok(Self {
            email,
            password: SecretString::new(password.into()),
            base_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_missing_password() {
        let get = |k: &str| match k {
            "GARMIN_EMAIL" => Some("rider@example.com".into()),
            "GARMIN_PASSWORD" => None,
            _ => None,
        };
        let res = Config::from_env_with(get);
        assert!(res.is_err());
    }

    #[test]
    fn from_env_reads_values() {
        let get = |k: &str| match k {
            "GARMIN_EMAIL" => Some("rider@example.com".into()),
            "GARMIN_PASSWORD" => Some("sekrit".into()),
            "GARMIN_BASE_URL" => Some("http://localhost".into()),
            _ => None,
        };
        let cfg = Config::from_env_with(get).expect("cfg");
        assert_eq!(cfg.email, "rider@example.com");
        assert_eq!(cfg.base_url, "http://localhost");
    }

    #[test]
    fn from_env_defaults_base_url() {
        let get = |k: &str| match k {
            "GARMIN_EMAIL" => Some("rider@example.com".into()),
            "GARMIN_PASSWORD" => Some("sekrit".into()),
            _ => None,
        };
        let cfg = Config::from_env_with(get).expect("cfg");
        assert_eq!(cfg.base_url, "https://connectapi.garmin.com");
    }
}
