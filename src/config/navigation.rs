//! Navigation configuration section

use serde::Deserialize;

use super::error::ValidationError;

/// Settings for navigation item generation
#[derive(Debug, Clone, Deserialize)]
pub struct NavigationSettings {
    /// Prefix for generated per-step urls
    #[serde(default = "default_step_url_prefix")]
    pub step_url_prefix: String,
}

fn default_step_url_prefix() -> String {
    "/wizard".to_string()
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            step_url_prefix: default_step_url_prefix(),
        }
    }
}

impl NavigationSettings {
    /// Validate the navigation settings
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.step_url_prefix.starts_with('/') {
            return Err(ValidationError::invalid(
                "navigation.step_url_prefix",
                "must start with '/'",
            ));
        }
        if self.step_url_prefix.ends_with('/') {
            return Err(ValidationError::invalid(
                "navigation.step_url_prefix",
                "must not end with '/'",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_prefix_validates() {
        let settings = NavigationSettings::default();
        assert_eq!(settings.step_url_prefix, "/wizard");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn relative_prefix_is_rejected() {
        let settings = NavigationSettings {
            step_url_prefix: "wizard".to_string(),
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn trailing_slash_is_rejected() {
        let settings = NavigationSettings {
            step_url_prefix: "/wizard/".to_string(),
        };
        assert!(settings.validate().is_err());
    }
}
