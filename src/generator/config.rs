//! Configuration for variant generation

use std::time::Duration;

/// Default deadline for sessions driven by [`crate::Creator::Deadline`]
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);

/// Configuration options shared by a session and its generators
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Append `.{format}` (lowercased) to every filename when building paths
    pub add_extension: bool,

    /// How long a deadline-bound creator may take before the session fails
    pub timeout: Duration,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            add_extension: true,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GeneratorConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether the format is appended as a file extension
    pub fn with_add_extension(mut self, add_extension: bool) -> Self {
        self.add_extension = add_extension;
        self
    }

    /// Set the session deadline
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert!(config.add_extension);
        assert_eq!(config.timeout, Duration::from_secs(1));
    }

    #[test]
    fn test_builder_pattern() {
        let config = GeneratorConfig::new()
            .with_add_extension(false)
            .with_timeout(Duration::from_millis(50));

        assert!(!config.add_extension);
        assert_eq!(config.timeout, Duration::from_millis(50));
    }
}
