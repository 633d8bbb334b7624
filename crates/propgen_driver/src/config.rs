//! Pipeline configuration.

use propgen_foundation::{Error, ErrorKind, LanguageVersion, Result};
use tracing::trace;

/// Option key carrying the minimum language version (`"major.minor"`).
pub const MIN_LANGUAGE_VERSION_OPTION: &str = "propgen_min_language_version";

/// Configuration for a [`crate::Driver`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Declarations compiled below this version are skipped with a diagnostic.
    pub min_language_version: LanguageVersion,

    /// Fan cache misses out on the rayon pool.
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_language_version: LanguageVersion::MIN,
            parallel: false,
        }
    }
}

impl PipelineConfig {
    /// Creates a configuration that computes misses in parallel.
    #[must_use]
    pub fn parallel() -> Self {
        Self {
            parallel: true,
            ..Self::default()
        }
    }

    /// Creates a single-threaded configuration.
    #[must_use]
    pub fn sequential() -> Self {
        Self::default()
    }

    /// Parses host-supplied options.
    ///
    /// Only [`MIN_LANGUAGE_VERSION_OPTION`] is recognized; other keys belong
    /// to the host and are ignored.
    ///
    /// # Errors
    /// Returns [`propgen_foundation::ErrorKind::InvalidOption`] if the
    /// version cannot be parsed.
    pub fn from_options<I, K, V>(options: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        for (key, value) in options {
            let (key, value) = (key.as_ref(), value.as_ref());
            if key == MIN_LANGUAGE_VERSION_OPTION {
                config.min_language_version =
                    value.parse::<LanguageVersion>().map_err(|e| match e.kind {
                        ErrorKind::InvalidOption { reason, .. } => {
                            Error::invalid_option(key, value, reason)
                        }
                        kind => Error::new(kind),
                    })?;
            } else {
                trace!(key, "ignoring unrecognized option");
            }
        }
        Ok(config)
    }

    /// Builder method to set the minimum language version.
    #[must_use]
    pub fn with_min_language_version(mut self, version: LanguageVersion) -> Self {
        self.min_language_version = version;
        self
    }

    /// Builder method to enable/disable parallel execution.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
