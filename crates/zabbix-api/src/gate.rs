//! Supported-version policy applied when a client is constructed.

use zabbix_protocol::{ApiVersion, MAX_SUPPORTED, MIN_SUPPORTED};

use crate::ApiError;

/// Rejects platform versions outside `[min, max]` unless told to skip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VersionGate {
    /// Oldest accepted feature version.
    pub min: f64,
    /// Newest accepted feature version.
    pub max: f64,
    /// Accept any version, logging instead of failing.
    pub skip: bool,
}

impl Default for VersionGate {
    fn default() -> Self {
        Self {
            min: MIN_SUPPORTED,
            max: MAX_SUPPORTED,
            skip: false,
        }
    }
}

impl VersionGate {
    /// A gate with the default range and the given skip flag.
    pub fn new(skip: bool) -> Self {
        Self {
            skip,
            ..Self::default()
        }
    }

    /// Checks `version` against the range.
    ///
    /// # Errors
    /// [`ApiError::UnsupportedVersion`] when out of range and not skipping.
    pub fn check(&self, version: &ApiVersion) -> Result<(), ApiError> {
        let too_old = *version < self.min;
        let too_new = *version > self.max;
        if !too_old && !too_new {
            return Ok(());
        }

        if self.skip {
            tracing::debug!(
                %version,
                min = self.min,
                max = self.max,
                "API version outside the supported range, \
                 further library use at your own risk"
            );
            return Ok(());
        }

        Err(ApiError::UnsupportedVersion {
            version: version.to_string(),
            min: self.min,
            max: self.max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> ApiVersion {
        ApiVersion::parse(s).unwrap()
    }

    #[test]
    fn test_check_accepts_boundaries() {
        let gate = VersionGate::default();

        assert!(gate.check(&v("5.0.0")).is_ok());
        assert!(gate.check(&v("6.4.12")).is_ok());
        assert!(gate.check(&v("7.0.5")).is_ok());
    }

    #[test]
    fn test_check_rejects_too_new() {
        let result = VersionGate::default().check(&v("7.2.0"));

        assert!(matches!(
            result,
            Err(ApiError::UnsupportedVersion { ref version, .. }) if version == "7.2.0"
        ));
    }

    #[test]
    fn test_check_rejects_too_old() {
        let result = VersionGate::default().check(&v("4.8.0"));

        assert!(matches!(result, Err(ApiError::UnsupportedVersion { .. })));
    }

    #[test]
    fn test_check_skip_accepts_anything() {
        let gate = VersionGate::new(true);

        assert!(gate.check(&v("4.8.0")).is_ok());
        assert!(gate.check(&v("7.2.0")).is_ok());
    }
}
