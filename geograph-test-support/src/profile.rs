//! Case-count profile shared by the property suites.
//!
//! Suites choose a default case count; `GEOGRAPH_PROPTEST_CASES` overrides it
//! so CI can run longer sweeps without code changes.

use std::env;

/// Environment variable overriding the number of proptest cases.
pub const CASES_ENV_KEY: &str = "GEOGRAPH_PROPTEST_CASES";

/// Resolved property-test settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropertyProfile {
    cases: u32,
}

impl PropertyProfile {
    /// Loads the profile, falling back to `default_cases` when the override is
    /// unset or invalid.
    ///
    /// # Examples
    /// ```
    /// use geograph_test_support::PropertyProfile;
    ///
    /// assert!(PropertyProfile::load(32).cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32) -> Self {
        Self::from_override(env::var(CASES_ENV_KEY).ok().as_deref(), default_cases)
    }

    /// Resolves the profile from an explicit override value.
    #[must_use]
    pub fn from_override(raw: Option<&str>, default_cases: u32) -> Self {
        let cases = match raw.map(parse_cases) {
            None => default_cases,
            Some(Ok(cases)) => cases,
            Some(Err(reason)) => {
                tracing::warn!(
                    env = CASES_ENV_KEY,
                    raw = raw.unwrap_or_default(),
                    reason,
                    "ignoring invalid proptest case override",
                );
                default_cases
            }
        };
        Self { cases }
    }

    /// Number of cases each property should run.
    #[must_use]
    pub const fn cases(&self) -> u32 {
        self.cases
    }
}

fn parse_cases(raw: &str) -> Result<u32, &'static str> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err("case count must be positive"),
        Ok(cases) => Ok(cases),
        Err(_) => Err("case count must be an unsigned integer"),
    }
}
