//! Property-test case budgets shared by every suite in the workspace.
//!
//! Suites declare a default number of cases; CI or a developer can raise or
//! lower it for all of them at once through `SPANSTEP_PBT_CASES`.

use std::env;

/// Environment variable overriding the number of property-test cases.
pub const CASES_ENV_KEY: &str = "SPANSTEP_PBT_CASES";

/// Resolved case budget for one property suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropertyProfile {
    cases: u32,
}

impl PropertyProfile {
    /// Reads [`CASES_ENV_KEY`], falling back to `default_cases` when the
    /// variable is unset or invalid.
    ///
    /// # Examples
    /// ```
    /// use spanstep_test_support::profile::PropertyProfile;
    ///
    /// let profile = PropertyProfile::load(32);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32) -> Self {
        let cases = match env::var(CASES_ENV_KEY) {
            Ok(raw) => parse_cases(&raw).unwrap_or_else(|reason| {
                tracing::warn!(
                    env = CASES_ENV_KEY,
                    raw = %raw,
                    reason = %reason,
                    "invalid property-test case override; using default",
                );
                default_cases
            }),
            Err(_) => default_cases,
        };
        Self { cases }
    }

    /// Number of cases each property should run.
    #[must_use]
    #[rustfmt::skip]
    pub const fn cases(&self) -> u32 { self.cases }
}

fn parse_cases(raw: &str) -> Result<u32, String> {
    let parsed = raw
        .trim()
        .parse::<u32>()
        .map_err(|error| format!("parse error: {error}"))?;
    if parsed == 0 {
        return Err("cases must be > 0".to_owned());
    }
    Ok(parsed)
}
