//! Browser targets and the minifier compatibility floor

use crate::error::{Result, StyleError};
use lightningcss::targets::Browsers;
use std::fmt;
use std::str::FromStr;

/// Oldest Internet Explorer the minified stylesheet has to keep working in.
///
/// Parsed from strings like `ie10` or `*` (no floor).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompatFloor {
    Ie(u8),
    Any,
}

impl CompatFloor {
    /// Lower the IE version in `browsers` to this floor.
    pub fn apply(self, browsers: Option<Browsers>) -> Option<Browsers> {
        match self {
            CompatFloor::Any => browsers,
            CompatFloor::Ie(version) => {
                let floor = u32::from(version) << 16;
                let mut browsers = browsers.unwrap_or_default();
                browsers.ie = Some(browsers.ie.map_or(floor, |current| current.min(floor)));
                Some(browsers)
            }
        }
    }
}

impl FromStr for CompatFloor {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed == "*" {
            return Ok(CompatFloor::Any);
        }

        trimmed
            .strip_prefix("ie")
            .and_then(|version| version.parse::<u8>().ok())
            .filter(|version| (6..=11).contains(version))
            .map(CompatFloor::Ie)
            .ok_or_else(|| StyleError::InvalidCompatibility(s.to_string()))
    }
}

impl fmt::Display for CompatFloor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompatFloor::Ie(version) => write!(f, "ie{version}"),
            CompatFloor::Any => write!(f, "*"),
        }
    }
}

/// Resolve browserslist queries. An empty list means "no targets".
pub(crate) fn browsers_for(queries: &[String]) -> Result<Option<Browsers>> {
    if queries.is_empty() {
        return Ok(None);
    }

    Browsers::from_browserslist(queries.iter().map(String::as_str)).map_err(|e| {
        StyleError::Targets {
            query: queries.join(", "),
            message: e.to_string(),
        }
    })
}
