// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Framework Tags
//!
//! Closed set of application frameworks the portal knows how to onboard.
//! Unknown tags resolve to [`Framework::Generic`] instead of failing: a
//! descriptor for an exotic stack still gets a working (if minimal) pipeline
//! and build file.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Strategy selection key for the artifact generators

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Framework tag carried by an application descriptor.
///
/// Every generator dispatches on this enum; adding a framework means adding a
/// variant here and a match arm in each generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    Nodejs,
    Python,
    Java,
    /// Fallback strategy for any tag the portal does not recognize.
    Generic,
}

impl Framework {
    /// Stable string tag, used in project labels and pipeline variables.
    pub fn tag(&self) -> &'static str {
        match self {
            Framework::Nodejs => "nodejs",
            Framework::Python => "python",
            Framework::Java => "java",
            Framework::Generic => "generic",
        }
    }

    /// Default container port when the descriptor does not supply one.
    pub fn default_port(&self) -> u16 {
        match self {
            Framework::Nodejs => 3000,
            Framework::Python => 8000,
            Framework::Java => 8080,
            Framework::Generic => 8080,
        }
    }

    /// Default language runtime version baked into pipelines and build files.
    pub fn default_runtime_version(&self) -> Option<&'static str> {
        match self {
            Framework::Nodejs => Some("18"),
            Framework::Python => Some("3.11"),
            Framework::Java => Some("17"),
            Framework::Generic => None,
        }
    }
}

impl FromStr for Framework {
    type Err = std::convert::Infallible;

    /// Parsing never fails: unrecognized tags (including front-end stacks
    /// like `react`) map to the generic strategy.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "nodejs" | "node" => Framework::Nodejs,
            "python" => Framework::Python,
            "java" => Framework::Java,
            _ => Framework::Generic,
        })
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tags_parse() {
        assert_eq!("nodejs".parse::<Framework>().unwrap(), Framework::Nodejs);
        assert_eq!("Python".parse::<Framework>().unwrap(), Framework::Python);
        assert_eq!("java".parse::<Framework>().unwrap(), Framework::Java);
    }

    #[test]
    fn test_unknown_tag_falls_back_to_generic() {
        assert_eq!("cobol".parse::<Framework>().unwrap(), Framework::Generic);
        assert_eq!("react".parse::<Framework>().unwrap(), Framework::Generic);
        assert_eq!("".parse::<Framework>().unwrap(), Framework::Generic);
    }

    #[test]
    fn test_default_ports() {
        assert_eq!(Framework::Nodejs.default_port(), 3000);
        assert_eq!(Framework::Python.default_port(), 8000);
        assert_eq!(Framework::Java.default_port(), 8080);
        assert_eq!(Framework::Generic.default_port(), 8080);
    }
}
