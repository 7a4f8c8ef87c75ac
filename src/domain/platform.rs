//! Advertising platforms and their copy limits.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An advertising platform ad copy is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Google,
    Facebook,
}

impl Platform {
    /// Lowercase platform identifier, as used in routes and metric labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Google => "google",
            Platform::Facebook => "facebook",
        }
    }

    /// Returns the static limits table entry for this platform.
    pub fn limits(&self) -> &'static PlatformLimits {
        match self {
            Platform::Google => &GOOGLE_LIMITS,
            Platform::Facebook => &FACEBOOK_LIMITS,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Length and count limits for one ad copy field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLimits {
    /// Maximum characters per entry, spaces included.
    pub max_length: usize,
    /// Maximum number of entries kept in a response.
    pub max_count: usize,
}

/// Per-platform limits for headlines and descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformLimits {
    pub headline: FieldLimits,
    pub description: FieldLimits,
}

pub const GOOGLE_LIMITS: PlatformLimits = PlatformLimits {
    headline: FieldLimits {
        max_length: 30,
        max_count: 15,
    },
    description: FieldLimits {
        max_length: 90,
        max_count: 4,
    },
};

pub const FACEBOOK_LIMITS: PlatformLimits = PlatformLimits {
    headline: FieldLimits {
        max_length: 255,
        max_count: 5,
    },
    description: FieldLimits {
        max_length: 2200,
        max_count: 5,
    },
};
