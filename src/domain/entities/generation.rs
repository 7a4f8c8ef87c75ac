//! Ad copy generation request model.

use crate::domain::entities::Service;
use crate::domain::platform::Platform;
use std::fmt;
use std::str::FromStr;

/// Writing tone requested for the generated copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Professional,
    Casual,
    Friendly,
    Authoritative,
    Playful,
    /// Facebook only.
    Engaging,
}

const GOOGLE_TONES: &[Tone] = &[
    Tone::Professional,
    Tone::Casual,
    Tone::Friendly,
    Tone::Authoritative,
    Tone::Playful,
];

const FACEBOOK_TONES: &[Tone] = &[
    Tone::Professional,
    Tone::Casual,
    Tone::Friendly,
    Tone::Authoritative,
    Tone::Playful,
    Tone::Engaging,
];

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Casual => "casual",
            Tone::Friendly => "friendly",
            Tone::Authoritative => "authoritative",
            Tone::Playful => "playful",
            Tone::Engaging => "engaging",
        }
    }

    /// Tones a platform accepts, in display order.
    pub fn allowed_for(platform: Platform) -> &'static [Tone] {
        match platform {
            Platform::Google => GOOGLE_TONES,
            Platform::Facebook => FACEBOOK_TONES,
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FACEBOOK_TONES
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or(())
    }
}

/// Facebook campaign objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    Awareness,
    Traffic,
    Engagement,
    Leads,
    Sales,
    Conversions,
}

impl Objective {
    pub const ALL: [Objective; 6] = [
        Objective::Awareness,
        Objective::Traffic,
        Objective::Engagement,
        Objective::Leads,
        Objective::Sales,
        Objective::Conversions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Objective::Awareness => "awareness",
            Objective::Traffic => "traffic",
            Objective::Engagement => "engagement",
            Objective::Leads => "leads",
            Objective::Sales => "sales",
            Objective::Conversions => "conversions",
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Objective {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Objective::ALL
            .iter()
            .copied()
            .find(|o| o.as_str() == s)
            .ok_or(())
    }
}

/// Platform a request targets, carrying the platform-only settings.
///
/// The objective only exists for Facebook campaigns, so it lives on the
/// variant instead of being an optional field on the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignTarget {
    Google,
    Facebook { objective: Objective },
}

impl CampaignTarget {
    pub fn platform(&self) -> Platform {
        match self {
            CampaignTarget::Google => Platform::Google,
            CampaignTarget::Facebook { .. } => Platform::Facebook,
        }
    }

    pub fn objective(&self) -> Option<Objective> {
        match self {
            CampaignTarget::Google => None,
            CampaignTarget::Facebook { objective } => Some(*objective),
        }
    }
}

/// Client-specific details appended to the user prompt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientContext {
    pub city: Option<String>,
    pub website: Option<String>,
    pub services: Vec<Service>,
}

/// A validated request to generate ad copy.
///
/// Built at the HTTP boundary once every required field has been checked;
/// `key_features` always holds between one and five entries.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub business_name: String,
    pub business_description: String,
    pub target_audience: String,
    pub key_features: Vec<String>,
    pub call_to_action: String,
    pub keywords: Vec<String>,
    pub tone: Tone,
    pub target: CampaignTarget,
    pub industry: Option<String>,
    pub client_context: Option<ClientContext>,
}

impl GenerationRequest {
    pub fn platform(&self) -> Platform {
        self.target.platform()
    }
}
