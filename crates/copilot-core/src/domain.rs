//! # Domain Enums
//!
//! `Industry`, `Channel` and `RiskLevel`: the three closed vocabularies of
//! the compliance copilot. Each has a single snake_case wire form shared by
//! serde, `as_str`, `Display` and `FromStr`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ParseEnumError;

// -- Industry -----------------------------------------------------------------

/// Industry context that selects which compliance policy applies.
///
/// Deserialization is lenient: any value other than `real_estate` or
/// `finance` selects [`Industry::Generic`], matching the policy selector's
/// "anything else" branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    /// Residential and commercial real estate sales.
    RealEstate,
    /// Financial services: lending, investments, insurance.
    Finance,
    /// Any other industry. Minimal generic policy.
    Generic,
}

impl Industry {
    /// All industries in canonical order.
    pub fn all() -> &'static [Industry] {
        &[Self::RealEstate, Self::Finance, Self::Generic]
    }

    /// The snake_case wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RealEstate => "real_estate",
            Self::Finance => "finance",
            Self::Generic => "generic",
        }
    }

    /// Map a wire value to an industry, falling back to `Generic`.
    pub fn from_wire(raw: &str) -> Self {
        raw.parse().unwrap_or(Self::Generic)
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Industry {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "real_estate" => Ok(Self::RealEstate),
            "finance" => Ok(Self::Finance),
            "generic" => Ok(Self::Generic),
            other => Err(ParseEnumError {
                kind: "industry",
                value: other.to_string(),
                expected: "real_estate, finance, generic",
            }),
        }
    }
}

impl<'de> Deserialize<'de> for Industry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_wire(&raw))
    }
}

// -- Channel ------------------------------------------------------------------

/// Delivery channel of the agent's message.
///
/// Deserialization is lenient: unrecognized values map to [`Channel::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Email,
    Sms,
    PhoneScript,
    Chat,
    Other,
}

impl Channel {
    /// All channels in canonical order.
    pub fn all() -> &'static [Channel] {
        &[
            Self::Email,
            Self::Sms,
            Self::PhoneScript,
            Self::Chat,
            Self::Other,
        ]
    }

    /// The snake_case wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Sms => "sms",
            Self::PhoneScript => "phone_script",
            Self::Chat => "chat",
            Self::Other => "other",
        }
    }

    /// Map a wire value to a channel, falling back to `Other`.
    pub fn from_wire(raw: &str) -> Self {
        raw.parse().unwrap_or(Self::Other)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(Self::Email),
            "sms" => Ok(Self::Sms),
            "phone_script" => Ok(Self::PhoneScript),
            "chat" => Ok(Self::Chat),
            "other" => Ok(Self::Other),
            other => Err(ParseEnumError {
                kind: "channel",
                value: other.to_string(),
                expected: "email, sms, phone_script, chat, other",
            }),
        }
    }
}

impl<'de> Deserialize<'de> for Channel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_wire(&raw))
    }
}

// -- RiskLevel ----------------------------------------------------------------

/// Ordinal risk classification for a message or a single issue.
///
/// Ordering follows severity: `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// All risk levels in ascending order.
    pub fn all() -> &'static [RiskLevel] {
        &[Self::Low, Self::Medium, Self::High]
    }

    /// The lowercase wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(ParseEnumError {
                kind: "risk level",
                value: other.to_string(),
                expected: "low, medium, high",
            }),
        }
    }
}
