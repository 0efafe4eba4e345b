//! Finance and identity risk fusion
//!
//! Combines the spending risk level with an externally supplied identity
//! risk signal into one access action. The matrix is spelled out
//! exhaustively so a new level or signal value fails compilation here
//! instead of falling through.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::RiskLevel;

/// Identity risk signal supplied by the caller (e.g. device or geo checks).
/// Treated as trusted input; this engine never computes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IdentityRisk {
    Low,
    High,
}

impl IdentityRisk {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::High => "HIGH",
        }
    }
}

impl std::str::FromStr for IdentityRisk {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "LOW" => Ok(Self::Low),
            "HIGH" => Ok(Self::High),
            _ => Err(format!("Unknown identity risk: {}", s)),
        }
    }
}

impl std::fmt::Display for IdentityRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Access action produced by fusing the two signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FinalAction {
    Allow,
    Warn,
    Verify,
    Block,
}

impl FinalAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allow => "ALLOW",
            Self::Warn => "WARN",
            Self::Verify => "VERIFY",
            Self::Block => "BLOCK",
        }
    }
}

impl std::str::FromStr for FinalAction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ALLOW" => Ok(Self::Allow),
            "WARN" => Ok(Self::Warn),
            "VERIFY" => Ok(Self::Verify),
            "BLOCK" => Ok(Self::Block),
            _ => Err(format!("Unknown action: {}", s)),
        }
    }
}

impl std::fmt::Display for FinalAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fuse the finance risk level with the identity signal.
///
/// A risky identity escalates everything to at least a verification step;
/// a clean identity downgrades financial noise to a warning at worst.
pub fn fuse(finance: RiskLevel, identity: IdentityRisk) -> FinalAction {
    match (identity, finance) {
        (IdentityRisk::High, RiskLevel::High) => FinalAction::Block,
        (IdentityRisk::High, RiskLevel::Medium) => FinalAction::Verify,
        (IdentityRisk::High, RiskLevel::Low) => FinalAction::Verify,
        (IdentityRisk::Low, RiskLevel::High) => FinalAction::Warn,
        (IdentityRisk::Low, RiskLevel::Medium) => FinalAction::Allow,
        (IdentityRisk::Low, RiskLevel::Low) => FinalAction::Allow,
    }
}

/// A fused access decision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessDecision {
    pub finance_risk: RiskLevel,
    pub finance_score: u8,
    pub identity_risk: IdentityRisk,
    pub final_action: FinalAction,
    /// When the decision was issued; metadata, excluded from equality
    pub timestamp: DateTime<Utc>,
}

impl PartialEq for AccessDecision {
    fn eq(&self, other: &Self) -> bool {
        self.finance_risk == other.finance_risk
            && self.finance_score == other.finance_score
            && self.identity_risk == other.identity_risk
            && self.final_action == other.final_action
    }
}
