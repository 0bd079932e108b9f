//! # Policy Selector
//!
//! Maps an industry (plus optional jurisdiction and channel) to the reviewer
//! instructions embedded at the top of every model prompt. Hard-coded
//! templates; one per [`Industry`] variant.

use crate::check::ComplianceCheckInput;
use crate::domain::{Channel, Industry};

/// Placeholder interpolated when jurisdiction or channel is absent.
pub const UNSPECIFIED: &str = "unspecified";

const REAL_ESTATE_RULES: &str = "\
You are a compliance reviewer for REAL ESTATE sales communications.

Key rules to enforce:
- FAIR HOUSING: No discrimination or preference based on race, color, religion, sex, disability, familial status, national origin, or other protected classes.
- NO STEERING: Do not suggest that certain groups of people \"belong\" or \"don't belong\" in a neighborhood.
- ADVERTISING TRUTHFULNESS: Don't misrepresent property condition, pricing, or availability.
- LICENSE & AGENCY: Avoid implying you're licensed in a jurisdiction where you're not.";

const FINANCE_RULES: &str = "\
You are a compliance reviewer for FINANCIAL SERVICES communications.

High-level rules:
- No guarantees of returns.
- Avoid misleading statements about risk.
- Respect privacy and do not request sensitive data in insecure channels.
- Flag anything that could violate AML / KYC requirements.";

const GENERIC_RULES: &str = "\
You are a generic compliance reviewer.
Flag discriminatory, misleading, or clearly risky statements.";

/// Policy text for a check input.
pub fn select_policy(input: &ComplianceCheckInput) -> String {
    policy_for(input.industry, input.jurisdiction.as_deref(), input.channel)
}

/// Policy text for an industry with optional jurisdiction and channel.
///
/// Absent values are rendered as [`UNSPECIFIED`].
pub fn policy_for(industry: Industry, jurisdiction: Option<&str>, channel: Option<Channel>) -> String {
    let rules = match industry {
        Industry::RealEstate => REAL_ESTATE_RULES,
        Industry::Finance => FINANCE_RULES,
        Industry::Generic => GENERIC_RULES,
    };
    let jurisdiction = jurisdiction.unwrap_or(UNSPECIFIED);
    let channel = channel.map(|c| c.as_str()).unwrap_or(UNSPECIFIED);

    format!("{rules}\n\nJurisdiction: {jurisdiction}\nChannel: {channel}\n")
}
