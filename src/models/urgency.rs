//! Urgency tier and assessment models.
//!
//! An [`UrgencyAssessment`] is the classifier's audit record: the tier it chose,
//! the rung of the decision ladder that fired and the quantities it derived.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How soon an employee must use remaining leave before compulsory retirement
/// forecloses the option. Ordered from most to least urgent.
///
/// # Example
///
/// ```
/// use premium_leave_engine::models::UrgencyTier;
///
/// assert!(UrgencyTier::Critical < UrgencyTier::Low);
/// assert_eq!(UrgencyTier::default(), UrgencyTier::Low);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyTier {
    /// Leave is at risk now.
    Critical,
    /// Compulsory retirement is near.
    High,
    /// Compulsory retirement is on the horizon.
    Moderate,
    /// No pressure.
    #[default]
    Low,
}

impl UrgencyTier {
    /// Every tier, most urgent first.
    pub const ALL: [UrgencyTier; 4] = [
        UrgencyTier::Critical,
        UrgencyTier::High,
        UrgencyTier::Moderate,
        UrgencyTier::Low,
    ];
}

impl std::fmt::Display for UrgencyTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UrgencyTier::Critical => write!(f, "Critical"),
            UrgencyTier::High => write!(f, "High"),
            UrgencyTier::Moderate => write!(f, "Moderate"),
            UrgencyTier::Low => write!(f, "Low"),
        }
    }
}

/// The rung of the urgency ladder that decided the tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyRule {
    /// Eligible to retire today while still holding unused leave.
    EligibleWithRemainingLeave,
    /// More leave left than months before compulsory retirement.
    LeaveExceedsTimeToRetirement,
    /// Compulsory retirement within the critical band.
    CriticalBand,
    /// Compulsory retirement within the high band.
    HighBand,
    /// Compulsory retirement within the moderate band.
    ModerateBand,
    /// Compulsory retirement beyond every band.
    BeyondBands,
    /// Neither age nor birth date was available.
    InsufficientData,
}

impl UrgencyRule {
    /// Stable identifier used in logs and reports.
    pub fn id(&self) -> &'static str {
        match self {
            UrgencyRule::EligibleWithRemainingLeave => "eligible_with_remaining_leave",
            UrgencyRule::LeaveExceedsTimeToRetirement => "leave_exceeds_time_to_retirement",
            UrgencyRule::CriticalBand => "critical_band",
            UrgencyRule::HighBand => "high_band",
            UrgencyRule::ModerateBand => "moderate_band",
            UrgencyRule::BeyondBands => "beyond_bands",
            UrgencyRule::InsufficientData => "insufficient_data",
        }
    }
}

/// The classifier's decision and the quantities it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrgencyAssessment {
    /// The chosen tier.
    pub tier: UrgencyTier,
    /// The rule that fired.
    pub rule: UrgencyRule,
    /// Age plus tenure.
    pub points: Decimal,
    /// Whether the points and minimum-age conditions both hold.
    pub eligible_now: bool,
    /// Accrued leave not yet used or scheduled.
    pub remaining_leave_months: i64,
    /// Months until compulsory retirement (negative when already past it).
    pub months_to_mandatory_retirement: Option<i64>,
    /// The classifier inputs, for audit.
    pub input: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}
