//! Maps the prediction service's risk class to an advisory message.

use crate::error::UnknownRiskClass;

/// Risk class returned by `/predict_mood`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskClass {
    Low = 0,
    Moderate = 1,
    High = 2,
}

impl RiskClass {
    /// Fixed advisory text shown on the results view.
    pub fn advisory(self) -> &'static str {
        match self {
            RiskClass::Low => {
                "Your assessment suggests a low risk of mental health issues. \
                 Keep up with your self-care and healthy habits!"
            }
            RiskClass::Moderate => {
                "Your assessment indicates a moderate level of concern. \
                 It might be helpful to seek additional support or self-care strategies."
            }
            RiskClass::High => {
                "Your assessment indicates a high risk of mental health disorder. \
                 We strongly recommend consulting a therapist as soon as possible."
            }
        }
    }

    /// `true` when the advisory must be rendered with alert emphasis.
    pub fn is_alert(self) -> bool {
        self == RiskClass::High
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskClass::Low => "Low risk",
            RiskClass::Moderate => "Moderate risk",
            RiskClass::High => "High risk",
        }
    }
}

impl TryFrom<i64> for RiskClass {
    type Error = UnknownRiskClass;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(RiskClass::Low),
            1 => Ok(RiskClass::Moderate),
            2 => Ok(RiskClass::High),
            other => Err(UnknownRiskClass(other)),
        }
    }
}

/// Advisory text for a raw class number; anything outside `0..=2` is an error.
pub fn describe(raw: i64) -> Result<&'static str, UnknownRiskClass> {
    RiskClass::try_from(raw).map(RiskClass::advisory)
}
