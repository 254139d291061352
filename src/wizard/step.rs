use std::fmt;

use serde::{Deserialize, Serialize};

/// The four data-entry panels, in the order they are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WizardStep {
    Property,
    TimePeriod,
    Reviews,
    Social,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Property,
        WizardStep::TimePeriod,
        WizardStep::Reviews,
        WizardStep::Social,
    ];

    pub const FIRST: WizardStep = WizardStep::Property;
    pub const LAST: WizardStep = WizardStep::Social;

    /// 1-based position.
    pub fn number(self) -> usize {
        match self {
            WizardStep::Property => 1,
            WizardStep::TimePeriod => 2,
            WizardStep::Reviews => 3,
            WizardStep::Social => 4,
        }
    }

    pub fn from_number(number: usize) -> Option<Self> {
        Self::ALL.get(number.checked_sub(1)?).copied()
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(self) -> Option<Self> {
        Self::from_number(self.number() - 1)
    }

    /// Short name used by the progress indicator.
    pub fn name(self) -> &'static str {
        match self {
            WizardStep::Property => "Property",
            WizardStep::TimePeriod => "Time Period",
            WizardStep::Reviews => "Reviews",
            WizardStep::Social => "Social & Context",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Property => "Property Information",
            WizardStep::TimePeriod => "Analysis Time Period",
            WizardStep::Reviews => "Review Sources",
            WizardStep::Social => "Social & Context",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            WizardStep::Property => "Basic identifiers for your hotel property",
            WizardStep::TimePeriod => "Define the date range for the review analysis",
            WizardStep::Reviews => "Public review pages and OTA listings to analyse",
            WizardStep::Social => "Optional social links and internal notes",
        }
    }

    pub fn is_last(self) -> bool {
        self == Self::LAST
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {} of {}: {}", self.number(), Self::ALL.len(), self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbering_round_trips_within_bounds() {
        assert_eq!(WizardStep::from_number(0), None);
        assert_eq!(WizardStep::from_number(3), Some(WizardStep::Reviews));
        assert_eq!(WizardStep::from_number(5), None);
    }

    #[test]
    fn neighbours_stop_at_the_ends() {
        assert_eq!(WizardStep::FIRST.previous(), None);
        assert_eq!(WizardStep::LAST.next(), None);
        assert_eq!(WizardStep::Property.next(), Some(WizardStep::TimePeriod));
        assert_eq!(WizardStep::Social.previous(), Some(WizardStep::Reviews));
    }
}
