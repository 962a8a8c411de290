//! Severity tiers derived from an anomaly's total dollar impact.

use std::fmt;

/// Impact above this amount is [`Severity::High`].
pub const HIGH_THRESHOLD: f64 = 100.0;
/// Impact above this amount (and up to [`HIGH_THRESHOLD`]) is [`Severity::Medium`].
pub const MEDIUM_THRESHOLD: f64 = 50.0;

/// Coarse classification of an anomaly's financial impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    High,
    Medium,
    Low,
    /// No numeric impact was available.
    Unknown,
}

impl Severity {
    /// Classify an impact amount in USD.
    ///
    /// Upper bounds are strict: exactly 100 is `Medium`, exactly 50 is `Low`.
    pub fn classify(impact: Option<f64>) -> Self {
        match impact {
            None => Self::Unknown,
            Some(amount) if amount > HIGH_THRESHOLD => Self::High,
            Some(amount) if amount > MEDIUM_THRESHOLD => Self::Medium,
            Some(_) => Self::Low,
        }
    }

    /// Attachment side-bar color.
    pub fn color(self) -> &'static str {
        match self {
            Self::High => "#C62828",
            Self::Medium => "#FFC107",
            Self::Low => "#2196F3",
            Self::Unknown => "#78909C",
        }
    }

    /// Slack emoji shortcode shown around the header.
    pub fn emoji(self) -> &'static str {
        match self {
            Self::High => ":rotating_light:",
            Self::Medium => ":warning:",
            Self::Low | Self::Unknown => ":information_source:",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_boundaries() {
        assert_eq!(Severity::classify(Some(150.5)), Severity::High);
        assert_eq!(Severity::classify(Some(100.01)), Severity::High);
        assert_eq!(Severity::classify(Some(100.0)), Severity::Medium);
        assert_eq!(Severity::classify(Some(50.01)), Severity::Medium);
        assert_eq!(Severity::classify(Some(50.0)), Severity::Low);
        assert_eq!(Severity::classify(Some(0.0)), Severity::Low);
        assert_eq!(Severity::classify(Some(-5.0)), Severity::Low);
        assert_eq!(Severity::classify(None), Severity::Unknown);
    }

    #[test]
    fn tier_presentation() {
        assert_eq!(Severity::High.color(), "#C62828");
        assert_eq!(Severity::High.emoji(), ":rotating_light:");
        assert_eq!(Severity::Medium.color(), "#FFC107");
        assert_eq!(Severity::Medium.emoji(), ":warning:");
        assert_eq!(Severity::Low.color(), "#2196F3");
        assert_eq!(Severity::Low.emoji(), ":information_source:");
        assert_eq!(Severity::Unknown.color(), "#78909C");
        assert_eq!(Severity::Unknown.emoji(), ":information_source:");
    }

    #[test]
    fn display_uses_label() {
        assert_eq!(Severity::Unknown.to_string(), "UNKNOWN");
        assert_eq!(Severity::Medium.to_string(), "MEDIUM");
    }
}
