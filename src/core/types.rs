use serde::{Deserialize, Serialize};

/// Confidence level for a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// No candidate cleared the rejection floor
    None,
    Low,
    Medium,
    High,
    Exact,
}

impl Confidence {
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 1.0 {
            Self::Exact
        } else if score >= 0.80 {
            Self::High
        } else if score >= 0.60 {
            Self::Medium
        } else if score > 0.0 {
            Self::Low
        } else {
            Self::None
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Exact => write!(f, "exact"),
        }
    }
}

/// Outcome of resolving a query to a single ticker.
///
/// An empty `ticker` means no candidate was confident enough; `confidence` is
/// then `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub ticker: String,
    pub confidence: f64,
}

impl Resolution {
    pub fn new(ticker: impl Into<String>, confidence: f64) -> Self {
        Self {
            ticker: ticker.into(),
            confidence,
        }
    }

    /// The "no confident match" result
    #[must_use]
    pub fn no_match() -> Self {
        Self {
            ticker: String::new(),
            confidence: 0.0,
        }
    }

    #[must_use]
    pub fn is_match(&self) -> bool {
        !self.ticker.is_empty()
    }

    #[must_use]
    pub fn level(&self) -> Confidence {
        Confidence::from_score(self.confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_from_score() {
        assert_eq!(Confidence::from_score(1.0), Confidence::Exact);
        assert_eq!(Confidence::from_score(0.85), Confidence::High);
        assert_eq!(Confidence::from_score(0.6), Confidence::Medium);
        assert_eq!(Confidence::from_score(0.4), Confidence::Low);
        assert_eq!(Confidence::from_score(0.0), Confidence::None);
    }

    #[test]
    fn test_no_match() {
        let resolution = Resolution::no_match();
        assert!(!resolution.is_match());
        assert_eq!(resolution.ticker, "");
        assert_eq!(resolution.confidence, 0.0);
        assert_eq!(resolution.level(), Confidence::None);
    }
}
