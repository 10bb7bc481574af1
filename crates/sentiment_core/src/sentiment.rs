use std::fmt;

/// Label the classifier uses for negative text; every other label reads as positive.
pub const NEGATIVE_LABEL: &str = "neg";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Negative,
}

impl Sentiment {
    pub fn from_label(label: &str) -> Self {
        if label == NEGATIVE_LABEL {
            Sentiment::Negative
        } else {
            Sentiment::Positive
        }
    }

    /// Reply text returned to the client.
    pub fn message(self) -> &'static str {
        match self {
            Sentiment::Negative => "That text appears to be negative :(",
            Sentiment::Positive => "That text appears to be positive :)",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "positive"),
            Sentiment::Negative => write!(f, "negative"),
        }
    }
}
