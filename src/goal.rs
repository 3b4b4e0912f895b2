/// Optional target weight shown next to the weight trend. Only ever holds a
/// positive, finite value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GoalWeight(Option<f64>);

impl GoalWeight {
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value > 0.0).then_some(Self(Some(value)))
    }

    pub fn value(&self) -> Option<f64> {
        self.0
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    /// Stored form: the decimal as text, `None` when unset.
    pub fn to_blob(&self) -> Option<String> {
        self.0.map(|value| value.to_string())
    }

    /// Reads the stored form. Anything that is not a valid goal is unset.
    pub fn from_blob(raw: &str) -> Self {
        raw.trim()
            .parse::<f64>()
            .ok()
            .and_then(Self::new)
            .unwrap_or_default()
    }
}

/// Applies user input to the goal. Zero, negative and non-numeric input
/// leave `current` untouched.
pub fn set_goal(current: GoalWeight, input: &str) -> GoalWeight {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .and_then(GoalWeight::new)
        .unwrap_or(current)
}
