use std::fmt;

/// Rejected achievement construction, registration or update.
#[derive(Clone, Debug, PartialEq)]
pub enum AchievementError {
    EmptyName,
    EmptyDescription,
    DuplicateName { name: String },
    UnknownName { name: String },
    ProgressOutOfRange { value: f64 },
}

impl fmt::Display for AchievementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "achievement name cannot be empty"),
            Self::EmptyDescription => write!(f, "achievement description cannot be empty"),
            Self::DuplicateName { name } => {
                write!(f, "achievement with name '{name}' is already registered")
            }
            Self::UnknownName { name } => write!(f, "no achievement registered with name '{name}'"),
            Self::ProgressOutOfRange { value } => {
                write!(f, "progress must be between 0.0 and 1.0, got {value}")
            }
        }
    }
}

impl std::error::Error for AchievementError {}
