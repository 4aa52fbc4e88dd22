use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("row {row}: field `{field}` is not a finite number")]
    MalformedRow { row: usize, field: &'static str },

    #[error("row {row}: entity identifier is empty")]
    EmptyEntityId { row: usize },

    #[error("entity {entity_id}: more than one sample at t={time}s")]
    DuplicateTimestamp { entity_id: String, time: f64 },

    #[error("entity {entity_id}: sample {index} is earlier than the one before it")]
    UnsortedSeries { entity_id: String, index: usize },
}

impl Error {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// `true` when the failure comes from options rather than from the data.
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }
}

/// Rejects NaN and infinities for a named parameter.
pub fn ensure_finite(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::invalid(name, format!("expected a finite number, got {value}")));
    }

    Ok(())
}

/// Rejects values that are not finite or not strictly positive.
pub fn ensure_positive(name: &'static str, value: f64) -> Result<()> {
    ensure_finite(name, value)?;

    if value <= 0.0 {
        return Err(Error::invalid(name, format!("must be positive, got {value}")));
    }

    Ok(())
}
