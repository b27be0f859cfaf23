use crate::config::BoxConfiguration;

/// Reasons a configuration is rejected before any geometry is derived.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be a positive finite number, got {value}")]
    NonPositiveDimension { field: &'static str, value: f64 },

    #[error("{field} must be greater than zero")]
    ZeroCount { field: &'static str },

    #[error("unknown material: {name}")]
    UnknownMaterial { name: String },

    #[error("invalid color: {value}")]
    InvalidColor { value: String },

    #[error("unknown schema version: {version}")]
    UnknownVersion { version: String },
}

impl BoxConfiguration {
    /// Check every scalar field. Returns the first problem found.
    ///
    /// Clearance between the walls is a geometric question and is checked
    /// by the shell builder, not here.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("length", self.length),
            ("width", self.width),
            ("height", self.height),
            ("thickness", self.thickness),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ValidationError::NonPositiveDimension { field, value });
            }
        }

        for (field, value) in [
            ("gsm", self.gsm),
            ("quantity", self.quantity),
            ("moq", self.moq),
        ] {
            if value == 0 {
                return Err(ValidationError::ZeroCount { field });
            }
        }

        if !self.material.is_known() {
            return Err(ValidationError::UnknownMaterial {
                name: self.material.as_str().to_string(),
            });
        }

        if self.color_rgb().is_none() {
            return Err(ValidationError::InvalidColor {
                value: self.color.clone(),
            });
        }

        if self.schema_version().is_none() {
            return Err(ValidationError::UnknownVersion {
                version: self.version.clone(),
            });
        }

        Ok(())
    }
}
