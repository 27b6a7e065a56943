use std::fmt;

/// Tunables for turning gestures into view changes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct InteractionConfig {
    /// Normalized units panned per device pixel of drag.
    pub pan_sensitivity: f32,
    /// Radians rotated per rotate key press.
    pub rotate_step: f32,
    /// Zoom factor for one wheel step up.
    pub zoom_in_factor: f32,
    /// Zoom factor for one wheel step down.
    pub zoom_out_factor: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            pan_sensitivity: 0.005,
            rotate_step: 0.1,
            zoom_in_factor: 1.1,
            zoom_out_factor: 0.9,
        }
    }
}

impl InteractionConfig {
    /// Rejects settings that would leave the view transform singular or
    /// non-finite.
    pub fn validated(self) -> Result<Self, ConfigError> {
        for (name, factor) in [
            ("zoom_in_factor", self.zoom_in_factor),
            ("zoom_out_factor", self.zoom_out_factor),
        ] {
            if !factor.is_finite() || factor <= 0.0 {
                return Err(ConfigError::ZoomFactor { name, value: factor });
            }
        }
        for (name, value) in [
            ("pan_sensitivity", self.pan_sensitivity),
            ("rotate_step", self.rotate_step),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }
        Ok(self)
    }
}

/// Invalid [`InteractionConfig`] field.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ConfigError {
    ZoomFactor { name: &'static str, value: f32 },
    NonFinite { name: &'static str, value: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZoomFactor { name, value } => {
                write!(f, "{name} must be finite and positive, got {value}")
            }
            ConfigError::NonFinite { name, value } => write!(f, "{name} must be finite, got {value}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(InteractionConfig::default().validated().is_ok());
    }

    #[test]
    fn zero_zoom_factor_is_rejected() {
        let cfg = InteractionConfig { zoom_out_factor: 0.0, ..Default::default() };
        assert_eq!(
            cfg.validated(),
            Err(ConfigError::ZoomFactor { name: "zoom_out_factor", value: 0.0 })
        );
    }

    #[test]
    fn negative_zoom_factor_is_rejected() {
        let cfg = InteractionConfig { zoom_in_factor: -1.1, ..Default::default() };
        assert!(cfg.validated().is_err());
    }

    #[test]
    fn nan_sensitivity_is_rejected() {
        let cfg = InteractionConfig { pan_sensitivity: f32::NAN, ..Default::default() };
        assert!(matches!(cfg.validated(), Err(ConfigError::NonFinite { name: "pan_sensitivity", .. })));
    }
}
