use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{chart::ChartConvention, scene::Variant, Result, UnitCircleError};

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub variant: Variant,
    pub diagram: SurfaceConfig,
    pub chart: SurfaceConfig,
    /// Pixel radius that represents one unit on the diagram.
    pub unit_radius: f64,
    /// Ratios whose magnitude reaches this value are labelled "undefined".
    pub display_threshold: f64,
    /// Angle change per scroll event, in degrees.
    pub step_degrees: f64,
    /// Overrides the variant's starting angle, in radians.
    pub initial_theta: Option<f64>,
    pub chart_convention: ChartConvention,
    /// Diameter of a chart dot in pixels.
    pub chart_point_size: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Toggle,
            diagram: SurfaceConfig::new(600, 600),
            chart: SurfaceConfig::new(1200, 400),
            unit_radius: 100.0,
            display_threshold: 3000.0,
            step_degrees: 1.0,
            initial_theta: None,
            chart_convention: ChartConvention::Original,
            chart_point_size: 2.0,
        }
    }
}

impl AppConfig {
    /// Reads a JSON configuration file. Missing fields fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.diagram.validate("diagram")?;
        self.chart.validate("chart")?;
        positive("unit_radius", self.unit_radius)?;
        positive("display_threshold", self.display_threshold)?;
        positive("step_degrees", self.step_degrees)?;
        positive("chart_point_size", self.chart_point_size)?;
        if let Some(theta) = self.initial_theta {
            if !theta.is_finite() {
                return Err(UnitCircleError::InvalidConfig(
                    "initial_theta must be finite".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Starting angle: the explicit override or the variant's default.
    pub fn starting_theta(&self) -> f64 {
        self.initial_theta
            .unwrap_or_else(|| self.variant.initial_theta())
    }
}

fn positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(UnitCircleError::InvalidConfig(format!(
            "{name} must be a positive number, got {value}"
        )))
    }
}

/// Pixel dimensions of one drawing surface. The local origin sits at the
/// centre of the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    pub width: u32,
    pub height: u32,
}

impl SurfaceConfig {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn half_width(&self) -> f64 {
        f64::from(self.width) / 2.0
    }

    pub fn half_height(&self) -> f64 {
        f64::from(self.height) / 2.0
    }

    fn validate(&self, name: &str) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(UnitCircleError::InvalidConfig(format!(
                "{name} surface must have a non-zero size"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        config.validate().unwrap();
        assert_eq!(config.starting_theta(), 0.0);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = AppConfig::from_json(r#"{ "variant": "basic", "unit_radius": 80 }"#).unwrap();
        assert_eq!(config.variant, Variant::Basic);
        assert_eq!(config.unit_radius, 80.0);
        assert_eq!(config.display_threshold, 3000.0);
        assert!((config.starting_theta() - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
    }

    #[test]
    fn initial_theta_overrides_variant() {
        let config = AppConfig::from_json(r#"{ "initial_theta": 1.5 }"#).unwrap();
        assert_eq!(config.starting_theta(), 1.5);
    }

    #[test]
    fn rejects_non_positive_values() {
        let err = AppConfig::from_json(r#"{ "step_degrees": 0 }"#).unwrap_err();
        assert!(matches!(err, UnitCircleError::InvalidConfig(_)));

        let err = AppConfig::from_json(r#"{ "chart": { "width": 0, "height": 10 } }"#).unwrap_err();
        assert!(matches!(err, UnitCircleError::InvalidConfig(_)));
    }

    #[test]
    fn loads_demo_config() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/basic.json");
        let config = AppConfig::load(path).unwrap();
        assert_eq!(config.variant, Variant::Basic);
        assert_eq!(config.chart_convention, ChartConvention::Upright);
        assert_eq!(config.chart, SurfaceConfig::new(1600, 400));
        assert_eq!(config.diagram, AppConfig::default().diagram);
    }

    #[test]
    fn saved_config_loads_back() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(AppConfig::from_json(&json).unwrap(), config);

        let custom = AppConfig {
            variant: Variant::Basic,
            initial_theta: Some(-0.25),
            chart_convention: ChartConvention::Upright,
            ..AppConfig::default()
        };
        let json = serde_json::to_string_pretty(&custom).unwrap();
        assert_eq!(AppConfig::from_json(&json).unwrap(), custom);
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = AppConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, UnitCircleError::Json(_)));
    }
}
