use serde::{Deserialize, Serialize};

use crate::{geometry::Geometry, AppConfig};

pub const SHOW_LABEL: &str = "Show Sec & Cosec on Chart";
pub const HIDE_LABEL: &str = "Hide Sec & Cosec on Chart";

/// Which flavour of the visualiser to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Radius, sine, cosine, tangent and cotangent only. Starts at π/4.
    Basic,
    /// Adds the secant and cosecant segments, and a toggle that puts their
    /// series on the chart. Starts at 0.
    Toggle,
}

impl Variant {
    pub fn initial_theta(self) -> f64 {
        match self {
            Variant::Basic => std::f64::consts::FRAC_PI_4,
            Variant::Toggle => 0.0,
        }
    }

    pub fn has_reciprocals(self) -> bool {
        matches!(self, Variant::Toggle)
    }
}

/// Everything that drives a redraw.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SceneState {
    /// Swept angle in radians. Unbounded.
    pub theta: f64,
    /// Whether the secant and cosecant series are plotted on the chart.
    pub show: bool,
}

impl SceneState {
    pub fn new(theta: f64, show: bool) -> Self {
        Self { theta, show }
    }

    pub fn initial(config: &AppConfig) -> Self {
        Self::new(config.starting_theta(), false)
    }

    pub fn geometry(&self, config: &AppConfig) -> Geometry {
        Geometry::at(self.theta, config.unit_radius)
    }

    pub fn with_theta(self, theta: f64) -> Self {
        Self { theta, ..self }
    }

    pub fn toggled(self) -> Self {
        Self {
            show: !self.show,
            ..self
        }
    }

    /// Label for the toggle button in this state.
    pub fn toggle_label(&self) -> &'static str {
        if self.show {
            HIDE_LABEL
        } else {
            SHOW_LABEL
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_label_alternates() {
        let state = SceneState::new(0.0, false);
        assert_eq!(state.toggle_label(), SHOW_LABEL);
        assert_eq!(state.toggled().toggle_label(), HIDE_LABEL);
        assert_eq!(state.toggled().toggled(), state);
    }

    #[test]
    fn initial_state_follows_variant() {
        let mut config = AppConfig::default();
        assert_eq!(SceneState::initial(&config).theta, 0.0);
        config.variant = Variant::Basic;
        assert_eq!(
            SceneState::initial(&config).theta,
            std::f64::consts::FRAC_PI_4
        );
        assert!(!SceneState::initial(&config).show);
    }

    #[test]
    fn geometry_tracks_theta() {
        let config = AppConfig::default();
        let state = SceneState::new(1.0, false).with_theta(2.0);
        assert_eq!(state.geometry(&config).theta, 2.0);
        assert_eq!(state.geometry(&config).b.x, 2f64.cos() * config.unit_radius);
    }
}
