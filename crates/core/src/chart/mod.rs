//! Chart renderer: one dot per active function per update, accumulating into
//! a scatter trail of the function graphs.

use serde::{Deserialize, Serialize};

use crate::{
    diagram,
    geometry::{Geometry, Point, Trig},
    render::{Color, DrawCommand},
    scene::SceneState,
    AppConfig,
};

/// How plotted values are mirrored into the y-down chart surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartConvention {
    /// Blue, orange and turquoise dots are flipped vertically, every other
    /// colour is not. Cosecant therefore traces upside down relative to the
    /// diagram's labels.
    #[default]
    Original,
    /// Even functions are flipped and odd ones are not, so each trace matches
    /// the sign shown in the diagram's text block.
    Upright,
}

impl ChartConvention {
    fn flips_y(self, trig: Trig) -> bool {
        match self {
            ChartConvention::Original => {
                matches!(trig.color(), Color::Blue | Color::Turquoise | Color::Orange)
            }
            ChartConvention::Upright => !trig.is_odd(),
        }
    }

    /// Screen position of `value` at `theta`, both already scaled.
    pub fn place(self, trig: Trig, x: f64, y: f64) -> Point {
        if self.flips_y(trig) {
            Point::new(-x, -y)
        } else {
            Point::new(-x, y)
        }
    }
}

/// Pixels per unit on the chart: half of the surface's half-height.
pub fn scaler(config: &AppConfig) -> f64 {
    config.chart.half_height() * 0.5
}

/// Functions plotted for `state`.
pub fn active_series(state: &SceneState, config: &AppConfig) -> Vec<Trig> {
    let with_reciprocals = config.variant.has_reciprocals() && state.show;
    Trig::ALL
        .into_iter()
        .filter(|trig| with_reciprocals || !trig.is_reciprocal_pair())
        .collect()
}

/// Axes drawn once when the chart is created.
pub fn intro(config: &AppConfig) -> Vec<DrawCommand> {
    diagram::axes(&config.chart)
}

/// Dots for the current angle. Never clears the surface.
pub fn plot(state: &SceneState, geometry: &Geometry, config: &AppConfig) -> Vec<DrawCommand> {
    let scale = scaler(config);
    let x = state.theta * scale;
    active_series(state, config)
        .into_iter()
        .map(|trig| DrawCommand::Dot {
            center: config
                .chart_convention
                .place(trig, x, geometry.ratios.value(trig) * scale),
            radius: config.chart_point_size / 2.0,
            color: trig.color(),
        })
        .collect()
}
