//! Backend-neutral draw commands and the boundary between the pure renderers
//! and the surfaces that execute them.

use serde::Serialize;

use crate::{
    chart, diagram,
    geometry::{Geometry, Point},
    scene::SceneState,
    AppConfig, Result,
};

/// Named colours used by the visualiser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    Gray,
    White,
    Red,
    Blue,
    Magenta,
    Green,
    Orange,
    Turquoise,
}

impl Color {
    /// RGB value of the CSS colour keyword of the same name.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Black => (0, 0, 0),
            Color::Gray => (128, 128, 128),
            Color::White => (255, 255, 255),
            Color::Red => (255, 0, 0),
            Color::Blue => (0, 0, 255),
            Color::Magenta => (255, 0, 255),
            Color::Green => (0, 128, 0),
            Color::Orange => (255, 165, 0),
            Color::Turquoise => (64, 224, 208),
        }
    }
}

/// Line appearance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    /// Dash pattern (on, off, ...). Empty means solid.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dash: Vec<f64>,
}

impl Stroke {
    pub fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dash: Vec::new(),
        }
    }

    pub fn dashed(color: Color, width: f64, dash: &[f64]) -> Self {
        Self {
            color,
            width,
            dash: dash.to_vec(),
        }
    }
}

/// A single drawing instruction in surface-local coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Wipe the whole surface.
    Clear,
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    /// Circular arc around `center` from `start` to `end` radians.
    Arc {
        center: Point,
        radius: f64,
        start: f64,
        end: f64,
        anticlockwise: bool,
        stroke: Stroke,
    },
    /// Centred text with a white halo.
    Text {
        text: String,
        at: Point,
        color: Color,
    },
    /// Filled circle.
    Dot {
        center: Point,
        radius: f64,
        color: Color,
    },
}

impl DrawCommand {
    /// Whether every coordinate of the command is finite. Surfaces skip
    /// commands that are not, the way a canvas ignores NaN or infinite paths.
    pub fn is_drawable(&self) -> bool {
        match self {
            DrawCommand::Clear => true,
            DrawCommand::Line { from, to, .. } => from.is_finite() && to.is_finite(),
            DrawCommand::Arc {
                center,
                radius,
                start,
                end,
                ..
            } => center.is_finite() && radius.is_finite() && start.is_finite() && end.is_finite(),
            DrawCommand::Text { at, .. } => at.is_finite(),
            DrawCommand::Dot { center, radius, .. } => center.is_finite() && radius.is_finite(),
        }
    }
}

/// A drawing target whose origin sits at its centre.
pub trait Surface {
    /// Width and height in pixels.
    fn size(&self) -> (u32, u32);

    fn execute(&mut self, command: &DrawCommand);

    fn execute_all(&mut self, commands: &[DrawCommand]) {
        for command in commands {
            self.execute(command);
        }
    }
}

/// Commands produced for one update of both surfaces. Serialized for
/// inspection only; non-finite coordinates become `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub geometry: Geometry,
    /// Starts with [`DrawCommand::Clear`].
    pub diagram: Vec<DrawCommand>,
    /// Appended to the chart; never clears it.
    pub chart: Vec<DrawCommand>,
}

impl Frame {
    /// Pretty JSON dump. Non-finite coordinates serialize as `null`.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Pure render boundary: the full frame for `state`.
pub fn render(state: &SceneState, config: &AppConfig) -> Frame {
    let geometry = state.geometry(config);
    Frame {
        diagram: diagram::draw(state, &geometry, config),
        chart: chart::plot(state, &geometry, config),
        geometry,
    }
}

/// Owns the diagram and chart surfaces and applies frames to them.
#[derive(Debug)]
pub struct RenderGraph<S> {
    diagram: S,
    chart: S,
    frames: usize,
}

impl<S: Surface> RenderGraph<S> {
    pub fn new(diagram: S, chart: S) -> Self {
        Self {
            diagram,
            chart,
            frames: 0,
        }
    }

    /// Draws the start-up screen on both surfaces.
    pub fn draw_intro(&mut self, config: &AppConfig) {
        self.diagram.execute_all(&diagram::intro(config));
        self.chart.execute_all(&chart::intro(config));
    }

    pub fn apply(&mut self, frame: &Frame) {
        self.diagram.execute_all(&frame.diagram);
        self.chart.execute_all(&frame.chart);
        self.frames += 1;
    }

    /// Number of frames applied since construction.
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn diagram(&self) -> &S {
        &self.diagram
    }

    pub fn chart(&self) -> &S {
        &self.chart
    }
}
