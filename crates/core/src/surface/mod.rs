//! SVG implementation of [`Surface`] on top of the `plotters` SVG backend.
//!
//! The surface is retained: it keeps the drawable commands issued since the
//! last [`DrawCommand::Clear`] and replays them onto a fresh backend each time
//! a document is requested.

use std::f64::consts::TAU;

use plotters::{
    prelude::*,
    style::text_anchor::{HPos, Pos, VPos},
};
use plotters_backend::{BackendCoord, DrawingBackend, DrawingErrorKind};

use crate::{
    config::SurfaceConfig,
    geometry::Point,
    render::{self, DrawCommand, Stroke, Surface},
    Result, UnitCircleError,
};

pub const FONT_FAMILY: &str = "Courier";
pub const FONT_SIZE: f64 = 18.0;
/// Angular resolution of arcs turned into polylines.
pub const ARC_STEP: f64 = TAU / 360.0;

/// Retained surface rendered through [`SVGBackend`].
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
    skipped: usize,
}

impl SvgSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
            skipped: 0,
        }
    }

    pub fn from_config(config: &SurfaceConfig) -> Self {
        Self::new(config.width, config.height)
    }

    /// Number of commands currently on the surface.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Commands ignored because of non-finite coordinates.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Renders the retained commands into a complete SVG document.
    pub fn to_svg(&self) -> Result<String> {
        let (width, height) = self.size();
        let mut document = String::new();
        {
            let mut backend = SVGBackend::with_string(&mut document, (width, height));
            let origin = (f64::from(width) / 2.0, f64::from(height) / 2.0);
            draw_all(&mut backend, origin, (width, height), &self.commands)
                .map_err(|err| UnitCircleError::Drawing(err.to_string()))?;
            backend
                .present()
                .map_err(|err| UnitCircleError::Drawing(err.to_string()))?;
        }
        Ok(document)
    }
}

impl Surface for SvgSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn execute(&mut self, command: &DrawCommand) {
        if !command.is_drawable() {
            self.skipped += 1;
            return;
        }
        match command {
            DrawCommand::Clear => self.commands.clear(),
            other => self.commands.push(other.clone()),
        }
    }
}

fn draw_all<DB: DrawingBackend>(
    backend: &mut DB,
    origin: (f64, f64),
    size: (u32, u32),
    commands: &[DrawCommand],
) -> std::result::Result<(), DrawingErrorKind<DB::ErrorType>> {
    let to_backend = |p: Point| -> BackendCoord {
        ((p.x + origin.0).round() as i32, (p.y + origin.1).round() as i32)
    };

    backend.draw_rect((0, 0), (size.0 as i32, size.1 as i32), &WHITE.filled(), true)?;

    for command in commands {
        match command {
            DrawCommand::Clear => {}
            DrawCommand::Line { from, to, stroke } => {
                let style = shape_style(stroke);
                for (a, b) in dash_segments(*from, *to, &stroke.dash) {
                    backend.draw_line(to_backend(a), to_backend(b), &style)?;
                }
            }
            DrawCommand::Arc {
                center,
                radius,
                start,
                end,
                anticlockwise,
                stroke,
            } => {
                let points = arc_points(*center, *radius, *start, *end, *anticlockwise);
                if points.len() > 1 {
                    backend.draw_path(points.into_iter().map(to_backend), &shape_style(stroke))?;
                }
            }
            DrawCommand::Text { text, at, color } => {
                let style = (FONT_FAMILY, FONT_SIZE)
                    .into_font()
                    .style(FontStyle::Bold)
                    .color(&rgb(*color))
                    .pos(Pos::new(HPos::Center, VPos::Center));
                backend.draw_text(text, &style, to_backend(*at))?;
            }
            DrawCommand::Dot {
                center,
                radius,
                color,
            } => {
                let pixels = radius.round().max(1.0) as u32;
                backend.draw_circle(to_backend(*center), pixels, &rgb(*color).filled(), true)?;
            }
        }
    }
    Ok(())
}

fn rgb(color: render::Color) -> RGBColor {
    let (r, g, b) = color.rgb();
    RGBColor(r, g, b)
}

fn shape_style(stroke: &Stroke) -> ShapeStyle {
    rgb(stroke.color).stroke_width(stroke.width.round().max(1.0) as u32)
}

/// Splits `from → to` into the visible pieces of a dash pattern. An empty
/// pattern yields the whole line.
pub fn dash_segments(from: Point, to: Point, dash: &[f64]) -> Vec<(Point, Point)> {
    let length = (to.x - from.x).hypot(to.y - from.y);
    let period: f64 = dash.iter().sum();
    if dash.is_empty() || period <= 0.0 || length == 0.0 {
        return vec![(from, to)];
    }

    let along = |d: f64| {
        let t = d / length;
        Point::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t)
    };
    let mut segments = Vec::new();
    let mut position = 0.0;
    'outer: loop {
        for (i, &piece) in dash.iter().enumerate() {
            let next = (position + piece).min(length);
            if i % 2 == 0 && next > position {
                segments.push((along(position), along(next)));
            }
            position = next;
            if position >= length {
                break 'outer;
            }
        }
    }
    segments
}

/// Samples a canvas-style arc into a polyline. Angles grow clockwise on the
/// y-down surface; a sweep of a full turn or more draws the whole circle.
/// Returns no points when the arc sweeps nothing.
pub fn arc_points(
    center: Point,
    radius: f64,
    start: f64,
    end: f64,
    anticlockwise: bool,
) -> Vec<Point> {
    let diff = if anticlockwise { start - end } else { end - start };
    let sweep = if diff >= TAU { TAU } else { diff.rem_euclid(TAU) };
    if sweep == 0.0 || radius <= 0.0 {
        return Vec::new();
    }

    let direction = if anticlockwise { -1.0 } else { 1.0 };
    let steps = (sweep / ARC_STEP).ceil().max(1.0) as usize;
    (0..=steps)
        .map(|i| {
            let angle = start + direction * sweep * i as f64 / steps as f64;
            Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;
    use crate::{
        render::{render, Color},
        scene::SceneState,
        AppConfig,
    };

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn renders_an_svg_document() {
        let mut surface = SvgSurface::new(600, 400);
        surface.execute(&DrawCommand::Dot {
            center: Point::new(-10.0, 5.0),
            radius: 1.0,
            color: Color::Red,
        });
        let svg = surface.to_svg().unwrap();
        assert!(svg.contains("<svg"));
        assert_eq!(svg.matches("<circle").count(), 1);
        assert!(svg.to_uppercase().contains("#FF0000"));
    }

    #[test]
    fn clear_drops_previous_commands() {
        let config = AppConfig::default();
        let mut surface = SvgSurface::from_config(&config.diagram);
        let frame = render(&SceneState::new(0.4, false), &config);
        surface.execute_all(&frame.diagram);
        let once = surface.to_svg().unwrap();
        let retained = surface.len();
        surface.execute_all(&frame.diagram);
        assert_eq!(surface.len(), retained);
        assert_eq!(surface.to_svg().unwrap(), once);
    }

    #[test]
    fn skips_non_finite_commands() {
        let config = AppConfig::default();
        let mut surface = SvgSurface::from_config(&config.diagram);
        let frame = render(&SceneState::new(0.0, true), &config);
        surface.execute_all(&frame.diagram);
        // cotangent and cosecant segments plus their labels
        assert_eq!(surface.skipped(), 4);
        assert!(!surface.to_svg().unwrap().contains("NaN"));
    }

    #[test]
    fn draws_text_and_arc() {
        let mut surface = SvgSurface::new(100, 100);
        surface.execute(&DrawCommand::Text {
            text: "secϴ".to_string(),
            at: Point::ORIGIN,
            color: Color::Orange,
        });
        surface.execute(&DrawCommand::Arc {
            center: Point::ORIGIN,
            radius: 20.0,
            start: 0.0,
            end: 1.0,
            anticlockwise: false,
            stroke: Stroke::solid(Color::Black, 2.0),
        });
        let svg = surface.to_svg().unwrap();
        assert!(svg.contains("secϴ"));
        assert!(svg.contains("<text"));
        assert!(svg.contains("<polyline"));
    }

    #[test]
    fn dashes_follow_pattern() {
        let from = Point::new(-5.0, 0.0);
        let segments = dash_segments(from, Point::new(5.0, 0.0), &[4.0, 2.0]);
        assert_eq!(segments.len(), 2);
        assert!(close(segments[0].0, from));
        assert!(close(segments[0].1, Point::new(-1.0, 0.0)));
        assert!(close(segments[1].0, Point::new(1.0, 0.0)));
        assert!(close(segments[1].1, Point::new(5.0, 0.0)));

        let solid = dash_segments(from, Point::new(5.0, 0.0), &[]);
        assert_eq!(solid, vec![(from, Point::new(5.0, 0.0))]);
    }

    #[test]
    fn dashed_axes_become_several_lines() {
        let mut surface = SvgSurface::new(10, 10);
        surface.execute(&DrawCommand::Line {
            from: Point::new(-5.0, 0.0),
            to: Point::new(5.0, 0.0),
            stroke: Stroke::dashed(Color::Gray, 1.0, &[4.0, 2.0]),
        });
        assert_eq!(surface.to_svg().unwrap().matches("<line").count(), 2);
    }

    #[test]
    fn arc_sampling() {
        assert!(arc_points(Point::ORIGIN, 100.0, 0.0, 0.0, false).is_empty());

        let quarter = arc_points(Point::ORIGIN, 100.0, 0.0, FRAC_PI_2, false);
        assert!(close(quarter[0], Point::new(100.0, 0.0)));
        assert!(close(*quarter.last().unwrap(), Point::new(100.0 * FRAC_PI_2.cos(), 100.0)));

        let back = arc_points(Point::ORIGIN, 100.0, 0.0, -FRAC_PI_2, true);
        assert!((back.last().unwrap().y + 100.0).abs() < 1e-9);
        assert!(back.iter().all(|p| p.y <= 1e-9));

        let full = arc_points(Point::ORIGIN, 100.0, 0.0, 7.0, false);
        assert!(close(full[0], *full.last().unwrap()));
    }
}
