//! Scene renderer for the unit circle diagram.

use crate::{
    config::SurfaceConfig,
    geometry::{
        format_fixed2, format_number, midpoint, round_half_up, to_degrees, DisplayValue, Geometry,
        Point, Trig,
    },
    render::{Color, DrawCommand, Stroke},
    scene::SceneState,
    AppConfig,
};

pub const AXIS_DASH: [f64; 2] = [4.0, 2.0];
pub const SEGMENT_WIDTH: f64 = 2.0;
pub const INTRO_TEXT: &str = "Scroll To Start";

/// Dashed gray axes through the centre of a surface.
pub fn axes(surface: &SurfaceConfig) -> Vec<DrawCommand> {
    let (hw, hh) = (surface.half_width(), surface.half_height());
    let stroke = Stroke::dashed(Color::Gray, 1.0, &AXIS_DASH);
    vec![
        DrawCommand::Line {
            from: Point::new(-hw, 0.0),
            to: Point::new(hw, 0.0),
            stroke: stroke.clone(),
        },
        DrawCommand::Line {
            from: Point::new(0.0, -hh),
            to: Point::new(0.0, hh),
            stroke,
        },
    ]
}

/// Start-up screen shown before the first scroll.
pub fn intro(config: &AppConfig) -> Vec<DrawCommand> {
    let mut commands = vec![DrawCommand::Clear];
    commands.extend(axes(&config.diagram));
    commands.push(DrawCommand::Text {
        text: INTRO_TEXT.to_string(),
        at: Point::new(0.0, -config.diagram.half_height() * 0.001),
        color: Color::Black,
    });
    commands
}

/// Full redraw of the diagram for `state`. Always starts with a clear.
pub fn draw(state: &SceneState, geometry: &Geometry, config: &AppConfig) -> Vec<DrawCommand> {
    let surface = &config.diagram;
    let mut commands = vec![DrawCommand::Clear];
    commands.extend(axes(surface));

    let column = -surface.half_width() / 2.0;
    for (row, trig) in Trig::ALL.into_iter().enumerate() {
        let value = DisplayValue::for_trig(trig, &geometry.ratios, config.display_threshold);
        commands.push(DrawCommand::Text {
            text: format!("{} = {value}", trig.formula()),
            at: Point::new(column, surface.half_height() * (0.4 + 0.1 * row as f64)),
            color: trig.color(),
        });
    }

    commands.push(DrawCommand::Text {
        text: angle_label(state.theta),
        at: Point::new(surface.half_width() / 2.0, surface.half_height() * 0.7),
        color: Color::Black,
    });

    let Geometry { a, b, c, t, o, s, e, .. } = *geometry;
    segment(&mut commands, a, b, Color::Black, "1", midpoint(a, b));
    if config.variant.has_reciprocals() {
        segment(&mut commands, a, s, Trig::Sec.color(), Trig::Sec.segment_label(), midpoint(a, s));
        segment(&mut commands, a, e, Trig::Csc.color(), Trig::Csc.segment_label(), midpoint(a, e));
    }
    segment(
        &mut commands,
        a,
        c,
        Trig::Cos.color(),
        Trig::Cos.segment_label(),
        midpoint(a, c).offset(0.0, 20.0),
    );
    segment(&mut commands, b, c, Trig::Sin.color(), Trig::Sin.segment_label(), midpoint(b, c));
    segment(&mut commands, b, t, Trig::Tan.color(), Trig::Tan.segment_label(), midpoint(b, t));
    segment(&mut commands, b, o, Trig::Cot.color(), Trig::Cot.segment_label(), midpoint(b, o));

    commands.push(DrawCommand::Text {
        text: "ϴ".to_string(),
        at: a,
        color: Color::Black,
    });

    commands.push(DrawCommand::Arc {
        center: a,
        radius: geometry.radius,
        start: 0.0,
        end: state.theta,
        anticlockwise: state.theta < 0.0,
        stroke: Stroke::solid(Color::Black, SEGMENT_WIDTH),
    });

    commands
}

/// `ϴ = 0.79rad (45°)`, with the sign flipped for the y-down screen.
pub fn angle_label(theta: f64) -> String {
    let degrees = -round_half_up(to_degrees(theta));
    format!(
        "ϴ = {}rad ({}°)",
        format_fixed2(-theta),
        format_number(degrees)
    )
}

fn segment(
    commands: &mut Vec<DrawCommand>,
    from: Point,
    to: Point,
    color: Color,
    label: &str,
    label_at: Point,
) {
    commands.push(DrawCommand::Line {
        from,
        to,
        stroke: Stroke::solid(color, SEGMENT_WIDTH),
    });
    commands.push(DrawCommand::Text {
        text: label.to_string(),
        at: label_at,
        color,
    });
}
