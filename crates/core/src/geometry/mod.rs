//! Geometry engine: maps an angle to the trigonometric ratios and the points
//! of the unit circle construction.
//!
//! All coordinates are in surface-local space: the origin is the centre of the
//! surface and y grows downward. Nothing here is clamped; values near a
//! singularity may be huge, infinite or NaN and it is up to the renderers to
//! decide how to show them.

use serde::Serialize;

use crate::render::Color;

/// A point in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Point halfway between `p1` and `p2`.
pub fn midpoint(p1: Point, p2: Point) -> Point {
    Point::new((p1.x + p2.x) / 2.0, (p1.y + p2.y) / 2.0)
}

pub fn to_degrees(radians: f64) -> f64 {
    radians * 180.0 / std::f64::consts::PI
}

pub fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Sign of `value` as -1, 0 or 1. Zero (of either sign) and NaN are returned
/// unchanged, unlike [`f64::signum`] which maps zero to one.
pub fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        value
    }
}

/// The six trigonometric functions shown by the visualiser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trig {
    Sin,
    Cos,
    Tan,
    Cot,
    Sec,
    Csc,
}

impl Trig {
    pub const ALL: [Trig; 6] = [
        Trig::Sin,
        Trig::Cos,
        Trig::Tan,
        Trig::Cot,
        Trig::Sec,
        Trig::Csc,
    ];

    pub fn color(self) -> Color {
        match self {
            Trig::Sin => Color::Red,
            Trig::Cos => Color::Blue,
            Trig::Tan => Color::Magenta,
            Trig::Cot => Color::Green,
            Trig::Sec => Color::Orange,
            Trig::Csc => Color::Turquoise,
        }
    }

    /// Left-hand side of the ratio line in the text block.
    pub fn formula(self) -> &'static str {
        match self {
            Trig::Sin => "sin = opposite / hypotenuse",
            Trig::Cos => "cos = adjacent / hypotenuse",
            Trig::Tan => "tan = opposite / adjacent",
            Trig::Cot => "cot = adjacent / opposite",
            Trig::Sec => "sec = hypotenuse / adjacent",
            Trig::Csc => "cosec / csc = hypotenuse / opposite",
        }
    }

    /// Label placed at the midpoint of the function's segment.
    pub fn segment_label(self) -> &'static str {
        match self {
            Trig::Sin => "sinϴ",
            Trig::Cos => "cosϴ",
            Trig::Tan => "tanϴ",
            Trig::Cot => "cotϴ",
            Trig::Sec => "secϴ",
            Trig::Csc => "cscϴ",
        }
    }

    /// Odd functions flip sign when the angle is mirrored into the y-down
    /// screen; their labels show the negated value.
    pub fn is_odd(self) -> bool {
        !matches!(self, Trig::Cos | Trig::Sec)
    }

    /// sin and cos are bounded and never reported as undefined.
    pub fn is_bounded(self) -> bool {
        matches!(self, Trig::Sin | Trig::Cos)
    }

    /// Secant and cosecant are only shown by the toggle-enabled variant.
    pub fn is_reciprocal_pair(self) -> bool {
        matches!(self, Trig::Sec | Trig::Csc)
    }
}

/// The six ratios for one angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ratios {
    pub sin: f64,
    pub cos: f64,
    pub tan: f64,
    pub cot: f64,
    pub sec: f64,
    pub csc: f64,
}

impl Ratios {
    pub fn at(theta: f64) -> Self {
        let sin = theta.sin();
        let cos = theta.cos();
        let tan = theta.tan();
        Self {
            sin,
            cos,
            tan,
            cot: 1.0 / tan,
            sec: 1.0 / cos,
            csc: 1.0 / sin,
        }
    }

    pub fn value(&self, trig: Trig) -> f64 {
        match trig {
            Trig::Sin => self.sin,
            Trig::Cos => self.cos,
            Trig::Tan => self.tan,
            Trig::Cot => self.cot,
            Trig::Sec => self.sec,
            Trig::Csc => self.csc,
        }
    }
}

/// Ratios and construction points derived from a single angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Geometry {
    pub theta: f64,
    pub radius: f64,
    pub ratios: Ratios,
    /// Circle centre.
    pub a: Point,
    /// Point on the circle at `theta`.
    pub b: Point,
    /// Projection of `b` onto the x axis.
    pub c: Point,
    /// x-intercept of the tangent at `b`.
    pub t: Point,
    /// y-intercept of the tangent at `b`.
    pub o: Point,
    /// Secant length along the x axis.
    pub s: Point,
    /// Cosecant length along the y axis.
    pub e: Point,
}

impl Geometry {
    pub fn at(theta: f64, radius: f64) -> Self {
        let ratios = Ratios::at(theta);
        let Ratios {
            sin,
            cos,
            tan,
            cot,
            sec,
            csc,
        } = ratios;

        let b = Point::new(cos * radius, sin * radius);
        Self {
            theta,
            radius,
            ratios,
            a: Point::ORIGIN,
            b,
            c: Point::new(b.x, 0.0),
            t: Point::new(sign(cos) * 1f64.hypot(tan) * radius, 0.0),
            o: Point::new(0.0, sign(sin) * cot.hypot(1.0) * radius),
            s: Point::new(sign(cos) * sec.abs() * radius, 0.0),
            e: Point::new(0.0, sign(sin) * csc.abs() * radius),
        }
    }
}

/// How a ratio is presented in text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum DisplayValue {
    Defined(f64),
    Undefined,
}

impl DisplayValue {
    /// Values that are not finite, or whose magnitude reaches `threshold`,
    /// are shown as undefined.
    pub fn of(value: f64, threshold: f64) -> Self {
        if value > -threshold && value < threshold {
            DisplayValue::Defined(value)
        } else {
            DisplayValue::Undefined
        }
    }

    /// Applies the per-function display rules: sin and cos are always shown,
    /// odd functions are negated for the y-down screen.
    pub fn for_trig(trig: Trig, ratios: &Ratios, threshold: f64) -> Self {
        let value = ratios.value(trig);
        let shown = if trig.is_odd() { -value } else { value };
        if trig.is_bounded() {
            DisplayValue::Defined(shown)
        } else {
            match DisplayValue::of(value, threshold) {
                DisplayValue::Defined(_) => DisplayValue::Defined(shown),
                DisplayValue::Undefined => DisplayValue::Undefined,
            }
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, DisplayValue::Undefined)
    }
}

impl std::fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayValue::Defined(value) => f.write_str(&format_fixed2(*value)),
            DisplayValue::Undefined => f.write_str("undefined"),
        }
    }
}

/// Rounds to two decimals and prints the shortest form: `1`, `0.71`, `-0.5`.
/// Negative zero prints as `0`.
pub fn format_fixed2(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    format_number(rounded)
}

/// Rounds half towards positive infinity, matching the browser's
/// `Math.round`.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

pub(crate) fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{value}")
    }
}
