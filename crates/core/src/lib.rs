//! Core library for the unit circle visualiser.
//!
//! An angle drives everything: the geometry engine derives the ratios and
//! construction points, the diagram and chart renderers turn them into draw
//! commands, and a [`Surface`] executes those commands. The renderers are pure
//! functions of [`SceneState`], so the whole pipeline can be exercised without
//! a real drawing backend.

pub mod chart;
pub mod config;
pub mod diagram;
pub mod error;
pub mod geometry;
pub mod input;
pub mod record;
pub mod render;
pub mod scene;
pub mod surface;

pub use chart::ChartConvention;
pub use config::{AppConfig, SurfaceConfig};
pub use error::{Result, UnitCircleError};
pub use geometry::{DisplayValue, Geometry, Point, Ratios, Trig};
pub use input::{InputController, InputEvent, ScrollDirection, ScrollScript, Session};
pub use record::{Recorder, RecordingSettings};
pub use render::{render, Color, DrawCommand, Frame, RenderGraph, Surface};
pub use scene::{SceneState, Variant};
pub use surface::SvgSurface;
