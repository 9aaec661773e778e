use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{surface::SvgSurface, Result};

pub const DIAGRAM_FILE: &str = "diagram.svg";
pub const CHART_FILE: &str = "chart.svg";

/// Configuration options for the recording subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingSettings {
    pub output_dir: PathBuf,
    /// Also keep a numbered copy of the diagram for every frame.
    pub every_frame: bool,
}

impl Default for RecordingSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            every_frame: false,
        }
    }
}

impl RecordingSettings {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }
}

/// Writes the SVG surfaces of a session to disk.
#[derive(Debug, Default)]
pub struct Recorder {
    settings: RecordingSettings,
    written_frames: usize,
}

impl Recorder {
    pub fn new(settings: RecordingSettings) -> Result<Self> {
        std::fs::create_dir_all(&settings.output_dir)?;
        Ok(Self {
            settings,
            written_frames: 0,
        })
    }

    /// Records the diagram after an event. Only writes when numbered frames
    /// are enabled.
    pub fn capture(&mut self, diagram: &SvgSurface) -> Result<Option<PathBuf>> {
        if !self.settings.every_frame {
            return Ok(None);
        }
        let path = self.frame_path(self.written_frames);
        std::fs::write(&path, diagram.to_svg()?)?;
        self.written_frames += 1;
        tracing::debug!(path = %path.display(), "frame written");
        Ok(Some(path))
    }

    /// Writes the current diagram and the accumulated chart.
    pub fn finish(&self, diagram: &SvgSurface, chart: &SvgSurface) -> Result<(PathBuf, PathBuf)> {
        let diagram_path = self.settings.output_dir.join(DIAGRAM_FILE);
        let chart_path = self.settings.output_dir.join(CHART_FILE);
        std::fs::write(&diagram_path, diagram.to_svg()?)?;
        std::fs::write(&chart_path, chart.to_svg()?)?;
        tracing::info!(
            diagram = %diagram_path.display(),
            chart = %chart_path.display(),
            frames = self.written_frames,
            "surfaces written"
        );
        Ok((diagram_path, chart_path))
    }

    pub fn written_frames(&self) -> usize {
        self.written_frames
    }

    fn frame_path(&self, index: usize) -> PathBuf {
        self.settings
            .output_dir
            .join(format!("diagram-{index:04}.svg"))
    }
}
