use std::{path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    geometry::{sign, to_radians},
    render::{self, Frame, RenderGraph, Surface},
    scene::SceneState,
    AppConfig, Result, UnitCircleError,
};

/// A discrete user input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputEvent {
    /// Wheel event. Only the sign of `delta_y` matters.
    Scroll { delta_y: f64 },
    /// Press of the secant/cosecant button.
    Toggle,
}

impl InputEvent {
    pub fn scroll(direction: ScrollDirection) -> Self {
        InputEvent::Scroll {
            delta_y: direction.delta_y(),
        }
    }
}

/// Parses the interactive commands `up`, `down` and `toggle`.
impl FromStr for InputEvent {
    type Err = UnitCircleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "u" => Ok(InputEvent::scroll(ScrollDirection::Up)),
            "down" | "d" => Ok(InputEvent::scroll(ScrollDirection::Down)),
            "toggle" | "t" => Ok(InputEvent::Toggle),
            other => Err(UnitCircleError::msg(format!("unknown input `{other}`"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    Up,
    Down,
}

impl ScrollDirection {
    /// Wheel delta a browser reports for one notch in this direction.
    pub fn delta_y(self) -> f64 {
        match self {
            ScrollDirection::Up => -100.0,
            ScrollDirection::Down => 100.0,
        }
    }
}

/// Turns input events into new scene states.
#[derive(Debug, Clone, Copy)]
pub struct InputController {
    step: f64,
    toggle_enabled: bool,
}

impl InputController {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            step: config.step_degrees,
            toggle_enabled: config.variant.has_reciprocals(),
        }
    }

    /// Angle change per scroll notch, in radians.
    pub fn step_radians(&self) -> f64 {
        to_radians(self.step)
    }

    pub fn apply(&self, state: SceneState, event: InputEvent) -> SceneState {
        match event {
            InputEvent::Scroll { delta_y } => {
                state.with_theta(state.theta - to_radians(sign(delta_y) * self.step))
            }
            InputEvent::Toggle if self.toggle_enabled => state.toggled(),
            InputEvent::Toggle => state,
        }
    }
}

/// Ordered list of input events, replayed one frame per event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollScript {
    pub events: Vec<InputEvent>,
}

impl ScrollScript {
    pub fn new(events: Vec<InputEvent>) -> Self {
        Self { events }
    }

    /// `steps` consecutive scrolls in one direction.
    pub fn sweep(steps: usize, direction: ScrollDirection) -> Self {
        Self::new(vec![InputEvent::scroll(direction); steps])
    }

    /// Reads a script from JSON: either `{"events": [...]}` or a bare array.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Script { events: Vec<InputEvent> },
            Events(Vec<InputEvent>),
        }

        Ok(match serde_json::from_str(text)? {
            Repr::Script { events } | Repr::Events(events) => Self::new(events),
        })
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// One running visualiser: current state plus the surfaces it draws on.
#[derive(Debug)]
pub struct Session<S> {
    config: AppConfig,
    controller: InputController,
    state: SceneState,
    graph: RenderGraph<S>,
}

impl<S: Surface> Session<S> {
    pub fn new(config: AppConfig, diagram: S, chart: S) -> Self {
        Self {
            controller: InputController::new(&config),
            state: SceneState::initial(&config),
            graph: RenderGraph::new(diagram, chart),
            config,
        }
    }

    /// Draws the start-up screen. No chart dots are plotted until the first
    /// event.
    pub fn start(&mut self) {
        self.graph.draw_intro(&self.config);
    }

    /// Applies `event`. Scrolls redraw both surfaces and return the frame;
    /// a toggle only changes the state and the button label, and the chart
    /// picks it up on the next scroll.
    pub fn handle(&mut self, event: InputEvent) -> Option<Frame> {
        self.state = self.controller.apply(self.state, event);
        tracing::debug!(
            ?event,
            theta = self.state.theta,
            show = self.state.show,
            "input handled"
        );

        match event {
            InputEvent::Scroll { .. } => {
                let frame = render::render(&self.state, &self.config);
                self.graph.apply(&frame);
                Some(frame)
            }
            InputEvent::Toggle => None,
        }
    }

    /// Replays every event in order and returns the number of redraws.
    pub fn run(&mut self, script: &ScrollScript) -> usize {
        script
            .events
            .iter()
            .filter_map(|event| self.handle(*event))
            .count()
    }

    pub fn state(&self) -> SceneState {
        self.state
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn toggle_label(&self) -> &'static str {
        self.state.toggle_label()
    }

    pub fn graph(&self) -> &RenderGraph<S> {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        render::DrawCommand,
        scene::{Variant, HIDE_LABEL, SHOW_LABEL},
    };

    #[derive(Debug, Default)]
    struct Counter {
        dots: usize,
        clears: usize,
    }

    impl Surface for Counter {
        fn size(&self) -> (u32, u32) {
            (1, 1)
        }

        fn execute(&mut self, command: &DrawCommand) {
            match command {
                DrawCommand::Clear => self.clears += 1,
                DrawCommand::Dot { .. } => self.dots += 1,
                _ => {}
            }
        }
    }

    fn session(config: AppConfig) -> Session<Counter> {
        Session::new(config, Counter::default(), Counter::default())
    }

    #[test]
    fn positive_delta_decreases_theta_by_one_step() {
        let controller = InputController::new(&AppConfig::default());
        let start = SceneState::new(0.0, false);

        let down = controller.apply(start, InputEvent::Scroll { delta_y: 53.0 });
        assert_eq!(down.theta, -to_radians(1.0));

        let up = controller.apply(start, InputEvent::Scroll { delta_y: -0.5 });
        assert_eq!(up.theta, to_radians(1.0));

        let still = controller.apply(start, InputEvent::Scroll { delta_y: 0.0 });
        assert_eq!(still.theta, 0.0);
    }

    #[test]
    fn theta_is_unbounded() {
        let controller = InputController::new(&AppConfig::default());
        let mut state = SceneState::new(0.0, false);
        for _ in 0..720 {
            state = controller.apply(state, InputEvent::scroll(ScrollDirection::Up));
        }
        assert!((state.theta - 4.0 * std::f64::consts::PI).abs() < 1e-9);
    }

    fn still() -> InputEvent {
        InputEvent::Scroll { delta_y: 0.0 }
    }

    #[test]
    fn toggling_twice_restores_state() {
        let mut session = session(AppConfig::default());
        session.start();
        session.handle(InputEvent::scroll(ScrollDirection::Down));
        let before = session.state();
        let dots_before = session.handle(still()).unwrap().chart.len();
        assert_eq!(session.toggle_label(), SHOW_LABEL);

        assert!(session.handle(InputEvent::Toggle).is_none());
        assert_eq!(session.toggle_label(), HIDE_LABEL);
        assert_eq!(session.handle(still()).unwrap().chart.len(), dots_before + 2);

        assert!(session.handle(InputEvent::Toggle).is_none());
        assert_eq!(session.toggle_label(), SHOW_LABEL);
        assert_eq!(session.handle(still()).unwrap().chart.len(), dots_before);
        assert_eq!(session.state(), before);
    }

    #[test]
    fn toggle_before_first_scroll_keeps_intro() {
        let mut session = session(AppConfig::default());
        session.start();

        assert!(session.handle(InputEvent::Toggle).is_none());
        assert_eq!(session.toggle_label(), HIDE_LABEL);
        assert_eq!(session.graph().frames(), 0);
        assert_eq!(session.graph().chart().dots, 0);
        // only the intro clear
        assert_eq!(session.graph().diagram().clears, 1);

        session.handle(InputEvent::scroll(ScrollDirection::Up));
        assert_eq!(session.graph().frames(), 1);
        assert_eq!(session.graph().chart().dots, 6);
    }

    #[test]
    fn toggle_is_ignored_without_reciprocals() {
        let controller = InputController::new(&AppConfig {
            variant: Variant::Basic,
            ..AppConfig::default()
        });
        let state = SceneState::new(1.0, false);
        assert_eq!(controller.apply(state, InputEvent::Toggle), state);
    }

    #[test]
    fn session_redraws_each_event() {
        let mut session = session(AppConfig::default());
        session.start();
        assert_eq!(session.run(&ScrollScript::sweep(10, ScrollDirection::Up)), 10);

        assert_eq!(session.graph().frames(), 10);
        // intro clear plus one per frame
        assert_eq!(session.graph().diagram().clears, 11);
        assert_eq!(session.graph().chart().clears, 0);
        assert_eq!(session.graph().chart().dots, 40);
        assert!((session.state().theta - to_radians(10.0)).abs() < 1e-12);
    }

    #[test]
    fn scripts_parse_both_shapes() {
        let wrapped = ScrollScript::from_json(
            r#"{ "events": [ { "type": "scroll", "delta_y": 100 }, { "type": "toggle" } ] }"#,
        )
        .unwrap();
        let bare = ScrollScript::from_json(
            r#"[ { "type": "scroll", "delta_y": 100 }, { "type": "toggle" } ]"#,
        )
        .unwrap();
        assert_eq!(wrapped, bare);
        assert_eq!(wrapped.len(), 2);
        assert_eq!(wrapped.events[1], InputEvent::Toggle);
    }

    #[test]
    fn demo_script_ends_one_step_up() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/quarter-turn.json");
        let script = ScrollScript::load(path).unwrap();
        let mut session = session(AppConfig::default());
        session.start();
        let redraws = session.run(&script);

        // the two toggles do not redraw
        assert_eq!(redraws, script.len() - 2);
        assert_eq!(session.graph().frames(), redraws);
        assert!(!session.state().show);
        assert!((session.state().theta - to_radians(2.0)).abs() < 1e-12);
    }

    #[test]
    fn parses_interactive_commands() {
        assert_eq!("down".parse::<InputEvent>().unwrap(), InputEvent::Scroll { delta_y: 100.0 });
        assert_eq!(" T ".parse::<InputEvent>().unwrap(), InputEvent::Toggle);
        assert!("sideways".parse::<InputEvent>().is_err());
    }
}
