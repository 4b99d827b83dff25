use nalgebra::Vector3;

use crate::control::rocket::{OrientationDelta, StepOutcome};

/// Receives what a viewer needs to draw the flight: positions for the trail,
/// rotations for the model and the rendered log block.
pub trait FlightObserver {
    fn on_step(&mut self, tick: u64, outcome: &StepOutcome);

    fn on_log(&mut self, _text: &str) {}
}

/// Headless trail: keeps every position and rotation it is handed.
#[derive(Debug, Default)]
pub struct TrailRecorder {
    pub trail: Vec<Vector3<f64>>,
    pub rotations: Vec<(u64, OrientationDelta)>,
    pub last_log: Option<String>,
}

impl TrailRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of the rotations applied so far, in radians.
    pub fn total_rotation(&self) -> f64 {
        self.rotations.iter().map(|(_, delta)| delta.angle).sum()
    }

    pub fn trail_length(&self) -> f64 {
        self.trail.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
    }
}

impl FlightObserver for TrailRecorder {
    fn on_step(&mut self, tick: u64, outcome: &StepOutcome) {
        self.trail.push(outcome.position);
        if let Some(delta) = outcome.orientation {
            self.rotations.push((tick, delta));
        }
    }

    fn on_log(&mut self, text: &str) {
        self.last_log = Some(text.to_string());
    }
}

/// Prints log blocks and phase changes to stdout, and rotations on every
/// `every`-th tick.
pub struct ConsoleObserver {
    pub every: u64,
}

impl FlightObserver for ConsoleObserver {
    fn on_step(&mut self, tick: u64, outcome: &StepOutcome) {
        if let Some((from, to)) = outcome.transition {
            println!("Tick {}: {} -> {}", tick, from.name(), to.name());
        }
        if let Some(delta) = outcome.orientation {
            if tick % self.every.max(1) == 0 {
                println!("Rotating rocket by {:.3} rad", delta.angle);
            }
        }
    }

    fn on_log(&mut self, text: &str) {
        println!("{}\n", text);
    }
}

/// Forwards to several observers in order.
#[derive(Default)]
pub struct Fanout<'a> {
    observers: Vec<&'a mut dyn FlightObserver>,
}

impl<'a> Fanout<'a> {
    pub fn new() -> Self {
        Fanout {
            observers: Vec::new(),
        }
    }

    pub fn with(mut self, observer: &'a mut dyn FlightObserver) -> Self {
        self.observers.push(observer);
        self
    }
}

impl FlightObserver for Fanout<'_> {
    fn on_step(&mut self, tick: u64, outcome: &StepOutcome) {
        for observer in self.observers.iter_mut() {
            observer.on_step(tick, outcome);
        }
    }

    fn on_log(&mut self, text: &str) {
        for observer in self.observers.iter_mut() {
            observer.on_log(text);
        }
    }
}
