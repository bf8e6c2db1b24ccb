use partpick_input::InputEvent;
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize)]
struct PointerScriptFile {
    steps: Vec<PointerStep>,
}

/// Hold the pointer at `(x, y)` pixels for `duration` seconds.
#[derive(Debug, Clone, Deserialize, PartialEq)]
struct PointerStep {
    duration: f32,
    x: f32,
    y: f32,
    /// Click once when the step starts.
    #[serde(default)]
    click: bool,
}

/// Replays a pointer script as window events, one frame at a time.
pub struct PointerScriptPlayer {
    steps: Vec<PointerStep>,
    index: usize,
    time_in_step: f32,
    started: bool,
    finished: bool,
}

impl PointerScriptPlayer {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> anyhow::Result<Self> {
        let file: PointerScriptFile = serde_json::from_str(contents)?;
        if file.steps.is_empty() {
            anyhow::bail!("pointer script contains no steps");
        }
        if let Some(step) = file.steps.iter().find(|step| !step.duration.is_finite() || step.duration < 0.0) {
            anyhow::bail!("pointer script step has invalid duration {}", step.duration);
        }
        Ok(Self {
            steps: file.steps,
            index: 0,
            time_in_step: 0.0,
            started: false,
            finished: false,
        })
    }

    /// Whether the last step has run its full duration.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Events for the frame that starts `dt` seconds after the previous one.
    pub fn advance(&mut self, dt: f32) -> Vec<InputEvent> {
        let mut events = Vec::new();
        if !self.started {
            self.started = true;
            self.enter_step(&mut events);
            return events;
        }
        if self.finished {
            return events;
        }

        self.time_in_step += dt;
        while self.time_in_step >= self.steps[self.index].duration {
            if self.index + 1 >= self.steps.len() {
                self.finished = true;
                break;
            }
            self.time_in_step -= self.steps[self.index].duration;
            self.index += 1;
            self.enter_step(&mut events);
        }
        events
    }

    fn enter_step(&self, events: &mut Vec<InputEvent>) {
        let step = &self.steps[self.index];
        events.push(InputEvent::PointerMoved {
            x: step.x,
            y: step.y,
        });
        if step.click {
            events.push(InputEvent::Click);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"{
        "steps": [
            { "duration": 0.1, "x": 10, "y": 20 },
            { "duration": 0.0, "x": 30, "y": 40, "click": true },
            { "duration": 0.5, "x": 50, "y": 60 }
        ]
    }"#;

    #[test]
    fn first_frame_enters_first_step() {
        let mut player = PointerScriptPlayer::from_json(SCRIPT).unwrap();
        assert_eq!(
            player.advance(0.0),
            vec![InputEvent::PointerMoved { x: 10.0, y: 20.0 }]
        );
        assert!(player.advance(0.05).is_empty());
    }

    #[test]
    fn zero_length_steps_still_emit_their_click() {
        let mut player = PointerScriptPlayer::from_json(SCRIPT).unwrap();
        player.advance(0.0);
        let events = player.advance(0.125);
        assert_eq!(
            events,
            vec![
                InputEvent::PointerMoved { x: 30.0, y: 40.0 },
                InputEvent::Click,
                InputEvent::PointerMoved { x: 50.0, y: 60.0 },
            ]
        );
        assert!(!player.is_finished());
        player.advance(1.0);
        assert!(player.is_finished());
        assert!(player.advance(1.0).is_empty());
    }

    #[test]
    fn empty_scripts_are_rejected() {
        assert!(PointerScriptPlayer::from_json(r#"{ "steps": [] }"#).is_err());
        assert!(PointerScriptPlayer::from_json(
            r#"{ "steps": [{ "duration": -1, "x": 0, "y": 0 }] }"#
        )
        .is_err());
    }
}
