use std::time::Duration;

use partpick_assets::{load_async, SceneSource};
use partpick_camera::FixedCamera;
use partpick_core::FrameIndex;
use partpick_input::InputEvent;
use partpick_render::{FrameLoop, FrameLoopSettings, RecordingSink, RenderSink};
use partpick_testkit::camera_looking_down_z;

const HUMAN: &str = r##"{
    "name": "human",
    "nodes": [
        { "name": "Torso", "color": "#3366cc", "translation": [0.0, 0.0, 3.25],
          "geometry": { "type": "box", "size": [1.0, 1.0, 0.5] } },
        { "name": "Head", "color": "#ffcc99", "translation": [0.0, 0.0, 1.75],
          "geometry": { "type": "sphere", "radius": 0.25 } }
    ]
}"##;

fn frame_loop() -> FrameLoop<FixedCamera, RecordingSink> {
    FrameLoop::new(
        FixedCamera::new(camera_looking_down_z()),
        RecordingSink::default(),
        FrameLoopSettings::default(),
    )
}

fn tick_until_loaded<C, S>(frames: &mut FrameLoop<C, S>)
where
    C: partpick_camera::CameraControl,
    S: RenderSink,
{
    for _ in 0..500 {
        frames.tick(1.0 / 60.0);
        if !frames.is_loading() {
            return;
        }
        std::thread::sleep(Duration::from_millis(2));
    }
    panic!("scene did not load in time");
}

#[test]
fn scene_loads_in_the_background_then_clicks_select() {
    let mut frames = frame_loop();
    frames.load(load_async(SceneSource::Json(HUMAN.to_string())));
    tick_until_loaded(&mut frames);
    assert!(frames.environment().is_some());

    // Pointer at the centre of the default 1280x720 viewport.
    frames.push_event(InputEvent::PointerMoved { x: 640.0, y: 360.0 });
    frames.push_event(InputEvent::Click);
    let report = frames.tick(1.0 / 60.0);

    let torso = frames.graph().find_by_name("Torso").unwrap();
    assert_eq!(report.hit.map(|hit| hit.node), Some(torso));
    assert_eq!(report.selection_change.map(|change| change.current), Some(torso));

    let record = frames.sink().last().unwrap();
    assert_eq!(record.selected.as_deref(), Some("Torso"));
    assert_eq!(record.highlighted, vec!["Torso".to_string()]);
}

#[test]
fn failed_load_leaves_an_empty_scene() {
    let mut frames = frame_loop();
    frames.load(load_async(SceneSource::Json("{ not json".to_string())));
    tick_until_loaded(&mut frames);

    assert!(frames.graph().is_empty());
    frames.push_event(InputEvent::Click);
    let report = frames.tick(1.0 / 60.0);
    assert!(report.hit.is_none());
    assert!(report.selection_change.is_none());
}

#[test]
fn events_before_the_scene_arrives_are_harmless() {
    let mut frames = frame_loop();
    frames.push_event(InputEvent::Resized { width: 0, height: 0 });
    frames.push_event(InputEvent::PointerMoved { x: 10.0, y: 10.0 });
    frames.push_event(InputEvent::Click);
    let report = frames.tick(1.0 / 60.0);

    assert_eq!(report.frame, FrameIndex::ZERO);
    assert!(report.hit.is_none());
    assert!(frames.selection().is_empty());
}

#[test]
fn failing_sink_does_not_stop_the_loop() {
    struct Flaky {
        calls: u32,
    }

    impl RenderSink for Flaky {
        fn draw(
            &mut self,
            _: &partpick_scene::SceneGraph,
            _: &partpick_camera::CameraPose,
            _: &partpick_render::SelectionState,
        ) -> anyhow::Result<()> {
            self.calls += 1;
            if self.calls % 2 == 1 {
                anyhow::bail!("device lost");
            }
            Ok(())
        }
    }

    let mut frames = FrameLoop::new(
        FixedCamera::new(camera_looking_down_z()),
        Flaky { calls: 0 },
        FrameLoopSettings::default(),
    );
    for expected in 0..4 {
        assert_eq!(frames.tick(1.0 / 60.0).frame, FrameIndex(expected));
    }
    assert_eq!(frames.sink().calls, 4);
}
