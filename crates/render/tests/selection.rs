use glam::Vec3;
use partpick_core::{Color, NodeId};
use partpick_input::PointerState;
use partpick_render::{pick, Intersection, SelectionController};
use partpick_scene::SceneGraph;
use partpick_testkit::{camera_looking_down_z, head_color, row_of_boxes, torso_and_head};

fn hit(node: NodeId) -> Intersection {
    Intersection {
        node,
        distance: 1.0,
        point: Vec3::ZERO,
    }
}

fn click_on(selection: &mut SelectionController, graph: &mut SceneGraph, node: NodeId) {
    selection.update_hover(Some(&hit(node)));
    selection.click(graph);
}

#[test]
fn miss_clears_hover() {
    let mut selection = SelectionController::default();
    selection.update_hover(Some(&hit(NodeId(1))));
    selection.update_hover(None);
    assert_eq!(selection.state().hovered, None);
}

#[test]
fn colors_are_reversible_across_selections() {
    let (mut graph, ids) = row_of_boxes(&["A", "B"]);
    let (a, b) = (ids[0], ids[1]);
    let original_a = graph.node(a).unwrap().original_color();
    let original_b = graph.node(b).unwrap().original_color();
    assert_ne!(original_a, original_b);
    let mut selection = SelectionController::default();

    click_on(&mut selection, &mut graph, a);
    click_on(&mut selection, &mut graph, b);
    assert_eq!(graph.node(a).unwrap().color(), original_a);
    assert_eq!(graph.node(b).unwrap().color(), Color::RED);

    click_on(&mut selection, &mut graph, a);
    assert_eq!(graph.node(b).unwrap().color(), original_b);
    assert_eq!(graph.node(a).unwrap().color(), Color::RED);
    assert_eq!(graph.node(a).unwrap().original_color(), original_a);
    assert_eq!(graph.node(b).unwrap().original_color(), original_b);
}

#[test]
fn click_on_empty_space_changes_nothing() {
    let (mut graph, ids) = row_of_boxes(&["A", "B"]);
    let mut selection = SelectionController::default();
    click_on(&mut selection, &mut graph, ids[0]);
    let state_before = *selection.state();
    let colors_before: Vec<_> = graph.iter().map(|node| node.color()).collect();

    selection.update_hover(None);
    assert!(selection.click(&mut graph).is_none());

    assert_eq!(selection.state().selected, state_before.selected);
    let colors_after: Vec<_> = graph.iter().map(|node| node.color()).collect();
    assert_eq!(colors_before, colors_after);
}

#[test]
fn clicking_the_selected_node_again_is_idempotent() {
    let (mut graph, ids) = row_of_boxes(&["A", "B"]);
    let mut selection = SelectionController::default();
    click_on(&mut selection, &mut graph, ids[0]);
    let state = *selection.state();
    let colors: Vec<_> = graph.iter().map(|node| node.color()).collect();

    selection.click(&mut graph);

    assert_eq!(*selection.state(), state);
    let again: Vec<_> = graph.iter().map(|node| node.color()).collect();
    assert_eq!(colors, again);
}

#[test]
fn clicking_the_torso_through_the_centre_of_the_view() {
    let mut scene = torso_and_head();
    let pose = camera_looking_down_z().pose();
    let mut selection = SelectionController::default();

    let hit = pick(PointerState::CENTER, &pose, &scene.graph);
    assert_eq!(hit.map(|hit| hit.node), Some(scene.torso));

    selection.update_hover(hit.as_ref());
    selection.click(&mut scene.graph);

    assert_eq!(selection.state().selected, Some(scene.torso));
    assert_eq!(scene.graph.node(scene.torso).unwrap().color(), Color::RED);
    assert_eq!(scene.graph.node(scene.head).unwrap().color(), head_color());
}

#[test]
fn custom_highlight_color_is_used() {
    let (mut graph, ids) = row_of_boxes(&["A"]);
    let highlight: Color = "#00ffcc".parse().unwrap();
    let mut selection = SelectionController::new(highlight);
    click_on(&mut selection, &mut graph, ids[0]);
    assert_eq!(graph.node(ids[0]).unwrap().color(), highlight);
}
