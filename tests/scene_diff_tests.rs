use drinkviz::core::Viewport;
use drinkviz::render::{
    CirclePrimitive, Color, PatchOp, RetainedScene, Scene, SceneElement, SceneKey, TextHAlign,
    TextPrimitive, diff_scenes,
};

fn dot(cx: f64) -> SceneElement {
    SceneElement::Circle(CirclePrimitive {
        cx,
        cy: 50.0,
        radius: 4.0,
        fill: Color::rgb(0.99, 0.75, 0.44),
        stroke: Color::BLACK,
        stroke_width: 0.0,
    })
}

fn label(text: &str) -> SceneElement {
    SceneElement::Text(TextPrimitive::new(
        text,
        10.0,
        10.0,
        14.0,
        Color::BLACK,
        TextHAlign::Center,
    ))
}

fn base_scene() -> Scene {
    Scene::new(Viewport::new(400, 300))
        .with(SceneKey::AxisLine, label("axis"))
        .with(SceneKey::Dot("A".to_owned()), dot(10.0))
        .with(SceneKey::Dot("B".to_owned()), dot(20.0))
        .with(SceneKey::TotalTitle, label("total"))
}

#[test]
fn first_diff_inserts_everything_in_paint_order() {
    let scene = base_scene();
    let patch = diff_scenes(None, &scene);

    let summary = patch.summary();
    assert_eq!(summary.inserted, 4);
    assert_eq!(summary.total(), 4);
    let indices: Vec<usize> = patch
        .ops
        .iter()
        .filter_map(|op| match op {
            PatchOp::Insert { index, .. } => Some(*index),
            _ => None,
        })
        .collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);
}

#[test]
fn identical_scenes_produce_an_empty_patch() {
    let scene = base_scene();
    let patch = diff_scenes(Some(&scene), &scene.clone());
    assert!(patch.is_empty());
    assert_eq!(patch.summary().total(), 0);
}

#[test]
fn changed_and_missing_elements_become_updates_and_removals() {
    let previous = base_scene();
    let next = Scene::new(Viewport::new(400, 300))
        .with(SceneKey::AxisLine, label("axis"))
        .with(SceneKey::Dot("A".to_owned()), dot(12.0))
        .with(SceneKey::TotalTitle, label("total"))
        .with(SceneKey::TotalValue, label("42"));

    let patch = diff_scenes(Some(&previous), &next);

    assert_eq!(
        patch.ops.first().map(PatchOp::key),
        Some(&SceneKey::Dot("B".to_owned()))
    );
    let summary = patch.summary();
    assert_eq!(summary.removed, 1);
    assert_eq!(summary.updated, 1);
    assert_eq!(summary.inserted, 1);
    assert!(patch.ops.iter().any(|op| matches!(
        op,
        PatchOp::Insert { index: 3, key: SceneKey::TotalValue, .. }
    )));
}

#[test]
fn retained_scene_tracks_a_sequence_of_patches() {
    let first = base_scene();
    let second = Scene::new(Viewport::new(400, 300))
        .with(SceneKey::AxisLine, label("axis"))
        .with(SceneKey::Dot("A".to_owned()), dot(11.0))
        .with(SceneKey::Dot("C".to_owned()), dot(30.0))
        .with(SceneKey::Dot("B".to_owned()), dot(20.0))
        .with(SceneKey::TotalTitle, label("total"));
    let third = Scene::new(Viewport::new(400, 300))
        .with(SceneKey::AxisLine, label("axis"))
        .with(SceneKey::Dot("C".to_owned()), dot(30.0))
        .with(SceneKey::TotalTitle, label("total"))
        .with(SceneKey::FavoriteValue, label("wine"));

    let mut retained = RetainedScene::default();
    let mut previous: Option<Scene> = None;
    for scene in [first, second, third] {
        let patch = diff_scenes(previous.as_ref(), &scene);
        retained.apply(&patch).expect("patch applies cleanly");
        assert!(retained.matches(&scene));
        previous = Some(scene);
    }
    assert_eq!(retained.len(), 4);
}

#[test]
fn viewport_change_replaces_every_element() {
    let previous = base_scene();
    let mut next = base_scene();
    next.viewport = Viewport::new(800, 600);

    let patch = diff_scenes(Some(&previous), &next);
    let summary = patch.summary();
    assert_eq!(summary.removed, 4);
    assert_eq!(summary.inserted, 4);
    assert_eq!(summary.updated, 0);

    let mut retained = RetainedScene::default();
    retained
        .apply(&diff_scenes(None, &previous))
        .expect("initial patch");
    retained.apply(&patch).expect("resize patch");
    assert!(retained.matches(&next));
    assert_eq!(retained.viewport(), Some(Viewport::new(800, 600)));
}

#[test]
fn retained_scene_rejects_inconsistent_patches() {
    let scene = base_scene();
    let patch = diff_scenes(None, &scene);

    let mut retained = RetainedScene::default();
    retained.apply(&patch).expect("first insert");
    assert!(retained.apply(&patch).is_err());

    let mut empty = RetainedScene::default();
    let removal = diff_scenes(Some(&scene), &Scene::new(Viewport::new(400, 300)));
    assert!(empty.apply(&removal).is_err());
}

#[test]
fn patch_validation_rejects_non_finite_geometry() {
    let scene = Scene::new(Viewport::new(400, 300))
        .with(SceneKey::Dot("A".to_owned()), dot(f64::NAN));
    assert!(diff_scenes(None, &scene).validate().is_err());
    assert!(diff_scenes(None, &base_scene()).validate().is_ok());
}
