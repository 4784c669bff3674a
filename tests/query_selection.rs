//! End-to-end selection tests: command text in, scene selection out

use cityquery::scene::{DEFAULT_FOV, RenderSettings};
use cityquery::{
    Analyzer, Camera, Mesh, ObjectId, Property, QueryConfig, QueryEngine, Scene, SceneObject,
    SelectionContext, Vec3, VisibilityConfig, select_objects_in_camera_view,
};
use cityquery::core::selection::keys;
use cityquery::nlp::Category;
use proptest::prelude::*;

fn building(name: &str, height: Option<f64>, constructed: Option<&str>) -> SceneObject {
    let mut props = Property::new();
    props.set(keys::GMLID, name);
    props.set(keys::HEIGHT, height);
    props.set(keys::YEAR_OF_CONSTRUCTION, constructed);
    SceneObject::empty(name).with_properties(props).selected(true)
}

fn scene_with_heights(heights: &[f64]) -> Scene {
    let mut scene = Scene::new();
    for (i, &h) in heights.iter().enumerate() {
        scene.add_object(building(&format!("B{}", i), Some(h), None));
    }
    scene
}

fn selected_names(scene: &Scene) -> Vec<String> {
    scene
        .selected_objects()
        .into_iter()
        .filter_map(|id| scene.object(id).map(|o| o.name.clone()))
        .collect()
}

fn run(scene: &mut Scene, query: &str) {
    QueryEngine::default().run(query, scene).unwrap();
}

#[test]
fn test_query_without_building_is_noop() {
    let queries = [
        "select the highest house",
        "",
        "building",
        "select the tallest tower on the left",
    ];
    for query in queries {
        let mut scene = scene_with_heights(&[10.0, 42.0, 7.0]);
        scene.objects[2].selected = false;
        let result = QueryEngine::default().run(query, &mut scene).unwrap();
        assert!(result.plan.predicates.is_empty(), "query {:?}", query);
        assert_eq!(selected_names(&scene), vec!["B0", "B1"], "query {:?}", query);
    }
}

#[test]
fn test_highest_building() {
    let mut scene = scene_with_heights(&[10.0, 42.0, 7.0]);
    run(&mut scene, "select the highest building");
    assert_eq!(selected_names(&scene), vec!["B1"]);
}

#[test]
fn test_high_buildings() {
    let mut scene = scene_with_heights(&[10.0, 42.0, 7.0]);
    run(&mut scene, "select the high buildings");
    assert_eq!(selected_names(&scene), vec!["B1"]);
}

#[test]
fn test_constructed_before() {
    let mut scene = Scene::new();
    scene.add_object(building("old", Some(5.0), Some("1920-01-01")));
    scene.add_object(building("new", Some(5.0), Some("1960-01-01")));
    scene.add_object(building("unknown", Some(5.0), None));

    run(&mut scene, "select buildings constructed before 1940");
    assert_eq!(selected_names(&scene), vec!["old"]);
}

#[test]
fn test_stages_apply_in_sequence() {
    // The date stage reads what the height stage left and replaces it.
    let mut scene = Scene::new();
    scene.add_object(building("tall-old", Some(60.0), Some("1900-01-01")));
    scene.add_object(building("tall-new", Some(40.0), Some("1990-01-01")));
    scene.add_object(building("short-new", Some(5.0), Some("1995-01-01")));

    run(&mut scene, "select the high buildings");
    run(&mut scene, "select buildings constructed after 1940");
    assert_eq!(selected_names(&scene), vec!["tall-new"]);
}

#[test]
fn test_stage_order_is_not_a_combined_filter() {
    // "highest" keeps only the tallest building; the date stage then finds
    // nothing to keep, rather than picking the tallest post-1940 building.
    let mut scene = Scene::new();
    scene.add_object(building("tall-old", Some(60.0), Some("1900-01-01")));
    scene.add_object(building("tall-new", Some(40.0), Some("1990-01-01")));

    run(&mut scene, "select the highest building constructed after 1940");
    assert!(selected_names(&scene).is_empty());
}

#[test]
fn test_extremum_tie_first_wins() {
    let mut scene = scene_with_heights(&[42.0, 10.0, 42.0]);
    run(&mut scene, "select the highest building");
    assert_eq!(selected_names(&scene), vec!["B0"]);
}

#[test]
fn test_left_requires_every_vertex() {
    let mut scene = Scene::new();
    scene.camera = Some(Camera::perspective(Vec3::new(0.0, 0.0, 30.0), DEFAULT_FOV, 1.0));

    let left = Mesh::new(
        vec![Vec3::new(0.0, -8.0, 0.0), Vec3::new(2.0, -6.0, 0.0), Vec3::new(0.0, -6.0, 0.0)],
        vec![vec![0, 1, 2]],
    );
    let crossing = Mesh::new(
        vec![Vec3::new(0.0, -8.0, 0.0), Vec3::new(2.0, -6.0, 0.0), Vec3::new(0.0, 0.1, 0.0)],
        vec![vec![0, 1, 2]],
    );
    scene.add_object(SceneObject::mesh("left", left).selected(true));
    scene.add_object(SceneObject::mesh("crossing", crossing).selected(true));
    // Local vertices on the right, but the object sits on the left
    scene.add_object(
        SceneObject::mesh("moved", Mesh::new(vec![Vec3::new(0.0, 1.0, 0.0)], Vec::new()))
            .at(Vec3::new(0.0, -20.0, 0.0))
            .selected(true),
    );

    run(&mut scene, "select the buildings on the left");
    assert_eq!(selected_names(&scene), vec!["left", "moved"]);
}

#[test]
fn test_position_without_camera_is_an_error() {
    let mut scene = scene_with_heights(&[1.0]);
    let err = QueryEngine::default()
        .run("select the buildings on the right", &mut scene)
        .unwrap_err();
    assert!(err.is_host_failure());
    assert_eq!(selected_names(&scene), vec!["B0"]);
}

#[test]
fn test_buildings_lemma() {
    let tokens = Analyzer::new().analyze("buildings").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].surface, "buildings");
    assert_eq!(tokens[0].lemma, "building");
    assert_eq!(tokens[0].category, Category::Noun);
}

#[test]
fn test_visibility_then_query() {
    let square = |cx: f64| {
        Mesh::new(
            vec![
                Vec3::new(cx - 2.0, -2.0, 0.0),
                Vec3::new(cx + 2.0, -2.0, 0.0),
                Vec3::new(cx + 2.0, 2.0, 0.0),
                Vec3::new(cx - 2.0, 2.0, 0.0),
            ],
            vec![vec![0, 1, 2, 3]],
        )
    };

    let mut scene = Scene::new();
    scene.camera = Some(Camera::perspective(Vec3::new(0.0, 0.0, 40.0), DEFAULT_FOV, 1.0));
    scene.render = RenderSettings::new(80, 80);
    let buildings = [
        ("near-low", -5.0, 8.0),
        ("near-tall", 5.0, 50.0),
        ("far-tall", 400.0, 90.0),
    ];
    for (name, x, height) in buildings {
        let props = Property::with(keys::HEIGHT, height);
        scene.add_object(SceneObject::mesh(name, square(x)).with_properties(props));
    }

    let visible = select_objects_in_camera_view(&mut scene, &VisibilityConfig::default()).unwrap();
    assert_eq!(visible.len(), 2);
    assert!(!visible.contains(&ObjectId::new(2)));

    run(&mut scene, "select the highest building");
    assert_eq!(selected_names(&scene), vec!["near-tall"]);
}

#[test]
fn test_configured_thresholds() {
    let mut scene = scene_with_heights(&[10.0, 42.0, 55.0]);
    let engine = QueryEngine::new(QueryConfig::new().high_threshold(50.0));
    engine.run("select the high buildings", &mut scene).unwrap();
    assert_eq!(selected_names(&scene), vec!["B2"]);
}

proptest! {
    #[test]
    fn prop_same_query_same_outcome(
        heights in proptest::collection::vec(0.0f64..100.0, 0..12),
        query in prop::sample::select(vec![
            "select the highest building",
            "select the lowest buildings",
            "select the high buildings",
            "select buildings lower than 20",
            "select the building",
        ]),
    ) {
        let mut first = scene_with_heights(&heights);
        let mut second = scene_with_heights(&heights);
        run(&mut first, query);
        run(&mut second, query);
        prop_assert_eq!(selected_names(&first), selected_names(&second));
    }

    #[test]
    fn prop_selection_only_narrows(
        heights in proptest::collection::vec(0.0f64..100.0, 1..12),
        limit in 1u32..100,
    ) {
        let mut scene = scene_with_heights(&heights);
        run(&mut scene, &format!("select buildings higher than {}", limit));
        for name in selected_names(&scene) {
            let id = scene.find_by_name(&name).unwrap();
            let height = scene.attributes(id).unwrap().height.unwrap();
            prop_assert!(height > f64::from(limit));
        }
    }
}
