use approx::assert_relative_eq;
use pcm_core::nalgebra::{Point2, Point3};
use pcm_core::{QuadKey, SamplePoint, Triangle};
use pcm_mesh::{MeshGraph, Quad, QuadMeshBuilder, Side};

fn unit_quad() -> Quad {
    Quad::new(
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
    )
}

fn assert_links_symmetric(graph: &MeshGraph) {
    for (key, quad) in graph.iter() {
        for (side, neighbor) in quad.neighbors().iter() {
            assert_eq!(
                graph.neighbor(neighbor, side.opposite()),
                Some(key),
                "{:?} of {:?} does not point back",
                side,
                key
            );
        }
    }
}

fn grown(graph: &MeshGraph, key: QuadKey, side: Side) -> &Quad {
    graph.get(graph.neighbor(key, side).unwrap()).unwrap()
}

#[test]
fn grow_fills_every_side_once() {
    let builder = QuadMeshBuilder::new();
    let mut graph = MeshGraph::new();
    let key = graph.insert(unit_quad());

    let created = builder.grow(&mut graph, key);
    assert_eq!(created.len(), 4);
    assert_eq!(graph.len(), 5);
    assert!(graph.get(key).unwrap().neighbors().is_complete());
    assert_links_symmetric(&graph);

    assert!(builder.grow(&mut graph, key).is_empty());
    assert_eq!(graph.len(), 5);
}

#[test]
fn grow_only_fills_missing_sides() {
    let builder = QuadMeshBuilder::new();
    let mut graph = MeshGraph::new();
    let key = graph.insert(unit_quad());
    let existing = graph.insert(unit_quad());
    assert!(graph.link(key, Side::Left, existing));

    let created = builder.grow(&mut graph, key);
    assert_eq!(created.len(), 3);
    assert_eq!(graph.neighbor(key, Side::Left), Some(existing));
    assert!(!created.contains(&existing));
}

#[test]
fn grow_of_missing_quad_does_nothing() {
    let builder = QuadMeshBuilder::new();
    let mut graph = MeshGraph::new();
    let key = graph.insert(unit_quad());
    graph.remove(key);
    assert!(builder.grow(&mut graph, key).is_empty());
    assert!(graph.is_empty());
}

#[test]
fn skirt_vertices_sit_just_past_the_shared_edge() {
    let builder = QuadMeshBuilder::new();
    let mut graph = MeshGraph::new();
    let key = graph.insert(unit_quad());
    builder.grow(&mut graph, key);

    let up = grown(&graph, key, Side::Up);
    assert_relative_eq!(up.v0(), Point3::new(1.0, 1.001, 0.0));
    assert_relative_eq!(up.v1(), Point3::new(0.0, 1.001, 0.0));
    assert_eq!(up.v2(), Point3::new(0.0, 1.0, 0.0));
    assert_eq!(up.v3(), Point3::new(1.0, 1.0, 0.0));

    let right = grown(&graph, key, Side::Right);
    assert_relative_eq!(right.v0(), Point3::new(1.001, 1.0, 0.0));
    assert_relative_eq!(right.v3(), Point3::new(1.001, 0.0, 0.0));
    assert_eq!(right.v1(), Point3::new(1.0, 1.0, 0.0));
    assert_eq!(right.v2(), Point3::new(1.0, 0.0, 0.0));
}

#[test]
fn skirt_offset_is_configurable() {
    let builder = QuadMeshBuilder::new().skirt_offset(0.5);
    let near = Point3::new(2.0, 0.0, 0.0);
    let far = Point3::new(0.0, 0.0, 0.0);
    assert_relative_eq!(builder.skirt_vertex(near, far), Point3::new(2.5, 0.0, 0.0));
    assert_eq!(builder.skirt_vertex(near, near), near);
}

#[test]
fn diagonal_corners_are_reused() {
    let builder = QuadMeshBuilder::new();
    let mut graph = MeshGraph::new();
    let center = graph.insert(unit_quad());
    builder.grow(&mut graph, center);
    let up = graph.neighbor(center, Side::Up).unwrap();
    let left = graph.neighbor(center, Side::Left).unwrap();
    let right = graph.neighbor(center, Side::Right).unwrap();

    builder.grow(&mut graph, up);

    let up_left = graph.neighbor(up, Side::Left).unwrap();
    assert_eq!(graph.neighbor(up_left, Side::Down), Some(left));
    assert_eq!(graph.neighbor(left, Side::Up), Some(up_left));
    assert_eq!(
        graph.get(up_left).unwrap().v2(),
        graph.get(left).unwrap().v1()
    );

    let up_right = graph.neighbor(up, Side::Right).unwrap();
    assert_eq!(graph.neighbor(up_right, Side::Down), Some(right));
    assert_eq!(graph.neighbor(right, Side::Up), Some(up_right));
    assert_eq!(
        graph.get(up_right).unwrap().v3(),
        graph.get(right).unwrap().v0()
    );

    assert_links_symmetric(&graph);
}

#[test]
fn growing_a_ring_keeps_links_symmetric() {
    let builder = QuadMeshBuilder::new();
    let mut graph = MeshGraph::new();
    let center = graph.insert(unit_quad());
    let ring = builder.grow(&mut graph, center);
    for &key in &ring {
        builder.grow(&mut graph, key);
    }
    for key in ring {
        assert!(graph.get(key).unwrap().neighbors().is_complete());
    }
    assert_links_symmetric(&graph);
}

#[test]
fn removing_a_quad_removes_what_grew_from_it() {
    let builder = QuadMeshBuilder::new();
    let mut graph = MeshGraph::new();
    let center = graph.insert(unit_quad());
    let bystander = graph.insert(unit_quad());
    let ring = builder.grow(&mut graph, center);
    let up = graph.neighbor(center, Side::Up).unwrap();
    assert_eq!(builder.grow(&mut graph, up).len(), 3);
    assert_eq!(graph.len(), 9);

    assert!(graph.remove(center).is_some());
    assert_eq!(graph.len(), 1);
    assert!(graph.contains(bystander));
    assert!(ring.iter().all(|&key| !graph.contains(key)));

    // Growing again after the removal starts from a clean slate.
    let again = graph.insert(unit_quad());
    assert_eq!(builder.grow(&mut graph, again).len(), 4);
    assert_eq!(graph.len(), 6);
    assert_links_symmetric(&graph);
}

#[test]
fn triangle_becomes_a_double_sided_quad() {
    let triangle = Triangle::new(
        SamplePoint::new(0, Point2::new(10.0, 0.0), Point3::new(0.05, 0.0, 0.0)),
        SamplePoint::new(1, Point2::new(0.0, 0.0), Point3::new(0.0, 0.0, 0.0)),
        SamplePoint::new(2, Point2::new(0.0, 10.0), Point3::new(0.0, 0.05, 0.0)),
        1e-12,
    )
    .unwrap();
    let quad = QuadMeshBuilder::new().quad_from_triangle(&triangle).unwrap();
    assert_eq!(quad.v0(), Point3::new(0.05, 0.0, 0.0));
    assert_eq!(quad.v1(), Point3::new(0.0, 0.0, 0.0));
    assert_eq!(quad.v2(), Point3::new(0.0, 0.05, 0.0));
    assert_eq!(quad.v3(), quad.v1());
}

#[test]
fn unplaced_triangle_has_no_quad() {
    let triangle = Triangle::new(
        SamplePoint::new(0, Point2::new(10.0, 0.0), Point3::new(0.05, 0.0, 0.0)),
        SamplePoint::screen_only(1, Point2::new(0.0, 0.0)),
        SamplePoint::new(2, Point2::new(0.0, 10.0), Point3::new(0.0, 0.05, 0.0)),
        1e-12,
    )
    .unwrap();
    assert!(QuadMeshBuilder::new().quad_from_triangle(&triangle).is_none());
}
