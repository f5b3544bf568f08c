//! End-to-end construction scenarios: wire JSON in, kernel call log out.

use construction_engine::{construct_part, EngineError};
use geom_kernel::{KernelOp, MockKernel, ShapeRecord};
use part_types::{Axis, PartDefinition};

fn build(json: &str) -> (MockKernel, Result<geom_kernel::SolidHandle, EngineError>) {
    let definition = PartDefinition::from_json(json).expect("definition should parse");
    let mut kernel = MockKernel::new();
    let result = construct_part(&mut kernel, &definition);
    (kernel, result)
}

#[test]
fn centered_cube_with_no_cuts_is_a_box_at_the_origin() {
    let (kernel, result) = build(
        r#"{"id":"p1","features":[
            {"type":"add","name":"cube","x":0.0,"y":0.0,"z":0.0,
             "x_size":10.0,"y_size":10.0,"z_size":10.0,"center":true}
        ]}"#,
    );
    let solid = result.unwrap();
    assert_eq!(
        kernel.shape(&solid),
        Some(&ShapeRecord::Box {
            extents: [10.0, 10.0, 10.0],
            origin: [-5.0, -5.0, -5.0],
        })
    );
    assert_eq!(kernel.cut_count(), 0);
}

#[test]
fn two_holes_produce_one_fuse_and_one_cut() {
    let (kernel, result) = build(
        r#"{"id":"p2","features":[
            {"type":"add","name":"cube","x":0.0,"y":0.0,"z":0.0,
             "x_size":40.0,"y_size":40.0,"z_size":10.0,"center":false},
            {"type":"cut","name":"hole","x":10.0,"y":10.0,"z":10.0,
             "diameter":4.0,"depth":10.0,"side":"TOP"},
            {"type":"cut","name":"hole","x":30.0,"y":30.0,"z":10.0,
             "diameter":4.0,"depth":10.0,"side":"TOP"}
        ]}"#,
    );
    result.unwrap();
    assert_eq!(kernel.fuse_count(), 1);
    assert_eq!(kernel.cut_count(), 1);
}

#[test]
fn sphere_cut_is_immediate_and_batch_stays_empty() {
    let (kernel, result) = build(
        r#"{"id":"p3","features":[
            {"type":"add","name":"cube","x":0.0,"y":0.0,"z":0.0,
             "x_size":20.0,"y_size":20.0,"z_size":20.0,"center":true},
            {"type":"cut","name":"sphere","x":0.0,"y":0.0,"z":10.0,"diameter":8.0}
        ]}"#,
    );
    result.unwrap();
    assert_eq!(kernel.cut_count(), 1);
    assert_eq!(kernel.fuse_count(), 0);
}

#[test]
fn hole_on_right_face_gets_270_about_y() {
    let (kernel, result) = build(
        r#"{"id":"p4","features":[
            {"type":"add","name":"cube","x":0.0,"y":0.0,"z":0.0,
             "x_size":20.0,"y_size":20.0,"z_size":20.0,"center":false},
            {"type":"cut","name":"hole","x":20.0,"y":10.0,"z":10.0,
             "diameter":5.0,"depth":6.0,"side":"RIGHT"}
        ]}"#,
    );
    result.unwrap();
    let placement = kernel
        .ops()
        .iter()
        .find_map(|op| match op {
            KernelOp::SetPlacement { placement, .. } => Some(placement.clone()),
            _ => None,
        })
        .unwrap();
    let align = placement.align.unwrap();
    assert_eq!(align.axis, Axis::Y);
    assert_eq!(align.angle_deg, 270.0);
}

#[test]
fn round_bevel_mirrors_only_the_bounded_axis() {
    let (kernel, result) = build(
        r#"{"id":"p5","features":[
            {"type":"add","name":"cube","x":0.0,"y":0.0,"z":0.0,
             "x_size":50.0,"y_size":50.0,"z_size":10.0,"center":false},
            {"type":"cut","name":"beveled_edge","edge_type":"round",
             "axis1":"x","axis2":"y","bound1":0.0,"bound2":50.0,
             "size":5.0,"depth":10.0,"side":"TOP"}
        ]}"#,
    );
    result.unwrap();
    let placement = kernel
        .ops()
        .iter()
        .find_map(|op| match op {
            KernelOp::SetPlacement { placement, .. } => Some(placement.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(placement.translation, [5.0, 45.0, 0.0]);
}

#[test]
fn nut_and_cube_cuts_share_the_final_fused_cutter() {
    let (kernel, result) = build(
        r#"{"id":"p6","features":[
            {"type":"add","name":"cube","x":0.0,"y":0.0,"z":0.0,
             "x_size":60.0,"y_size":60.0,"z_size":15.0,"center":false},
            {"type":"cut","name":"nut","x":15.0,"y":15.0,"z":15.0,
             "diameter":8.0,"depth":4.0,"side":"TOP","vertical":false},
            {"type":"cut","name":"cube","x":40.0,"y":40.0,"z":15.0,
             "x_size":10.0,"y_size":10.0,"z_size":5.0,"center":false,"side":"TOP"}
        ]}"#,
    );
    result.unwrap();
    assert_eq!(kernel.fuse_count(), 1);
    assert_eq!(kernel.cut_count(), 1);
    let fused = kernel
        .ops()
        .iter()
        .find_map(|op| match op {
            KernelOp::MultiFuse { count } => Some(*count),
            _ => None,
        })
        .unwrap();
    assert_eq!(fused, 2);
}

#[test]
fn surface_cube_cut_on_top_is_pulled_below_the_face() {
    let (kernel, result) = build(
        r#"{"id":"p7","features":[
            {"type":"add","name":"cube","x":0.0,"y":0.0,"z":0.0,
             "x_size":30.0,"y_size":30.0,"z_size":12.0,"center":false},
            {"type":"cut","name":"cube","x":5.0,"y":5.0,"z":12.0,
             "x_size":6.0,"y_size":6.0,"z_size":3.0,"center":false,"side":"TOP"}
        ]}"#,
    );
    result.unwrap();
    let boxes: Vec<_> = kernel
        .ops()
        .iter()
        .filter_map(|op| match op {
            KernelOp::MakeBox { origin, .. } => Some(*origin),
            _ => None,
        })
        .collect();
    assert_eq!(boxes[1], [5.0, 5.0, 9.0], "z pulled back by z_size");
}

#[test]
fn invalid_side_aborts_before_construction() {
    let parse = PartDefinition::from_json(
        r#"{"id":"p8","features":[
            {"type":"cut","name":"hole","x":0.0,"y":0.0,"z":0.0,
             "diameter":3.0,"depth":5.0,"side":"DIAGONAL"}
        ]}"#,
    );
    let err = parse.unwrap_err().to_string();
    assert!(err.contains("DIAGONAL"), "error names the bad side: {err}");
}

#[test]
fn invalid_edge_type_aborts_before_construction() {
    let parse = PartDefinition::from_json(
        r#"{"id":"p9","features":[
            {"type":"cut","name":"beveled_edge","edge_type":"fillet",
             "axis1":"x","axis2":"y","bound1":0.0,"bound2":0.0,
             "size":5.0,"depth":2.0,"side":"TOP"}
        ]}"#,
    );
    let err = parse.unwrap_err().to_string();
    assert!(err.contains("fillet"), "error names the bad edge type: {err}");
}
