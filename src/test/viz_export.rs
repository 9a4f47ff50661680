use crate::frame::{sample_frames, SampleInterval};
use crate::occupancy::track;
use crate::topo::build_mesh_xy;
use crate::viz::VizDocument;
use serde_json::Value;
use std::fs;

use super::{single_flit_trace, unique_temp_dir};

#[test]
fn viz_document_carries_topology_and_hover_text() {
    let topo = build_mesh_xy(4).unwrap();
    let timeline = track(single_flit_trace());
    let interval = SampleInterval::new(10).unwrap();
    let frames = sample_frames(&timeline, &topo, interval).unwrap();

    let doc = VizDocument::build(&topo, interval, &frames);
    assert_eq!(doc.meta.mesh_dim, 4);
    assert_eq!(doc.meta.interval, 10);
    assert_eq!(doc.meta.last_sample, 30);
    assert_eq!(doc.meta.routers.len(), 16);
    assert_eq!(doc.meta.links.len(), 48);
    assert_eq!(doc.meta.links[0].opposite, Some(12));
    assert_eq!(doc.frames.len(), 4);

    let r0 = &doc.frames[0].routers[0];
    assert!(r0.occupied);
    assert_eq!(r0.hover, "Router 0\nFlits: 1\nG1 (P1.F0): R0→R3");
    assert_eq!(doc.frames[0].routers[1].hover, "Router 1\nNo flits");

    let l5 = &doc.frames[1].links[5];
    assert!(l5.occupied);
    assert!(l5.hover.starts_with("Link 5 (R6→R7)\nFlits: 1"), "{}", l5.hover);
}

#[test]
fn viz_json_is_written_with_meta_and_frames() {
    let dir = unique_temp_dir("viz-json");
    let out = dir.join("viz.json");

    let topo = build_mesh_xy(2).unwrap();
    let timeline = track(single_flit_trace());
    let interval = SampleInterval::new(15).unwrap();
    let frames = sample_frames(&timeline, &topo, interval).unwrap();
    VizDocument::build(&topo, interval, &frames)
        .write_json(&out)
        .unwrap();

    let raw = fs::read_to_string(&out).expect("read viz.json");
    let v: Value = serde_json::from_str(&raw).expect("parse viz.json");
    assert_eq!(v["meta"]["mesh_dim"], 2);
    assert_eq!(v["meta"]["links"][0]["direction"], "east");
    let frames = v["frames"].as_array().expect("frames array");
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[1]["t"], 15);
    assert_eq!(frames[1]["source_tick"], 10);

    let _ = fs::remove_dir_all(&dir);
}
