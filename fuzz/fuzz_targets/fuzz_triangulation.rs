#![no_main]

use bowyer::{Point, Triangulation};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (Vec<Point>, Point)| {
    let (points, extra) = data;

    let mut triangulation = Triangulation::default();
    if triangulation.insert_vertices(&points).is_ok() {
        let _ = triangulation.insert_vertex(extra);
        assert!(matches!(triangulation.is_sound(), Ok(true)));
    }
});
