// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Editing a route: drag a middle marker, remove a vertex, then undo and redo.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p waymark_demos --example edit_polyline`

use waymark_chain::{Shape, ShapeKind};
use waymark_geom::{GeoPoint, Projection, WebMercator};
use waymark_session::{EditEvent, EditOptions, EditSession, Modifiers};

fn print_events(label: &str, events: &[EditEvent<()>]) {
    println!("{label}");
    for event in events {
        match event {
            EditEvent::Edited(shape) => println!("  edited: {} vertices", shape.vertex_count()),
            other => println!("  {other:?}"),
        }
    }
}

fn main() {
    env_logger::init();

    let projection = WebMercator::new(15.0);
    let route = Shape::Flat(vec![
        GeoPoint::new(47.4979, 19.0402),
        GeoPoint::new(47.5010, 19.0450),
        GeoPoint::new(47.5030, 19.0520),
    ]);
    let options = EditOptions {
        remove_on_click: true,
        ..EditOptions::default()
    };
    let mut session: EditSession<_> =
        EditSession::new(ShapeKind::Polyline, &route, projection, options);
    let mut now = 0;

    // Grab the middle marker between the first two vertices.
    let first = route.rings()[0][0];
    let second = route.rings()[0][1];
    let handle = projection.project(first).midpoint(projection.project(second));
    let Some(marker) = session.marker_at(handle) else {
        println!("no marker under the pointer");
        return;
    };

    match session.drag_start(marker, now) {
        Ok(events) => print_events("drag start", &events),
        Err(err) => println!("drag refused: {err}"),
    }
    for step in 1..=3 {
        now += 16;
        let offset = f64::from(step) * 0.0004;
        let target = GeoPoint::new(47.4995 + offset, 19.0426 - offset);
        if let Err(err) = session.drag(marker, target, Modifiers::empty(), &[], now) {
            println!("drag refused: {err}");
        }
    }
    if let Ok(events) = session.drag_end(marker, now) {
        print_events("drag end", &events);
    }

    now += 500;
    if let Some(last) = session.chain().vertex_at(0, 3) {
        match session.click(last, now) {
            Ok(events) => print_events("click removes the last vertex", &events),
            Err(err) => println!("remove refused: {err}"),
        }
    }

    now += 500;
    print_events("undo", &session.on_key('z', now));
    print_events("undo", &session.on_key('z', now + 1));
    print_events("redo", &session.on_key('y', now + 2));

    println!("bounds: {:?}", session.bounds());
    println!("final shape: {:?}", session.shape());
}
