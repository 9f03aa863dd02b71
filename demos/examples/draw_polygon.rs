// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing a polygon on a web map with snapping and live measurement.
//!
//! A scripted user places four corners of a plot next to a street, snaps one
//! corner onto the street, makes a mistake that would cross an edge, and
//! finishes by clicking the first corner again.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p waymark_demos --example draw_polygon`

use kurbo::Vec2;
use waymark_chain::Polygon;
use waymark_geom::measure::LengthUnit;
use waymark_geom::{GeoPoint, Projection, WebMercator};
use waymark_session::{
    DrawEvent, DrawOptions, DrawSession, PointerEvent, PointerKind, SnapLayer, SnapOptions,
};

/// Snap layer handles used by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Layer {
    Street,
}

/// Scripted pointer input in client pixels.
struct User {
    projection: WebMercator,
    origin: Vec2,
    time: u64,
}

impl User {
    fn event(&self, kind: PointerKind, position: GeoPoint) -> PointerEvent {
        let client = self.projection.project(position) - self.origin;
        PointerEvent::new(kind, client, position, self.time)
    }

    fn click(
        &mut self,
        session: &mut DrawSession<Polygon, WebMercator, Layer>,
        layers: &[SnapLayer<Layer>],
        position: GeoPoint,
    ) {
        self.time += 400;
        for kind in [PointerKind::Move, PointerKind::Down, PointerKind::Up] {
            for event in session.on_pointer(&self.event(kind, position), layers) {
                report(&event);
            }
            self.time += 30;
        }
        if let Some(text) = session.measurement_text() {
            println!("    measured: {text}");
        }
    }
}

fn report(event: &DrawEvent<Layer>) {
    match event {
        DrawEvent::VertexAdded { index, position } => {
            println!("  vertex {index} at {:.5}, {:.5}", position.lat, position.lng);
        }
        DrawEvent::Snapped { layer, latlng, .. } => {
            println!("  snapped to {layer:?} at {:.5}, {:.5}", latlng.lat, latlng.lng);
        }
        DrawEvent::Completed(shape) => {
            println!("  completed with {} vertices", shape.vertex_count());
        }
        other => println!("  {other:?}"),
    }
}

fn main() {
    env_logger::init();

    let projection = WebMercator::new(17.0);
    let options = DrawOptions {
        allow_intersection: false,
        measurement_enabled: true,
        measurement_unit: LengthUnit::Metric,
        snap: SnapOptions {
            enabled: true,
            distance: 15.0,
        },
        ..DrawOptions::default()
    };
    let mut session = DrawSession::new(Polygon, projection, options);
    let street = [SnapLayer::polyline(
        Layer::Street,
        vec![GeoPoint::new(47.4985, 19.0390), GeoPoint::new(47.4985, 19.0430)],
    )];
    let mut user = User {
        projection,
        origin: projection.project(GeoPoint::new(47.5000, 19.0380)).to_vec2(),
        time: 0,
    };

    println!("start");
    for event in session.start() {
        report(&event);
    }

    user.click(&mut session, &street, GeoPoint::new(47.4995, 19.0400));
    user.click(&mut session, &street, GeoPoint::new(47.4995, 19.0420));
    // Close enough to the street to snap onto it.
    user.click(&mut session, &street, GeoPoint::new(47.49852, 19.0420));
    // This corner would make the outline cross itself.
    user.click(&mut session, &street, GeoPoint::new(47.5000, 19.0410));
    user.click(&mut session, &street, GeoPoint::new(47.4985, 19.0400));

    println!("finish on the first corner");
    user.click(&mut session, &street, GeoPoint::new(47.4995, 19.0400));

    let anchor = session.finish_anchor();
    println!("state: {:?}, finish anchor: {anchor:?}", session.state());
}
