#![allow(clippy::float_cmp)]

use std::collections::HashMap;

use super::*;
use crate::layout::{Dimensions, Margins};

// =============================================================
// Helpers
// =============================================================

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

/// In-memory surface that records every write.
#[derive(Default)]
struct Recorder {
    created: Vec<Shape>,
    markers: Vec<String>,
    numbers: HashMap<(Shape, &'static str), f64>,
    texts: HashMap<(Shape, &'static str), String>,
    viewport: Option<(Dimensions, Margins)>,
    viewport_writes: usize,
    highlight: Option<bool>,
    clears: usize,
}

impl Recorder {
    fn ensure(&self, shape: Shape) -> Result<(), DiagramError> {
        if self.created.contains(&shape) {
            Ok(())
        } else {
            Err(DiagramError::Dom(format!("{shape:?} was never created")))
        }
    }

    fn number(&self, shape: Shape, name: &'static str) -> Option<f64> {
        self.numbers.get(&(shape, name)).copied()
    }

    fn text(&self, shape: Shape, name: &'static str) -> Option<&str> {
        self.texts.get(&(shape, name)).map(String::as_str)
    }

    fn line_start(&self, shape: Shape) -> Option<Point> {
        Some(Point::new(self.number(shape, "x1")?, self.number(shape, "y1")?))
    }

    fn line_end(&self, shape: Shape) -> Option<Point> {
        Some(Point::new(self.number(shape, "x2")?, self.number(shape, "y2")?))
    }
}

impl Surface for Recorder {
    fn define_arrow_marker(&mut self, id: &str) -> Result<(), DiagramError> {
        self.markers.push(id.to_owned());
        Ok(())
    }

    fn create_line(&mut self, shape: Shape) -> Result<(), DiagramError> {
        self.created.push(shape);
        Ok(())
    }

    fn create_circle(&mut self, shape: Shape, radius: f64) -> Result<(), DiagramError> {
        self.created.push(shape);
        self.numbers.insert((shape, "r"), radius);
        Ok(())
    }

    fn set_number(&mut self, shape: Shape, name: &'static str, value: f64) -> Result<(), DiagramError> {
        self.ensure(shape)?;
        self.numbers.insert((shape, name), value);
        Ok(())
    }

    fn set_text(&mut self, shape: Shape, name: &'static str, value: &str) -> Result<(), DiagramError> {
        self.ensure(shape)?;
        self.texts.insert((shape, name), value.to_owned());
        Ok(())
    }

    fn set_viewport(&mut self, dims: Dimensions, margins: Margins) -> Result<(), DiagramError> {
        self.viewport = Some((dims, margins));
        self.viewport_writes += 1;
        Ok(())
    }

    fn set_highlight(&mut self, on: bool) -> Result<(), DiagramError> {
        self.highlight = Some(on);
        Ok(())
    }

    fn clear(&mut self) {
        self.created.clear();
        self.markers.clear();
        self.numbers.clear();
        self.texts.clear();
        self.clears += 1;
    }
}

/// A container whose drawing area measures exactly 800x400.
fn container_800x400() -> ContainerSize {
    ContainerSize::new(820.0, 500.0)
}

fn rendered(variant: Variant) -> Diagram<Recorder> {
    let mut d = Diagram::new(Recorder::default(), variant);
    d.create(container_800x400()).unwrap();
    d
}

// =============================================================
// DiagramState
// =============================================================

#[test]
fn state_floors_distance_at_handle_radius() {
    assert_eq!(DiagramState::new(0.0, 3.0).distance, HANDLE_RADIUS);
    assert_eq!(DiagramState::new(0.0, 50.0).distance, 50.0);
}

#[test]
fn state_reflected_angle_mirrors_about_surface() {
    // reflect(-121 - 180, -90) = -180 + 301 = 121
    assert!(approx_eq(DiagramState::new(-121.0, 144.0).reflected_angle, 121.0));
}

#[test]
fn derive_places_points_around_center() {
    let mut s = DiagramState::new(-121.0, 144.0);
    let center = Point::new(400.0, 200.0);
    s.derive(center);
    assert!(point_approx_eq(s.start_point, translate_point(center, -121.0, 144.0)));
    assert!(point_approx_eq(s.reflected_point, translate_point(center, s.reflected_angle, 144.0)));
}

#[test]
fn reflected_point_mirrors_start_across_center_line() {
    let mut s = DiagramState::new(235.0, 200.0);
    s.derive(Point::new(400.0, 200.0));
    assert!(approx_eq(s.reflected_point.x, s.start_point.x));
    assert!(approx_eq(s.reflected_point.y, 400.0 - s.start_point.y));
}

// =============================================================
// Lifecycle
// =============================================================

#[test]
fn new_diagram_is_uninitialized() {
    let d = Diagram::new(Recorder::default(), Variant::Apple);
    assert!(!d.is_rendered());
    assert!(d.layout().is_none());
    assert_eq!(d.variant(), Variant::Apple);
    assert!(d.surface().created.is_empty());
}

#[test]
fn create_builds_plain_primitives() {
    let d = rendered(Variant::Reflection);
    assert!(d.is_rendered());
    let s = d.surface();
    assert_eq!(s.markers, vec!["arrow".to_owned()]);
    assert_eq!(s.created, vec![Shape::Mirror, Shape::IncidentRay, Shape::Handle, Shape::ReflectedRay]);
    assert_eq!(s.number(Shape::Handle, "r"), Some(10.0));
    assert_eq!(s.text(Shape::Handle, "style"), Some("touch-action: none"));
    assert_eq!(s.text(Shape::ReflectedRay, "marker-start"), Some("url(#arrow)"));
}

#[test]
fn create_builds_occluder_primitives() {
    let d = rendered(Variant::Apple);
    let s = d.surface();
    for shape in [Shape::Occluder, Shape::TargetGuide, Shape::Target] {
        assert!(s.created.contains(&shape), "{shape:?} missing");
    }
    assert_eq!(s.number(Shape::Target, "r"), Some(20.0));
    assert_eq!(s.created.last(), Some(&Shape::ReflectedRay));
}

#[test]
fn create_writes_static_layout() {
    let d = rendered(Variant::Reflection);
    let s = d.surface();
    assert_eq!(s.viewport, Some((Dimensions::new(800.0, 400.0), Margins { right: 0.0, ..Margins::default() })));
    assert!(point_approx_eq(s.line_start(Shape::Mirror).unwrap(), Point::new(800.0, 320.0)));
    assert!(point_approx_eq(s.line_end(Shape::Mirror).unwrap(), Point::new(800.0, 80.0)));
    assert_eq!(s.line_end(Shape::IncidentRay), Some(Point::new(800.0, 200.0)));
    assert_eq!(s.line_end(Shape::ReflectedRay), Some(Point::new(800.0, 200.0)));
}

#[test]
fn create_twice_clears_first() {
    let mut d = rendered(Variant::Apple);
    let first = d.surface().created.clone();
    d.create(container_800x400()).unwrap();
    assert_eq!(d.surface().clears, 1);
    assert_eq!(d.surface().created, first);
    assert_eq!(d.surface().markers.len(), 1);
}

#[test]
fn create_on_fresh_diagram_does_not_clear() {
    let d = rendered(Variant::Reflection);
    assert_eq!(d.surface().clears, 0);
}

#[test]
fn clear_returns_to_uninitialized() {
    let mut d = rendered(Variant::Apple);
    d.clear();
    assert!(!d.is_rendered());
    assert!(d.surface().created.is_empty());
    assert_eq!(d.hits(), Hits::default());
}

#[test]
fn operations_after_clear_are_noops() {
    let mut d = rendered(Variant::Apple);
    d.clear();
    let writes = d.surface().viewport_writes;
    d.relayout(ContainerSize::new(1000.0, 600.0)).unwrap();
    d.on_drag(Point::new(100.0, 100.0)).unwrap();
    d.update().unwrap();
    assert_eq!(d.surface().viewport_writes, writes);
    assert!(d.surface().numbers.is_empty());
}

#[test]
fn from_config_uses_overrides() {
    let config = WidgetConfig {
        start_angle: Some(180.0),
        distance: Some(100.0),
        ..WidgetConfig::new("part-1", Variant::Reflection)
    };
    let mut d = Diagram::from_config(Recorder::default(), &config);
    d.create(container_800x400()).unwrap();
    assert!(point_approx_eq(d.state().start_point, Point::new(300.0, 200.0)));
}

// =============================================================
// update
// =============================================================

#[test]
fn end_to_end_default_apple_geometry() {
    let d = rendered(Variant::Apple);
    let center = Point::new(400.0, 200.0);
    assert_eq!(d.layout().unwrap().center, center);

    let state = d.state();
    assert_eq!(state.start_angle, -121.0);
    assert_eq!(state.distance, 144.0);
    let expected_start = translate_point(center, -121.0, 144.0);
    let expected_reflected = translate_point(center, state.reflected_angle, 144.0);
    assert!(point_approx_eq(state.start_point, expected_start));
    assert!(point_approx_eq(state.reflected_point, expected_reflected));

    let s = d.surface();
    assert!(point_approx_eq(s.line_start(Shape::IncidentRay).unwrap(), expected_start));
    assert!(point_approx_eq(s.line_start(Shape::ReflectedRay).unwrap(), expected_reflected));
    assert_eq!(
        s.text(Shape::Handle, "transform"),
        Some(format!("translate({},{})", expected_start.x, expected_start.y).as_str())
    );
}

#[test]
fn plain_variant_never_touches_highlight() {
    let mut d = rendered(Variant::Reflection);
    d.on_drag(Point::new(100.0, 100.0)).unwrap();
    assert_eq!(d.surface().highlight, None);
    assert_eq!(d.hits(), Hits::default());
}

// =============================================================
// on_drag
// =============================================================

#[test]
fn drag_inside_moves_handle_to_pointer() {
    let mut d = rendered(Variant::Reflection);
    d.on_drag(Point::new(250.0, 60.0)).unwrap();
    assert!(point_approx_eq(d.state().start_point, Point::new(250.0, 60.0)));
    assert!(approx_eq(d.state().distance, line_length(Point::new(400.0, 200.0), Point::new(250.0, 60.0))));
}

#[test]
fn drag_rounds_pointer() {
    let mut d = rendered(Variant::Reflection);
    d.on_drag(Point::new(250.4, 59.6)).unwrap();
    assert!(point_approx_eq(d.state().start_point, Point::new(250.0, 60.0)));
}

#[test]
fn drag_to_right_edge_clamps_x() {
    let mut d = rendered(Variant::Reflection);
    d.on_drag(Point::new(800.0, 50.0)).unwrap();
    assert!(point_approx_eq(d.state().start_point, Point::new(790.0, 50.0)));
}

#[test]
fn drag_outside_clamps_to_nearest_boundary() {
    let mut d = rendered(Variant::Reflection);
    for (raw, expected) in [
        (Point::new(-30.0, 999.0), Point::new(10.0, 390.0)),
        (Point::new(5000.0, -5000.0), Point::new(790.0, 10.0)),
        (Point::new(0.0, 200.0), Point::new(10.0, 200.0)),
    ] {
        d.on_drag(raw).unwrap();
        assert!(
            point_approx_eq(d.state().start_point, expected),
            "{raw:?} -> {:?}, expected {expected:?}",
            d.state().start_point
        );
    }
}

#[test]
fn drag_in_collapsed_container_clamps_to_lower_bound() {
    let mut d = Diagram::new(Recorder::default(), Variant::Reflection);
    d.create(ContainerSize::new(0.0, 0.0)).unwrap();
    d.on_drag(Point::new(5.0, 5.0)).unwrap();
    assert!(point_approx_eq(d.state().start_point, Point::new(10.0, 10.0)));
}

#[test]
fn drag_onto_center_keeps_state_finite() {
    let mut d = rendered(Variant::Apple);
    d.on_drag(Point::new(400.0, 200.0)).unwrap();
    let s = d.state();
    assert_eq!(s.distance, HANDLE_RADIUS);
    assert_eq!(s.start_angle, 0.0);
    assert!(s.start_point.x.is_finite() && s.start_point.y.is_finite());
    assert!(s.reflected_point.x.is_finite() && s.reflected_point.y.is_finite());
}

// =============================================================
// Intersections
// =============================================================

#[test]
fn default_apple_ray_is_clear() {
    let d = rendered(Variant::Apple);
    assert_eq!(d.hits(), Hits { occluder: false, target: false });
    assert_eq!(d.surface().highlight, Some(false));
}

#[test]
fn ray_into_paper_is_blocked_at_paper_x() {
    let mut d = rendered(Variant::Apple);
    // Reflected point lands at (100, 320); the ray crosses the paper near y = 291.
    d.on_drag(Point::new(100.0, 80.0)).unwrap();
    assert!(d.hits().occluder);
    assert!(!d.hits().target);
    let paper_x = 800.0 / 3.0;
    assert!(approx_eq(d.surface().number(Shape::ReflectedRay, "x1").unwrap(), paper_x));
    assert!(approx_eq(d.surface().number(Shape::ReflectedRay, "y1").unwrap(), d.state().reflected_point.y));
}

#[test]
fn ray_into_target_highlights_container() {
    let mut d = rendered(Variant::Apple);
    // Reflected point lands at (100, 300); the ray crosses the guide near y = 276.
    d.on_drag(Point::new(100.0, 100.0)).unwrap();
    assert!(d.hits().target);
    assert!(!d.hits().occluder);
    assert_eq!(d.surface().highlight, Some(true));

    d.on_drag(Point::new(250.0, 60.0)).unwrap();
    assert_eq!(d.surface().highlight, Some(false));
}

#[test]
fn covered_variant_blocks_but_never_highlights() {
    let mut d = rendered(Variant::AppleCovered);
    d.on_drag(Point::new(100.0, 100.0)).unwrap();
    assert!(d.hits().target);
    assert_eq!(d.surface().highlight, None);

    d.on_drag(Point::new(100.0, 80.0)).unwrap();
    assert!(d.hits().occluder);
    assert!(approx_eq(d.surface().number(Shape::ReflectedRay, "x1").unwrap(), 800.0 / 3.0));
}

#[test]
fn hits_depend_only_on_current_geometry() {
    let mut d = rendered(Variant::Apple);
    d.on_drag(Point::new(100.0, 100.0)).unwrap();
    let first = d.hits();
    d.on_drag(Point::new(100.0, 80.0)).unwrap();
    d.on_drag(Point::new(700.0, 300.0)).unwrap();
    d.on_drag(Point::new(100.0, 100.0)).unwrap();
    assert_eq!(d.hits(), first);
}

#[test]
fn detect_hits_is_pure() {
    let occ = OccluderLayout::compute(Dimensions::new(800.0, 400.0));
    let ray = Segment::new(Point::new(100.0, 320.0), Point::new(800.0, 200.0));
    let a = detect_hits(ray, &occ);
    let b = detect_hits(ray, &occ);
    assert_eq!(a, b);
    assert!(a.occluder);
}

// =============================================================
// Resize
// =============================================================

#[test]
fn relayout_recomputes_fixed_points() {
    let mut d = rendered(Variant::Apple);
    d.relayout(ContainerSize::new(420.0, 300.0)).unwrap();
    let layout = *d.layout().unwrap();
    assert_eq!(layout.dims, Dimensions::new(350.0, 200.0));
    assert_eq!(layout.margins.right, 50.0);
    assert_eq!(layout.center, Point::new(175.0, 100.0));
    assert_eq!(d.surface().line_end(Shape::IncidentRay), Some(Point::new(350.0, 100.0)));
    assert!(approx_eq(d.surface().number(Shape::Occluder, "x1").unwrap(), 350.0 / 3.0));
}

#[test]
fn relayout_keeps_polar_handle_state() {
    let mut d = rendered(Variant::Reflection);
    d.on_drag(Point::new(250.0, 60.0)).unwrap();
    let before = *d.state();
    d.relayout(ContainerSize::new(1020.0, 700.0)).unwrap();
    assert!(approx_eq(d.state().start_angle, before.start_angle));
    assert!(approx_eq(d.state().distance, before.distance));
    let center = d.layout().unwrap().center;
    assert!(point_approx_eq(d.state().start_point, translate_point(center, before.start_angle, before.distance)));
}

#[test]
fn relayout_reuses_primitives() {
    let mut d = rendered(Variant::Apple);
    let created = d.surface().created.len();
    d.relayout(ContainerSize::new(1000.0, 600.0)).unwrap();
    assert_eq!(d.surface().created.len(), created);
    assert_eq!(d.surface().clears, 0);
}

#[test]
fn resize_burst_settles_into_one_relayout() {
    let mut d = rendered(Variant::Reflection);
    let writes = d.surface().viewport_writes;

    // Two resize events 40ms apart; each scheduled its own timer.
    let first = d.request_resize();
    let second = d.request_resize();

    // Both timers fire, each measuring the container as it is at that moment.
    let now = ContainerSize::new(620.0, 450.0);
    assert!(!d.settle_resize(first, now).unwrap());
    assert!(d.settle_resize(second, now).unwrap());

    assert_eq!(d.surface().viewport_writes, writes + 1);
    assert_eq!(d.layout().unwrap().dims, Dimensions::new(600.0, 350.0));
}

#[test]
fn settled_ticket_does_not_fire_twice() {
    let mut d = rendered(Variant::Reflection);
    let t = d.request_resize();
    assert!(d.settle_resize(t, container_800x400()).unwrap());
    assert!(!d.settle_resize(t, container_800x400()).unwrap());
}
