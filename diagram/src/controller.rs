//! The diagram controller: geometric state plus the surface writes that follow it.
//!
//! [`Diagram`] owns everything that doesn't depend on the browser, so it can be
//! driven in tests through any [`Surface`]. The widget layer measures the
//! container, forwards drag coordinates, and schedules resize settles; the
//! controller turns those into attribute writes.
//!
//! Lifecycle: `Uninitialized` until [`Diagram::create`], then `Rendered`.
//! A relayout stays in `Rendered` and reuses the primitives already on the
//! surface. [`Diagram::clear`] returns to `Uninitialized`.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use crate::config::WidgetConfig;
use crate::consts::{ARROW_MARKER_ID, HANDLE_RADIUS, SURFACE_ANGLE_DEG, TARGET_RADIUS};
use crate::debounce::{Debouncer, Ticket};
use crate::error::DiagramError;
use crate::geometry::{
    Point, Segment, clamp_point, line_angle, line_length, reflect_angle, segments_intersect, translate_point,
};
use crate::layout::{ContainerSize, Layout, OccluderLayout};
use crate::surface::{Shape, Surface};
use crate::variant::Variant;

/// Handle position in polar form around the layout center, plus what follows from it.
///
/// Only `start_angle` and `distance` are inputs. The rest is rewritten by
/// [`DiagramState::derive`] and never edited directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagramState {
    pub start_angle: f64,
    pub distance: f64,
    pub reflected_angle: f64,
    pub start_point: Point,
    pub reflected_point: Point,
}

impl DiagramState {
    /// `distance` is floored at the handle radius.
    #[must_use]
    pub fn new(start_angle: f64, distance: f64) -> Self {
        Self {
            start_angle,
            distance: distance.max(HANDLE_RADIUS),
            reflected_angle: reflect_angle(start_angle - 180.0, SURFACE_ANGLE_DEG),
            start_point: Point::default(),
            reflected_point: Point::default(),
        }
    }

    /// Recompute the reflected angle and both endpoints around `center`.
    pub fn derive(&mut self, center: Point) {
        // The incident angle points from the handle toward the mirror.
        self.reflected_angle = reflect_angle(self.start_angle - 180.0, SURFACE_ANGLE_DEG);
        self.start_point = translate_point(center, self.start_angle, self.distance);
        self.reflected_point = translate_point(center, self.reflected_angle, self.distance);
    }
}

/// What the reflected ray currently crosses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hits {
    pub occluder: bool,
    pub target: bool,
}

/// Test the reflected ray against the occluder and the target guide.
#[must_use]
pub fn detect_hits(reflected_ray: Segment, occluder: &OccluderLayout) -> Hits {
    Hits {
        occluder: segments_intersect(reflected_ray, occluder.paper),
        target: segments_intersect(reflected_ray, occluder.target_guide),
    }
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Uninitialized,
    Rendered { layout: Layout },
}

/// One diagram bound to one surface.
pub struct Diagram<S: Surface> {
    surface: S,
    variant: Variant,
    state: DiagramState,
    phase: Phase,
    hits: Hits,
    resize: Debouncer,
}

impl<S: Surface> Diagram<S> {
    /// A diagram with the variant's default handle position.
    #[must_use]
    pub fn new(surface: S, variant: Variant) -> Self {
        Self::with_state(
            surface,
            variant,
            DiagramState::new(variant.default_start_angle(), variant.default_distance()),
        )
    }

    /// A diagram whose handle starts where `config` says, falling back to the variant defaults.
    #[must_use]
    pub fn from_config(surface: S, config: &WidgetConfig) -> Self {
        Self::with_state(surface, config.variant, config.initial_state())
    }

    fn with_state(surface: S, variant: Variant, state: DiagramState) -> Self {
        Self {
            surface,
            variant,
            state,
            phase: Phase::Uninitialized,
            hits: Hits::default(),
            resize: Debouncer::new(),
        }
    }

    // --- Lifecycle ---

    /// Build the primitives and lay them out for `container`.
    ///
    /// Calling this on a rendered diagram tears the old primitives down first.
    ///
    /// # Errors
    ///
    /// Propagates any surface failure.
    pub fn create(&mut self, container: ContainerSize) -> Result<(), DiagramError> {
        if self.is_rendered() {
            self.clear();
        }
        self.initialize()?;
        let layout = Layout::for_container(container, self.variant);
        self.phase = Phase::Rendered { layout };
        log::debug!("created {} diagram at {}x{}", self.variant, layout.dims.width, layout.dims.height);
        self.apply_layout(&layout)
    }

    /// Recompute every fixed point for a new container size and redraw.
    ///
    /// Does nothing before [`Diagram::create`].
    ///
    /// # Errors
    ///
    /// Propagates any surface failure.
    pub fn relayout(&mut self, container: ContainerSize) -> Result<(), DiagramError> {
        let Phase::Rendered { layout } = &mut self.phase else {
            log::debug!("relayout skipped: {} diagram not rendered", self.variant);
            return Ok(());
        };
        *layout = Layout::for_container(container, self.variant);
        let layout = *layout;
        log::debug!("relayout {} diagram to {}x{}", self.variant, layout.dims.width, layout.dims.height);
        self.apply_layout(&layout)
    }

    /// Remove every primitive and return to `Uninitialized`.
    pub fn clear(&mut self) {
        self.surface.clear();
        self.phase = Phase::Uninitialized;
        self.hits = Hits::default();
        log::debug!("cleared {} diagram", self.variant);
    }

    // --- Resize debounce ---

    /// Note a resize event. The returned ticket is redeemed by [`Diagram::settle_resize`].
    pub fn request_resize(&mut self) -> Ticket {
        self.resize.trigger()
    }

    /// Relayout for `container` if `ticket` is the latest resize request.
    ///
    /// Returns whether a relayout ran.
    ///
    /// # Errors
    ///
    /// Propagates any surface failure from the relayout.
    pub fn settle_resize(&mut self, ticket: Ticket, container: ContainerSize) -> Result<bool, DiagramError> {
        if !self.resize.settle(ticket) {
            return Ok(false);
        }
        self.relayout(container)?;
        Ok(true)
    }

    // --- Input ---

    /// Move the handle toward `raw`, a pointer position in drawing-group coordinates.
    ///
    /// The position is rounded, clamped so the handle stays inside the drawing
    /// area, and converted to polar form around the center.
    ///
    /// # Errors
    ///
    /// Propagates any surface failure.
    pub fn on_drag(&mut self, raw: Point) -> Result<(), DiagramError> {
        let Phase::Rendered { layout } = self.phase else {
            return Ok(());
        };
        let p = clamp_point(
            raw.round(),
            Point::new(HANDLE_RADIUS, HANDLE_RADIUS),
            Point::new(layout.dims.width - HANDLE_RADIUS, layout.dims.height - HANDLE_RADIUS),
        );
        self.state.distance = line_length(layout.center, p).max(HANDLE_RADIUS);
        self.state.start_angle = line_angle(layout.center, p);
        self.update()
    }

    /// Re-derive the moving points from the current angle and distance and redraw them.
    ///
    /// # Errors
    ///
    /// Propagates any surface failure.
    pub fn update(&mut self) -> Result<(), DiagramError> {
        let Phase::Rendered { layout } = self.phase else {
            return Ok(());
        };
        self.state.derive(layout.center);
        let DiagramState { start_point, reflected_point, .. } = self.state;

        self.surface.set_line_start(Shape::IncidentRay, start_point)?;
        self.surface.set_translate(Shape::Handle, start_point)?;
        self.surface.set_line_start(Shape::ReflectedRay, reflected_point)?;

        if let Some(occluder) = layout.occluder {
            let hits = detect_hits(Segment::new(reflected_point, layout.end), &occluder);
            self.handle_intersections(hits, &occluder)?;
        }
        Ok(())
    }

    /// Block the reflected ray at the paper and toggle the target highlight.
    fn handle_intersections(&mut self, hits: Hits, occluder: &OccluderLayout) -> Result<(), DiagramError> {
        self.hits = hits;
        if hits.occluder {
            self.surface.set_number(Shape::ReflectedRay, "x1", occluder.paper.start.x)?;
        }
        if self.variant.capabilities().target_highlight {
            self.surface.set_highlight(hits.target)?;
        }
        Ok(())
    }

    // --- Queries ---

    #[must_use]
    pub fn state(&self) -> &DiagramState {
        &self.state
    }

    /// The current layout, if rendered.
    #[must_use]
    pub fn layout(&self) -> Option<&Layout> {
        match &self.phase {
            Phase::Rendered { layout } => Some(layout),
            Phase::Uninitialized => None,
        }
    }

    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    #[must_use]
    pub fn is_rendered(&self) -> bool {
        matches!(self.phase, Phase::Rendered { .. })
    }

    /// Result of the most recent intersection check. Always empty without an occluder.
    #[must_use]
    pub fn hits(&self) -> Hits {
        self.hits
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    // --- Internals ---

    /// Create the primitives in paint order. Runs once per `create`.
    fn initialize(&mut self) -> Result<(), DiagramError> {
        let surface = &mut self.surface;
        surface.define_arrow_marker(ARROW_MARKER_ID)?;
        surface.create_line(Shape::Mirror)?;
        surface.create_line(Shape::IncidentRay)?;
        surface.create_circle(Shape::Handle, HANDLE_RADIUS)?;
        // Touch drags would otherwise start a browser pan and cancel the pointer.
        surface.set_text(Shape::Handle, "style", "touch-action: none")?;
        if self.variant.capabilities().occluder {
            surface.create_line(Shape::Occluder)?;
            surface.create_line(Shape::TargetGuide)?;
            surface.create_circle(Shape::Target, TARGET_RADIUS)?;
        }
        surface.create_line(Shape::ReflectedRay)?;
        surface.set_text(Shape::ReflectedRay, "marker-start", &format!("url(#{ARROW_MARKER_ID})"))
    }

    /// Write every layout-dependent attribute, then the moving points.
    fn apply_layout(&mut self, layout: &Layout) -> Result<(), DiagramError> {
        let surface = &mut self.surface;
        surface.set_viewport(layout.dims, layout.margins)?;
        surface.set_line_start(Shape::Mirror, layout.surface.start)?;
        surface.set_line_end(Shape::Mirror, layout.surface.end)?;
        surface.set_line_end(Shape::IncidentRay, layout.end)?;
        surface.set_line_end(Shape::ReflectedRay, layout.end)?;

        if let Some(occluder) = &layout.occluder {
            surface.set_line_start(Shape::Occluder, occluder.paper.start)?;
            surface.set_line_end(Shape::Occluder, occluder.paper.end)?;
            surface.set_line_start(Shape::TargetGuide, occluder.target_guide.start)?;
            surface.set_line_end(Shape::TargetGuide, occluder.target_guide.end)?;
            surface.set_translate(Shape::Target, occluder.target_center)?;
        }

        self.update()
    }
}
