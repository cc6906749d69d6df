//! The rendering-surface seam between the controller and the DOM.
//!
//! Primitives are retained: the controller creates each [`Shape`] once and
//! afterwards only rewrites its attributes. [`crate::svg::SvgSurface`] is the
//! browser implementation; tests drive the controller through a recording one.

use crate::error::DiagramError;
use crate::geometry::Point;
use crate::layout::{Dimensions, Margins};

/// Every primitive a diagram can own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// The reflecting surface.
    Mirror,
    /// Incident ray, from the handle to the mirror.
    IncidentRay,
    /// Reflected ray, from the mirror outward; carries the arrowhead.
    ReflectedRay,
    /// Draggable circle at the start of the incident ray.
    Handle,
    /// Paper segment that blocks the reflected ray.
    Occluder,
    /// Invisible segment the reflected ray must cross to reach the target.
    TargetGuide,
    /// The apple.
    Target,
}

impl Shape {
    /// CSS class applied on creation.
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Mirror => "surface-line",
            Self::IncidentRay => "start-angle",
            Self::ReflectedRay => "reflect-angle",
            Self::Handle => "start-handle",
            Self::Occluder => "paper",
            Self::TargetGuide => "intersect",
            Self::Target => "apple",
        }
    }
}

/// A vector canvas that accepts shape creation and attribute writes.
pub trait Surface {
    /// Add the arrowhead marker definition referenced by `marker-start`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the underlying canvas rejects the element.
    fn define_arrow_marker(&mut self, id: &str) -> Result<(), DiagramError>;

    /// Append a line primitive.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the underlying canvas rejects the element.
    fn create_line(&mut self, shape: Shape) -> Result<(), DiagramError>;

    /// Append a circle primitive.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the underlying canvas rejects the element.
    fn create_circle(&mut self, shape: Shape, radius: f64) -> Result<(), DiagramError>;

    /// Set a numeric attribute on a previously created shape.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the shape was never created or the write fails.
    fn set_number(&mut self, shape: Shape, name: &'static str, value: f64) -> Result<(), DiagramError>;

    /// Set a string attribute on a previously created shape.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the shape was never created or the write fails.
    fn set_text(&mut self, shape: Shape, name: &'static str, value: &str) -> Result<(), DiagramError>;

    /// Size the canvas for a drawing area and offset the drawing group by the margins.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the canvas cannot be resized.
    fn set_viewport(&mut self, dims: Dimensions, margins: Margins) -> Result<(), DiagramError>;

    /// Turn the host container's highlight on or off.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the container cannot be updated.
    fn set_highlight(&mut self, on: bool) -> Result<(), DiagramError>;

    /// Remove every primitive. Safe to call on an empty surface.
    fn clear(&mut self);

    /// Write the `x1`/`y1` end of a line.
    ///
    /// # Errors
    ///
    /// Propagates [`Surface::set_number`] failures.
    fn set_line_start(&mut self, shape: Shape, p: Point) -> Result<(), DiagramError> {
        self.set_number(shape, "x1", p.x)?;
        self.set_number(shape, "y1", p.y)
    }

    /// Write the `x2`/`y2` end of a line.
    ///
    /// # Errors
    ///
    /// Propagates [`Surface::set_number`] failures.
    fn set_line_end(&mut self, shape: Shape, p: Point) -> Result<(), DiagramError> {
        self.set_number(shape, "x2", p.x)?;
        self.set_number(shape, "y2", p.y)
    }

    /// Position a circle by translating it to `p`.
    ///
    /// # Errors
    ///
    /// Propagates [`Surface::set_text`] failures.
    fn set_translate(&mut self, shape: Shape, p: Point) -> Result<(), DiagramError> {
        self.set_text(shape, "transform", &format!("translate({},{})", p.x, p.y))
    }
}
