//! Container measurement and the fixed points of a diagram.
//!
//! A relayout always starts from the container's measured size. Nothing here
//! depends on an earlier layout, so repeated resizes to the same size land on
//! the same geometry.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use crate::consts::{
    MARGIN_BOTTOM, MARGIN_LEFT, MARGIN_RIGHT, MARGIN_TOP, MIN_HEIGHT, NARROW_MARGIN_RIGHT, NARROW_WIDTH,
    OCCLUDER_HALF_LENGTH, SURFACE_ANGLE_DEG, SURFACE_HALF_LENGTH, TARGET_GUIDE_HEIGHT, TARGET_OFFSET_X,
    TARGET_RADIUS,
};
use crate::geometry::{Point, Segment, translate_point};
use crate::variant::Variant;

/// Outer size of the host container, as reported by `offsetWidth` / `offsetHeight`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

impl ContainerSize {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Space between the container edge and the drawing group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: MARGIN_TOP,
            right: MARGIN_RIGHT,
            bottom: MARGIN_BOTTOM,
            left: MARGIN_LEFT,
        }
    }
}

/// Size of the drawing area inside the margins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Derive the drawing area and margins from a container size.
    ///
    /// Narrow containers (drawing width under 500 with default margins) get a
    /// wider right margin; wide ones drop it. Height never falls below 200.
    #[must_use]
    pub fn measure(container: ContainerSize) -> (Self, Margins) {
        let defaults = Margins::default();
        let provisional = container.width - defaults.left - defaults.right;
        let right = if provisional < NARROW_WIDTH { NARROW_MARGIN_RIGHT } else { 0.0 };
        let margins = Margins { right, ..defaults };

        let dims = Self {
            width: container.width - margins.left - margins.right,
            height: (container.height - margins.top - margins.bottom).max(MIN_HEIGHT),
        };
        (dims, margins)
    }
}

/// Occluder geometry: the paper, the guide segment standing in for the target,
/// and where the target circle is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OccluderLayout {
    pub paper: Segment,
    pub target_guide: Segment,
    pub target_center: Point,
}

impl OccluderLayout {
    #[must_use]
    pub fn compute(dims: Dimensions) -> Self {
        let anchor = Point::new(dims.width / 3.0, 3.0 * dims.height / 4.0);
        let paper = Segment::new(
            translate_point(anchor, SURFACE_ANGLE_DEG, OCCLUDER_HALF_LENGTH),
            translate_point(anchor, SURFACE_ANGLE_DEG, -OCCLUDER_HALF_LENGTH),
        );
        let target_guide = Segment::new(
            Point::new(paper.start.x, paper.start.y - TARGET_GUIDE_HEIGHT),
            Point::new(paper.end.x, paper.start.y),
        );
        let target_center = translate_point(
            Point::new(anchor.x - TARGET_OFFSET_X, anchor.y + TARGET_RADIUS),
            SURFACE_ANGLE_DEG,
            TARGET_RADIUS,
        );
        Self { paper, target_guide, target_center }
    }
}

/// Fixed points recomputed on every relayout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub dims: Dimensions,
    pub margins: Margins,
    /// Pole for the handle's polar coordinates.
    pub center: Point,
    /// Where both rays meet the mirror.
    pub end: Point,
    pub surface: Segment,
    pub occluder: Option<OccluderLayout>,
}

impl Layout {
    #[must_use]
    pub fn compute(dims: Dimensions, margins: Margins, variant: Variant) -> Self {
        let center = Point::new(dims.width / 2.0, dims.height / 2.0);
        let end = Point::new(dims.width, dims.height / 2.0);
        let surface = Segment::new(
            translate_point(end, SURFACE_ANGLE_DEG, -SURFACE_HALF_LENGTH),
            translate_point(end, SURFACE_ANGLE_DEG, SURFACE_HALF_LENGTH),
        );
        let occluder = variant.capabilities().occluder.then(|| OccluderLayout::compute(dims));
        Self {
            dims,
            margins,
            center,
            end,
            surface,
            occluder,
        }
    }

    /// Measure `container` and lay out the diagram inside it.
    #[must_use]
    pub fn for_container(container: ContainerSize, variant: Variant) -> Self {
        let (dims, margins) = Dimensions::measure(container);
        Self::compute(dims, margins, variant)
    }
}
