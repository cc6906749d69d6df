//! SVG rendering: the [`Surface`] implementation backed by the DOM.
//!
//! This module is the only place that creates SVG elements. It owns the
//! `<svg>` root and its translated `<g>` inside the host container, and keeps
//! one element per [`Shape`] so later writes are attribute updates only.
//!
//! All fallible DOM calls propagate as [`DiagramError::Dom`].

use std::collections::HashMap;

use web_sys::{Document, Element, HtmlElement};

use crate::consts::{ARROW_FILL, HIGHLIGHT_CLASS, MARKER_BOX};
use crate::error::DiagramError;
use crate::layout::{Dimensions, Margins};
use crate::surface::{Shape, Surface};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Three-point arrowhead, pointing along +x inside the marker box.
const ARROW_PATH: &str = "M0,0L0,5L5,2.5Z";

pub struct SvgSurface {
    document: Document,
    container: HtmlElement,
    root: Option<Element>,
    group: Option<Element>,
    shapes: HashMap<Shape, Element>,
}

impl SvgSurface {
    #[must_use]
    pub fn new(document: Document, container: HtmlElement) -> Self {
        Self {
            document,
            container,
            root: None,
            group: None,
            shapes: HashMap::new(),
        }
    }

    /// The element created for `shape`, if any. Used to attach input listeners.
    #[must_use]
    pub fn element(&self, shape: Shape) -> Option<&Element> {
        self.shapes.get(&shape)
    }

    /// The `<svg>` root, once created.
    #[must_use]
    pub fn root(&self) -> Option<&Element> {
        self.root.as_ref()
    }

    fn create(&self, tag: &str) -> Result<Element, DiagramError> {
        Ok(self.document.create_element_ns(Some(SVG_NS), tag)?)
    }

    /// The drawing group, creating the `<svg>` root on first use.
    fn group(&mut self) -> Result<Element, DiagramError> {
        if let Some(g) = &self.group {
            return Ok(g.clone());
        }
        let root = self.create("svg")?;
        let g = self.create("g")?;
        root.append_child(&g)?;
        self.container.append_child(&root)?;
        self.root = Some(root);
        self.group = Some(g.clone());
        Ok(g)
    }

    fn append_shape(&mut self, shape: Shape, tag: &str) -> Result<Element, DiagramError> {
        let el = self.create(tag)?;
        el.set_attribute("class", shape.class())?;
        self.group()?.append_child(&el)?;
        self.shapes.insert(shape, el.clone());
        Ok(el)
    }

    fn shape(&self, shape: Shape) -> Result<&Element, DiagramError> {
        self.shapes
            .get(&shape)
            .ok_or_else(|| DiagramError::Dom(format!("{} element missing", shape.class())))
    }
}

impl Surface for SvgSurface {
    fn define_arrow_marker(&mut self, id: &str) -> Result<(), DiagramError> {
        let half = MARKER_BOX / 2.0;
        let defs = self.create("defs")?;
        let marker = self.create("marker")?;
        marker.set_attribute("id", id)?;
        marker.set_attribute("viewBox", &format!("0 0 {MARKER_BOX} {MARKER_BOX}"))?;
        marker.set_attribute("refX", &half.to_string())?;
        marker.set_attribute("refY", &half.to_string())?;
        marker.set_attribute("markerWidth", &MARKER_BOX.to_string())?;
        marker.set_attribute("markerHeight", &MARKER_BOX.to_string())?;
        marker.set_attribute("orient", "auto-start-reverse")?;

        let path = self.create("path")?;
        path.set_attribute("d", ARROW_PATH)?;
        path.set_attribute("fill", ARROW_FILL)?;

        marker.append_child(&path)?;
        defs.append_child(&marker)?;
        self.group()?.append_child(&defs)?;
        Ok(())
    }

    fn create_line(&mut self, shape: Shape) -> Result<(), DiagramError> {
        self.append_shape(shape, "line")?;
        Ok(())
    }

    fn create_circle(&mut self, shape: Shape, radius: f64) -> Result<(), DiagramError> {
        let el = self.append_shape(shape, "circle")?;
        el.set_attribute("r", &radius.to_string())?;
        Ok(())
    }

    fn set_number(&mut self, shape: Shape, name: &'static str, value: f64) -> Result<(), DiagramError> {
        self.shape(shape)?.set_attribute(name, &value.to_string())?;
        Ok(())
    }

    fn set_text(&mut self, shape: Shape, name: &'static str, value: &str) -> Result<(), DiagramError> {
        self.shape(shape)?.set_attribute(name, value)?;
        Ok(())
    }

    fn set_viewport(&mut self, dims: Dimensions, margins: Margins) -> Result<(), DiagramError> {
        let g = self.group()?;
        let outer_width = dims.width + margins.left + margins.right;
        let outer_height = dims.height + margins.top + margins.bottom;
        if let Some(root) = &self.root {
            root.set_attribute("width", &outer_width.to_string())?;
            root.set_attribute("height", &outer_height.to_string())?;
        }
        g.set_attribute("transform", &format!("translate({},{})", margins.left, margins.top))?;
        Ok(())
    }

    fn set_highlight(&mut self, on: bool) -> Result<(), DiagramError> {
        self.container.class_list().toggle_with_force(HIGHLIGHT_CLASS, on)?;
        Ok(())
    }

    fn clear(&mut self) {
        self.shapes.clear();
        self.group = None;
        if let Some(root) = self.root.take() {
            root.remove();
        }
        if let Err(e) = self.container.class_list().remove_1(HIGHLIGHT_CLASS) {
            log::warn!("failed to reset highlight: {:?}", e);
        }
    }
}
