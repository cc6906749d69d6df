//! Interactive light-reflection diagrams for the browser.
//!
//! This crate is compiled to WebAssembly. Each diagram draws a mirror, an
//! incident ray ending in a draggable handle, and the reflected ray; some
//! variants add a paper occluder that blocks the reflected ray and an apple
//! that lights up the diagram when the ray reaches it. The host page only
//! provides container elements; this crate owns the SVG inside them and every
//! event listener it needs.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`geometry`] | Points, segments, angle reflection, segment intersection |
//! | [`layout`] | Container measurement, margins, fixed diagram points |
//! | [`variant`] | Diagram variants and their capabilities |
//! | [`controller`] | Browser-free [`controller::Diagram`] state machine |
//! | [`surface`] | Rendering-surface trait the controller draws through |
//! | [`svg`] | SVG DOM implementation of the surface |
//! | [`widget`] | DOM wiring: drag input, debounced resize, teardown |
//! | [`debounce`] | Ticket bookkeeping for trailing-edge debounce |
//! | [`config`] | Host-supplied JSON configuration |
//! | [`error`] | [`error::DiagramError`] |
//! | [`consts`] | Shared numeric constants (radii, margins, timings) |

pub mod config;
pub mod consts;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod surface;
pub mod svg;
pub mod variant;
pub mod widget;

pub use config::{PageConfig, WidgetConfig};
pub use controller::{Diagram, DiagramState, Hits};
pub use error::DiagramError;
pub use variant::{Capabilities, Variant};
pub use widget::Widget;
