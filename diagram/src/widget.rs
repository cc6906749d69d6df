//! The browser widget. Wraps a [`Diagram`] and owns its DOM wiring.
//!
//! The controller is shared between event closures through `Rc<RefCell<_>>`.
//! Every listener this widget registers is kept in the widget itself and
//! removed exactly once, on [`Widget::destroy`] or drop; nothing is stored on
//! `window`.

use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, EventTarget, HtmlElement, PointerEvent, Window};

use crate::config::WidgetConfig;
use crate::consts::RESIZE_SETTLE_MS;
use crate::controller::Diagram;
use crate::error::DiagramError;
use crate::geometry::Point;
use crate::layout::ContainerSize;
use crate::surface::Shape;
use crate::svg::SvgSurface;

type SharedDiagram = Rc<RefCell<Diagram<SvgSurface>>>;

/// An event listener that unregisters itself when dropped.
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(target: &EventTarget, event: &'static str, callback: Closure<dyn FnMut(Event)>) -> Result<Self, DiagramError> {
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref())
        {
            log::warn!("failed to remove {} listener: {:?}", self.event, e);
        }
    }
}

/// A mounted diagram.
pub struct Widget {
    id: String,
    window: Window,
    container: HtmlElement,
    diagram: SharedDiagram,
    listeners: Vec<Listener>,
    pending_resize: Rc<RefCell<Option<Timeout>>>,
}

impl Widget {
    /// Mount a diagram into the element whose id is `config.container`.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::ContainerNotFound`] if the element doesn't
    /// exist, or any DOM failure from the first render.
    pub fn mount(config: &WidgetConfig) -> Result<Self, DiagramError> {
        let window = web_sys::window().ok_or(DiagramError::NoWindow)?;
        let document = window.document().ok_or(DiagramError::NoDocument)?;
        let container = document
            .get_element_by_id(&config.container)
            .ok_or_else(|| DiagramError::ContainerNotFound(config.container.clone()))?
            .dyn_into::<HtmlElement>()
            .map_err(|el| DiagramError::Dom(format!("#{} is not an html element: {}", config.container, el.tag_name())))?;

        let surface = SvgSurface::new(document, container.clone());
        let mut widget = Self {
            id: config.container.clone(),
            window,
            container,
            diagram: Rc::new(RefCell::new(Diagram::from_config(surface, config))),
            listeners: Vec::new(),
            pending_resize: Rc::new(RefCell::new(None)),
        };
        widget.create()?;
        log::info!("mounted {} diagram in #{}", config.variant, widget.id);
        Ok(widget)
    }

    /// Render from scratch and (re)subscribe to input and resize events.
    ///
    /// Safe to call again: previous primitives and listeners are torn down first.
    ///
    /// # Errors
    ///
    /// Propagates any DOM failure.
    pub fn create(&mut self) -> Result<(), DiagramError> {
        self.detach();
        pin_height(&self.container)?;
        self.diagram.borrow_mut().create(measure(&self.container))?;
        self.attach_drag()?;
        self.attach_resize()
    }

    /// Relayout immediately for the container's current size.
    ///
    /// # Errors
    ///
    /// Propagates any DOM failure.
    pub fn redraw(&self) -> Result<(), DiagramError> {
        self.diagram.borrow_mut().relayout(measure(&self.container))
    }

    /// Remove the SVG, every listener, and any pending resize.
    pub fn destroy(&mut self) {
        self.detach();
        self.diagram.borrow_mut().clear();
        log::debug!("destroyed diagram in #{}", self.id);
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Read access to the controller.
    #[must_use]
    pub fn diagram(&self) -> Ref<'_, Diagram<SvgSurface>> {
        self.diagram.borrow()
    }

    fn detach(&mut self) {
        self.listeners.clear();
        // Dropping the timeout cancels it.
        *self.pending_resize.borrow_mut() = None;
    }

    /// Pointer-capture drag on the handle: down starts, move feeds `on_drag`, up/cancel ends.
    fn attach_drag(&mut self) -> Result<(), DiagramError> {
        let handle = self
            .diagram
            .borrow()
            .surface()
            .element(Shape::Handle)
            .cloned()
            .ok_or_else(|| DiagramError::Dom("drag handle missing".to_owned()))?;
        let active: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

        let down = {
            let handle = handle.clone();
            let active = Rc::clone(&active);
            Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                let Some(event) = event.dyn_ref::<PointerEvent>() else {
                    return;
                };
                event.prevent_default();
                if let Err(e) = handle.set_pointer_capture(event.pointer_id()) {
                    log::warn!("pointer capture failed: {:?}", e);
                }
                active.set(Some(event.pointer_id()));
            })
        };

        let moved = {
            let diagram = Rc::clone(&self.diagram);
            let active = Rc::clone(&active);
            Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                let Some(event) = event.dyn_ref::<PointerEvent>() else {
                    return;
                };
                if active.get() != Some(event.pointer_id()) {
                    return;
                }
                let client = Point::new(f64::from(event.client_x()), f64::from(event.client_y()));
                let Some(p) = to_diagram_space(&diagram.borrow(), client) else {
                    return;
                };
                if let Err(e) = diagram.borrow_mut().on_drag(p) {
                    log::warn!("drag update failed: {e}");
                }
            })
        };

        let released = {
            let handle = handle.clone();
            let active = Rc::clone(&active);
            Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                let Some(event) = event.dyn_ref::<PointerEvent>() else {
                    return;
                };
                if active.take() == Some(event.pointer_id()) {
                    if let Err(e) = handle.release_pointer_capture(event.pointer_id()) {
                        log::debug!("pointer release failed: {:?}", e);
                    }
                }
            })
        };

        let target: &EventTarget = handle.as_ref();
        self.listeners.push(Listener::attach(target, "pointerdown", down)?);
        self.listeners.push(Listener::attach(target, "pointermove", moved)?);
        self.listeners.push(Listener::attach(target, "pointerup", released)?);
        let cancelled = {
            let active = Rc::clone(&active);
            Closure::<dyn FnMut(Event)>::new(move |_: Event| active.set(None))
        };
        self.listeners.push(Listener::attach(target, "pointercancel", cancelled)?);
        Ok(())
    }

    /// Debounced relayout on window resize. Only the last event in a burst settles.
    fn attach_resize(&mut self) -> Result<(), DiagramError> {
        let diagram = Rc::clone(&self.diagram);
        let container = self.container.clone();
        let pending = Rc::clone(&self.pending_resize);
        let id = self.id.clone();

        let on_resize = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            let ticket = diagram.borrow_mut().request_resize();
            let diagram = Rc::clone(&diagram);
            let container = container.clone();
            let id = id.clone();
            let timeout = Timeout::new(RESIZE_SETTLE_MS, move || {
                match diagram.borrow_mut().settle_resize(ticket, measure(&container)) {
                    Ok(true) => log::debug!("resized diagram in #{id}"),
                    Ok(false) => {}
                    Err(e) => log::warn!("resize of #{id} failed: {e}"),
                }
            });
            // Replacing the previous timeout cancels it.
            *pending.borrow_mut() = Some(timeout);
        });

        let target: &EventTarget = self.window.as_ref();
        self.listeners.push(Listener::attach(target, "resize", on_resize)?);
        Ok(())
    }
}

impl Drop for Widget {
    fn drop(&mut self) {
        self.destroy();
    }
}

fn measure(container: &HtmlElement) -> ContainerSize {
    ContainerSize::new(f64::from(container.offset_width()), f64::from(container.offset_height()))
}

/// Fix the container's height so the SVG can't grow it on relayout.
fn pin_height(container: &HtmlElement) -> Result<(), DiagramError> {
    let height = container.offset_height();
    container.style().set_property("height", &format!("{height}px"))?;
    Ok(())
}

/// Convert a client-space pointer position into drawing-group coordinates.
fn to_diagram_space(diagram: &Diagram<SvgSurface>, client: Point) -> Option<Point> {
    let margins = diagram.layout()?.margins;
    let rect = diagram.surface().root()?.get_bounding_client_rect();
    Some(Point::new(client.x - rect.left() - margins.left, client.y - rect.top() - margins.top))
}
