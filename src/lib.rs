//! # optics-lessons
//!
//! WebAssembly entry point for the reflection lesson page. Installs the
//! console logger and panic hook, then mounts [`diagram`] widgets into the
//! page's containers. Each mounted widget is returned to JavaScript as a
//! [`MountedDiagram`], which owns it: freeing the handle tears the widget down.


use diagram::{DiagramError, PageConfig, Variant, Widget, WidgetConfig};
use wasm_bindgen::prelude::*;

/// Install logging and the panic hook. Runs once when the module loads.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    if console_log::init_with_level(level).is_err() {
        log::debug!("logger already installed");
    }
}

/// A diagram mounted on the page.
#[wasm_bindgen]
pub struct MountedDiagram {
    widget: Widget,
}

#[wasm_bindgen]
impl MountedDiagram {
    /// Id of the container the diagram lives in.
    #[wasm_bindgen(getter)]
    pub fn container(&self) -> String {
        self.widget.id().to_owned()
    }

    #[wasm_bindgen(getter)]
    pub fn variant(&self) -> String {
        self.widget.diagram().variant().to_string()
    }

    /// Current handle angle in degrees.
    #[wasm_bindgen(getter, js_name = startAngle)]
    pub fn start_angle(&self) -> f64 {
        self.widget.diagram().state().start_angle
    }

    #[wasm_bindgen(getter, js_name = reflectedAngle)]
    pub fn reflected_angle(&self) -> f64 {
        self.widget.diagram().state().reflected_angle
    }

    #[wasm_bindgen(getter)]
    pub fn distance(&self) -> f64 {
        self.widget.diagram().state().distance
    }

    /// Whether the reflected ray currently reaches the target.
    #[wasm_bindgen(getter, js_name = hitsTarget)]
    pub fn hits_target(&self) -> bool {
        self.widget.diagram().hits().target
    }

    /// Relayout for the container's current size.
    ///
    /// # Errors
    ///
    /// Rejects with the DOM failure message.
    pub fn redraw(&self) -> Result<(), JsValue> {
        Ok(self.widget.redraw()?)
    }

    /// Tear down and render again from scratch.
    ///
    /// # Errors
    ///
    /// Rejects with the DOM failure message.
    pub fn recreate(&mut self) -> Result<(), JsValue> {
        Ok(self.widget.create()?)
    }

    /// Remove the SVG and every listener. The handle stays valid but inert.
    pub fn destroy(&mut self) {
        self.widget.destroy();
    }
}

/// Mount one diagram into the element with id `container`.
///
/// # Errors
///
/// Rejects if the variant is unknown, the container is missing, or the first
/// render fails.
#[wasm_bindgen]
pub fn mount(container: &str, variant: &str) -> Result<MountedDiagram, JsValue> {
    let variant: Variant = variant.parse()?;
    let widget = Widget::mount(&WidgetConfig::new(container, variant))?;
    Ok(MountedDiagram { widget })
}

/// Mount every diagram described by `config_json`, or the default lesson page when omitted.
///
/// # Errors
///
/// Rejects on malformed configuration or the first diagram that fails to mount.
#[wasm_bindgen(js_name = mountPage)]
pub fn mount_page(config_json: Option<String>) -> Result<Vec<MountedDiagram>, JsValue> {
    let page = page_config(config_json.as_deref())?;
    let widgets = mount_all(&page, Widget::mount)?;
    Ok(widgets.into_iter().map(|widget| MountedDiagram { widget }).collect())
}

/// Parse the page configuration; blank or missing input means the default page.
fn page_config(json: Option<&str>) -> Result<PageConfig, DiagramError> {
    match json.map(str::trim) {
        None | Some("") => Ok(PageConfig::default()),
        Some(json) => PageConfig::from_json(json),
    }
}

/// Mount each widget in order, stopping at the first failure.
///
/// Widgets mounted before the failure are dropped, which tears them down.
fn mount_all<W>(
    page: &PageConfig,
    mut mount: impl FnMut(&WidgetConfig) -> Result<W, DiagramError>,
) -> Result<Vec<W>, DiagramError> {
    let mut mounted = Vec::with_capacity(page.widgets.len());
    for config in &page.widgets {
        match mount(config) {
            Ok(widget) => mounted.push(widget),
            Err(e) => {
                log::error!("failed to mount {} diagram in #{}: {e}", config.variant, config.container);
                return Err(e);
            }
        }
    }
    log::info!("mounted {} diagrams", mounted.len());
    Ok(mounted)
}
