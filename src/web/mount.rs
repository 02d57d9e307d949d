//! JavaScript-facing widget handle.
//!
//! ```js
//! const bar = new CustomScrollbar("panel", JSON.stringify({ autohide: 800 }));
//! bar.setOptions(JSON.stringify({ height: "300px" }));
//! bar.unmount();
//! ```
//!
//! Mounting wraps the container's current children in the widget markup;
//! unmounting puts them back. The first mount in a document also adds a
//! `<style>` element with the layout rules from [`base_stylesheet`]. The
//! container must have a definite height for the panel to scroll.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use scrollsync_ui::{
    DomEvent, EventHandler, EventKind, ListenerId, Platform, STYLESHEET_ID, ScrollSync,
    ScrollbarOptions, Target, ViewNode, base_stylesheet, init_scrollbar_width,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, Node};
use web_time::Instant;

use super::error::WebError;
use super::platform::WebPlatform;
use super::probe::DomProbe;
use super::render::{self, Rendered};
use crate::AppConfig;

struct Mounted {
    document: Document,
    container: HtmlElement,
    /// Container children moved into the widget's content slot
    content: Vec<Node>,
    platform: Rc<WebPlatform>,
    widget: ScrollSync<WebPlatform>,
    rendered: RefCell<Option<Rendered>>,
    /// Starts a drag on pointer-down over the current track element
    on_track_down: EventHandler,
    track_down: Cell<Option<ListenerId>>,
    unmounted: Cell<bool>,
}

impl Mounted {
    fn render(&self) {
        if self.unmounted.get() {
            return;
        }
        if let Err(e) = self.try_render() {
            log::error!("📜 Render failed: {}", e);
        }
    }

    fn try_render(&self) -> Result<(), WebError> {
        let view = self.widget.view(ViewNode::Slot);
        let new_nodes = {
            let mut rendered = self.rendered.borrow_mut();
            match rendered.as_mut() {
                Some(current) if render::same_shape(&current.view, &view) => {
                    current.patch(view)?;
                    None
                }
                _ => {
                    let next = render::build(&self.document, view, &self.content)?;
                    match rendered.take() {
                        Some(old) => {
                            self.container.replace_child(&next.root, &old.root)?;
                        }
                        None => {
                            self.container.append_child(&next.root)?;
                        }
                    }
                    self.unlisten_track();
                    if let Some(track) = &next.track {
                        let id = self.platform.add_listener(
                            &Target::Node(track.clone()),
                            EventKind::PointerDown,
                            Rc::clone(&self.on_track_down),
                            false,
                        );
                        self.track_down.set(Some(id));
                    }
                    let nodes = (next.scroller.clone(), next.track.clone());
                    *rendered = Some(next);
                    Some(nodes)
                }
            }
        };

        if let Some((scroller, track)) = new_nodes {
            log::debug!("📜 Widget markup rebuilt");
            self.widget.set_scroller_node(scroller);
            self.widget.set_track_node(track);
        }
        self.widget.commit();
        Ok(())
    }

    fn unlisten_track(&self) {
        if let Some(id) = self.track_down.take() {
            self.platform.remove_listener(id);
        }
    }

    fn unmount(&self) -> Result<(), WebError> {
        if self.unmounted.replace(true) {
            return Ok(());
        }
        self.widget.unmount();
        self.unlisten_track();
        let rendered = self.rendered.borrow_mut().take();
        if let Some(rendered) = rendered {
            for node in &self.content {
                self.container.append_child(node)?;
            }
            rendered.root.remove();
        }
        log::info!("📜 Scrollbar unmounted from #{}", self.container.id());
        Ok(())
    }
}

impl Drop for Mounted {
    fn drop(&mut self) {
        if let Err(e) = self.unmount() {
            log::warn!("📜 Failed to unmount dropped scrollbar: {}", e);
        }
    }
}

/// Add the base stylesheet to `document` unless an earlier mount did.
fn install_base_stylesheet(document: &Document) -> Result<(), WebError> {
    if document.get_element_by_id(STYLESHEET_ID).is_some() {
        return Ok(());
    }
    let style = document.create_element("style")?;
    style.set_id(STYLESHEET_ID);
    style.set_text_content(Some(&base_stylesheet()));
    match document.head() {
        Some(head) => head.append_child(&style)?,
        None => document.body().ok_or(WebError::NoBody)?.append_child(&style)?,
    };
    log::debug!("📜 Installed base stylesheet");
    Ok(())
}

fn parse_options(options_json: Option<String>) -> Result<ScrollbarOptions, WebError> {
    match options_json {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(AppConfig::load_from_local_storage()
            .unwrap_or_default()
            .options),
    }
}

/// A synthetic scrollbar mounted on a container element.
#[wasm_bindgen]
pub struct CustomScrollbar {
    mounted: Rc<Mounted>,
}

impl CustomScrollbar {
    fn mount(container_id: &str, options_json: Option<String>) -> Result<CustomScrollbar, WebError> {
        let started = Instant::now();
        let options = parse_options(options_json)?;
        let platform = Rc::new(WebPlatform::new()?);
        let document = platform.window().document().ok_or(WebError::NoDocument)?;
        let container = document
            .get_element_by_id(container_id)
            .ok_or_else(|| WebError::ElementNotFound(container_id.to_string()))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| WebError::NotHtmlElement(container_id.to_string()))?;

        let children = container.child_nodes();
        let content: Vec<Node> = (0..children.length())
            .filter_map(|index| children.get(index))
            .collect();

        init_scrollbar_width(&DomProbe::new(document.clone()));
        install_base_stylesheet(&document)?;

        let mounted = Rc::new_cyclic(|weak: &Weak<Mounted>| {
            let render_weak = weak.clone();
            let widget = ScrollSync::new(Rc::clone(&platform), options).on_change(move || {
                if let Some(mounted) = render_weak.upgrade() {
                    mounted.render();
                }
            });

            let drag_weak = weak.clone();
            let on_track_down: EventHandler = Rc::new(move |event: &DomEvent| {
                if let Some(mounted) = drag_weak.upgrade() {
                    mounted.widget.begin_drag(event.page_y);
                }
            });

            Mounted {
                document,
                container,
                content,
                platform,
                widget,
                rendered: RefCell::new(None),
                on_track_down,
                track_down: Cell::new(None),
                unmounted: Cell::new(false),
            }
        });
        mounted.try_render()?;
        log::info!(
            "📜 Scrollbar mounted on #{} in {:?}",
            container_id,
            started.elapsed()
        );

        Ok(CustomScrollbar { mounted })
    }
}

#[wasm_bindgen]
impl CustomScrollbar {
    /// Mount on the element with id `container_id`. Without options the
    /// defaults saved in localStorage are used.
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: &str, options_json: Option<String>) -> Result<CustomScrollbar, JsValue> {
        Ok(Self::mount(container_id, options_json)?)
    }

    /// Replace the options with `options_json` (same keys as the constructor).
    #[wasm_bindgen(js_name = setOptions)]
    pub fn set_options(&self, options_json: &str) -> Result<(), JsValue> {
        let options: ScrollbarOptions =
            serde_json::from_str(options_json).map_err(WebError::from)?;
        self.mounted.widget.set_options(options);
        Ok(())
    }

    /// Re-measure after the content changed size.
    pub fn refresh(&self) {
        self.mounted.widget.update_scrollbar();
    }

    #[wasm_bindgen(js_name = scrollRatio)]
    pub fn scroll_ratio(&self) -> f64 {
        self.mounted.widget.scroll_ratio()
    }

    /// Store the current options as the defaults for later mounts.
    #[wasm_bindgen(js_name = saveDefaults)]
    pub fn save_defaults(&self) -> Result<(), JsValue> {
        let mut config = AppConfig::load_from_local_storage().unwrap_or_default();
        config.options = self.mounted.widget.options();
        config
            .save_to_local_storage()
            .map_err(|e| JsValue::from(js_sys::Error::new(&e.to_string())))
    }

    /// Tear the widget down and give the container its children back.
    /// Freeing the handle from JS does the same.
    pub fn unmount(&self) -> Result<(), JsValue> {
        Ok(self.mounted.unmount()?)
    }
}
