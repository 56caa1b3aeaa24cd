//! Browser implementation of the modal seams on top of `web-sys`.

use std::time::Duration;

use folio_core::{CoreError, Result, SearchUiOptions, SiteEnv};
use js_sys::{Array, Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlButtonElement, HtmlDialogElement, HtmlElement,
    HtmlLinkElement, HtmlScriptElement, KeyboardEvent, Node, Window,
};

use crate::{
    host::{ClickInput, ClickTarget, Handler, KeyInput, LocalFuture, ModalSurface, SearchUiHost},
    modal::{ModalSettings, SearchModal},
};

pub const OPEN_TRIGGER_SELECTOR: &str = "button[data-open-modal]";
pub const CLOSE_TRIGGER_SELECTOR: &str = "button[data-close-modal]";
pub const DIALOG_SELECTOR: &str = "dialog";
pub const FRAME_SELECTOR: &str = ".dialog-frame";

/// Global defined by the bundle's UI script.
const UI_CONSTRUCTOR: &str = "PagefindUI";

/// Search modal bound to real DOM elements.
pub type WebSearchModal = SearchModal<WebSurface, WebHost>;

/// Locate the dialog markup under `root` and attach a controller to it.
pub fn attach_to(root: &Element, env: &SiteEnv, settings: &ModalSettings) -> Result<WebSearchModal> {
    let surface = WebSurface::locate(root)?;
    let host = WebHost::new()?;
    SearchModal::attach(surface, &host, env, settings)
}

fn describe(value: &JsValue) -> String {
    if let Some(message) = value.as_string() {
        return message;
    }
    match value.dyn_ref::<js_sys::Error>() {
        Some(error) => String::from(error.message()),
        None => format!("{value:?}"),
    }
}

fn script_error(context: &str, value: JsValue) -> CoreError {
    CoreError::script(format!("{context}: {}", describe(&value)))
}

fn search_ui_error(context: &str, value: JsValue) -> CoreError {
    CoreError::search_ui(format!("{context}: {}", describe(&value)))
}

/// An event listener registration; dropping it removes the listener.
pub struct WebListener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn Fn(Event)>,
}

impl WebListener {
    fn add(target: &EventTarget, event: &'static str, handler: impl Fn(Event) + 'static) -> Result<Self> {
        let callback = Closure::<dyn Fn(Event)>::new(handler);
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(|e| script_error("addEventListener", e))?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for WebListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// A DOM click, classified against the dialog frame.
pub struct WebClick {
    event: Event,
    document: Document,
    frame: HtmlElement,
}

impl ClickInput for WebClick {
    fn target(&self) -> ClickTarget {
        let Some(target) = self.event.target() else {
            return ClickTarget::default();
        };
        let is_link = Reflect::has(&target, &JsValue::from_str("href")).unwrap_or(false);
        let node = target.dyn_ref::<Node>();
        let in_page = match (node, self.document.body()) {
            (Some(node), Some(body)) => body.contains(Some(node)),
            _ => false,
        };
        let in_frame = node.is_some_and(|node| self.frame.contains(Some(node)));

        ClickTarget {
            is_link,
            in_page,
            in_frame,
        }
    }

    fn stop_propagation(&self) {
        self.event.stop_propagation();
    }
}

pub struct WebKey(KeyboardEvent);

impl KeyInput for WebKey {
    fn key(&self) -> String {
        self.0.key()
    }

    fn prevent_default(&self) {
        self.0.prevent_default();
    }
}

/// The dialog markup of one search control.
pub struct WebSurface {
    window: Window,
    document: Document,
    open_trigger: HtmlButtonElement,
    close_trigger: HtmlButtonElement,
    dialog: HtmlDialogElement,
    frame: HtmlElement,
}

impl WebSurface {
    /// Find the open control, close control, dialog and content frame under
    /// `root`. Any of them missing is a [`CoreError::Structural`].
    pub fn locate(root: &Element) -> Result<Self> {
        let document = root
            .owner_document()
            .ok_or_else(|| CoreError::structural("document"))?;
        let window = document
            .default_view()
            .ok_or_else(|| CoreError::structural("window"))?;

        Ok(Self {
            open_trigger: find(root, OPEN_TRIGGER_SELECTOR)?,
            close_trigger: find(root, CLOSE_TRIGGER_SELECTOR)?,
            dialog: find(root, DIALOG_SELECTOR)?,
            frame: find(root, FRAME_SELECTOR)?,
            window,
            document,
        })
    }

    fn click_handler(&self, handler: Handler<WebClick>) -> impl Fn(Event) + 'static {
        let document = self.document.clone();
        let frame = self.frame.clone();
        move |event: Event| {
            handler(&WebClick {
                event,
                document: document.clone(),
                frame: frame.clone(),
            })
        }
    }
}

fn find<T: JsCast>(root: &Element, selector: &str) -> Result<T> {
    root.query_selector(selector)
        .map_err(|e| script_error(selector, e))?
        .and_then(|element| element.dyn_into::<T>().ok())
        .ok_or_else(|| CoreError::structural(selector))
}

impl ModalSurface for WebSurface {
    type Click = WebClick;
    type Key = WebKey;
    type Listener = WebListener;

    fn show_modal(&self) -> Result<()> {
        self.dialog
            .show_modal()
            .map_err(|e| script_error("showModal", e))
    }

    fn close_dialog(&self) {
        self.dialog.close();
    }

    fn is_open(&self) -> bool {
        self.dialog.open()
    }

    fn focus_search_input(&self) {
        let input = self
            .dialog
            .query_selector("input")
            .ok()
            .flatten()
            .and_then(|element| element.dyn_into::<HtmlElement>().ok());
        if let Some(input) = input {
            let _ = input.focus();
        }
    }

    fn enable_open_trigger(&self) {
        self.open_trigger.set_disabled(false);
    }

    fn listen_open_trigger(&self, handler: Handler<WebClick>) -> Result<WebListener> {
        WebListener::add(&self.open_trigger, "click", self.click_handler(handler))
    }

    fn listen_close_trigger(&self, handler: Handler<WebClick>) -> Result<WebListener> {
        WebListener::add(&self.close_trigger, "click", self.click_handler(handler))
    }

    fn listen_page_clicks(&self, handler: Handler<WebClick>) -> Result<WebListener> {
        WebListener::add(&self.window, "click", self.click_handler(handler))
    }

    fn listen_page_keys(&self, handler: Handler<WebKey>) -> Result<WebListener> {
        WebListener::add(&self.window, "keydown", move |event: Event| {
            if let Ok(event) = event.dyn_into::<KeyboardEvent>() {
                handler(&WebKey(event));
            }
        })
    }
}

enum IdleId {
    Idle(u32),
    Timeout(i32),
}

/// A scheduled idle task. Dropping it cancels the task if it has not run.
pub struct IdleTask {
    window: Window,
    id: IdleId,
    _callback: Closure<dyn FnMut()>,
}

impl Drop for IdleTask {
    fn drop(&mut self) {
        match self.id {
            IdleId::Idle(id) => self.window.cancel_idle_callback(id),
            IdleId::Timeout(id) => self.window.clear_timeout_with_handle(id),
        }
    }
}

/// The browser window as scheduler and search UI loader.
#[derive(Clone)]
pub struct WebHost {
    window: Window,
}

impl WebHost {
    pub fn new() -> Result<Self> {
        web_sys::window()
            .map(|window| Self { window })
            .ok_or_else(|| CoreError::script("no global window"))
    }

    fn has_idle_callback(&self) -> bool {
        Reflect::has(&self.window, &JsValue::from_str("requestIdleCallback")).unwrap_or(false)
    }
}

impl SearchUiHost for WebHost {
    type Idle = IdleTask;

    fn request_idle(&self, task: Box<dyn FnOnce()>, fallback: Duration) -> Result<IdleTask> {
        let callback: Closure<dyn FnMut()> = Closure::once(task);
        let function: &Function = callback.as_ref().unchecked_ref();

        let id = if self.has_idle_callback() {
            let id = self
                .window
                .request_idle_callback(function)
                .map_err(|e| script_error("requestIdleCallback", e))?;
            IdleId::Idle(id)
        } else {
            let delay = i32::try_from(fallback.as_millis()).unwrap_or(i32::MAX);
            let id = self
                .window
                .set_timeout_with_callback_and_timeout_and_arguments_0(function, delay)
                .map_err(|e| script_error("setTimeout", e))?;
            IdleId::Timeout(id)
        };

        Ok(IdleTask {
            window: self.window.clone(),
            id,
            _callback: callback,
        })
    }

    fn spawn_local(&self, task: LocalFuture<()>) {
        wasm_bindgen_futures::spawn_local(task);
    }

    fn load_search_ui(&self, options: SearchUiOptions) -> LocalFuture<Result<()>> {
        let window = self.window.clone();
        Box::pin(async move { load_search_ui(&window, &options).await })
    }
}

async fn load_search_ui(window: &Window, options: &SearchUiOptions) -> Result<()> {
    let document = window
        .document()
        .ok_or_else(|| CoreError::search_ui("window has no document"))?;

    if search_ui_constructor(window).is_none() {
        add_stylesheet(&document, &options.stylesheet_url())?;
        load_script(&document, &options.script_url()).await?;
    }

    let constructor = search_ui_constructor(window).ok_or_else(|| {
        CoreError::search_ui(format!("{} did not define {UI_CONSTRUCTOR}", options.script_url()))
    })?;
    let config = serde_wasm_bindgen::to_value(options)
        .map_err(|e| CoreError::search_ui(format!("serialize options: {e}")))?;
    Reflect::construct(&constructor, &Array::of1(&config))
        .map_err(|e| search_ui_error(UI_CONSTRUCTOR, e))?;

    Ok(())
}

fn search_ui_constructor(window: &Window) -> Option<Function> {
    Reflect::get(window, &JsValue::from_str(UI_CONSTRUCTOR))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
}

fn add_stylesheet(document: &Document, href: &str) -> Result<()> {
    let link: HtmlLinkElement = create(document, "link")?;
    link.set_rel("stylesheet");
    link.set_href(href);
    append_to_head(document, &link)
}

async fn load_script(document: &Document, src: &str) -> Result<()> {
    let script: HtmlScriptElement = create(document, "script")?;
    script.set_src(src);

    let loaded = Promise::new(&mut |resolve, reject| {
        script.set_onload(Some(&resolve));
        script.set_onerror(Some(&reject));
    });
    append_to_head(document, &script)?;

    JsFuture::from(loaded)
        .await
        .map_err(|_| CoreError::search_ui(format!("failed to load {src}")))?;
    Ok(())
}

fn create<T: JsCast>(document: &Document, tag: &str) -> Result<T> {
    document
        .create_element(tag)
        .map_err(|e| search_ui_error(tag, e))?
        .dyn_into::<T>()
        .map_err(|_| CoreError::search_ui(format!("<{tag}> has an unexpected type")))
}

fn append_to_head(document: &Document, node: &Node) -> Result<()> {
    let head = document
        .head()
        .ok_or_else(|| CoreError::search_ui("document has no <head>"))?;
    head.append_child(node)
        .map_err(|e| search_ui_error("append to <head>", e))?;
    Ok(())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use wasm_bindgen_test::*;

    use super::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const MARKUP: &str = r#"
      <button data-open-modal disabled>Search</button>
      <dialog>
        <div class="dialog-frame">
          <button data-close-modal>Cancel</button>
          <a href="/posts/hello" id="result">Hello</a>
          <input type="text" />
        </div>
      </dialog>
    "#;

    fn mount(markup: &str) -> Element {
        let document = web_sys::window().unwrap().document().unwrap();
        let root = document.create_element("div").unwrap();
        root.set_inner_html(markup);
        document.body().unwrap().append_child(&root).unwrap();
        root
    }

    #[wasm_bindgen_test]
    fn test_locate_finds_required_elements() {
        let root = mount(MARKUP);
        assert!(WebSurface::locate(&root).is_ok());
    }

    #[wasm_bindgen_test]
    fn test_locate_reports_missing_dialog() {
        let root = mount(r#"<button data-open-modal></button><button data-close-modal></button>"#);

        let err = WebSurface::locate(&root).err().unwrap();
        assert!(matches!(err, CoreError::Structural { ref element } if element == "dialog"));
    }

    #[wasm_bindgen_test]
    fn test_attach_enables_trigger_and_shows_modal() {
        let root = mount(MARKUP);
        let modal = attach_to(&root, &SiteEnv::default(), &ModalSettings::default()).unwrap();

        let trigger: HtmlButtonElement = find(&root, OPEN_TRIGGER_SELECTOR).unwrap();
        assert!(!trigger.disabled());

        modal.open(None).unwrap();
        assert!(modal.is_open());
        modal.close();
        assert!(!modal.is_open());
        modal.detach();
    }

    #[wasm_bindgen_test]
    fn test_click_target_classification() {
        let root = mount(MARKUP);
        let surface = WebSurface::locate(&root).unwrap();
        let link: Element = find(&root, "#result").unwrap();

        let event = Event::new("click").unwrap();
        link.dispatch_event(&event).unwrap();
        let click = WebClick {
            event,
            document: surface.document.clone(),
            frame: surface.frame.clone(),
        };

        let target = click.target();
        assert!(target.is_link);
        assert!(target.in_page);
        assert!(target.in_frame);
    }

    #[wasm_bindgen_test]
    fn test_request_idle_returns_cancellable_task() {
        let host = WebHost::new().unwrap();
        let task = host
            .request_idle(Box::new(|| {}), Duration::from_millis(1))
            .unwrap();
        drop(task);
    }

    #[wasm_bindgen_test]
    fn test_site_search_renders_shortcut_hint() {
        use leptos::prelude::*;

        use crate::search::SiteSearch;

        let document = web_sys::window().unwrap().document().unwrap();
        let root = document.create_element("div").unwrap();
        document.body().unwrap().append_child(&root).unwrap();
        let settings = ModalSettings {
            shortcut: "k".to_string(),
            ..ModalSettings::default()
        };

        let handle = leptos::mount::mount_to(
            root.clone().unchecked_into(),
            move || view! { <SiteSearch env=SiteEnv::default() settings=settings.clone() /> },
        );

        let trigger: HtmlButtonElement = find(&root, OPEN_TRIGGER_SELECTOR).unwrap();
        assert_eq!(trigger.get_attribute("aria-keyshortcuts").as_deref(), Some("k"));
        let hint: Element = find(&root, "kbd").unwrap();
        assert_eq!(hint.text_content().as_deref(), Some("k"));
        drop(handle);
    }
}
