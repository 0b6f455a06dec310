use super::frame::FrameLoop;
use super::{now, warn};
use crate::motion::{sequence_for, Stage, StyleWrite};
use crate::render::{render_header, render_page, BOTTOM_ROW, HEADER_ID, MANIFEST_ID, TOP_ROW};
use shadient_content::Manifest;
use shadient_core::{
    AnimationController, Command, MarqueeLooper, MenuEvent, PageMessage, PageState, Phase,
    StartOutcome, State,
};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, HtmlElement, MouseEvent};

type Listener = Closure<dyn FnMut(Event)>;

/// State JSON owed to the change callback.
///
/// Delivered after the runtime borrow is released, so the callback may call
/// back into the [`Page`].
#[must_use]
struct Notice {
    callback: js_sys::Function,
    json: String,
}

impl Notice {
    fn deliver(self) {
        let _ = self
            .callback
            .call1(&JsValue::NULL, &JsValue::from_str(&self.json));
    }
}

fn dispatch(runtime: &RefCell<Runtime>, msg: PageMessage) {
    let notice = runtime.borrow_mut().dispatch(msg);
    if let Some(notice) = notice {
        notice.deliver();
    }
}

struct Binding {
    target: EventTarget,
    kind: &'static str,
    closure: Listener,
}

struct Runtime {
    manifest: Manifest,
    state: PageState,
    stage: Stage,
    animations: AnimationController,
    marquee: MarqueeLooper,
    root: Element,
    measure_pending: bool,
    frames: Option<FrameLoop>,
    bindings: Vec<Binding>,
    on_change: Option<js_sys::Function>,
}

impl Runtime {
    fn dispatch(&mut self, msg: PageMessage) -> Option<Notice> {
        let cmd = self.state.update(msg);
        if cmd.is_none() {
            return None;
        }
        let now = now();
        for cmd in cmd.flatten() {
            self.execute(cmd, now);
        }
        self.notice()
    }

    fn execute(&mut self, cmd: Command, now: f64) {
        match cmd {
            Command::None | Command::Batch(_) => {}
            Command::Play(cue) => {
                let sequence = sequence_for(&self.manifest, cue);
                self.animations.play(&cue.key(), sequence, now);
                self.write_frames(now);
            }
            Command::RenderHeader => self.render_header(),
            Command::StartMarquee => self.measure_pending = true,
            Command::Teardown => self.teardown(),
        }
    }

    fn render_header(&self) {
        let header = self
            .root
            .query_selector(&format!("#{HEADER_ID}"))
            .ok()
            .flatten();
        let Some(header) = header else {
            warn("header element missing");
            return;
        };
        let markup = render_header(&self.manifest, self.state.menu, None);
        header.set_outer_html(&markup.into_string());
    }

    fn tick(&mut self, now: f64) -> bool {
        if self.state.phase == Phase::Gone {
            return false;
        }
        if self.measure_pending {
            self.measure_pending = false;
            self.start_marquee(now);
        }
        self.write_frames(now);
        if let Some(offsets) = self.marquee.sample(now) {
            self.write_row(TOP_ROW, offsets.top);
            self.write_row(BOTTOM_ROW, offsets.bottom);
        }
        true
    }

    fn start_marquee(&mut self, now: f64) {
        let width = self
            .row(TOP_ROW)
            .map_or(0.0, |row| f64::from(row.scroll_width()));
        match self.marquee.start(width, now) {
            StartOutcome::Started { track_width } => {
                super::log(&format!("marquee started, track width {track_width}px"));
            }
            StartOutcome::Skipped(reason) => {
                warn(&format!("marquee not started: {reason:?}"));
            }
        }
    }

    fn write_frames(&mut self, now: f64) {
        for frame in self.animations.sample(now) {
            let Some(write) = self.stage.style(&frame) else {
                continue;
            };
            let selector = format!("[data-anim=\"{}\"]", frame.target);
            for element in self.select_all(&selector) {
                let style = element.style();
                let result = match &write {
                    StyleWrite::Pose { transform, opacity } => style
                        .set_property("transform", transform)
                        .and_then(|()| style.set_property("opacity", opacity)),
                    StyleWrite::Background(background) => {
                        style.set_property("background", background)
                    }
                };
                if let Err(e) = result {
                    web_sys::console::error_1(&e);
                }
            }
        }
    }

    fn write_row(&self, row: &str, offset: f64) {
        if let Some(row) = self.row(row) {
            let _ = row
                .style()
                .set_property("transform", &format!("translateX({offset}px)"));
        }
    }

    fn row(&self, name: &str) -> Option<HtmlElement> {
        self.root
            .query_selector(&format!("[data-marquee=\"{name}\"]"))
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    fn select_all(&self, selector: &str) -> Vec<HtmlElement> {
        let Ok(nodes) = self.root.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect()
    }

    fn teardown(&mut self) {
        self.marquee.teardown();
        self.animations.clear();
        self.measure_pending = false;
        if let Some(frames) = self.frames.take() {
            frames.stop();
        }
        // Closures stay alive: teardown can run inside one of them.
        for binding in &self.bindings {
            let _ = binding.target.remove_event_listener_with_callback(
                binding.kind,
                binding.closure.as_ref().unchecked_ref(),
            );
        }
        super::log("page unmounted");
    }

    fn notice(&self) -> Option<Notice> {
        let callback = self.on_change.clone()?;
        let json = serde_json::to_string(&self.state).unwrap_or_default();
        Some(Notice { callback, json })
    }
}

/// The landing page running in a browser document.
#[wasm_bindgen]
pub struct Page {
    manifest: Manifest,
    runtime: Option<Rc<RefCell<Runtime>>>,
    on_change: Option<js_sys::Function>,
}

#[wasm_bindgen]
impl Page {
    /// Page for the manifest embedded in the document, or the built-in one.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<Page, JsValue> {
        console_error_panic_hook::set_once();
        let manifest = match embedded_manifest() {
            Some(manifest) => manifest,
            None => Manifest::builtin().map_err(|e| JsValue::from_str(&e.to_string()))?,
        };
        Ok(Self::with_manifest(manifest))
    }

    /// Page for a YAML manifest.
    pub fn from_yaml(yaml: &str) -> Result<Page, JsValue> {
        let manifest = Manifest::from_yaml(yaml).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::with_manifest(manifest))
    }

    /// Render into the element with id `root_id` and start animating.
    pub fn mount(&mut self, root_id: &str) -> Result<(), JsValue> {
        if self.runtime.is_some() {
            return Err("Page is already mounted".into());
        }
        let window = web_sys::window().ok_or("No window")?;
        let document = window.document().ok_or("No document")?;
        let root = document
            .get_element_by_id(root_id)
            .ok_or_else(|| format!("Root element '{root_id}' not found"))?;

        let state = PageState::new(self.manifest.heroes.len());
        root.set_inner_html(&render_page(&self.manifest, &state).into_string());

        let runtime = Rc::new(RefCell::new(Runtime {
            manifest: self.manifest.clone(),
            marquee: MarqueeLooper::new(
                self.manifest.trusted.marquee,
                self.manifest.trusted.companies.len(),
            ),
            stage: Stage::new(&self.manifest),
            state,
            animations: AnimationController::new(),
            root: root.clone(),
            measure_pending: false,
            frames: None,
            bindings: Vec::new(),
            on_change: self.on_change.clone(),
        }));

        let weak = Rc::downgrade(&runtime);
        let bindings = vec![
            bind(root.clone().into(), "click", weak.clone(), on_click)?,
            bind(root.into(), "mouseover", weak.clone(), on_mouseover)?,
            bind(window.into(), "pagehide", weak.clone(), |_| Some(PageMessage::Unmount))?,
        ];
        let frames = FrameLoop::start(move |now| {
            let Some(runtime) = weak.upgrade() else {
                return false;
            };
            let running = runtime.borrow_mut().tick(now);
            running
        })?;

        {
            let mut rt = runtime.borrow_mut();
            rt.bindings = bindings;
            rt.frames = Some(frames);
        }
        self.runtime = Some(Rc::clone(&runtime));
        dispatch(&runtime, PageMessage::Mounted);
        Ok(())
    }

    /// Stop every animation and release frame callbacks and listeners.
    pub fn unmount(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            dispatch(&runtime, PageMessage::Unmount);
        }
    }

    /// Toggle the mobile menu.
    pub fn toggle_menu(&self) {
        self.send(PageMessage::Menu(MenuEvent::Toggle));
    }

    /// Whether the mobile menu is open.
    pub fn menu_open(&self) -> bool {
        self.runtime
            .as_ref()
            .is_some_and(|rt| rt.borrow().state.menu.is_open())
    }

    /// Whether the marquee is looping on a live frame loop.
    pub fn is_running(&self) -> bool {
        self.runtime.as_ref().is_some_and(|rt| {
            let rt = rt.borrow();
            rt.marquee.is_running() && rt.frames.as_ref().is_some_and(|f| !f.is_stopped())
        })
    }

    /// Current `[top, bottom]` marquee offsets in pixels.
    pub fn marquee_offsets(&self) -> Option<Vec<f64>> {
        let runtime = self.runtime.as_ref()?;
        let offsets = runtime.borrow().marquee.sample(now())?;
        Some(vec![offsets.top, offsets.bottom])
    }

    /// Page state as JSON.
    pub fn state_json(&self) -> String {
        self.runtime
            .as_ref()
            .map(|rt| serde_json::to_string(&rt.borrow().state).unwrap_or_default())
            .unwrap_or_default()
    }

    /// Register a callback receiving the state JSON after every change.
    pub fn on_change(&mut self, callback: js_sys::Function) {
        if let Some(runtime) = &self.runtime {
            runtime.borrow_mut().on_change = Some(callback.clone());
        }
        self.on_change = Some(callback);
    }
}

impl Page {
    fn with_manifest(manifest: Manifest) -> Self {
        Self {
            manifest,
            runtime: None,
            on_change: None,
        }
    }

    fn send(&self, msg: PageMessage) {
        if let Some(runtime) = &self.runtime {
            dispatch(runtime, msg);
        }
    }
}

fn embedded_manifest() -> Option<Manifest> {
    let script = web_sys::window()?
        .document()?
        .get_element_by_id(MANIFEST_ID)?;
    let json = script.text_content()?;
    let parsed = serde_json::from_str::<Manifest>(&json)
        .map_err(|e| e.to_string())
        .and_then(|m| m.validate().map(|()| m).map_err(|e| e.to_string()));
    match parsed {
        Ok(manifest) => Some(manifest),
        Err(e) => {
            warn(&format!("ignoring embedded manifest: {e}"));
            None
        }
    }
}

fn bind(
    target: EventTarget,
    kind: &'static str,
    runtime: Weak<RefCell<Runtime>>,
    translate: fn(&Event) -> Option<PageMessage>,
) -> Result<Binding, JsValue> {
    let closure: Listener = Closure::new(move |event: Event| {
        let Some(msg) = translate(&event) else {
            return;
        };
        if let Some(runtime) = runtime.upgrade() {
            dispatch(&runtime, msg);
        }
    });
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    Ok(Binding {
        target,
        kind,
        closure,
    })
}

fn action_element(event: &Event, selector: &str) -> Option<Element> {
    event
        .target()?
        .dyn_into::<Element>()
        .ok()?
        .closest(selector)
        .ok()
        .flatten()
}

fn on_click(event: &Event) -> Option<PageMessage> {
    let element = action_element(event, "[data-action]")?;
    match element.get_attribute("data-action")?.as_str() {
        "menu-toggle" => Some(PageMessage::Menu(MenuEvent::Toggle)),
        "menu-dismiss" => Some(PageMessage::Menu(MenuEvent::Dismiss)),
        _ => None,
    }
}

fn on_mouseover(event: &Event) -> Option<PageMessage> {
    let button = action_element(event, "[data-action=\"cta\"]")?;
    // Moves between the button's own children are not a new hover.
    let from = event
        .dyn_ref::<MouseEvent>()
        .and_then(MouseEvent::related_target)
        .and_then(|t| t.dyn_into::<web_sys::Node>().ok());
    if from.is_some_and(|node| button.contains(Some(&node))) {
        return None;
    }
    let hero = button.get_attribute("data-hero")?.parse().ok()?;
    Some(PageMessage::CtaHovered(hero))
}
