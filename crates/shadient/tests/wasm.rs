//! WASM browser tests - run with `wasm-pack test --headless --chrome`

#![cfg(target_arch = "wasm32")]

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{Event, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

use shadient::browser::Page;

fn root(id: &str) -> web_sys::Element {
    let document = web_sys::window().unwrap().document().unwrap();
    let root = document.create_element("div").unwrap();
    root.set_id(id);
    document.body().unwrap().append_child(&root).unwrap();
    root
}

fn click(root: &web_sys::Element, selector: &str) {
    root.query_selector(selector)
        .unwrap()
        .expect("element to click")
        .dyn_into::<HtmlElement>()
        .unwrap()
        .click();
}

/// Resolve after `ms` milliseconds of real time, letting frames run.
async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

fn top_row_transform(root: &web_sys::Element) -> String {
    root.query_selector("[data-marquee=\"top\"]")
        .unwrap()
        .expect("top marquee row")
        .dyn_into::<HtmlElement>()
        .unwrap()
        .style()
        .get_property_value("transform")
        .unwrap()
}

#[wasm_bindgen_test]
fn test_mount_renders_page() {
    let root = root("mount-renders");
    let mut page = Page::new().unwrap();
    page.mount("mount-renders").unwrap();

    assert!(root.query_selector("#site-header").unwrap().is_some());
    assert_eq!(
        root.query_selector_all(".marquee-row").unwrap().length(),
        2
    );
    // The header entrance wrote its first frame synchronously.
    let header = root
        .query_selector("[data-anim=\"header\"]")
        .unwrap()
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    assert_eq!(header.style().get_property_value("opacity").unwrap(), "0");
    page.unmount();
}

#[wasm_bindgen_test]
fn test_menu_toggle_and_dismiss() {
    let root = root("menu-toggle");
    let mut page = Page::new().unwrap();
    page.mount("menu-toggle").unwrap();

    assert!(!page.menu_open());
    click(&root, "[data-action=\"menu-toggle\"]");
    assert!(page.menu_open());
    assert!(root.query_selector(".menu-dropdown").unwrap().is_some());

    click(&root, "[data-action=\"menu-dismiss\"]");
    assert!(!page.menu_open());
    assert!(root.query_selector(".menu-dropdown").unwrap().is_none());
    page.unmount();
}

#[wasm_bindgen_test]
async fn test_marquee_starts_after_first_frame() {
    let root = root("marquee-runs");
    let mut page = Page::new().unwrap();
    page.mount("marquee-runs").unwrap();
    assert!(!page.is_running());

    sleep(100).await;
    assert!(page.is_running());
    let offsets = page.marquee_offsets().expect("offsets while running");
    assert!(offsets[0] <= 0.0 && offsets[1] <= 0.0);

    let first = top_row_transform(&root);
    assert!(first.starts_with("translateX("), "{first}");
    sleep(150).await;
    assert_ne!(top_row_transform(&root), first);
    page.unmount();
}

#[wasm_bindgen_test]
async fn test_unmount_freezes_marquee() {
    let root = root("unmount");
    let mut page = Page::new().unwrap();
    page.mount("unmount").unwrap();
    sleep(100).await;
    assert!(page.is_running());

    page.unmount();
    assert!(!page.is_running());
    assert!(page.marquee_offsets().is_none());
    assert!(page.state_json().is_empty());

    let frozen = top_row_transform(&root);
    sleep(150).await;
    assert_eq!(top_row_transform(&root), frozen);

    click(&root, "[data-action=\"menu-toggle\"]");
    assert!(root.query_selector(".menu-dropdown").unwrap().is_none());
}

#[wasm_bindgen_test]
async fn test_pagehide_tears_down_live_page() {
    let root = root("pagehide");
    let mut page = Page::new().unwrap();
    page.mount("pagehide").unwrap();
    sleep(100).await;
    assert!(page.is_running());

    let changes = Rc::new(Cell::new(0_u32));
    let callback = {
        let changes = Rc::clone(&changes);
        Closure::<dyn FnMut(String)>::new(move |_json: String| changes.set(changes.get() + 1))
    };
    page.on_change(callback.as_ref().unchecked_ref::<js_sys::Function>().clone());

    let window = web_sys::window().unwrap();
    window
        .dispatch_event(&Event::new("pagehide").unwrap())
        .unwrap();

    // The page still owns its runtime, so these read the torn-down state.
    assert_eq!(changes.get(), 1);
    assert!(page.state_json().contains("\"Gone\""));
    assert!(!page.is_running());
    assert!(page.marquee_offsets().is_none());

    let frozen = top_row_transform(&root);
    sleep(150).await;
    assert_eq!(top_row_transform(&root), frozen);

    click(&root, "[data-action=\"menu-toggle\"]");
    assert!(!page.menu_open());
    assert!(root.query_selector(".menu-dropdown").unwrap().is_none());
    assert_eq!(changes.get(), 1);

    page.unmount();
    drop(callback);
}

#[wasm_bindgen_test]
fn test_change_callback_can_query_page() {
    let root = root("reentrant");
    let page = Rc::new(RefCell::new(Page::new().unwrap()));
    page.borrow_mut().mount("reentrant").unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let callback = {
        let page = Rc::clone(&page);
        let seen = Rc::clone(&seen);
        Closure::<dyn FnMut(String)>::new(move |json: String| {
            let Ok(page) = page.try_borrow() else {
                return;
            };
            seen.borrow_mut()
                .push((page.menu_open(), page.is_running(), page.state_json() == json));
        })
    };
    page.borrow_mut()
        .on_change(callback.as_ref().unchecked_ref::<js_sys::Function>().clone());

    click(&root, "[data-action=\"menu-toggle\"]");
    click(&root, "[data-action=\"menu-dismiss\"]");

    let seen = seen.borrow();
    assert_eq!(seen.len(), 2);
    assert!(seen[0].0 && seen[0].2);
    assert!(!seen[1].0 && seen[1].2);
    drop(seen);

    page.borrow_mut().unmount();
    drop(callback);
}

#[wasm_bindgen_test]
fn test_mount_errors() {
    let mut page = Page::new().unwrap();
    assert!(page.mount("no-such-root").is_err());

    root("twice");
    page.mount("twice").unwrap();
    assert!(page.mount("twice").is_err());
    page.unmount();
}

#[wasm_bindgen_test]
fn test_from_yaml_rejects_invalid_manifest() {
    assert!(Page::from_yaml("shadient: \"2.0\"").is_err());
}
