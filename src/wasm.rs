//! WebAssembly bindings for the browser.
//!
//! Exposes two entry points:
//! - `SearchWidget`: wires the page's search UI, fetches the index, and
//!   renders results per keystroke
//! - `getFingerprint()`: promise of the visitor fingerprint string
//!
//! The widget follows the host page contract: four elements located by
//! id (trigger, collapsible wrapper, text input, results container) and
//! an index URL in the config. A missing element or URL is a page
//! template bug, so initialization logs to the console and returns an
//! inert widget instead of throwing; nothing is half-wired.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Function, Promise};
use serde_wasm_bindgen::from_value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{console, Document, Element, HtmlInputElement, KeyboardEvent, Response, Window};

use crate::fingerprint::ClientProfile;
use crate::render::{render_failure, render_results};
use crate::session::{LoadCompletion, LoadFailure, SearchSession, SessionConfig};

/// Class toggled on the wrapper to show and hide the search box.
const VISIBILITY_CLASS: &str = "on";

/// The page's search component.
///
/// Constructing one wires event handlers and starts the index fetch
/// immediately. Handlers live for the rest of the page, so the returned
/// handle is only needed for introspection; dropping it does not unwire
/// anything.
#[wasm_bindgen]
pub struct SearchWidget {
    session: Rc<RefCell<SearchSession>>,
    active: bool,
}

#[wasm_bindgen]
impl SearchWidget {
    /// Create the widget from a camelCase config object:
    ///
    /// ```js
    /// new SearchWidget({ indexUrl: "/search.xml" })
    /// ```
    ///
    /// Unknown ids fall back to the site defaults. A config that does not
    /// deserialize is a caller bug and throws; missing page elements or a
    /// missing `indexUrl` log a diagnostic and yield an inert widget.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<SearchWidget, JsValue> {
        let config: SessionConfig = from_value(config).map_err(|e| e.to_string())?;
        let session = Rc::new(RefCell::new(SearchSession::new()));

        let Some(wiring) = Wiring::locate(&config) else {
            return Ok(SearchWidget {
                session,
                active: false,
            });
        };

        wire_trigger(&wiring.trigger, wiring.wrap.clone(), wiring.input.clone())?;
        wire_input(
            &wiring.input,
            Rc::clone(&session),
            wiring.results.clone(),
        )?;
        wire_enter(&wiring.input, Rc::clone(&session), wiring.window.clone())?;

        session.borrow_mut().begin_load();
        let load_session = Rc::clone(&session);
        let window = wiring.window;
        let results = wiring.results;
        let url = config.index_url.clone();
        let timeout_ms = config.load_timeout_ms;
        spawn_local(async move {
            let outcome = fetch_index_body(&window, &url, timeout_ms).await;
            let failure_html = {
                let mut session = load_session.borrow_mut();
                match outcome {
                    Ok(body) => {
                        if let LoadCompletion::Ready(count) = session.complete_load(&body) {
                            console::log_1(
                                &format!("search index ready ({count} records)").into(),
                            );
                        }
                    }
                    Err(failure) => {
                        session.fail_load(failure);
                    }
                }
                session.failure().map(render_failure)
            };
            if let Some(html) = failure_html {
                results.set_inner_html(&html);
            }
        });

        Ok(SearchWidget {
            session,
            active: true,
        })
    }

    /// Whether initialization found its page elements and started a load.
    #[wasm_bindgen]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the index arrived and parsed.
    #[wasm_bindgen]
    pub fn is_ready(&self) -> bool {
        self.session.borrow().is_ready()
    }

    /// Number of indexed records, zero until ready.
    #[wasm_bindgen]
    pub fn record_count(&self) -> usize {
        self.session.borrow().record_count()
    }
}

/// The page elements the widget needs, located up front.
struct Wiring {
    window: Window,
    trigger: Element,
    wrap: Element,
    input: HtmlInputElement,
    results: Element,
}

impl Wiring {
    /// Locate everything or nothing. Each absence logs which id was
    /// missing so the template can be fixed from the console alone.
    fn locate(config: &SessionConfig) -> Option<Wiring> {
        if config.index_url.is_empty() {
            console::error_1(&"search index URL is not configured".into());
            return None;
        }
        let window = web_sys::window()?;
        let document = window.document()?;
        let trigger = require_element(&document, &config.search_trigger_id)?;
        let wrap = require_element(&document, &config.search_wrap_id)?;
        let results = require_element(&document, &config.results_container_id)?;
        let input = match require_element(&document, &config.search_input_id)?
            .dyn_into::<HtmlInputElement>()
        {
            Ok(input) => input,
            Err(_) => {
                console::error_1(
                    &format!(
                        "search element #{} is not a text input",
                        config.search_input_id
                    )
                    .into(),
                );
                return None;
            }
        };
        Some(Wiring {
            window,
            trigger,
            wrap,
            input,
            results,
        })
    }
}

fn require_element(document: &Document, id: &str) -> Option<Element> {
    let element = document.get_element_by_id(id);
    if element.is_none() {
        console::error_1(&format!("search element #{id} not found; widget not wired").into());
    }
    element
}

/// Click on the trigger toggles the wrapper's visibility class and
/// focuses the input when it just became visible.
fn wire_trigger(
    trigger: &Element,
    wrap: Element,
    input: HtmlInputElement,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
        event.prevent_default();
        let class_list = wrap.class_list();
        let _ = class_list.toggle(VISIBILITY_CLASS);
        if class_list.contains(VISIBILITY_CLASS) {
            let _ = input.focus();
        }
    });
    trigger.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Every input event re-queries the session and replaces the container
/// contents. An empty render clears it, which also covers blank queries
/// and sessions that are not ready.
fn wire_input(
    input: &HtmlInputElement,
    session: Rc<RefCell<SearchSession>>,
    results: Element,
) -> Result<(), JsValue> {
    let reader = input.clone();
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
        let html = {
            let mut session = session.borrow_mut();
            render_results(&session.query(&reader.value()))
        };
        results.set_inner_html(&html);
    });
    input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Enter navigates to the top result of the latest query, resolved
/// against the page origin. No results, no navigation.
fn wire_enter(
    input: &HtmlInputElement,
    session: Rc<RefCell<SearchSession>>,
    window: Window,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
        if event.key() != "Enter" {
            return;
        }
        event.prevent_default();
        let origin = match window.location().origin() {
            Ok(origin) => origin,
            Err(_) => return,
        };
        if let Some(url) = session.borrow().activation_target(&origin) {
            let _ = window.location().set_href(&url);
        }
    });
    input.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Fetch the index body, racing the configured timeout if there is one.
///
/// The timeout promise resolves to `undefined`, which a fetch never
/// does, so an `undefined` winner means the deadline passed. The losing
/// fetch is left to settle unobserved; the session ignores late bodies
/// anyway.
async fn fetch_index_body(
    window: &Window,
    url: &str,
    timeout_ms: Option<u32>,
) -> Result<String, LoadFailure> {
    let fetch = window.fetch_with_str(url);
    let response_value = match timeout_ms {
        Some(ms) => {
            let race = Promise::race(&Array::of2(&fetch, &timeout_promise(window, ms)));
            let value = JsFuture::from(race)
                .await
                .map_err(|_| LoadFailure::NotFound { status: None })?;
            if value.is_undefined() {
                return Err(LoadFailure::TimedOut { waited_ms: ms });
            }
            value
        }
        None => JsFuture::from(fetch)
            .await
            .map_err(|_| LoadFailure::NotFound { status: None })?,
    };

    let response: Response = response_value
        .dyn_into()
        .map_err(|_| LoadFailure::NotFound { status: None })?;
    if !response.ok() {
        return Err(LoadFailure::NotFound {
            status: Some(response.status()),
        });
    }
    let status = response.status();
    let text_promise = response.text().map_err(|_| LoadFailure::NotFound {
        status: Some(status),
    })?;
    let text = JsFuture::from(text_promise)
        .await
        .map_err(|_| LoadFailure::NotFound {
            status: Some(status),
        })?;
    Ok(text.as_string().unwrap_or_default())
}

/// A promise that resolves to `undefined` after `ms` milliseconds.
fn timeout_promise(window: &Window, ms: u32) -> Promise {
    Promise::new(&mut |resolve: Function, _reject: Function| {
        let delay = i32::try_from(ms).unwrap_or(i32::MAX);
        if window
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, delay)
            .is_err()
        {
            // Scheduling failed; resolve now so the race cannot hang.
            let _ = resolve.call0(&JsValue::UNDEFINED);
        }
    })
}

/// Read the ambient attributes the fingerprint is derived from.
/// Missing values degrade to empty or zero rather than failing; the
/// fingerprint is a hint, not an identity.
fn browser_profile(window: &Window) -> ClientProfile {
    let navigator = window.navigator();
    let user_agent = navigator.user_agent().unwrap_or_default();
    let language = navigator.language().unwrap_or_default();
    let (screen_width, screen_height) = match window.screen() {
        Ok(screen) => (
            u32::try_from(screen.width().unwrap_or(0)).unwrap_or(0),
            u32::try_from(screen.height().unwrap_or(0)).unwrap_or(0),
        ),
        Err(_) => (0, 0),
    };
    let timezone_offset_min = js_sys::Date::new_0().get_timezone_offset() as i32;
    ClientProfile {
        user_agent,
        language,
        screen_width,
        screen_height,
        timezone_offset_min,
    }
}

/// Promise of the visitor fingerprint string.
///
/// Resolves immediately today; callers still get a promise so the
/// contract holds if a future source needs to suspend.
#[wasm_bindgen(js_name = getFingerprint)]
pub fn get_fingerprint() -> Promise {
    match web_sys::window() {
        Some(window) => {
            let value = JsValue::from_str(&browser_profile(&window).fingerprint());
            Promise::resolve(&value)
        }
        None => Promise::reject(&JsValue::from_str("no window available")),
    }
}
