use crate::constants::*;
use crate::core::signup::{is_valid_email, request_body, SignupState, FAILURE_RESET_MS, SUBMIT_FADE_MS};
use crate::dom;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// DOM handles of one newsletter form.
#[derive(Clone)]
struct Form {
    input: web::HtmlInputElement,
    enter: Option<web::HtmlElement>,
    message: Option<web::HtmlElement>,
    wrapper: Option<web::HtmlElement>,
    measure: Option<web::HtmlElement>,
    endpoint: Option<String>,
    state: Rc<Cell<SignupState>>,
}

fn html_by_id(document: &web::Document, id: &str) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|e| e.dyn_into::<web::HtmlElement>().ok())
}

impl Form {
    fn fit_width(&self) {
        let Some(measure) = &self.measure else {
            return;
        };
        let value = self.input.value();
        let text = if value.is_empty() {
            self.input.placeholder()
        } else {
            value
        };
        measure.set_text_content(Some(&text));
        let width = measure.offset_width() + 2;
        _ = self.input.style().set_property("width", &format!("{}px", width));
    }

    fn show_glow(&self) {
        let cl = self.input.class_list();
        _ = cl.remove_1(VALID_GLOW_CLASS);
        // reflow so the animation restarts
        _ = self.input.offset_width();
        _ = cl.add_1(VALID_GLOW_CLASS);
    }

    fn hide_glow(&self) {
        _ = self.input.class_list().remove_1(VALID_GLOW_CLASS);
    }

    /// Moves to `next` and reflects it on the input and the enter button.
    fn set_state(&self, next: SignupState) {
        let prev = self.state.replace(next);
        self.fit_width();
        _ = self
            .input
            .class_list()
            .toggle_with_force(PLACEHOLDER_CLASS, next == SignupState::Empty);
        if next == SignupState::Valid {
            if prev != SignupState::Valid {
                self.show_glow();
            }
        } else {
            self.hide_glow();
        }
        if let Some(enter) = &self.enter {
            enter.set_hidden(!next.submit_visible());
        }
    }

    fn show_message(&self, text: &str) {
        let Some(el) = &self.message else {
            return;
        };
        el.set_text_content(Some(text));
        _ = el.class_list().remove_1(MESSAGE_VALID_CLASS);
        _ = el.offset_width();
        _ = el.class_list().add_1(MESSAGE_VALID_CLASS);
        el.set_hidden(false);
    }

    fn hide_message(&self) {
        if let Some(el) = &self.message {
            el.set_hidden(true);
            _ = el.class_list().remove_1(MESSAGE_VALID_CLASS);
        }
    }

    fn submit(&self) {
        let Some(next) = self.state.get().on_submit() else {
            self.set_state(SignupState::from_input(&self.input.value()));
            return;
        };
        self.state.set(next);
        let email = self.input.value();

        if let Some(wrapper) = &self.wrapper {
            let style = wrapper.style();
            _ = style.set_property("transition", &format!("opacity {}s ease", SUBMIT_FADE_MS as f64 / 1000.0));
            _ = style.set_property("opacity", "0");
        }
        let form = self.clone();
        dom::set_timeout(SUBMIT_FADE_MS, move || {
            if let Some(wrapper) = &form.wrapper {
                _ = wrapper.style().set_property("display", "none");
            }
            if let Some(text) = form.state.get().message() {
                form.show_message(text);
            }
        });

        let form = self.clone();
        spawn_local(async move {
            let ok = match post(form.endpoint.as_deref(), &email).await {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("[signup] request failed: {:?}", e);
                    false
                }
            };
            let next = form.state.get().on_response(ok);
            form.state.set(next);
            if let Some(text) = next.message() {
                form.show_message(text);
            }
            if next == SignupState::Failed {
                dom::set_timeout(FAILURE_RESET_MS, move || form.reset_after_failure());
            }
        });
    }

    fn reset_after_failure(&self) {
        if let Some(wrapper) = &self.wrapper {
            let style = wrapper.style();
            _ = style.set_property("display", "");
            _ = style.set_property("opacity", "1");
        }
        self.hide_message();
        let value = self.input.value();
        let next = self.state.get().on_failure_timeout(&value);
        self.set_state(next);
    }
}

/// Fire-and-forget POST; an opaque `no-cors` response counts as success.
async fn post(endpoint: Option<&str>, email: &str) -> anyhow::Result<()> {
    let endpoint = endpoint.ok_or_else(|| anyhow::anyhow!("form has no {}", SUBSCRIBE_ENDPOINT_ATTR))?;
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let js = |e: JsValue| anyhow::anyhow!("{:?}", e);

    let headers = web::Headers::new().map_err(js)?;
    headers.set("Content-Type", "text/plain").map_err(js)?;
    let init = web::RequestInit::new();
    init.set_method("POST");
    init.set_mode(web::RequestMode::NoCors);
    init.set_headers(&headers);
    init.set_body(&JsValue::from_str(&request_body(email)));
    let request = web::Request::new_with_str_and_init(endpoint, &init).map_err(js)?;
    JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js)?;
    Ok(())
}

/// Wires the newsletter form once; repeated calls after page swaps are no-ops
/// for a form that is already initialised.
pub fn init_form(document: &web::Document) {
    let Some(form_el) = dom::query(document, SUBSCRIBE_FORM_SELECTOR) else {
        return;
    };
    if form_el.has_attribute(SUBSCRIBE_INITIALIZED_ATTR) {
        return;
    }
    _ = form_el.set_attribute(SUBSCRIBE_INITIALIZED_ATTR, "true");

    let Some(input) = document
        .get_element_by_id(EMAIL_INPUT_ID)
        .and_then(|e| e.dyn_into::<web::HtmlInputElement>().ok())
    else {
        return;
    };
    let endpoint = form_el
        .get_attribute(SUBSCRIBE_ENDPOINT_ATTR)
        .filter(|e| !e.is_empty());
    if endpoint.is_none() {
        log::warn!("[signup] form has no {}; submits will fail", SUBSCRIBE_ENDPOINT_ATTR);
    }
    let wrapper = form_el
        .query_selector(INPUT_WRAPPER_SELECTOR)
        .ok()
        .flatten()
        .and_then(|e| e.dyn_into::<web::HtmlElement>().ok());
    let measure = wrapper.as_ref().and_then(|w| {
        let span = document
            .create_element("span")
            .ok()?
            .dyn_into::<web::HtmlElement>()
            .ok()?;
        span.set_class_name(MEASURE_CLASS);
        _ = span.set_attribute("aria-hidden", "true");
        _ = w.append_child(&span);
        Some(span)
    });

    let form = Form {
        enter: html_by_id(document, ENTER_BUTTON_ID),
        message: html_by_id(document, MESSAGE_ID),
        state: Rc::new(Cell::new(SignupState::from_input(&input.value()))),
        input,
        wrapper,
        measure,
        endpoint,
    };
    form.set_state(form.state.get());
    form.hide_glow();

    let f = form.clone();
    dom::add_listener(&form.input, "focus", move |_: web::Event| {
        f.hide_glow();
        let next = f.state.get().on_input(&f.input.value());
        // focusing never replays the glow
        f.state.set(next);
        f.set_state(next);
    });

    let f = form.clone();
    dom::add_listener(&form.input, "input", move |_: web::Event| {
        let next = f.state.get().on_input(&f.input.value());
        f.set_state(next);
    });

    let f = form.clone();
    dom::add_listener(&form.input, "blur", move |_: web::Event| {
        if matches!(f.state.get(), SignupState::Submitting | SignupState::Succeeded) {
            return;
        }
        let value = f.input.value();
        if value.is_empty() || is_valid_email(&value) {
            // leaving a valid field replays the glow
            f.state.set(SignupState::Empty);
            f.set_state(SignupState::from_input(&value));
        }
    });

    let f = form.clone();
    dom::add_listener(&form.input, "keydown", move |ev: web::KeyboardEvent| {
        if ev.key() == "Enter" && f.state.get() == SignupState::Valid {
            ev.prevent_default();
            f.submit();
        }
    });

    if let Some(enter) = &form.enter {
        let f = form.clone();
        dom::add_listener(enter, "click", move |_: web::MouseEvent| {
            if f.state.get() == SignupState::Valid {
                f.submit();
            }
        });
    }

    if let Some(wrapper) = &form.wrapper {
        let f = form.clone();
        dom::add_listener(wrapper, "click", move |ev: web::MouseEvent| {
            let on_input = ev
                .target()
                .and_then(|t| t.dyn_into::<web::HtmlInputElement>().ok())
                .is_some_and(|t| t == f.input);
            if !on_input {
                _ = f.input.focus();
            }
        });
    }
    _ = form.input.focus();
    log::info!("[signup] form ready");
}
