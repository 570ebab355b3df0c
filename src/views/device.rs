// ============================================================================
// DEVICE VIEWS - Acceso del dispositivo (login + token) e instrucciones
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::dom::{ElementBuilder, append_child, on_click, on_submit, on_value};
use crate::state::AppState;
use crate::views::ViewContext;

fn finish(state: &AppState, message: String) {
    {
        let mut form = state.device_form.borrow_mut();
        form.login_pending = false;
        form.generating = false;
        form.message = Some(message);
    }
    state.notify_subscribers();
}

fn text_input(id: &str, input_type: &str, placeholder: &str, value: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("input")?
        .id(id)
        .class("form-input")
        .attr("type", input_type)?
        .attr("placeholder", placeholder)?
        .attr("value", value)?
        .build())
}

/// Login por email con el proveedor de identidad
fn render_login_form(ctx: &ViewContext) -> Result<Element, JsValue> {
    let state = &ctx.state;
    let form_state = state.device_form.borrow().clone();

    let form = ElementBuilder::new("form")?.class("device-form").build();
    append_child(&form, &ElementBuilder::new("h2")?.text("Sign in").build())?;
    append_child(
        &form,
        &ElementBuilder::new("p")?
            .text("Enter your email to receive a login link. Once signed in, a token for this device is generated automatically.")
            .build(),
    )?;

    let input = text_input("login-email", "email", "you@example.com", &form_state.email_input)?;
    {
        let state_clone = state.clone();
        on_value(&input, "input", move |v| state_clone.device_form.borrow_mut().email_input = v)?;
    }
    append_child(&form, &input)?;

    let submit = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .class("btn btn-primary")
        .flag("disabled", form_state.login_pending)?
        .text(if form_state.login_pending { "Waiting for login..." } else { "Send login link" })
        .build();
    append_child(&form, &submit)?;

    let state_clone = state.clone();
    let session = ctx.session.clone();
    on_submit(&form, move || {
        let email = state_clone.device_form.borrow().email_input.trim().to_string();
        if email.is_empty() {
            finish(&state_clone, "Please enter your email".to_string());
            return;
        }
        {
            let mut form = state_clone.device_form.borrow_mut();
            form.login_pending = true;
            form.message = None;
        }
        state_clone.notify_subscribers();

        let state_async = state_clone.clone();
        let session = session.clone();
        spawn_local(async move {
            let message = match session.login_with_email(&email).await {
                Ok(true) => "Signed in, token generated".to_string(),
                Ok(false) => "Signed in, but the token could not be generated".to_string(),
                Err(e) => {
                    log::error!("❌ Login falló: {}", e);
                    format!("Login failed: {}", e)
                }
            };
            finish(&state_async, message);
        });
    })?;

    Ok(form)
}

fn render_credentials(ctx: &ViewContext) -> Result<Element, JsValue> {
    let state = &ctx.state;
    let token = state.session.token();
    let profile = state.session.profile_id();
    let generating = state.device_form.borrow().generating;

    let panel = ElementBuilder::new("div")?.class("device-credentials").build();
    for (label, value) in [("Token", token.clone()), ("Profile", profile)] {
        let row = ElementBuilder::new("div")?
            .class("credential-row")
            .child(ElementBuilder::new("span")?.class("credential-label").text(label).build())?
            .child(
                ElementBuilder::new("code")?
                    .text(value.as_deref().unwrap_or("-"))
                    .build(),
            )?
            .build();
        append_child(&panel, &row)?;
    }

    if let Some(email) = state.session.email() {
        append_child(&panel, &ElementBuilder::new("p")?.text(&format!("Signed in as {}", email)).build())?;

        let generate = ElementBuilder::new("button")?
            .attr("type", "button")?
            .class("btn btn-primary")
            .flag("disabled", generating)?
            .text(if generating { "Generating..." } else { "Generate token" })
            .build();
        let state_clone = state.clone();
        let session = ctx.session.clone();
        on_click(&generate, move |_| {
            state_clone.device_form.borrow_mut().generating = true;
            state_clone.notify_subscribers();
            let state_async = state_clone.clone();
            let session = session.clone();
            spawn_local(async move {
                let message = if session.exchange_token().await {
                    "Token generated".to_string()
                } else {
                    "Token generation failed".to_string()
                };
                finish(&state_async, message);
            });
        })?;
        append_child(&panel, &generate)?;
    }

    if token.is_some() {
        let refresh = ElementBuilder::new("button")?
            .attr("type", "button")?
            .class("btn")
            .text("Refresh profile")
            .build();
        let session = ctx.session.clone();
        on_click(&refresh, move |_| {
            let session = session.clone();
            spawn_local(async move { session.refresh_profile().await });
        })?;
        append_child(&panel, &refresh)?;
    }

    Ok(panel)
}

/// Token introducido a mano (vacío = borrar)
fn render_token_form(ctx: &ViewContext) -> Result<Element, JsValue> {
    let state = &ctx.state;
    let token_input = state.device_form.borrow().token_input.clone();

    let form = ElementBuilder::new("form")?.class("device-form").build();
    append_child(&form, &ElementBuilder::new("h2")?.text("Use an existing token").build())?;

    let input = text_input("manual-token", "text", "Paste your token", &token_input)?;
    {
        let state_clone = state.clone();
        on_value(&input, "input", move |v| state_clone.device_form.borrow_mut().token_input = v)?;
    }
    append_child(&form, &input)?;

    let actions = ElementBuilder::new("div")?
        .class("form-actions")
        .child(
            ElementBuilder::new("button")?
                .attr("type", "submit")?
                .class("btn btn-primary")
                .text("Save token")
                .build(),
        )?
        .build();

    if state.session.token().is_some() {
        let clear = ElementBuilder::new("button")?
            .attr("type", "button")?
            .class("btn btn-danger")
            .text("Clear token")
            .build();
        let session = ctx.session.clone();
        on_click(&clear, move |_| {
            let session = session.clone();
            spawn_local(async move { session.set_token(String::new()).await });
        })?;
        append_child(&actions, &clear)?;
    }
    append_child(&form, &actions)?;

    let state_clone = state.clone();
    let session = ctx.session.clone();
    on_submit(&form, move || {
        let token = std::mem::take(&mut state_clone.device_form.borrow_mut().token_input);
        let token = token.trim().to_string();
        let session = session.clone();
        spawn_local(async move { session.set_token(token).await });
    })?;

    Ok(form)
}

pub fn render_device_add(ctx: &ViewContext) -> Result<Element, JsValue> {
    let page = ElementBuilder::new("div")?
        .class("device-page")
        .child(ElementBuilder::new("h1")?.text("Device access").build())?
        .build();

    if ctx.state.session.email().is_none() {
        append_child(&page, &render_login_form(ctx)?)?;
    }
    append_child(&page, &render_credentials(ctx)?)?;
    append_child(&page, &render_token_form(ctx)?)?;

    if let Some(message) = &ctx.state.device_form.borrow().message {
        append_child(&page, &ElementBuilder::new("div")?.class("form-message").text(message).build())?;
    }

    Ok(page)
}

pub fn render_add_device() -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("device-page")
        .child(ElementBuilder::new("h1")?.text("Add device").build())?
        .child(
            ElementBuilder::new("ol")?
                .class("steps")
                .html(r##"<li>Open <a href="#device-add" class="link">Device access</a> and sign in with your CUB email.</li><li>Generate a token, or paste one you already have.</li><li>Send the token in the <code>token</code> header and your profile ID in the <code>profile</code> header.</li>"##)
                .build(),
        )?
        .build())
}
