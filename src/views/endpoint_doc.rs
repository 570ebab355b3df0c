// ============================================================================
// ENDPOINT DOC VIEW - Documentación + formulario de pruebas
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::dom::{ElementBuilder, append_child, on_submit, on_value};
use crate::models::endpoint::{EndpointDescriptor, ParamKind, ParamLocation, ParamSpec};
use crate::routing::router::DEVICE_ADD_FRAGMENT;
use crate::state::AppState;
use crate::viewmodels::{EndpointAccess, RequestViewModel};
use crate::views::ViewContext;

const LOCATIONS: [ParamLocation; 3] = [ParamLocation::Path, ParamLocation::Query, ParamLocation::Body];

pub fn render_endpoint(
    ctx: &ViewContext,
    descriptor: &'static EndpointDescriptor,
    access: &EndpointAccess,
) -> Result<Element, JsValue> {
    let page = ElementBuilder::new("article")?.class("endpoint").build();

    append_child(&page, &ElementBuilder::new("h1")?.text(descriptor.title).build())?;
    append_child(&page, &ElementBuilder::new("p")?.class("endpoint-description").text(descriptor.description).build())?;

    let signature = ElementBuilder::new("div")?
        .class("endpoint-signature")
        .child(
            ElementBuilder::new("span")?
                .class(&format!("method method-{}", descriptor.method.as_str().to_lowercase()))
                .text(descriptor.method.as_str())
                .build(),
        )?
        .child(ElementBuilder::new("code")?.text(descriptor.path).build())?
        .build();
    append_child(&page, &signature)?;

    if !descriptor.note.title.is_empty() {
        let note = ElementBuilder::new("div")?
            .class("callout")
            .child(ElementBuilder::new("div")?.class("callout-title").text(descriptor.note.title).build())?
            .child(ElementBuilder::new("div")?.html(descriptor.note.content).build())?
            .build();
        append_child(&page, &note)?;
    }

    for location in LOCATIONS {
        if descriptor.params_in(location).next().is_some() {
            append_child(&page, &render_params_table(descriptor, location)?)?;
        }
    }

    match access {
        EndpointAccess::AuthRequired => append_child(&page, &render_auth_required()?)?,
        EndpointAccess::Ready(_) => append_child(&page, &render_try_it(ctx, descriptor)?)?,
    }

    if !descriptor.error_codes.is_empty() {
        append_child(&page, &render_errors(descriptor)?)?;
    }

    let example = ElementBuilder::new("section")?
        .class("doc-section")
        .child(ElementBuilder::new("h3")?.text(&format!("Example response ({})", descriptor.default_status)).build())?
        .child(
            ElementBuilder::new("pre")?
                .class("code-block")
                .child(ElementBuilder::new("code")?.text(&descriptor.pretty_example()).build())?
                .build(),
        )?
        .build();
    append_child(&page, &example)?;

    Ok(page)
}

fn cell(tag: &str, text: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new(tag)?.text(text).build())
}

fn render_params_table(descriptor: &EndpointDescriptor, location: ParamLocation) -> Result<Element, JsValue> {
    let section = ElementBuilder::new("section")?
        .class("doc-section")
        .child(ElementBuilder::new("h3")?.text(location.label()).build())?
        .build();

    let table = ElementBuilder::new("table")?.class("params").build();
    let head = ElementBuilder::new("tr")?
        .child(cell("th", "Name")?)?
        .child(cell("th", "Type")?)?
        .child(cell("th", "Description")?)?
        .build();
    append_child(&table, &head)?;

    for spec in descriptor.params_in(location) {
        let description = ElementBuilder::new("td")?.html(spec.description).build();
        if !spec.options.is_empty() {
            let chips = ElementBuilder::new("div")?.class("chips").build();
            for option in spec.options {
                append_child(&chips, &ElementBuilder::new("span")?.class("chip").text(option).build())?;
            }
            append_child(&description, &chips)?;
        }
        if let Some(default) = spec.default_value.filter(|d| !d.is_empty()) {
            append_child(
                &description,
                &ElementBuilder::new("div")?.class("default").text(&format!("Default: {}", default)).build(),
            )?;
        }
        let row = ElementBuilder::new("tr")?
            .child(ElementBuilder::new("td")?.child(cell("code", spec.name)?)?.build())?
            .child(cell("td", spec.kind.as_str())?)?
            .child(description)?
            .build();
        append_child(&table, &row)?;
    }

    append_child(&section, &table)?;
    Ok(section)
}

fn render_errors(descriptor: &EndpointDescriptor) -> Result<Element, JsValue> {
    let table = ElementBuilder::new("table")?
        .class("params")
        .child(
            ElementBuilder::new("tr")?
                .child(cell("th", "Code")?)?
                .child(cell("th", "Description")?)?
                .build(),
        )?
        .build();
    for error in descriptor.error_codes {
        let row = ElementBuilder::new("tr")?
            .child(cell("td", &error.status.to_string())?)?
            .child(cell("td", error.description)?)?
            .build();
        append_child(&table, &row)?;
    }
    Ok(ElementBuilder::new("section")?
        .class("doc-section")
        .child(ElementBuilder::new("h3")?.text("Errors").build())?
        .child(table)?
        .build())
}

fn render_auth_required() -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("callout auth-required")
        .child(ElementBuilder::new("div")?.class("callout-title").text("Authorization required").build())?
        .child(
            ElementBuilder::new("div")?
                .html(&format!(
                    r#"Enter your token to try this method. If you don't have one, you can <a href="{}" class="link">get it here</a>."#,
                    DEVICE_ADD_FRAGMENT
                ))
                .build(),
        )?
        .build())
}

/// Control del formulario según el tipo del parámetro
fn render_control(state: &AppState, spec: &'static ParamSpec, value: &str) -> Result<Element, JsValue> {
    let id = format!("param-{}", spec.name);
    let (control, event) = match spec.kind {
        ParamKind::Object | ParamKind::Array => {
            let area = ElementBuilder::new("textarea")?
                .id(&id)
                .class("form-input mono")
                .attr("rows", "3")?
                .text(value)
                .build();
            (area, "input")
        }
        _ if !spec.options.is_empty() => {
            let select = ElementBuilder::new("select")?.id(&id).class("form-input").build();
            if !spec.options.contains(&value) {
                let placeholder = ElementBuilder::new("option")?
                    .attr("value", "")?
                    .flag("selected", true)?
                    .text("Select...")
                    .build();
                append_child(&select, &placeholder)?;
            }
            for option in spec.options {
                let element = ElementBuilder::new("option")?
                    .attr("value", option)?
                    .flag("selected", *option == value)?
                    .text(option)
                    .build();
                append_child(&select, &element)?;
            }
            (select, "change")
        }
        _ => {
            let input = ElementBuilder::new("input")?
                .id(&id)
                .class("form-input")
                .attr("type", "text")?
                .attr("value", value)?
                .build();
            (input, "input")
        }
    };

    let state_clone = state.clone();
    on_value(&control, event, move |v| state_clone.set_try_it_value(spec.name, v))?;

    Ok(ElementBuilder::new("div")?
        .class("form-group")
        .child(ElementBuilder::new("label")?.attr("for", &id)?.text(spec.name).build())?
        .child(control)?
        .build())
}

fn render_try_it(ctx: &ViewContext, descriptor: &'static EndpointDescriptor) -> Result<Element, JsValue> {
    let state = &ctx.state;
    state.ensure_try_it(descriptor);
    let try_it = state.try_it.borrow().clone();
    let credentials = state.session.credentials();

    let section = ElementBuilder::new("section")?
        .class("doc-section try-it")
        .child(ElementBuilder::new("h3")?.text("Try it").build())?
        .build();

    let form = ElementBuilder::new("form")?.class("try-it-form").build();

    let headers = ElementBuilder::new("div")?.class("request-headers").build();
    for (name, value) in [("token", credentials.token), ("profile", credentials.profile)] {
        let line = ElementBuilder::new("div")?
            .child(cell("code", name)?)?
            .child(cell("span", &value.unwrap_or_else(|| "-".to_string()))?)?
            .build();
        append_child(&headers, &line)?;
    }
    append_child(&form, &headers)?;

    for spec in descriptor.params {
        let value = try_it.values.get(spec.name).cloned().unwrap_or_default();
        append_child(&form, &render_control(state, spec, &value)?)?;
    }

    let submit = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .class("btn btn-primary")
        .flag("disabled", try_it.sending)?
        .text(if try_it.sending { "Sending..." } else { "Send request" })
        .build();
    append_child(&form, &submit)?;

    {
        let state_clone = state.clone();
        on_submit(&form, move || {
            let vm = RequestViewModel::new(state_clone.clone());
            let request = vm.prepare(descriptor);
            state_clone.notify_subscribers();
            if let Some(request) = request {
                spawn_local(async move { vm.send(descriptor, request).await });
            }
        })?;
    }
    append_child(&section, &form)?;

    if let Some(error) = &try_it.error {
        append_child(&section, &ElementBuilder::new("div")?.class("form-error").text(error).build())?;
    }

    if let Some(response) = &try_it.response {
        let class = if response.is_success() { "status status-ok" } else { "status status-error" };
        let result = ElementBuilder::new("div")?
            .class("try-it-response")
            .child(
                ElementBuilder::new("div")?
                    .class(class)
                    .text(&format!("{} {}", response.status, response.status_text))
                    .build(),
            )?
            .child(
                ElementBuilder::new("pre")?
                    .class("code-block")
                    .child(ElementBuilder::new("code")?.text(&response.pretty_body()).build())?
                    .build(),
            )?
            .build();
        append_child(&section, &result)?;
    }

    Ok(section)
}
