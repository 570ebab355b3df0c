// ============================================================================
// HOME VIEW - Introducción a la API
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::config::CONFIG;
use crate::dom::{ElementBuilder, append_child};

fn section(id: &str, title: Option<&str>, body_html: &str) -> Result<Element, JsValue> {
    let section = ElementBuilder::new("section")?.id(id).class("doc-section").build();
    if let Some(title) = title {
        let tag = if id == "home" { "h1" } else { "h2" };
        append_child(&section, &ElementBuilder::new(tag)?.text(title).build())?;
    }
    append_child(&section, &ElementBuilder::new("div")?.class("prose").html(body_html).build())?;
    Ok(section)
}

/// Ejemplo con `fetch` contra la URL pública
fn example_request(base_url: &str) -> String {
    format!(
        "fetch('{}/bookmarks/all', {{\n  method: 'GET',\n  headers: {{\n    'content-type': 'application/json',\n    'token': 'YOUR_ACCESS_TOKEN',\n    'profile': 'YOUR_PROFILE_ID'\n  }}\n}})\n  .then(response => response.json())\n  .then(json => {{\n    console.log(json);\n  }})\n  .catch(error => {{\n    console.error(error);\n  }});\n",
        base_url.trim_end_matches('/')
    )
}

pub fn render_home() -> Result<Element, JsValue> {
    let base_url = CONFIG.public_api_url.trim_end_matches('/');
    let page = ElementBuilder::new("div")?.class("home").build();

    append_child(&page, &section(
        "home",
        Some("Welcome to the API"),
        "<p>CUB REST API allows you to interact with CUB programmatically. Use this API to build applications, integrations, or automation scripts. This page documents the REST resources available on CUB, including HTTP response codes and request &amp; response examples.</p>",
    )?)?;

    append_child(&page, &section(
        "auth",
        Some("Authentication & Authorization"),
        r##"<p>To access the API, you must be authenticated. Obtain an access token by <a href="#device-add" class="link">authorizing your device</a>. The token should be sent in the <code>token</code> header. Some API methods require the <code>profile</code> header with your user profile ID.</p>"##,
    )?)?;

    append_child(&page, &section(
        "requests",
        Some("Making Requests"),
        &format!(
            "<p>All API requests use the <code>https</code> protocol (or <code>http</code>), and should be sent to <code>{}/</code>. All responses are in JSON format.</p>",
            base_url
        ),
    )?)?;

    append_child(&page, &section(
        "premium",
        Some("Premium API"),
        r#"<p>Some API methods require a premium account. For access, <a href="https://cub.rip/premium" class="link" rel="noopener noreferrer" target="_blank">get premium here</a>.</p>"#,
    )?)?;

    let example = section(
        "example",
        Some("Example Request"),
        "<p>Here is an example API call using JavaScript <code>fetch</code>:</p>",
    )?;
    let code = ElementBuilder::new("pre")?
        .class("code-block")
        .child(ElementBuilder::new("code")?.text(&example_request(base_url)).build())?
        .build();
    append_child(&example, &code)?;
    append_child(&page, &example)?;

    let warning = ElementBuilder::new("div")?
        .class("callout")
        .child(ElementBuilder::new("div")?.class("callout-title").text("Attention").build())?
        .child(
            ElementBuilder::new("div")?
                .text("In some countries API access may be blocked. If you have trouble connecting, use a VPN service or one of the available cub.rip mirrors.")
                .build(),
        )?
        .build();
    append_child(&page, &ElementBuilder::new("section")?.id("warning").class("doc-section").child(warning)?.build())?;

    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_request_targets_public_api() {
        let snippet = example_request("https://cub.rip/api/");
        assert!(snippet.starts_with("fetch('https://cub.rip/api/bookmarks/all'"));
        assert!(snippet.contains("'token': 'YOUR_ACCESS_TOKEN'"));
        assert!(snippet.contains("'profile': 'YOUR_PROFILE_ID'"));
    }
}
