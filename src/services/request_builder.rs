// ============================================================================
// REQUEST BUILDER - Formulario "try it" → petición HTTP
// ============================================================================

use std::collections::HashMap;
use serde_json::{Map, Value};
use crate::models::endpoint::{EndpointDescriptor, HttpMethod, ParamKind, ParamLocation, ParamSpec};

/// Credenciales que acompañan a la petición (headers `token` / `profile`)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RequestCredentials {
    pub token: Option<String>,
    pub profile: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// Convierte el texto del input según el tipo declarado
fn typed_value(spec: &ParamSpec, raw: &str) -> Value {
    match spec.kind {
        ParamKind::Integer => raw
            .parse::<i64>()
            .map(Value::from)
            .unwrap_or_else(|_| Value::String(raw.to_string())),
        ParamKind::Boolean => match raw {
            "true" | "1" => Value::Bool(true),
            "false" | "0" => Value::Bool(false),
            _ => Value::String(raw.to_string()),
        },
        ParamKind::Object | ParamKind::Array => {
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
        }
        ParamKind::String => Value::String(raw.to_string()),
    }
}

/// Sustituye `:name` y `{name}` en el path
fn fill_path(
    descriptor: &EndpointDescriptor,
    values: &HashMap<String, String>,
) -> Result<String, String> {
    let mut path = descriptor.path.to_string();
    for spec in descriptor.params_in(ParamLocation::Path) {
        let value = values
            .get(spec.name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| format!("Missing path parameter '{}'", spec.name))?;
        let encoded = urlencoding::encode(value);
        path = path
            .replace(&format!(":{}", spec.name), &encoded)
            .replace(&format!("{{{}}}", spec.name), &encoded);
    }
    Ok(path)
}

/// Construye la petición a partir de los valores del formulario
pub fn build_request(
    descriptor: &EndpointDescriptor,
    values: &HashMap<String, String>,
    credentials: &RequestCredentials,
    base_url: &str,
) -> Result<PreparedRequest, String> {
    let path = fill_path(descriptor, values)?;
    let mut url = format!("{}{}", base_url.trim_end_matches('/'), path);

    let query: Vec<String> = descriptor
        .params_in(ParamLocation::Query)
        .filter_map(|spec| {
            let value = values.get(spec.name)?.trim();
            if value.is_empty() {
                return None;
            }
            Some(format!("{}={}", spec.name, urlencoding::encode(value)))
        })
        .collect();
    if !query.is_empty() {
        url.push('?');
        url.push_str(&query.join("&"));
    }

    let mut body_fields = Map::new();
    for spec in descriptor.params_in(ParamLocation::Body) {
        if let Some(raw) = values.get(spec.name).filter(|v| !v.trim().is_empty()) {
            body_fields.insert(spec.name.to_string(), typed_value(spec, raw.trim()));
        }
    }
    let body = match descriptor.method {
        HttpMethod::Post => Some(Value::Object(body_fields).to_string()),
        HttpMethod::Get => None,
    };

    let mut headers = vec![("content-type".to_string(), "application/json".to_string())];
    if let Some(token) = credentials.token.as_ref().filter(|t| !t.is_empty()) {
        headers.push(("token".to_string(), token.clone()));
    }
    if let Some(profile) = credentials.profile.as_ref().filter(|p| !p.is_empty()) {
        headers.push(("profile".to_string(), profile.clone()));
    }

    Ok(PreparedRequest {
        method: descriptor.method,
        url,
        headers,
        body,
    })
}

/// Valores iniciales del formulario (defaults + email de la sesión)
pub fn initial_values(
    descriptor: &EndpointDescriptor,
    session_email: Option<&str>,
) -> HashMap<String, String> {
    descriptor
        .params
        .iter()
        .map(|spec| {
            let value = match (spec.name, descriptor.email_default, session_email) {
                ("email", true, Some(email)) => email.to_string(),
                _ => spec.default_value.unwrap_or_default().to_string(),
            };
            (spec.name.to_string(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::catalog::find;

    fn creds() -> RequestCredentials {
        RequestCredentials {
            token: Some("abc123".into()),
            profile: Some("536380".into()),
        }
    }

    #[test]
    fn get_request_carries_query_and_headers() {
        let descriptor = find("bookmarks-all").unwrap();
        let values = initial_values(descriptor, None);
        let request = build_request(descriptor, &values, &creds(), "/api/").unwrap();

        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.url, "/api/bookmarks/all?full=0&type=book");
        assert!(request.body.is_none());
        assert!(request.headers.contains(&("token".into(), "abc123".into())));
        assert!(request.headers.contains(&("profile".into(), "536380".into())));
    }

    #[test]
    fn post_body_uses_declared_types() {
        let descriptor = find("bookmarks-remove").unwrap();
        let values = initial_values(descriptor, None);
        let request = build_request(descriptor, &values, &creds(), "/api").unwrap();

        let body: Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["id"], Value::from(9938938));
        assert_eq!(body["list"], serde_json::json!([455, 333]));
    }

    #[test]
    fn path_params_are_substituted() {
        let descriptor = find("reactions-get").unwrap();
        let values = initial_values(descriptor, None);
        let request = build_request(descriptor, &values, &RequestCredentials::default(), "/api").unwrap();
        assert_eq!(request.url, "/api/reactions/get/tv_125988");
        assert_eq!(request.headers.len(), 1);

        let descriptor = find("reactions-add").unwrap();
        let mut values = initial_values(descriptor, None);
        assert!(build_request(descriptor, &values, &creds(), "/api").is_err());
        values.insert("content_id".into(), "tv_1".into());
        values.insert("type".into(), "fire".into());
        let request = build_request(descriptor, &values, &creds(), "/api").unwrap();
        assert_eq!(request.url, "/api/reactions/add/tv_1/fire");
    }

    #[test]
    fn users_find_defaults_to_session_email() {
        let descriptor = find("users-find").unwrap();
        let values = initial_values(descriptor, Some("me@cub.rip"));
        assert_eq!(values["email"], "me@cub.rip");
        let request = build_request(descriptor, &values, &creds(), "/api").unwrap();
        assert_eq!(request.url, "/api/users/find?email=me%40cub.rip");

        let values = initial_values(descriptor, None);
        assert_eq!(values["email"], "test@example.com");
    }
}
