// ============================================================================
// ENDPOINT MODEL - Descriptores estáticos de la documentación
// ============================================================================

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dónde viaja un parámetro
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    Query,
    Body,
    Path,
}

impl ParamLocation {
    pub fn label(&self) -> &'static str {
        match self {
            ParamLocation::Query => "Query parameters",
            ParamLocation::Body => "Body parameters",
            ParamLocation::Path => "Path parameters",
        }
    }
}

/// Tipo declarado del parámetro (decide cómo se serializa en el body)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Integer,
    Boolean,
    Object,
    Array,
}

impl ParamKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Integer => "integer",
            ParamKind::Boolean => "boolean",
            ParamKind::Object => "object",
            ParamKind::Array => "array",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub location: ParamLocation,
    /// Puede contener HTML inline (enlaces, badges)
    pub description: &'static str,
    pub default_value: Option<&'static str>,
    pub options: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorCode {
    pub status: u16,
    pub description: &'static str,
}

/// Nota mostrada sobre el formulario
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub title: &'static str,
    pub content: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EndpointDescriptor {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub method: HttpMethod,
    pub path: &'static str,
    pub params: &'static [ParamSpec],
    /// JSON compacto; se formatea al renderizar
    pub example_response: &'static str,
    pub requires_auth: bool,
    pub error_codes: &'static [ErrorCode],
    pub note: Note,
    pub default_status: u16,
    /// El campo `email` se rellena con el email de la sesión
    pub email_default: bool,
}

impl EndpointDescriptor {
    /// Fragmento de navegación (`#bookmarks-all`)
    pub fn fragment(&self) -> String {
        format!("#{}", self.key)
    }

    /// Sección del sidebar: primer segmento del path
    pub fn section(&self) -> &'static str {
        self.path
            .trim_start_matches('/')
            .split('/')
            .next()
            .unwrap_or(self.path)
    }

    pub fn params_in(&self, location: ParamLocation) -> impl Iterator<Item = &ParamSpec> {
        self.params.iter().filter(move |p| p.location == location)
    }

    /// Ejemplo de respuesta con indentación de 2 espacios
    pub fn pretty_example(&self) -> String {
        serde_json::from_str::<serde_json::Value>(self.example_response)
            .and_then(|v| serde_json::to_string_pretty(&v))
            .unwrap_or_else(|_| self.example_response.to_string())
    }
}
