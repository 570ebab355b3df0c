// ============================================================================
// ELEMENT BUILDER - Construcción encadenada de nodos
// ============================================================================
// Los métodos que tocan el DOM y pueden fallar devuelven Result
// para encadenar con `?` desde las vistas
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{create_element, set_class_name, set_text_content, append_child, set_attribute};

pub struct ElementBuilder {
    element: Element,
}

impl ElementBuilder {
    pub fn new(tag: &str) -> Result<Self, JsValue> {
        create_element(tag).map(|element| Self { element })
    }

    /// Clases base (reemplaza las existentes)
    pub fn class(self, class: &str) -> Self {
        set_class_name(&self.element, class);
        self
    }

    /// Añade una clase solo si `on` (enlace activo, cajón abierto)
    pub fn class_if(self, class: &str, on: bool) -> Result<Self, JsValue> {
        if on {
            self.element.class_list().add_1(class)?;
        }
        Ok(self)
    }

    pub fn id(self, id: &str) -> Self {
        self.element.set_id(id);
        self
    }

    pub fn text(self, text: &str) -> Self {
        set_text_content(&self.element, text);
        self
    }

    /// Markup estático del catálogo y de la portada, nunca datos del usuario
    pub fn html(self, markup: &str) -> Self {
        self.element.set_inner_html(markup);
        self
    }

    pub fn child(self, child: Element) -> Result<Self, JsValue> {
        append_child(&self.element, &child)?;
        Ok(self)
    }

    pub fn attr(self, name: &str, value: &str) -> Result<Self, JsValue> {
        set_attribute(&self.element, name, value)?;
        Ok(self)
    }

    /// Atributo booleano (`disabled`, `selected`): presente solo si `on`
    pub fn flag(self, name: &str, on: bool) -> Result<Self, JsValue> {
        if on {
            set_attribute(&self.element, name, "")?;
        }
        Ok(self)
    }

    pub fn build(self) -> Element {
        self.element
    }
}
