// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use crate::models::endpoint::EndpointDescriptor;
use crate::routing::{resolve, Route};
use crate::services::api_client::RawResponse;
use crate::services::request_builder::initial_values;
use crate::state::SessionState;

/// Sidebar fijo o cajón según el ancho de la ventana
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub sidebar_open: bool,
    pub is_mobile: bool,
}

/// Por debajo del breakpoint el sidebar se cierra y pasa a ser un cajón
pub fn layout_for_width(width: f64, breakpoint_px: u32) -> Layout {
    let is_large = width >= f64::from(breakpoint_px);
    Layout {
        sidebar_open: is_large,
        is_mobile: !is_large,
    }
}

/// Formulario "try it" del endpoint visible
#[derive(Debug, Clone, Default)]
pub struct TryItState {
    pub endpoint_key: Option<&'static str>,
    pub values: HashMap<String, String>,
    pub sending: bool,
    pub response: Option<RawResponse>,
    pub error: Option<String>,
}

/// Formularios de la página del dispositivo
#[derive(Debug, Clone, Default)]
pub struct DeviceFormState {
    pub email_input: String,
    pub token_input: String,
    pub login_pending: bool,
    pub generating: bool,
    pub message: Option<String>,
}

/// Estado global de la aplicación
#[derive(Clone)]
pub struct AppState {
    pub session: SessionState,

    // Navegación
    pub route: Rc<RefCell<Route>>,

    // Layout
    pub sidebar_open: Rc<RefCell<bool>>,
    pub is_mobile: Rc<RefCell<bool>>,

    // Formularios
    pub try_it: Rc<RefCell<TryItState>>,
    pub device_form: Rc<RefCell<DeviceFormState>>,

    // Reactivity: Callbacks para notificar cambios
    pub change_subscribers: Rc<RefCell<Vec<Rc<dyn Fn()>>>>,
}

impl AppState {
    /// Estado inicial a partir del fragmento y el ancho de la ventana
    pub fn new(hash: &str, width: f64, breakpoint_px: u32) -> Self {
        let layout = layout_for_width(width, breakpoint_px);
        Self {
            session: SessionState::new(),
            route: Rc::new(RefCell::new(resolve(hash))),
            sidebar_open: Rc::new(RefCell::new(layout.sidebar_open)),
            is_mobile: Rc::new(RefCell::new(layout.is_mobile)),
            try_it: Rc::new(RefCell::new(TryItState::default())),
            device_form: Rc::new(RefCell::new(DeviceFormState::default())),
            change_subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Suscribirse a cambios de estado
    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.change_subscribers.borrow_mut().push(Rc::new(callback));
    }

    /// Notificar a todos los subscribers de cambios
    pub fn notify_subscribers(&self) {
        let callbacks: Vec<Rc<dyn Fn()>> = self.change_subscribers.borrow().clone();
        for callback in callbacks {
            callback();
        }
    }

    pub fn current_route(&self) -> Route {
        self.route.borrow().clone()
    }

    /// Navegación por `hashchange`; en móvil cierra el cajón
    pub fn navigate(&self, hash: &str) {
        let route = resolve(hash);
        log::debug!("🧭 Ruta: {} → {:?}", hash, route.fragment());
        *self.route.borrow_mut() = route;
        if *self.is_mobile.borrow() {
            *self.sidebar_open.borrow_mut() = false;
        }
        self.notify_subscribers();
    }

    pub fn toggle_sidebar(&self) {
        let open = !*self.sidebar_open.borrow();
        *self.sidebar_open.borrow_mut() = open;
        self.notify_subscribers();
    }

    /// `resize`: solo notifica si cambia de modo
    pub fn apply_width(&self, width: f64, breakpoint_px: u32) {
        let layout = layout_for_width(width, breakpoint_px);
        if *self.is_mobile.borrow() == layout.is_mobile {
            return;
        }
        *self.sidebar_open.borrow_mut() = layout.sidebar_open;
        *self.is_mobile.borrow_mut() = layout.is_mobile;
        self.notify_subscribers();
    }

    /// Prepara el formulario del endpoint si es otro distinto al actual
    pub fn ensure_try_it(&self, descriptor: &'static EndpointDescriptor) {
        let mut try_it = self.try_it.borrow_mut();
        if try_it.endpoint_key == Some(descriptor.key) {
            return;
        }
        let email = self.session.email();
        *try_it = TryItState {
            endpoint_key: Some(descriptor.key),
            values: initial_values(descriptor, email.as_deref()),
            ..TryItState::default()
        };
    }

    /// Cambio en un input: sin re-render para no perder el foco
    pub fn set_try_it_value(&self, name: &str, value: String) {
        self.try_it.borrow_mut().values.insert(name.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::catalog::find;
    use std::cell::Cell;

    #[test]
    fn breakpoint_switches_to_drawer() {
        assert_eq!(layout_for_width(1024.0, 1024), Layout { sidebar_open: true, is_mobile: false });
        assert_eq!(layout_for_width(1023.0, 1024), Layout { sidebar_open: false, is_mobile: true });
    }

    #[test]
    fn resize_notifies_only_on_mode_change() {
        let state = AppState::new("#home", 1280.0, 1024);
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        state.subscribe_to_changes(move || counter.set(counter.get() + 1));

        state.apply_width(1100.0, 1024);
        assert_eq!(calls.get(), 0);
        state.apply_width(800.0, 1024);
        assert_eq!(calls.get(), 1);
        assert!(*state.is_mobile.borrow());
        assert!(!*state.sidebar_open.borrow());
    }

    #[test]
    fn navigation_on_mobile_closes_drawer() {
        let state = AppState::new("", 600.0, 1024);
        assert_eq!(state.current_route(), Route::Home);
        state.toggle_sidebar();
        assert!(*state.sidebar_open.borrow());

        state.navigate("#users-get");
        assert!(!*state.sidebar_open.borrow());
        assert!(matches!(state.current_route(), Route::Endpoint(d) if d.key == "users-get"));
    }

    #[test]
    fn try_it_form_keeps_edits_for_same_endpoint() {
        let state = AppState::new("#bookmarks-all", 1280.0, 1024);
        let descriptor = find("bookmarks-all").unwrap();
        state.ensure_try_it(descriptor);
        state.set_try_it_value("type", "like".into());
        state.ensure_try_it(descriptor);
        assert_eq!(state.try_it.borrow().values["type"], "like");

        state.ensure_try_it(find("timeline-all").unwrap());
        assert_eq!(state.try_it.borrow().values["full"], "false");
        assert!(!state.try_it.borrow().values.contains_key("type"));
    }
}
