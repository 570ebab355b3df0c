// ============================================================================
// MAGIC FFI - Foreign Function Interface para el SDK de Magic
// ============================================================================
// Solo wrappers para funciones JS definidas en index.html - Sin estado
// Todas devuelven una Promise
// ============================================================================

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_name = cubMagicInit)]
    pub fn magic_init(publishable_key: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_name = cubMagicIsLoggedIn)]
    pub fn magic_is_logged_in() -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(catch, js_name = cubMagicGetIdToken)]
    pub fn magic_get_id_token() -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(catch, js_name = cubMagicGetInfo)]
    pub fn magic_get_info() -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(catch, js_name = cubMagicLogout)]
    pub fn magic_logout() -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(catch, js_name = cubMagicLoginWithEmail)]
    pub fn magic_login_with_email(email: &str) -> Result<js_sys::Promise, JsValue>;
}
