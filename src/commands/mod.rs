//! Tauri Command Wrappers
//!
//! Frontend bindings to backend commands, organized by domain.

mod insights;
mod stock;

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::models::CommandError;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "core"], catch)]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

// Re-export all public items
pub use insights::*;
pub use stock::*;

/// Invoke a command; a rejection carrying a `CommandError` is passed through,
/// anything else becomes a connection failure for `action`.
async fn call<A, T>(cmd: &str, args: &A, action: &str) -> Result<T, CommandError>
where
    A: Serialize,
    T: DeserializeOwned,
{
    // Plain objects, not Maps: the bridge JSON-encodes the arguments
    let js_args = args
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| {
            web_sys::console::error_1(&format!("[INSIGHTS] {} args: {}", cmd, e).into());
            CommandError::network(action)
        })?;

    match invoke(cmd, js_args).await {
        Ok(value) => serde_wasm_bindgen::from_value(value).map_err(|e| {
            web_sys::console::error_1(&format!("[INSIGHTS] {} response: {}", cmd, e).into());
            CommandError::network(action)
        }),
        Err(rejection) => Err(serde_wasm_bindgen::from_value::<CommandError>(rejection).unwrap_or_else(|_| {
            web_sys::console::error_1(&format!("[INSIGHTS] {} transport failure", cmd).into());
            CommandError::network(action)
        })),
    }
}
