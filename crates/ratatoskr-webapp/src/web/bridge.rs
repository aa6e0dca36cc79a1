//! `Telegram.WebApp.sendData`.

use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

use crate::submit::HostBridge;

/// Bridge to the Telegram Web App object injected by `telegram-web-app.js`.
#[derive(Debug, Clone)]
pub struct TelegramBridge {
    window: web_sys::Window,
}

impl TelegramBridge {
    pub fn new(window: web_sys::Window) -> Self {
        Self { window }
    }

    fn web_app(&self) -> Result<JsValue, JsValue> {
        let telegram = Reflect::get(&self.window, &JsValue::from_str("Telegram"))?;
        let web_app = Reflect::get(&telegram, &JsValue::from_str("WebApp"))?;
        if web_app.is_undefined() {
            return Err(JsValue::from_str("Telegram.WebApp is not defined"));
        }
        Ok(web_app)
    }

    fn call_send_data(&self, data: &str) -> Result<(), JsValue> {
        let web_app = self.web_app()?;
        let send_data: Function = Reflect::get(&web_app, &JsValue::from_str("sendData"))?
            .dyn_into()
            .map_err(|_| JsValue::from_str("Telegram.WebApp.sendData is not a function"))?;
        send_data.call1(&web_app, &JsValue::from_str(data))?;
        Ok(())
    }
}

impl HostBridge for TelegramBridge {
    fn send_data(&self, data: &str) {
        // The host closes the web app on success; nothing to report back.
        if let Err(e) = self.call_send_data(data) {
            tracing::error!(error = ?e, "sendData failed");
        }
    }
}
