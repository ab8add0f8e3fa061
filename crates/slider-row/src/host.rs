//! Bindings to the browser objects the row talks to: `localStorage` for the
//! visibility memory and `hass.localize` for user-facing strings.

use wasm_bindgen::prelude::*;

use crate::localize::{EnglishLocalizer, Localizer};
use crate::memory::KeyValueStore;
use crate::render::Direction;

#[wasm_bindgen]
extern "C" {
    /// A Web Storage object (`window.localStorage`).
    pub type JsStorage;

    #[wasm_bindgen(method, js_name = getItem)]
    fn get_item(this: &JsStorage, key: &str) -> Option<String>;

    #[wasm_bindgen(method, catch, js_name = setItem)]
    fn set_item(this: &JsStorage, key: &str, value: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = removeItem)]
    fn remove_item(this: &JsStorage, key: &str);

    #[wasm_bindgen(method, getter)]
    fn length(this: &JsStorage) -> u32;

    #[wasm_bindgen(method)]
    fn key(this: &JsStorage, index: u32) -> Option<String>;

    /// The `hass` object, or anything else with a compatible `localize`.
    pub type HassLocalize;

    #[wasm_bindgen(method, js_name = localize)]
    fn localize_key(this: &HassLocalize, key: &str) -> Option<String>;

    #[wasm_bindgen(method, js_name = localize)]
    fn localize_with(this: &HassLocalize, key: &str, name: &str, value: &str) -> Option<String>;
}

#[wasm_bindgen(inline_js = r#"
export function hass_is_rtl(hass) {
    const meta = hass.translationMetadata;
    const lang = meta && meta.translations && meta.translations[hass.language || "en"];
    return !!(lang && lang.isRTL);
}
"#)]
extern "C" {
    fn hass_is_rtl(hass: &HassLocalize) -> bool;
}

/// `localStorage` as the visibility memory's backing store.
pub struct BrowserStorage(JsStorage);

impl BrowserStorage {
    pub fn new(storage: JsStorage) -> Self {
        Self(storage)
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get_item(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        // Quota or privacy-mode failures only cost us the coupling hint.
        if let Err(err) = self.0.set_item(key, value) {
            tracing::warn!(key, error = ?err, "localStorage write failed");
        }
    }

    fn remove(&mut self, key: &str) {
        self.0.remove_item(key);
    }

    fn keys(&self) -> Vec<String> {
        (0..self.0.length()).filter_map(|i| self.0.key(i)).collect()
    }
}

impl Localizer for HassLocalize {
    fn localize(&self, key: &str, args: &[(&str, &str)]) -> String {
        let text = match args {
            [] => self.localize_key(key),
            [(name, value), ..] => self.localize_with(key, name, value),
        };
        // Translations not loaded yet come back empty.
        match text {
            Some(text) if !text.is_empty() => text,
            _ => EnglishLocalizer.localize(key, args),
        }
    }

    fn direction(&self) -> Direction {
        if hass_is_rtl(self) {
            Direction::Rtl
        } else {
            Direction::Ltr
        }
    }
}
