mod command;
mod config;
mod controller;
mod coupling;
mod entity;
mod error;
mod host;
mod localize;
mod memory;
mod presenter;
mod render;
mod row;

pub use command::ServiceCall;
pub use config::RowConfig;
pub use controller::{Controller, EntityController, EntityKind, Range};
pub use coupling::{CouplingRule, CouplingRules};
pub use entity::{EntityId, StateSnapshot};
pub use error::ConfigError;
pub use host::{BrowserStorage, HassLocalize, JsStorage};
pub use localize::{EnglishLocalizer, Localizer};
pub use memory::{InMemoryStore, KeyValueStore, VisibilityMemory};
pub use presenter::{FULL_ROW_HIDE_WIDTH, INLINE_HIDE_WIDTH, Visibility};
pub use render::{Direction, RowContent, RowView, SliderView, ToggleView};
pub use row::SliderRow;

use serde::Serialize;
use wasm_bindgen::prelude::*;

/// The WASM-exposed slider row.
/// The TypeScript custom element creates one of these per row and forwards
/// `hass` updates, resizes and slider/toggle events to it.
#[wasm_bindgen]
pub struct WasmSliderRow {
    inner: SliderRow<BrowserStorage>,
}

#[wasm_bindgen]
impl WasmSliderRow {
    /// Create a row from its JSON config. Throws on a missing entity or an
    /// unsupported entity kind.
    #[wasm_bindgen(constructor)]
    pub fn new(config: &str, storage: JsStorage) -> Result<WasmSliderRow, JsError> {
        let config = RowConfig::from_json(config)?;
        let inner = SliderRow::new(config, BrowserStorage::new(storage))?;
        Ok(Self { inner })
    }

    /// Replace the config. Throws and keeps the old config when invalid.
    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&mut self, config: &str) -> Result<(), JsError> {
        let config = RowConfig::from_json(config)?;
        self.inner.set_config(config)?;
        Ok(())
    }

    /// Report the parent's width after a layout pass.
    #[wasm_bindgen]
    pub fn resized(&mut self, width: f64) {
        self.inner.resized(width);
    }

    /// Render the row and return a JSON `RowView`.
    ///
    /// `state_json` is the entity's state object from `hass.states`, or
    /// `null` when the entity does not exist.
    #[wasm_bindgen]
    pub fn render(&mut self, state_json: &str, hass: &HassLocalize) -> String {
        let snapshot = match serde_json::from_str::<Option<StateSnapshot>>(state_json) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::warn!(error = %err, "malformed state snapshot, treating entity as missing");
                None
            }
        };
        let view = self.inner.render(snapshot, hass);
        to_json(&view).unwrap_or_else(|| r#"{"type":"empty"}"#.to_string())
    }

    /// The slider was released at `value`. Returns a JSON `ServiceCall` for
    /// `hass.callService`, or `undefined` when nothing needs writing.
    #[wasm_bindgen(js_name = sliderChanged)]
    pub fn slider_changed(&mut self, value: f64) -> Option<String> {
        self.inner.slider_changed(value).and_then(|call| to_json(&call))
    }

    /// The toggle was tapped. Same contract as `sliderChanged`.
    #[wasm_bindgen]
    pub fn toggle(&self) -> Option<String> {
        self.inner.toggle().and_then(|call| to_json(&call))
    }
}

fn to_json<T: Serialize>(value: &T) -> Option<String> {
    serde_json::to_string(value)
        .inspect_err(|err| tracing::warn!(error = %err, "serialization failed"))
        .ok()
}
