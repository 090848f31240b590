//! JavaScript facade for the browser host.
//!
//! Exposes a [`Session`] to the tree widget and code editor. Ids travel as
//! strings, structured values as plain JS objects.

use wasm_bindgen::prelude::*;

use crate::config::{self, StorageOptions};
use crate::core::{ExportStyle, Session};
use crate::models::{NodeId, NodeType, Pane};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// Editor session handle owned by the JS host.
#[wasm_bindgen(js_name = Session)]
pub struct WasmSession {
    inner: Session,
}

#[wasm_bindgen(js_class = Session)]
impl WasmSession {
    /// Create a session over the default seed. `options` may be omitted.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<WasmSession, JsError> {
        let options = if options.is_undefined() || options.is_null() {
            StorageOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options)?
        };
        Ok(Self {
            inner: Session::new(config::default_seed(), options),
        })
    }

    pub fn snapshot(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.snapshot())?)
    }

    pub fn selection(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(self.inner.selection())?)
    }

    /// Insert a `"file"` or `"directory"` under `parent`; returns the new id.
    pub fn insert(&mut self, parent: &str, kind: JsValue) -> Result<String, JsError> {
        let kind: NodeType = serde_wasm_bindgen::from_value(kind)?;
        let id = self.inner.insert(parent.parse()?, kind)?;
        Ok(id.to_string())
    }

    pub fn remove(&mut self, id: &str) -> Result<(), JsError> {
        Ok(self.inner.remove(id.parse()?)?)
    }

    pub fn rename(&mut self, id: &str, name: &str) -> Result<(), JsError> {
        Ok(self.inner.rename(id.parse()?, name)?)
    }

    #[wasm_bindgen(js_name = setContent)]
    pub fn set_content(&mut self, id: &str, text: &str) -> Result<(), JsError> {
        Ok(self.inner.set_content(id.parse()?, text)?)
    }

    /// Write editor text into the file open in pane 1 or 2.
    #[wasm_bindgen(js_name = updatePane)]
    pub fn update_pane(&mut self, pane: u8, text: &str) -> Result<bool, JsError> {
        Ok(self.inner.update_pane(Pane::try_from(pane)?, text)?)
    }

    pub fn select(&mut self, id: &str) -> Result<bool, JsError> {
        let id: NodeId = id.parse()?;
        Ok(self.inner.select(id))
    }

    #[wasm_bindgen(js_name = toggleSplit)]
    pub fn toggle_split(&mut self) {
        self.inner.toggle_split();
    }

    #[wasm_bindgen(js_name = setActivePane)]
    pub fn set_active_pane(&mut self, pane: u8) -> Result<(), JsError> {
        self.inner.set_active_pane(Pane::try_from(pane)?);
        Ok(())
    }

    /// Suggestions for `line` with the caret at 0-based `caret_column`.
    ///
    /// Columns in and out are UTF-16 code units, as the editor reports them.
    pub fn complete(&mut self, line: &str, caret_column: usize) -> Result<JsValue, JsError> {
        let suggestions = self.inner.complete_utf16(line, caret_column);
        Ok(serde_wasm_bindgen::to_value(&suggestions)?)
    }

    /// Export as `"newline"`, `"ampamp"` or `"curl"`.
    #[wasm_bindgen(js_name = exportScript)]
    pub fn export_script(&self, style: JsValue) -> Result<String, JsError> {
        let style: ExportStyle = serde_wasm_bindgen::from_value(style)?;
        Ok(self.inner.export(style))
    }
}
