use wasm_bindgen::prelude::*;
use serde::Serialize;

use crate::dashboard::{Dashboard, DashboardFilter, UiState};
use crate::data_loading::DataLoaderFactory;
use crate::inference::{ModelArtifact, Predictor};

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {:?}", e)))
}

fn js_err<E: std::fmt::Display>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Dashboard pre prehliadač: dáta a model prídu ako text, výstupom sú JS objekty
#[wasm_bindgen]
pub struct WasmDashboard {
    dashboard: Dashboard,
    ui: UiState,
}

#[wasm_bindgen]
impl WasmDashboard {
    /// `data` je CSV alebo JSON s pasažiermi, `model_json` uložený artefakt
    #[wasm_bindgen(constructor)]
    pub fn new(data: &str, model_json: &str) -> Result<WasmDashboard, JsValue> {
        console_error_panic_hook::set_once();

        let loader = DataLoaderFactory::create_auto(data).map_err(js_err)?;
        let table = loader.load_from_string(data).map_err(js_err)?;
        let artifact: ModelArtifact = serde_json::from_str(model_json).map_err(js_err)?;
        let dashboard = Dashboard::new(&table, Predictor::new(artifact)).map_err(js_err)?;

        Ok(WasmDashboard {
            dashboard,
            ui: UiState::default(),
        })
    }

    /// Filter s plným výberom (hodnoty pre multiselecty a slider)
    #[wasm_bindgen(js_name = defaultFilter)]
    pub fn default_filter(&self) -> Result<JsValue, JsValue> {
        to_js(&self.dashboard.default_filter())
    }

    /// Vypočíta celý pohľad pre daný filter a aktuálnu tému
    #[wasm_bindgen(js_name = render)]
    pub fn render(&self, filter: JsValue) -> Result<JsValue, JsValue> {
        let filter: DashboardFilter = serde_wasm_bindgen::from_value(filter)
            .map_err(|e| JsValue::from_str(&format!("Filter parse error: {:?}", e)))?;
        let view = self.dashboard.render(&filter, &self.ui).map_err(js_err)?;
        to_js(&view)
    }

    /// Prepne tému a vráti novú ("dark" / "light")
    #[wasm_bindgen(js_name = toggleTheme)]
    pub fn toggle_theme(&mut self) -> Result<JsValue, JsValue> {
        self.ui.toggle_theme();
        to_js(&self.ui.theme)
    }

    #[wasm_bindgen(js_name = getUiState)]
    pub fn get_ui_state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.ui)
    }

    #[wasm_bindgen(js_name = getFeatureColumns)]
    pub fn get_feature_columns(&self) -> Result<JsValue, JsValue> {
        to_js(&self.dashboard.predictor().schema().columns)
    }
}
