//! Dátová vrstva dashboardu: filtre, štatistiky a série pre grafy.
//!
//! Surová tabuľka sa transformuje iba raz. Filter vyberá indexy v surových
//! riadkoch (chýbajúci vek doplnený mediánom) a rovnaké indexy sa použijú
//! na feature tabuľku, takže stĺpce pre model nikdy nezávisia od výberu.

pub mod charts;
pub mod filter;
pub mod predictions;
pub mod stats;
pub mod ui_state;

pub use charts::{BoxSummary, CategoryCount, Gauge, HistogramBin, ScatterPoint};
pub use filter::{AgeRange, DashboardFilter};
pub use predictions::{prediction_table, ChanceBreakdown};
pub use stats::{key_findings, quick_stats, ClassFinding, KeyFindings, QuickStats};
pub use ui_state::{Theme, ThemePalette, UiState};

use crate::data_loading::{load_passengers, PassengerRecord, PassengerTable};
use crate::error::Result;
use crate::inference::{PassengerPrediction, Predictor};
use crate::processing::{FeatureTable, NullValueHandler};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

/// Výber riadkov podľa filtra, zarovnaný medzi surovými a feature riadkami
pub struct Selection<'a> {
    pub indices: Vec<usize>,
    pub records: Vec<&'a PassengerRecord>,
    pub features: FeatureTable,
}

impl Selection<'_> {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Všetko, čo frontend potrebuje na vykreslenie jedného stavu
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub theme: Theme,
    pub palette: ThemePalette,
    pub quick_stats: QuickStats,
    pub age_histogram: Vec<HistogramBin>,
    pub class_distribution: Vec<CategoryCount>,
    pub gender_counts: Vec<CategoryCount>,
    pub survival_gauge: Gauge,
    pub predictions: Vec<PassengerPrediction>,
    pub breakdown: ChanceBreakdown,
    pub probability_by_gender: Vec<BoxSummary>,
    pub probability_by_class: Vec<BoxSummary>,
    pub age_scatter: Vec<ScatterPoint>,
    pub key_findings: KeyFindings,
}

/// Záznamy na zobrazenie a filtrovanie: chýbajúci vek doplnený mediánom tabuľky
pub fn display_records(table: &PassengerTable) -> Result<Vec<PassengerRecord>> {
    let ages: Vec<Option<f64>> = table.records().iter().map(|r| r.age).collect();
    let age_median = NullValueHandler::median("Age").replacement_value(&ages)?;

    Ok(table
        .records()
        .iter()
        .map(|r| PassengerRecord {
            age: Some(r.age.unwrap_or(age_median)),
            ..r.clone()
        })
        .collect())
}

pub struct Dashboard {
    records: Vec<PassengerRecord>,
    features: FeatureTable,
    predictor: Predictor,
}

impl Dashboard {
    pub fn new(table: &PassengerTable, predictor: Predictor) -> Result<Self> {
        let features = predictor.transform(table)?;
        let records = display_records(table)?;

        info!(passengers = table.len(), "dashboard data ready");
        Ok(Self {
            records,
            features,
            predictor,
        })
    }

    pub fn from_paths<P: AsRef<Path>, Q: AsRef<Path>>(data_path: P, model_path: Q) -> Result<Self> {
        let table = load_passengers(data_path)?;
        let predictor = Predictor::load(model_path)?;
        Self::new(&table, predictor)
    }

    /// Záznamy na zobrazenie (vek už doplnený)
    pub fn records(&self) -> &[PassengerRecord] {
        &self.records
    }

    pub fn features(&self) -> &FeatureTable {
        &self.features
    }

    pub fn predictor(&self) -> &Predictor {
        &self.predictor
    }

    pub fn default_filter(&self) -> DashboardFilter {
        DashboardFilter::all(&self.records)
    }

    pub fn select(&self, filter: &DashboardFilter) -> Selection<'_> {
        let indices = filter.apply(&self.records);
        let records = indices.iter().map(|&i| &self.records[i]).collect();
        let features = self.features.select(&indices);
        debug!(selected = indices.len(), "applied dashboard filter");

        Selection {
            indices,
            records,
            features,
        }
    }

    /// Pravdepodobnosti pre vybrané riadky v poradí výberu
    pub fn probabilities(&self, selection: &Selection) -> Result<Vec<f64>> {
        if selection.is_empty() {
            return Ok(Vec::new());
        }
        self.predictor.predict_proba(&selection.features)
    }

    pub fn render(&self, filter: &DashboardFilter, ui: &UiState) -> Result<DashboardView> {
        let selection = self.select(filter);
        let probabilities = self.probabilities(&selection)?;
        let records = &selection.records;

        let quick_stats = quick_stats(records);
        let survival_gauge = charts::survival_gauge(quick_stats.survival_pct);

        Ok(DashboardView {
            theme: ui.theme,
            palette: ui.palette(),
            age_histogram: charts::age_histogram(records),
            class_distribution: charts::class_distribution(records),
            gender_counts: charts::gender_counts(records),
            survival_gauge,
            predictions: prediction_table(records, &probabilities),
            breakdown: ChanceBreakdown::from_probabilities(&probabilities),
            probability_by_gender: charts::probability_by_gender(records, &probabilities),
            probability_by_class: charts::probability_by_class(records, &probabilities),
            age_scatter: charts::age_probability_scatter(records, &probabilities),
            key_findings: key_findings(records),
            quick_stats,
        })
    }
}
