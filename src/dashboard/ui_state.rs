use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Farby pre grafy a karty
    pub fn palette(self) -> ThemePalette {
        match self {
            Theme::Dark => ThemePalette {
                background: "#000000",
                card: "#0b0b0b",
                text: "#e5e7eb",
                border: "#1f2937",
                plot_background: "#000000",
                grid: "#1f2937",
            },
            Theme::Light => ThemePalette {
                background: "#f8fafc",
                card: "#ffffff",
                text: "#0f172a",
                border: "#e5e7eb",
                plot_background: "#ffffff",
                grid: "#e5e7eb",
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemePalette {
    pub background: &'static str,
    pub card: &'static str,
    pub text: &'static str,
    pub border: &'static str,
    pub plot_background: &'static str,
    pub grid: &'static str,
}

/// Stav UI, ktorý volajúci drží a posiela do každého renderu.
/// Žiadny globálny stav: dve inštancie dashboardu môžu mať rôznu tému.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    pub theme: Theme,
}

impl UiState {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    pub fn palette(&self) -> ThemePalette {
        self.theme.palette()
    }

    /// Popis tlačidla prepínača (ukazuje tému, na ktorú sa prepne)
    pub fn toggle_label(&self) -> &'static str {
        match self.theme {
            Theme::Dark => "Light",
            Theme::Light => "Dark",
        }
    }
}
