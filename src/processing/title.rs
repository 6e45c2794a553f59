//! Extrakcia oslovenia (Mr, Mrs, Miss, ...) z mena pasažiera.

use super::schema::TITLE;
use once_cell::sync::Lazy;
use regex::Regex;

/// Slovo bezprostredne pred bodkou, ktorému predchádza medzera
static TITLE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" ([A-Za-z]+)\.").expect("title pattern is a valid regex"));

/// Zriedkavé oslovenia zlúčené do jednej úrovne `Rare`
pub const RARE_TITLES: [&str; 11] = [
    "Lady", "Countess", "Capt", "Col", "Don", "Dr", "Major", "Rev", "Sir", "Jonkheer", "Dona",
];

/// Prvé oslovenie v mene, napr. "Braund, Mr. Owen Harris" -> "Mr"
pub fn extract_title(name: &str) -> Option<&str> {
    TITLE_PATTERN
        .captures(name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Zlúči synonymá a zriedkavé oslovenia
pub fn normalize_title(title: &str) -> &str {
    if RARE_TITLES.contains(&title) {
        return "Rare";
    }
    match title {
        "Mlle" | "Ms" => "Miss",
        "Mme" => "Mrs",
        other => other,
    }
}

/// Úroveň oslovenia v rámci pevnej schémy.
/// Neznáme oslovenie padá do `Rare`, meno bez oslovenia vráti `None`.
pub fn title_level(name: &str) -> Option<&'static str> {
    let title = normalize_title(extract_title(name)?);
    Some(
        TITLE
            .levels
            .iter()
            .copied()
            .find(|level| *level == title)
            .unwrap_or("Rare"),
    )
}
