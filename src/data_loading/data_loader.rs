use super::passenger::PassengerTable;
use crate::error::Result;

/// Strategy pattern pre načítanie pasažierov z rôznych zdrojov
pub trait DataLoader {
    /// Názov loadera
    fn get_name(&self) -> &str;

    /// Načíta a otypuje dáta zo stringu
    fn load_from_string(&self, data: &str) -> Result<PassengerTable>;

    /// Získa dostupné stĺpce (headers) z dát
    fn get_available_columns(&self, data: &str) -> Result<Vec<String>>;

    /// Validuje formát dát pred načítaním
    fn validate_format(&self, data: &str) -> Result<()>;
}
