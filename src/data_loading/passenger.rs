use crate::error::{Result, TitanicError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Stĺpce, bez ktorých nevieme vytvoriť feature tabuľku
pub const REQUIRED_COLUMNS: [&str; 11] = [
    "PassengerId",
    "Pclass",
    "Name",
    "Sex",
    "Age",
    "SibSp",
    "Parch",
    "Ticket",
    "Fare",
    "Cabin",
    "Embarked",
];

/// Cieľová premenná, chýba pri nových záznamoch
pub const TARGET_COLUMN: &str = "Survived";

/// Reprezentácie chýbajúcej hodnoty (porovnávané bez ohľadu na veľkosť písmen),
/// rovnaká množina ako pri čítaní CSV v pandas
const NULL_VALUES: [&str; 15] = [
    "", "na", "n/a", "nan", "-nan", "null", "none", "<na>", "#n/a", "#na", "#n/a n/a", "-1.#ind", "1.#ind",
    "-1.#qnan", "1.#qnan",
];

/// Jeden riadok vstupných dát (jeden pasažier)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassengerRecord {
    pub passenger_id: i64,
    pub survived: Option<i32>,
    pub pclass: u8,
    pub name: String,
    pub sex: String,
    pub age: Option<f64>,
    pub sib_sp: u32,
    pub parch: u32,
    pub ticket: String,
    pub fare: Option<f64>,
    pub cabin: Option<String>,
    pub embarked: Option<String>,
}

/// Surová tabuľka pasažierov tak, ako prišla zo zdroja
#[derive(Debug, Clone, PartialEq)]
pub struct PassengerTable {
    headers: Vec<String>,
    records: Vec<PassengerRecord>,
}

impl PassengerTable {
    pub fn new(headers: Vec<String>, records: Vec<PassengerRecord>) -> Self {
        Self { headers, records }
    }

    /// Skonvertuje string záznamy (z CSV/JSON) na typované záznamy
    pub fn from_raw(headers: Vec<String>, raw_records: &[HashMap<String, String>]) -> Result<Self> {
        check_required_columns(&headers)?;

        if raw_records.is_empty() {
            return Err(TitanicError::EmptyTable);
        }

        let has_target = headers.iter().any(|h| h == TARGET_COLUMN);

        let records = raw_records
            .iter()
            .enumerate()
            .map(|(row, raw)| parse_record(raw, row, has_target))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(headers, records))
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[PassengerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_target(&self) -> bool {
        self.headers.iter().any(|h| h == TARGET_COLUMN)
    }

    pub fn check_required_columns(&self) -> Result<()> {
        check_required_columns(&self.headers)
    }
}

/// Vráti chybu so zoznamom všetkých chýbajúcich stĺpcov
pub fn check_required_columns(headers: &[String]) -> Result<()> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .map(|col| col.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(TitanicError::MissingColumns(missing))
    }
}

fn is_null(value: &str) -> bool {
    let value = value.trim();
    NULL_VALUES.iter().any(|null| null.eq_ignore_ascii_case(value))
}

fn cell<'a>(raw: &'a HashMap<String, String>, column: &str) -> &'a str {
    raw.get(column).map(|s| s.trim()).unwrap_or("")
}

fn invalid(column: &str, row: usize, value: &str) -> TitanicError {
    TitanicError::InvalidValue {
        column: column.to_string(),
        row: row + 1,
        value: value.to_string(),
    }
}

/// Celé číslo, toleruje zápis "3.0"
fn parse_int(raw: &HashMap<String, String>, column: &str, row: usize) -> Result<i64> {
    let val = cell(raw, column);
    val.parse::<i64>()
        .ok()
        .or_else(|| {
            val.parse::<f64>()
                .ok()
                .filter(|f| f.fract() == 0.0)
                .map(|f| f as i64)
        })
        .ok_or_else(|| invalid(column, row, val))
}

fn parse_optional_float(raw: &HashMap<String, String>, column: &str, row: usize) -> Result<Option<f64>> {
    let val = cell(raw, column);
    if is_null(val) {
        return Ok(None);
    }
    let parsed = val
        .trim()
        .parse::<f64>()
        .or_else(|_| val.trim().replace(',', ".").parse::<f64>())
        .map_err(|_| invalid(column, row, val))?;
    // inf a podobné hodnoty sa správajú ako chýbajúce
    Ok(parsed.is_finite().then_some(parsed))
}

fn parse_optional_string(raw: &HashMap<String, String>, column: &str) -> Option<String> {
    let val = cell(raw, column);
    if is_null(val) {
        None
    } else {
        Some(val.to_string())
    }
}

fn parse_record(raw: &HashMap<String, String>, row: usize, has_target: bool) -> Result<PassengerRecord> {
    let survived = if has_target && !is_null(cell(raw, TARGET_COLUMN)) {
        let value = parse_int(raw, TARGET_COLUMN, row)?;
        if value != 0 && value != 1 {
            return Err(invalid(TARGET_COLUMN, row, cell(raw, TARGET_COLUMN)));
        }
        Some(value as i32)
    } else {
        None
    };

    let pclass = parse_int(raw, "Pclass", row)?;
    let pclass = u8::try_from(pclass).map_err(|_| invalid("Pclass", row, cell(raw, "Pclass")))?;
    let sib_sp = parse_int(raw, "SibSp", row)?;
    let sib_sp = u32::try_from(sib_sp).map_err(|_| invalid("SibSp", row, cell(raw, "SibSp")))?;
    let parch = parse_int(raw, "Parch", row)?;
    let parch = u32::try_from(parch).map_err(|_| invalid("Parch", row, cell(raw, "Parch")))?;

    let sex = cell(raw, "Sex");
    if is_null(sex) {
        return Err(invalid("Sex", row, sex));
    }

    Ok(PassengerRecord {
        passenger_id: parse_int(raw, "PassengerId", row)?,
        survived,
        pclass,
        name: cell(raw, "Name").to_string(),
        sex: sex.trim().to_lowercase(),
        age: parse_optional_float(raw, "Age", row)?,
        sib_sp,
        parch,
        ticket: cell(raw, "Ticket").to_string(),
        fare: parse_optional_float(raw, "Fare", row)?,
        cabin: parse_optional_string(raw, "Cabin"),
        embarked: parse_optional_string(raw, "Embarked"),
    })
}
