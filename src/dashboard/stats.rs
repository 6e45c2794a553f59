use crate::data_loading::PassengerRecord;
use serde::Serialize;
use statrs::statistics::Statistics;

/// Súhrnné metriky pre hlavičku dashboardu.
/// Percentá sú v rozsahu 0-100; `None`, ak výber nemá z čoho počítať.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuickStats {
    pub total_passengers: usize,
    pub average_age: Option<f64>,
    pub male_pct: Option<f64>,
    pub female_pct: Option<f64>,
    pub survival_pct: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassFinding {
    pub pclass: u8,
    pub survival_pct: Option<f64>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyFindings {
    pub female_survival_pct: Option<f64>,
    pub male_survival_pct: Option<f64>,
    pub classes: Vec<ClassFinding>,
}

/// Podiel záznamov spĺňajúcich podmienku v percentách
fn share_pct<F>(records: &[&PassengerRecord], predicate: F) -> Option<f64>
where
    F: Fn(&PassengerRecord) -> bool,
{
    if records.is_empty() {
        return None;
    }
    let hits = records.iter().filter(|r| predicate(r)).count();
    Some(hits as f64 / records.len() as f64 * 100.0)
}

/// Priemerné prežitie v percentách; záznamy bez `Survived` sa preskočia
pub fn survival_pct<'a, I>(records: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a PassengerRecord>,
{
    let outcomes: Vec<f64> = records
        .into_iter()
        .filter_map(|r| r.survived)
        .map(f64::from)
        .collect();
    if outcomes.is_empty() {
        None
    } else {
        Some(outcomes.mean() * 100.0)
    }
}

pub fn quick_stats(records: &[&PassengerRecord]) -> QuickStats {
    let ages: Vec<f64> = records.iter().filter_map(|r| r.age).collect();

    QuickStats {
        total_passengers: records.len(),
        average_age: if ages.is_empty() { None } else { Some(ages.mean()) },
        male_pct: share_pct(records, |r| r.sex == "male"),
        female_pct: share_pct(records, |r| r.sex == "female"),
        survival_pct: survival_pct(records.iter().copied()),
    }
}

pub fn key_findings(records: &[&PassengerRecord]) -> KeyFindings {
    let by_sex = |sex: &str| survival_pct(records.iter().copied().filter(|r| r.sex == sex));

    let classes = [1u8, 2, 3]
        .into_iter()
        .map(|pclass| {
            let members: Vec<&PassengerRecord> =
                records.iter().copied().filter(|r| r.pclass == pclass).collect();
            ClassFinding {
                pclass,
                survival_pct: survival_pct(members.iter().copied()),
                count: members.len(),
            }
        })
        .collect();

    KeyFindings {
        female_survival_pct: by_sex("female"),
        male_survival_pct: by_sex("male"),
        classes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pclass: u8, sex: &str, age: f64, survived: i32) -> PassengerRecord {
        PassengerRecord {
            passenger_id: 0,
            survived: Some(survived),
            pclass,
            name: String::new(),
            sex: sex.to_string(),
            age: Some(age),
            sib_sp: 0,
            parch: 0,
            ticket: String::new(),
            fare: None,
            cabin: None,
            embarked: None,
        }
    }

    fn sample() -> Vec<PassengerRecord> {
        vec![
            record(1, "female", 20.0, 1),
            record(1, "male", 40.0, 0),
            record(3, "male", 30.0, 0),
            record(3, "female", 50.0, 1),
        ]
    }

    #[test]
    fn test_quick_stats() {
        let records = sample();
        let refs: Vec<&PassengerRecord> = records.iter().collect();
        let stats = quick_stats(&refs);

        assert_eq!(stats.total_passengers, 4);
        assert_eq!(stats.average_age, Some(35.0));
        assert_eq!(stats.male_pct, Some(50.0));
        assert_eq!(stats.female_pct, Some(50.0));
        assert_eq!(stats.survival_pct, Some(50.0));
    }

    #[test]
    fn test_empty_selection_has_no_rates() {
        let stats = quick_stats(&[]);
        assert_eq!(stats.total_passengers, 0);
        assert_eq!(stats.average_age, None);
        assert_eq!(stats.survival_pct, None);
    }

    #[test]
    fn test_key_findings_per_sex_and_class() {
        let records = sample();
        let refs: Vec<&PassengerRecord> = records.iter().collect();
        let findings = key_findings(&refs);

        assert_eq!(findings.female_survival_pct, Some(100.0));
        assert_eq!(findings.male_survival_pct, Some(0.0));
        assert_eq!(findings.classes.len(), 3);
        assert_eq!(findings.classes[0].count, 2);
        assert_eq!(findings.classes[0].survival_pct, Some(50.0));
        assert_eq!(findings.classes[1].count, 0);
        assert_eq!(findings.classes[1].survival_pct, None);
        assert_eq!(findings.classes[2].pclass, 3);
    }

    #[test]
    fn test_mixed_case_sex_from_csv_is_counted() {
        use crate::data_loading::{CsvDataLoader, DataLoader};

        let csv = "PassengerId,Survived,Pclass,Name,Sex,Age,SibSp,Parch,Ticket,Fare,Cabin,Embarked\n\
                   1,0,3,\"A, Mr. B\",Male,22,0,0,T1,7.25,,S\n\
                   2,1,1,\"C, Mrs. D\",FEMALE,38,1,0,T2,71.28,C85,C\n\
                   3,0,3,\"E, Mr. F\",male,35,0,0,T3,8.05,,S\n\
                   4,1,2,\"G, Miss. H\",Female,14,0,0,T4,30.07,,C\n";
        let table = CsvDataLoader::new().load_from_string(csv).unwrap();
        let records: Vec<&PassengerRecord> = table.records().iter().collect();

        let stats = quick_stats(&records);
        assert_eq!(stats.male_pct, Some(50.0));
        assert_eq!(stats.female_pct, Some(50.0));

        let findings = key_findings(&records);
        assert_eq!(findings.female_survival_pct, Some(100.0));
        assert_eq!(findings.male_survival_pct, Some(0.0));
    }
}
