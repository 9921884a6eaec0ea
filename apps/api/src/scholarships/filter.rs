//! Eligibility filter: selects the scholarships a student qualifies for.
//!
//! A record matches when its GPA is present and `record.gpa <= query.gpa`, and
//! its major equals the query major ignoring case. The record's GPA acts as a
//! ceiling. Results keep dataset order.

use thiserror::Error;

use crate::scholarships::models::{Dataset, ScholarshipRecord, StudentQuery};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum EligibilityError {
    #[error("no scholarship data is loaded")]
    DataUnavailable,

    #[error("no scholarships matched the query")]
    NoMatch,

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// GPA scales offered by the search form, used only to range-check input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GpaScale {
    Unweighted4,
    Weighted4,
    Hundred,
}

impl GpaScale {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "4.0 Unweighted" => Some(Self::Unweighted4),
            "4.0 Weighted" => Some(Self::Weighted4),
            "100 Scale" => Some(Self::Hundred),
            _ => None,
        }
    }

    pub fn range(self) -> (f64, f64) {
        match self {
            Self::Unweighted4 => (0.0, 4.0),
            Self::Weighted4 => (0.0, 5.0),
            Self::Hundred => (0.0, 100.0),
        }
    }
}

/// Rejects a GPA outside the bounds of the scale the student selected.
/// Queries without a recognized scale pass unchecked.
pub fn validate_query(query: &StudentQuery) -> Result<(), EligibilityError> {
    let Some(scale) = query.gpa_scale.as_deref().and_then(GpaScale::from_label) else {
        return Ok(());
    };
    let (min, max) = scale.range();
    if query.gpa < min || query.gpa > max {
        return Err(EligibilityError::InvalidInput(format!(
            "GPA must be between {min} and {max} for the selected scale"
        )));
    }
    Ok(())
}

pub fn is_eligible(record: &ScholarshipRecord, gpa: f64, major_lower: &str) -> bool {
    match record.gpa {
        Some(ceiling) => ceiling <= gpa && record.major_lower == major_lower,
        None => false,
    }
}

/// Returns the matching records in dataset order.
///
/// Errors with `DataUnavailable` when nothing is loaded and `NoMatch` when
/// the dataset is loaded but no record qualifies.
pub fn find_eligible<'a>(
    dataset: &'a Dataset,
    query: &StudentQuery,
) -> Result<Vec<&'a ScholarshipRecord>, EligibilityError> {
    if dataset.is_empty() {
        return Err(EligibilityError::DataUnavailable);
    }

    let major_lower = query.major.to_lowercase();
    let matches: Vec<_> = dataset
        .records
        .iter()
        .filter(|record| is_eligible(record, query.gpa, &major_lower))
        .collect();

    if matches.is_empty() {
        return Err(EligibilityError::NoMatch);
    }
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scholarships::models::CellValue;

    fn record(name: &str, gpa: Option<f64>, major: &str) -> ScholarshipRecord {
        ScholarshipRecord::new(
            gpa,
            major.to_string(),
            vec![
                ("Name".to_string(), CellValue::Text(name.to_string())),
                ("GPA".to_string(), gpa.map_or(CellValue::Null, CellValue::Float)),
                ("Major".to_string(), CellValue::Text(major.to_string())),
            ],
        )
    }

    fn dataset(records: Vec<ScholarshipRecord>) -> Dataset {
        let headers = vec!["Name".into(), "GPA".into(), "Major".into()];
        Dataset::new(headers, records)
    }

    fn names(matches: &[&ScholarshipRecord]) -> Vec<String> {
        matches
            .iter()
            .map(|r| match r.field("Name") {
                Some(CellValue::Text(s)) => s.clone(),
                _ => String::new(),
            })
            .collect()
    }

    #[test]
    fn test_empty_dataset_is_data_unavailable() {
        let ds = Dataset::empty();
        assert_eq!(
            find_eligible(&ds, &StudentQuery::new(4.0, "Biology")),
            Err(EligibilityError::DataUnavailable)
        );
        assert_eq!(
            find_eligible(&ds, &StudentQuery::default()),
            Err(EligibilityError::DataUnavailable)
        );
    }

    #[test]
    fn test_default_query_matches_zero_gpa_empty_major() {
        let ds = dataset(vec![record("Blank", Some(0.0), ""), record("Bio", Some(0.0), "Biology")]);
        let matches = find_eligible(&ds, &StudentQuery::default()).unwrap();
        assert_eq!(names(&matches), vec!["Blank"]);
    }

    #[test]
    fn test_default_query_without_blank_record_is_no_match() {
        let ds = dataset(vec![record("Bio", Some(0.0), "Biology")]);
        assert_eq!(
            find_eligible(&ds, &StudentQuery::default()),
            Err(EligibilityError::NoMatch)
        );
    }

    #[test]
    fn test_major_match_ignores_case() {
        let ds = dataset(vec![record("CS", Some(3.0), "Computer Science")]);
        let ok = find_eligible(&ds, &StudentQuery::new(3.5, "computer science")).unwrap();
        assert_eq!(names(&ok), vec!["CS"]);
        let upper = find_eligible(&ds, &StudentQuery::new(3.5, "COMPUTER SCIENCE")).unwrap();
        assert_eq!(names(&upper), vec!["CS"]);
        assert_eq!(
            find_eligible(&ds, &StudentQuery::new(2.0, "computer science")),
            Err(EligibilityError::NoMatch)
        );
    }

    #[test]
    fn test_record_gpa_is_a_ceiling() {
        let ds = dataset(vec![record("Bio", Some(3.5), "Biology")]);
        assert!(find_eligible(&ds, &StudentQuery::new(4.0, "Biology")).is_ok());
        assert!(find_eligible(&ds, &StudentQuery::new(3.5, "Biology")).is_ok());
        assert_eq!(
            find_eligible(&ds, &StudentQuery::new(3.0, "Biology")),
            Err(EligibilityError::NoMatch)
        );
    }

    #[test]
    fn test_results_keep_dataset_order() {
        let ds = dataset(vec![
            record("A", Some(2.0), "Math"),
            record("B", Some(2.0), "Art"),
            record("C", Some(1.0), "math"),
        ]);
        let matches = find_eligible(&ds, &StudentQuery::new(3.0, "Math")).unwrap();
        assert_eq!(names(&matches), vec!["A", "C"]);
    }

    #[test]
    fn test_missing_gpa_never_matches() {
        let ds = dataset(vec![record("Missing", None, "Math")]);
        for gpa in [0.0, 4.0, 100.0, f64::MAX] {
            assert_eq!(
                find_eligible(&ds, &StudentQuery::new(gpa, "Math")),
                Err(EligibilityError::NoMatch)
            );
        }
    }

    #[test]
    fn test_identical_queries_yield_identical_results() {
        let ds = dataset(vec![
            record("A", Some(2.0), "Math"),
            record("B", Some(3.9), "Math"),
        ]);
        let q = StudentQuery::new(3.0, "math");
        let first = find_eligible(&ds, &q).unwrap();
        let second = find_eligible(&ds, &q).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_validate_query_checks_selected_scale() {
        let mut q = StudentQuery::new(4.5, "Math");
        assert!(validate_query(&q).is_ok());

        q.gpa_scale = Some("4.0 Unweighted".to_string());
        assert!(matches!(validate_query(&q), Err(EligibilityError::InvalidInput(_))));

        q.gpa_scale = Some("4.0 Weighted".to_string());
        assert!(validate_query(&q).is_ok());

        q.gpa = 101.0;
        q.gpa_scale = Some("100 Scale".to_string());
        assert!(validate_query(&q).is_err());
    }

    #[test]
    fn test_unknown_scale_is_not_validated() {
        let mut q = StudentQuery::new(250.0, "Math");
        q.gpa_scale = Some("10 Point".to_string());
        assert!(validate_query(&q).is_ok());
    }

    #[test]
    fn test_invalid_input_message_names_bounds() {
        let mut q = StudentQuery::new(4.2, "Math");
        q.gpa_scale = Some("4.0 Unweighted".to_string());
        assert_eq!(
            validate_query(&q),
            Err(EligibilityError::InvalidInput(
                "GPA must be between 0 and 4 for the selected scale".to_string()
            ))
        );
    }
}
