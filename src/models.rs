use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A loosely typed record as the backend hands it over.
pub type StoredRecord = Map<String, Value>;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    pub datasets: BTreeMap<String, Vec<StoredRecord>>,
}

impl AppData {
    pub fn records(&self, dataset: &str) -> &[StoredRecord] {
        self.datasets.get(dataset).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn record_count(&self) -> usize {
        self.datasets.values().map(Vec::len).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Month,
    Year,
    #[default]
    All,
}

/// Period plus the optional year/month refinements picked in the selector UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub period: Period,
    pub year: Option<i32>,
    pub month: Option<i32>,
}

impl Selection {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn year(year: i32) -> Self {
        Self {
            period: Period::Year,
            year: Some(year),
            month: None,
        }
    }

    pub fn month(year: i32, month: i32) -> Self {
        Self {
            period: Period::Month,
            year: Some(year),
            month: Some(month),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ModalResult {
    pub value: Option<String>,
    pub count: u64,
}

#[derive(Debug, Deserialize)]
pub struct SeriesQuery {
    #[serde(default)]
    pub period: Period,
    pub year: Option<i32>,
    pub month: Option<i32>,
    pub date_field: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MostCommonQuery {
    pub field: String,
    #[serde(default)]
    pub period: Period,
    pub year: Option<i32>,
    pub month: Option<i32>,
    pub date_field: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SeriesResponse {
    pub period: Period,
    pub buckets: Vec<Bucket>,
    pub total: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub name: String,
    pub records: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
