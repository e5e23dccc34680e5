use crate::errors::AppError;
use crate::models::{
    DatasetSummary, HealthResponse, ModalResult, MostCommonQuery, Selection, SeriesQuery,
    SeriesResponse, StoredRecord,
};
use crate::records::{record_category, record_date, DEFAULT_DATE_FIELD};
use crate::state::AppState;
use crate::stats::{bucketize, modal_category, total};
use crate::storage::persist_data;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, info};

const MAX_DATASET_NAME: usize = 64;

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

pub async fn list_datasets(State(state): State<AppState>) -> Json<Vec<DatasetSummary>> {
    let data = state.data.lock().await;
    let summaries = data
        .datasets
        .iter()
        .map(|(name, records)| DatasetSummary {
            name: name.clone(),
            records: records.len(),
        })
        .collect();
    Json(summaries)
}

pub async fn list_records(
    State(state): State<AppState>,
    Path(dataset): Path<String>,
) -> Result<Json<Vec<StoredRecord>>, AppError> {
    validate_dataset(&dataset)?;
    let data = state.data.lock().await;
    Ok(Json(data.records(&dataset).to_vec()))
}

pub async fn add_record(
    State(state): State<AppState>,
    Path(dataset): Path<String>,
    Json(record): Json<StoredRecord>,
) -> Result<(StatusCode, Json<DatasetSummary>), AppError> {
    validate_dataset(&dataset)?;
    let mut data = state.data.lock().await;
    let records = {
        let entries = data.datasets.entry(dataset.clone()).or_default();
        entries.push(record);
        entries.len()
    };

    persist_data(&state.data_path, &data).await?;
    info!(dataset = %dataset, records, "record added");

    Ok((
        StatusCode::CREATED,
        Json(DatasetSummary {
            name: dataset,
            records,
        }),
    ))
}

pub async fn get_series(
    State(state): State<AppState>,
    Path(dataset): Path<String>,
    Query(query): Query<SeriesQuery>,
) -> Result<Json<SeriesResponse>, AppError> {
    validate_dataset(&dataset)?;
    let selection = Selection {
        period: query.period,
        year: query.year,
        month: query.month,
    };
    let date_field = date_field(query.date_field.as_deref());
    debug!(dataset = %dataset, ?selection, date_field, "building series");

    let data = state.data.lock().await;
    let buckets = bucketize(
        data.records(&dataset),
        |record| record_date(record, date_field),
        &selection,
        &*state.clock,
    );

    Ok(Json(SeriesResponse {
        period: selection.period,
        total: total(&buckets),
        buckets,
    }))
}

pub async fn get_most_common(
    State(state): State<AppState>,
    Path(dataset): Path<String>,
    Query(query): Query<MostCommonQuery>,
) -> Result<Json<ModalResult>, AppError> {
    validate_dataset(&dataset)?;
    let field = query.field.trim();
    if field.is_empty() {
        return Err(AppError::bad_request("field must not be empty"));
    }
    let selection = Selection {
        period: query.period,
        year: query.year,
        month: query.month,
    };
    let date_field = date_field(query.date_field.as_deref());
    debug!(dataset = %dataset, ?selection, field, "finding most common value");

    let data = state.data.lock().await;
    Ok(Json(modal_category(
        data.records(&dataset),
        |record| record_date(record, date_field),
        |record| record_category(record, field),
        &selection,
        &*state.clock,
    )))
}

fn date_field(requested: Option<&str>) -> &str {
    requested
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .unwrap_or(DEFAULT_DATE_FIELD)
}

fn validate_dataset(name: &str) -> Result<(), AppError> {
    let valid = !name.is_empty()
        && name.len() <= MAX_DATASET_NAME
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(AppError::bad_request(
            "dataset name must be 1-64 characters of letters, digits, '_' or '-'",
        ))
    }
}
