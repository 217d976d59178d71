// src/server.rs

use serde::{Deserialize, Serialize};
use std::{convert::Infallible, path::PathBuf, sync::Arc, time::Instant};
use tracing::{error, info, warn};
use warp::{http::StatusCode, Filter, Rejection, Reply};

use crate::config::Config;
use crate::extract::{Extraction, Extractor, HtmlDocument};
use crate::output::write_record;
use crate::verify::{
    AutomationFactory, CaptchaAnswer, PageAutomation, RequestError, Verifier, VerifyRequest,
};

const MAX_BODY_BYTES: u64 = 4 * 1024 * 1024;

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    /// Result page HTML as captured by the automation layer.
    pub html: String,
    /// Names the output file when records are persisted.
    #[serde(default)]
    pub ubrn: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExtractResponse {
    #[serde(flatten)]
    extraction: Extraction,
    #[serde(skip_serializing_if = "Option::is_none")]
    saved_to: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    details: Option<String>,
}

/// Shared, read-only state behind every request.
pub struct AppState {
    pub extractor: Extractor,
    pub table_selector: String,
    pub output_dir: Option<PathBuf>,
    pub verifier: Verifier,
    /// Backend for `/verify`; without one those routes answer 503.
    pub automation: Option<Arc<dyn AutomationFactory>>,
}

impl AppState {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            extractor: cfg.extractor(),
            table_selector: cfg.result_table_selector.clone(),
            output_dir: cfg.output_dir.clone(),
            verifier: Verifier::new(cfg.site(), cfg.extractor()),
            automation: None,
        }
    }

    pub fn with_automation(mut self, factory: Arc<dyn AutomationFactory>) -> Self {
        self.automation = Some(factory);
        self
    }
}

pub fn routes(
    state: Arc<AppState>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .and_then(health_check);

    let extract = warp::path("extract")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(with_state(Arc::clone(&state)))
        .and_then(extract_record);

    let verify = warp::path("verify")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(with_state(Arc::clone(&state)))
        .and_then(start_verification);

    let complete = warp::path!("verify" / "complete")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(with_state(state))
        .and_then(complete_verification);

    health.or(extract).or(verify).or(complete)
}

fn with_state(
    state: Arc<AppState>,
) -> impl Filter<Extract = (Arc<AppState>,), Error = Infallible> + Clone {
    warp::any().map(move || Arc::clone(&state))
}

async fn health_check() -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&serde_json::json!({
        "status": "healthy",
        "service": "birth-record-extractor"
    })))
}

async fn extract_record(
    req: ExtractRequest,
    state: Arc<AppState>,
) -> Result<warp::reply::Response, Rejection> {
    let start = Instant::now();

    let doc = match HtmlDocument::parse(&req.html, &state.table_selector) {
        Ok(doc) => doc,
        Err(e) => {
            error!("cannot read result page: {:#}", e);
            return Ok(error_reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Result page could not be read",
                &e,
            ));
        }
    };
    let extraction = state.extractor.extract(&doc);

    let saved_to = match persist(&state, req.ubrn.as_deref(), &extraction).await {
        Ok(saved_to) => saved_to,
        Err(reply) => return Ok(reply),
    };

    info!(
        found = extraction.record.has_result(),
        anomalies = extraction.anomalies.len(),
        elapsed = ?start.elapsed(),
        "extract request done"
    );
    Ok(warp::reply::json(&ExtractResponse {
        extraction,
        saved_to,
    })
    .into_response())
}

async fn start_verification(
    req: VerifyRequest,
    state: Arc<AppState>,
) -> Result<warp::reply::Response, Rejection> {
    if let Err(e) = req.validate() {
        warn!("rejected verify request: {}", e);
        return Ok(error_reply(StatusCode::BAD_REQUEST, "Invalid input format", &e));
    }
    let mut page = match open_page(&state).await {
        Ok(page) => page,
        Err(reply) => return Ok(reply),
    };
    match state.verifier.begin(page.as_mut(), &req).await {
        Ok(challenge) => Ok(warp::reply::json(&challenge).into_response()),
        Err(e) => Ok(failure_reply(e)),
    }
}

async fn complete_verification(
    answer: CaptchaAnswer,
    state: Arc<AppState>,
) -> Result<warp::reply::Response, Rejection> {
    if let Err(e) = answer.request.validate() {
        warn!("rejected verify request: {}", e);
        return Ok(error_reply(StatusCode::BAD_REQUEST, "Invalid input format", &e));
    }
    let mut page = match open_page(&state).await {
        Ok(page) => page,
        Err(reply) => return Ok(reply),
    };
    let extraction = match state.verifier.complete(page.as_mut(), &answer).await {
        Ok(extraction) => extraction,
        Err(e) => return Ok(failure_reply(e)),
    };
    let saved_to = match persist(&state, Some(&answer.request.ubrn), &extraction).await {
        Ok(saved_to) => saved_to,
        Err(reply) => return Ok(reply),
    };
    Ok(warp::reply::json(&ExtractResponse {
        extraction,
        saved_to,
    })
    .into_response())
}

async fn open_page(
    state: &AppState,
) -> Result<Box<dyn PageAutomation>, warp::reply::Response> {
    let Some(factory) = state.automation.as_ref() else {
        warn!("verify request but no page automation configured");
        return Err(error_reply(
            StatusCode::SERVICE_UNAVAILABLE,
            "Page automation is not configured",
            &"no automation backend",
        ));
    };
    factory.open().await.map_err(|e| {
        error!("opening page automation failed: {:#}", e);
        error_reply(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Something went wrong while processing your request.",
            &format!("{:#}", e),
        )
    })
}

/// Write the record when an output directory is configured and the page
/// carried a result. Returns the written path, if any.
async fn persist(
    state: &AppState,
    ubrn: Option<&str>,
    extraction: &Extraction,
) -> Result<Option<String>, warp::reply::Response> {
    let (Some(dir), Some(ubrn)) = (state.output_dir.clone(), ubrn.map(str::to_string)) else {
        return Ok(None);
    };
    if !extraction.record.has_result() {
        warn!(ubrn = %ubrn, "no result on page; nothing saved");
        return Ok(None);
    }

    let record = extraction.record.clone();
    match tokio::task::spawn_blocking(move || write_record(&dir, &ubrn, &record)).await {
        Ok(Ok(path)) => Ok(Some(path.display().to_string())),
        Ok(Err(e)) => {
            error!("saving record failed: {:#}", e);
            Err(error_reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Record could not be saved",
                &e,
            ))
        }
        Err(e) => {
            error!("record writer task failed: {}", e);
            Err(error_reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Record could not be saved",
                &e,
            ))
        }
    }
}

/// 400 for bad input, 500 for everything else.
fn failure_reply(e: anyhow::Error) -> warp::reply::Response {
    if let Some(req_err) = e.downcast_ref::<RequestError>() {
        warn!("rejected verify request: {}", req_err);
        return error_reply(StatusCode::BAD_REQUEST, "Invalid input format", req_err);
    }
    error!("verification failed: {:#}", e);
    error_reply(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Something went wrong while processing your request.",
        &format!("{:#}", e),
    )
}

fn error_reply(
    status: StatusCode,
    error: &str,
    details: &dyn std::fmt::Display,
) -> warp::reply::Response {
    let body = warp::reply::json(&ErrorResponse {
        error: error.to_string(),
        details: Some(details.to_string()),
    });
    warp::reply::with_status(body, status).into_response()
}
