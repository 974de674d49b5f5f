use std::path::PathBuf;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;

use polidiff_core::{CompareOutcome, DocumentText, Metrics, Session, Slot};
use polidiff_pdf_mupdf::MupdfBackend;

use crate::models::{CompareResponse, ErrorResponse, RecordJson, SlotJson};
use crate::state::AppState;
use crate::upload;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: String) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { message }))
}

fn internal(message: String) -> ApiError {
    tracing::error!(%message, "compare handler failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse { message }),
    )
}

/// Handle the compare trigger: two uploaded PDFs in, one comparison out.
///
/// The two extractions are independent and run concurrently, each writing
/// only its own slot. A parse failure lands in that slot's JSON and the
/// response still carries the other slot; records are produced only when
/// both slots are ready (all-or-nothing).
pub async fn compare(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<CompareResponse>, ApiError> {
    let fields = upload::parse_multipart(multipart)
        .await
        .map_err(bad_request)?;

    // Temp dir (auto-cleaned on drop) holds the uploads for MuPDF,
    // which reads from a path.
    let temp_dir = tempfile::tempdir()
        .map_err(|e| internal(format!("Failed to create temp directory: {}", e)))?;

    let current_path = temp_dir.path().join("current.pdf");
    let proposed_path = temp_dir.path().join("proposed.pdf");
    std::fs::write(&current_path, &fields.current.data)
        .map_err(|e| internal(format!("Failed to write temp file: {}", e)))?;
    std::fs::write(&proposed_path, &fields.proposed.data)
        .map_err(|e| internal(format!("Failed to write temp file: {}", e)))?;

    let (current_slot, proposed_slot) = tokio::join!(
        extract_slot_blocking(current_path, fields.current.filename),
        extract_slot_blocking(proposed_path, fields.proposed.filename),
    );

    // Temp dir no longer needed after extraction
    drop(temp_dir);

    let topics = fields.topics.unwrap_or_else(|| state.topics.clone());
    let mut session = Session::new(topics, state.options.clone());
    session.set_current(current_slot);
    session.set_proposed(proposed_slot);

    let compared = matches!(session.run_compare(), CompareOutcome::Compared { .. });
    let records: Vec<RecordJson> = session.records().iter().map(RecordJson::from).collect();
    let summary = compared.then(|| Metrics::from_records(session.records()));

    Ok(Json(CompareResponse {
        current: SlotJson::from(session.current()),
        proposed: SlotJson::from(session.proposed()),
        compared,
        records,
        summary,
    }))
}

/// Run one slot's extraction on the blocking pool (MuPDF is blocking I/O),
/// relabeling the slot with the uploaded filename.
async fn extract_slot_blocking(path: PathBuf, filename: String) -> Slot {
    let task = tokio::task::spawn_blocking(move || {
        let backend = MupdfBackend::new();
        match polidiff_pdf::load_slot(&path, &backend) {
            Slot::Ready(doc) => Slot::Ready(DocumentText { source: filename, ..doc }),
            other => other,
        }
    });
    task.await
        .unwrap_or_else(|e| Slot::Failed(format!("extraction task error: {}", e)))
}
