//! OCR API 핸들러.

use axum::body::Body;
use axum::extract::State;
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::{debug, error};

use ocrgate_core::models::ocr::{OcrRequest, OcrResponse};

use crate::error::HandlerError;
use crate::AppState;

/// 성공 응답 Content-Type
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// 이미지 텍스트 인식
///
/// ANY /ocr  `{"imgdata": "..."}` → `{"code": 0|1, "result": "..."}`
pub async fn recognize(State(state): State<AppState>, body: Body) -> Response {
    match process(&state, body).await {
        Ok(json) => json_response(json),
        Err(err) => {
            error!(stage = err.stage(), error = %err, "OCR 요청 처리 실패");
            err.into_response_with(state.strict_status)
        }
    }
}

/// 본문 읽기 → JSON 디코딩 → 인식 → JSON 인코딩
async fn process(state: &AppState, body: Body) -> Result<Vec<u8>, HandlerError> {
    let bytes = axum::body::to_bytes(body, state.max_body_bytes)
        .await
        .map_err(HandlerError::Io)?;

    let request = OcrRequest::from_json(&bytes).map_err(HandlerError::Decode)?;

    let text = state.recognizer.recognize(&request.image_data).await?;
    let response = OcrResponse::from_text(text);
    debug!(code = response.code, "OCR 응답 생성");

    serde_json::to_vec(&response).map_err(HandlerError::Encode)
}

fn json_response(json: Vec<u8>) -> Response {
    let length = json.len();
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE)),
            (CONTENT_LENGTH, HeaderValue::from(length)),
        ],
        json,
    )
        .into_response()
}
