//! 핸들러 에러 처리.
//!
//! 모든 실패는 핸들러에서 한 번 로그를 남기고 HTTP 응답으로 변환된다.
//! 기본 모드는 원래 서버와 바이트 단위로 같은 404 응답을 보내고,
//! strict 모드는 400/502/500을 구분한다. 어느 쪽도 내부 상세를 노출하지 않는다.

use axum::http::header::{CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use ocrgate_core::error::CoreError;

/// 호환 모드 실패 응답 본문
pub const NOT_FOUND_BODY: &str = "404 page not found\n";

/// `/ocr` 처리 단계별 에러
#[derive(Debug, Error)]
pub enum HandlerError {
    /// 요청 본문을 끝까지 읽지 못함 (크기 초과 포함)
    #[error("요청 본문 읽기 실패: {0}")]
    Io(#[source] axum::Error),

    /// 요청 JSON 형식 오류
    #[error("요청 JSON 디코딩 실패: {0}")]
    Decode(#[source] serde_json::Error),

    /// 외부 OCR 호출 실패
    #[error("OCR 게이트웨이 호출 실패: {0}")]
    Gateway(#[from] CoreError),

    /// 응답 JSON 직렬화 실패
    #[error("응답 JSON 인코딩 실패: {0}")]
    Encode(#[source] serde_json::Error),
}

/// strict 모드 에러 응답 본문
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// 에러 메시지 (일반화된 문구)
    pub error: String,
    /// HTTP 상태 코드
    pub status: u16,
}

impl HandlerError {
    /// 로그용 단계 이름
    pub fn stage(&self) -> &'static str {
        match self {
            HandlerError::Io(_) => "read_body",
            HandlerError::Decode(_) => "decode",
            HandlerError::Gateway(_) => "gateway",
            HandlerError::Encode(_) => "encode",
        }
    }

    /// strict 모드 상태 코드
    pub fn strict_status(&self) -> StatusCode {
        match self {
            HandlerError::Io(_) | HandlerError::Decode(_) => StatusCode::BAD_REQUEST,
            HandlerError::Gateway(_) => StatusCode::BAD_GATEWAY,
            HandlerError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            HandlerError::Io(_) => "요청 본문을 읽을 수 없음",
            HandlerError::Decode(_) => "잘못된 요청 형식",
            HandlerError::Gateway(_) => "OCR 서비스 호출 실패",
            HandlerError::Encode(_) => "응답 생성 실패",
        }
    }

    /// 모드에 맞는 HTTP 응답으로 변환
    pub fn into_response_with(self, strict: bool) -> Response {
        if !strict {
            return not_found_response();
        }

        let status = self.strict_status();
        let body = ErrorResponse {
            error: self.public_message().to_string(),
            status: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}

/// 호환 모드 404 응답 (`text/plain`, `nosniff`, 고정 본문)
pub fn not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        [
            (CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8")),
            (X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")),
        ],
        NOT_FOUND_BODY,
    )
        .into_response()
}
