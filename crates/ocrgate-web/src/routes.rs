//! API 라우트 정의.

use axum::routing::any;
use axum::Router;

use crate::handlers;
use crate::AppState;

/// API 라우트 생성
///
/// `/ocr`는 메서드와 무관하게 처리한다. 그 외 경로는 라우터 기본 404.
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/ocr", any(handlers::ocr::recognize))
}
