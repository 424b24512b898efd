//! # ocrgate-web
//!
//! OCR 중계 HTTP 서버.
//! Axum 기반 단일 엔드포인트 `/ocr`. base64 이미지를 받아 인식 텍스트를 돌려준다.
//!
//! ## 처리 흐름
//! 본문 읽기 → JSON 디코딩 → data URI 정규화 → 외부 OCR 호출 → 결합 → JSON 응답

pub mod error;
pub mod handlers;
pub mod routes;

use axum::Router;
use ocrgate_core::config::ServerConfig;
use ocrgate_core::recognition::TextRecognizer;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;
use tracing::info;

/// 웹 서버 애플리케이션 상태
///
/// 요청 태스크 간 공유되는 읽기 전용 값만 담는다.
#[derive(Clone, Debug)]
pub struct AppState {
    /// 텍스트 인식기 (게이트웨이 핸들 포함)
    pub recognizer: TextRecognizer,
    /// true면 400/502/500 구분 응답
    pub strict_status: bool,
    /// 요청 본문 최대 크기 (바이트)
    pub max_body_bytes: usize,
}

impl AppState {
    /// 서버 설정과 인식기로 상태 생성
    pub fn new(config: &ServerConfig, recognizer: TextRecognizer) -> Self {
        Self {
            recognizer,
            strict_status: config.strict_status,
            max_body_bytes: config.max_body_bytes,
        }
    }
}

/// 라우터 구성 (상태 주입 + 요청 트레이싱)
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// OCR 중계 웹 서버
pub struct WebServer {
    config: ServerConfig,
    state: AppState,
}

impl WebServer {
    /// 새 웹 서버 생성
    pub fn new(config: ServerConfig, recognizer: TextRecognizer) -> Self {
        let state = AppState::new(&config, recognizer);
        Self { config, state }
    }

    /// 설정된 주소에 바인드 후 서버 실행
    ///
    /// # Arguments
    /// * `shutdown_rx` - 종료 신호 수신 채널
    pub async fn run(self, shutdown_rx: watch::Receiver<bool>) -> Result<(), std::io::Error> {
        let addr = self.config.bind_address();
        let listener = TcpListener::bind(&addr).await?;
        self.serve(listener, shutdown_rx).await
    }

    /// 이미 바인드된 리스너로 서버 실행 (Graceful shutdown 지원)
    pub async fn serve(
        self,
        listener: TcpListener,
        mut shutdown_rx: watch::Receiver<bool>,
    ) -> Result<(), std::io::Error> {
        let local_addr = listener.local_addr()?;
        info!(
            addr = %local_addr,
            provider = self.state.recognizer.provider_name(),
            strict_status = self.state.strict_status,
            "OCR 중계 서버 시작"
        );

        let app = build_router(self.state);
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                loop {
                    if *shutdown_rx.borrow() {
                        info!("웹 서버 종료 신호 수신");
                        break;
                    }
                    if shutdown_rx.changed().await.is_err() {
                        break;
                    }
                }
            })
            .await?;

        info!("OCR 중계 서버 종료");
        Ok(())
    }
}
