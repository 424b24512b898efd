//! # ocrgate-app
//!
//! ocrgate 바이너리 진입점.
//! CLI 인자 → 설정 검증 → OCR 게이트웨이 생성 → 웹 서버 실행 → 시그널 대기.

mod lifecycle;

use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::{CommandFactory, Parser};
use ocrgate_core::config::{
    AppConfig, GatewayConfig, OcrAction, ServerConfig, DEFAULT_MAX_BODY_BYTES,
    DEFAULT_OCR_ENDPOINT,
};
use ocrgate_core::recognition::TextRecognizer;
use ocrgate_network::tencent_ocr::TencentOcrClient;
use ocrgate_web::WebServer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::lifecycle::LifecycleManager;

/// ocrgate: base64 이미지 OCR 중계 서버
///
/// POST /ocr {"imgdata": "..."} 요청을 Tencent Cloud OCR로 전달한다.
#[derive(Parser, Debug)]
#[command(name = "ocrgate")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 서비스 리슨 주소 (예: ':11111')
    #[arg(short = 'l', long)]
    listen: Option<String>,

    /// SecretId (Tencent Cloud 콘솔 API 키 관리에서 발급)
    #[arg(short = 'i', long)]
    secret_id: Option<String>,

    /// SecretKey
    #[arg(short = 'k', long)]
    secret_key: Option<String>,

    /// 리전 (예: ap-guangzhou)
    #[arg(short = 'r', long)]
    region: Option<String>,

    /// OCR API 엔드포인트 (호스트 또는 URL)
    #[arg(long, default_value = DEFAULT_OCR_ENDPOINT)]
    endpoint: String,

    /// OCR 액션 (english-ocr, general-basic-ocr, general-accurate-ocr)
    #[arg(long, default_value = "english-ocr")]
    action: OcrAction,

    /// 실패 시 404 대신 400/502/500으로 응답
    #[arg(long)]
    strict_status: bool,

    /// 요청 본문 최대 크기 (바이트)
    #[arg(long, default_value_t = DEFAULT_MAX_BODY_BYTES)]
    max_body_bytes: usize,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    /// 필수 인자가 모두 비어 있지 않은지 확인
    fn has_required(&self) -> bool {
        [&self.listen, &self.secret_id, &self.secret_key, &self.region]
            .iter()
            .all(|v| v.as_deref().is_some_and(|s| !s.is_empty()))
    }

    /// 인자를 애플리케이션 설정으로 변환
    fn into_config(self) -> AppConfig {
        AppConfig {
            server: ServerConfig {
                listen: self.listen.unwrap_or_default(),
                strict_status: self.strict_status,
                max_body_bytes: self.max_body_bytes,
            },
            gateway: GatewayConfig {
                secret_id: self.secret_id.unwrap_or_default(),
                secret_key: self.secret_key.unwrap_or_default(),
                region: self.region.unwrap_or_default(),
                endpoint: self.endpoint,
                action: self.action,
            },
        }
    }
}

/// 사용법 문자열
fn usage() -> String {
    Args::command().render_help().to_string()
}

fn init_tracing(log_level: &str) {
    let log_filter = format!(
        "ocrgate={log_level},ocrgate_app={log_level},ocrgate_core={log_level},ocrgate_network={log_level},ocrgate_web={log_level},tower_http={log_level}"
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 필수 인자 누락 → 사용법을 stderr로 출력 후 종료 (서버 미시작)
    if !args.has_required() {
        eprintln!("{}", usage());
        return Ok(());
    }

    init_tracing(&args.log_level);

    let config = args.into_config();
    config
        .validate()
        .map_err(|e| anyhow!("설정 검증 실패: {e}"))?;

    info!(
        listen = %config.server.listen,
        region = %config.gateway.region,
        endpoint = %config.gateway.endpoint,
        action = %config.gateway.action,
        "ocrgate 시작"
    );

    // 게이트웨이 생성 실패 시 서버를 시작하지 않는다
    let client = TencentOcrClient::new(&config.gateway)
        .map_err(|e| anyhow!("OCR 게이트웨이 클라이언트 생성 실패: {e}"))?;
    let recognizer = TextRecognizer::new(Arc::new(client));

    let web_server = WebServer::new(config.server.clone(), recognizer);
    LifecycleManager::new().run(web_server).await?;

    info!("ocrgate 종료");
    Ok(())
}
