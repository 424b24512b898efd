//! 애플리케이션 설정 구조체.
//!
//! 리슨 주소, OCR 제공자 자격증명/리전, 에러 상태 코드 모드 등 런타임 설정을 정의한다.
//! 값은 `ocrgate-app`의 CLI 인자에서 채워지고 시작 전에 `validate()`로 검증된다.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// 기본 OCR 엔드포인트 호스트
pub const DEFAULT_OCR_ENDPOINT: &str = "ocr.tencentcloudapi.com";

/// 기본 요청 본문 최대 크기 (10 MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP 서버 설정
    pub server: ServerConfig,
    /// OCR 게이트웨이 설정
    pub gateway: GatewayConfig,
}

impl AppConfig {
    /// 모든 필수값 검증
    pub fn validate(&self) -> Result<(), CoreError> {
        self.server.validate()?;
        self.gateway.validate()
    }
}

// ============================================================
// 서버 설정
// ============================================================

/// HTTP 서버 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 리슨 주소 (예: ":11111", "127.0.0.1:8080")
    pub listen: String,
    /// true면 400/502/500 구분 응답, false면 모든 실패를 404로 응답
    #[serde(default)]
    pub strict_status: bool,
    /// 요청 본문 최대 크기 (바이트)
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl ServerConfig {
    /// 필수값 검증
    pub fn validate(&self) -> Result<(), CoreError> {
        require_non_empty("listen", &self.listen)?;
        if self.max_body_bytes == 0 {
            return Err(CoreError::Validation {
                field: "max_body_bytes".to_string(),
                message: "0보다 커야 함".to_string(),
            });
        }
        Ok(())
    }

    /// 바인드 가능한 주소 문자열 반환
    ///
    /// 호스트가 생략된 `:port` 형식은 모든 인터페이스(`0.0.0.0`)로 해석한다.
    pub fn bind_address(&self) -> String {
        let listen = self.listen.trim();
        if listen.starts_with(':') {
            format!("0.0.0.0{listen}")
        } else {
            listen.to_string()
        }
    }
}

fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

// ============================================================
// OCR 게이트웨이 설정
// ============================================================

/// 호출할 OCR API 액션
///
/// 세 액션 모두 `TextDetections` 배열을 반환한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OcrAction {
    /// 영문 인식
    #[default]
    EnglishOcr,
    /// 일반 인쇄체 인식 (기본형)
    GeneralBasicOcr,
    /// 일반 인쇄체 인식 (고정밀)
    GeneralAccurateOcr,
}

impl OcrAction {
    /// API 액션 이름 (`X-TC-Action` 헤더 값)
    pub fn api_name(&self) -> &'static str {
        match self {
            OcrAction::EnglishOcr => "EnglishOCR",
            OcrAction::GeneralBasicOcr => "GeneralBasicOCR",
            OcrAction::GeneralAccurateOcr => "GeneralAccurateOCR",
        }
    }
}

impl FromStr for OcrAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "english-ocr" | "englishocr" => Ok(OcrAction::EnglishOcr),
            "general-basic-ocr" | "generalbasicocr" => Ok(OcrAction::GeneralBasicOcr),
            "general-accurate-ocr" | "generalaccurateocr" => Ok(OcrAction::GeneralAccurateOcr),
            other => Err(CoreError::Config(format!("알 수 없는 OCR 액션: {other}"))),
        }
    }
}

impl fmt::Display for OcrAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}

/// OCR 게이트웨이 설정 (자격증명, 리전, 엔드포인트)
///
/// `Debug` 출력에서 `secret_key`는 가려진다.
#[derive(Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// 계정 식별자 (SecretId)
    pub secret_id: String,
    /// 계정 비밀키 (SecretKey)
    pub secret_key: String,
    /// 리전 (예: "ap-guangzhou")
    pub region: String,
    /// 엔드포인트 호스트 또는 URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// 호출할 OCR 액션
    #[serde(default)]
    pub action: OcrAction,
}

impl GatewayConfig {
    /// 기본 엔드포인트/액션으로 설정 생성
    pub fn new(
        secret_id: impl Into<String>,
        secret_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            secret_id: secret_id.into(),
            secret_key: secret_key.into(),
            region: region.into(),
            endpoint: default_endpoint(),
            action: OcrAction::default(),
        }
    }

    /// 필수값 검증
    pub fn validate(&self) -> Result<(), CoreError> {
        require_non_empty("secret_id", &self.secret_id)?;
        require_non_empty("secret_key", &self.secret_key)?;
        require_non_empty("region", &self.region)?;
        require_non_empty("endpoint", &self.endpoint)
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("secret_id", &self.secret_id)
            .field("secret_key", &"***")
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("action", &self.action)
            .finish()
    }
}

fn default_endpoint() -> String {
    DEFAULT_OCR_ENDPOINT.to_string()
}

fn require_non_empty(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation {
            field: field.to_string(),
            message: "필수값 누락".to_string(),
        });
    }
    Ok(())
}
