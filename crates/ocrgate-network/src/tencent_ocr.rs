//! Tencent Cloud OCR 클라이언트.
//!
//! `OcrGateway` 포트 구현. base64 이미지를 `EnglishOCR`(또는 설정된 액션)로 보내고
//! `Response.TextDetections`를 제공자 무관 `TextDetection`으로 변환한다.
//! 재시도/타임아웃 없음. 실패는 호출자에게 그대로 전달된다.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HOST};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use ocrgate_core::config::{GatewayConfig, OcrAction};
use ocrgate_core::error::CoreError;
use ocrgate_core::ports::ocr_gateway::{OcrGateway, TextDetection};

use crate::tc3::{SignableRequest, Tc3Signer};

/// API 버전 (`X-TC-Version`)
pub const API_VERSION: &str = "2018-11-19";

/// 서명 범위의 서비스 이름
const SERVICE: &str = "ocr";

/// 요청 본문 Content-Type (서명에 포함됨)
const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// 오류 본문 로그 최대 길이
const ERROR_BODY_PREVIEW: usize = 200;

// ============================================================
// 요청/응답 DTO
// ============================================================

#[derive(Debug, Serialize)]
struct DetectRequest<'a> {
    #[serde(rename = "ImageBase64")]
    image_base64: &'a str,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "Response")]
    response: Option<ResponseBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ResponseBody {
    #[serde(default)]
    text_detections: Option<Vec<RawTextDetection>>,
    #[serde(default)]
    error: Option<ApiErrorBody>,
    #[serde(default)]
    request_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawTextDetection {
    #[serde(default)]
    detected_text: Option<String>,
    #[serde(default)]
    confidence: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiErrorBody {
    code: String,
    #[serde(default)]
    message: String,
}

// ============================================================
// TencentOcrClient
// ============================================================

/// Tencent Cloud OCR API 클라이언트
///
/// 시작 시 한 번 생성하고 `Arc<dyn OcrGateway>`로 공유한다.
/// 생성 후에는 읽기 전용이다.
pub struct TencentOcrClient {
    /// HTTP 클라이언트
    http_client: reqwest::Client,
    /// 요청 URL (엔드포인트 루트)
    url: Url,
    /// `Host` 헤더 값 (서명에 포함됨)
    host: String,
    secret_id: String,
    secret_key: String,
    region: String,
    action: OcrAction,
}

impl TencentOcrClient {
    /// 새 클라이언트 생성
    ///
    /// 자격증명/리전이 비어 있거나 엔드포인트가 잘못되면 에러를 반환한다.
    pub fn new(config: &GatewayConfig) -> Result<Self, CoreError> {
        config
            .validate()
            .map_err(|e| CoreError::Config(format!("OCR 게이트웨이 설정 오류: {e}")))?;

        let url = parse_endpoint(&config.endpoint)?;
        let host = host_header(&url)?;

        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 생성 실패: {e}")))?;

        debug!(
            endpoint = %url,
            region = %config.region,
            action = %config.action,
            "TencentOcrClient 초기화"
        );

        Ok(Self {
            http_client,
            url,
            host,
            secret_id: config.secret_id.clone(),
            secret_key: config.secret_key.clone(),
            region: config.region.clone(),
            action: config.action,
        })
    }

    /// API 응답 본문에서 검출 조각 파싱
    fn parse_response(body: &str) -> Result<Vec<TextDetection>, CoreError> {
        let envelope: Envelope = serde_json::from_str(body)?;

        let Some(response) = envelope.response else {
            return Ok(Vec::new());
        };

        let request_id = response.request_id.unwrap_or_default();

        if let Some(error) = response.error {
            if error.code.starts_with("AuthFailure") {
                return Err(CoreError::Auth(format!(
                    "[{}] {} (request_id={request_id})",
                    error.code, error.message
                )));
            }
            return Err(CoreError::Gateway {
                code: error.code,
                message: error.message,
                request_id,
            });
        }

        let detections: Vec<TextDetection> = response
            .text_detections
            .unwrap_or_default()
            .into_iter()
            .map(|raw| TextDetection {
                detected_text: raw.detected_text,
                confidence: raw.confidence,
            })
            .collect();

        debug!(request_id = %request_id, count = detections.len(), "OCR 결과 수신");
        Ok(detections)
    }
}

#[async_trait]
impl OcrGateway for TencentOcrClient {
    async fn detect_text(&self, image_base64: &str) -> Result<Vec<TextDetection>, CoreError> {
        let payload = serde_json::to_vec(&DetectRequest { image_base64 })?;
        let timestamp = Utc::now().timestamp();
        let action = self.action.api_name();

        let authorization = Tc3Signer::new(&self.secret_id, &self.secret_key, SERVICE)
            .authorization(&SignableRequest {
                host: &self.host,
                action,
                content_type: JSON_CONTENT_TYPE,
                payload: &payload,
                timestamp,
            })?;

        debug!(
            endpoint = %self.url,
            action = action,
            image_size = image_base64.len(),
            "외부 OCR API 호출"
        );

        let response = self
            .http_client
            .post(self.url.clone())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header(HOST, &self.host)
            .header("X-TC-Action", action)
            .header("X-TC-Version", API_VERSION)
            .header("X-TC-Timestamp", timestamp.to_string())
            .header("X-TC-Region", &self.region)
            .header(AUTHORIZATION, authorization)
            .body(payload)
            .send()
            .await
            .map_err(|e| CoreError::Network(format!("OCR API 호출 실패: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CoreError::Network(format!("OCR API 응답 읽기 실패: {e}")))?;

        if !status.is_success() {
            warn!(status = %status, "OCR API 오류 응답");
            return Err(CoreError::Network(format!(
                "OCR API 오류 ({status}): {}",
                body.chars().take(ERROR_BODY_PREVIEW).collect::<String>()
            )));
        }

        Self::parse_response(&body)
    }

    fn provider_name(&self) -> &str {
        "tencent-cloud-ocr"
    }
}

/// 엔드포인트 문자열을 URL로 변환
///
/// 스킴이 없으면 `https://`를 붙인다 (예: "ocr.tencentcloudapi.com").
fn parse_endpoint(endpoint: &str) -> Result<Url, CoreError> {
    let endpoint = endpoint.trim();
    let raw = if endpoint.contains("://") {
        endpoint.to_string()
    } else {
        format!("https://{endpoint}")
    };

    let mut url = Url::parse(&raw)
        .map_err(|e| CoreError::Config(format!("잘못된 OCR 엔드포인트 '{endpoint}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(CoreError::Config(format!(
            "지원하지 않는 스킴: {}",
            url.scheme()
        )));
    }
    url.set_path("/");
    url.set_query(None);
    Ok(url)
}

/// 서명에 쓰일 `Host` 헤더 값 (기본 포트는 생략)
fn host_header(url: &Url) -> Result<String, CoreError> {
    let host = url
        .host_str()
        .ok_or_else(|| CoreError::Config(format!("엔드포인트에 호스트 없음: {url}")))?;
    Ok(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

// ============================================================
// 테스트
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn config_for(endpoint: &str) -> GatewayConfig {
        let mut config = GatewayConfig::new("AKIDEXAMPLE", "test-secret-placeholder", "ap-guangzhou");
        config.endpoint = endpoint.to_string();
        config
    }

    #[test]
    fn new_client_empty_credentials_error() {
        let mut config = config_for("ocr.tencentcloudapi.com");
        config.secret_key = String::new();
        let err = TencentOcrClient::new(&config).err().unwrap().to_string();
        assert!(err.contains("secret_key"));
    }

    #[test]
    fn new_client_default_endpoint() {
        let client = TencentOcrClient::new(&config_for("ocr.tencentcloudapi.com")).unwrap();
        assert_eq!(client.url.as_str(), "https://ocr.tencentcloudapi.com/");
        assert_eq!(client.host, "ocr.tencentcloudapi.com");
        assert_eq!(client.provider_name(), "tencent-cloud-ocr");
    }

    #[test]
    fn new_client_rejects_bad_endpoint() {
        assert!(TencentOcrClient::new(&config_for("ftp://ocr.example.com")).is_err());
        assert!(TencentOcrClient::new(&config_for("http://")).is_err());
    }

    #[test]
    fn host_header_keeps_explicit_port() {
        let url = parse_endpoint("http://127.0.0.1:8081/some/path?x=1").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8081/");
        assert_eq!(host_header(&url).unwrap(), "127.0.0.1:8081");
    }

    #[test]
    fn parse_response_detections_in_order() {
        let body = r#"{
            "Response": {
                "TextDetections": [
                    {"DetectedText": "AB", "Confidence": 99},
                    {"Confidence": 10},
                    {"DetectedText": "C D", "Confidence": 87}
                ],
                "RequestId": "req-1"
            }
        }"#;
        let detections = TencentOcrClient::parse_response(body).unwrap();
        assert_eq!(detections.len(), 3);
        assert_eq!(detections[0].detected_text.as_deref(), Some("AB"));
        assert_eq!(detections[0].confidence, Some(99));
        assert!(detections[1].detected_text.is_none());
        assert_eq!(detections[2].detected_text.as_deref(), Some("C D"));
    }

    #[test]
    fn parse_response_without_detections_is_empty() {
        let detections =
            TencentOcrClient::parse_response(r#"{"Response":{"RequestId":"r"}}"#).unwrap();
        assert!(detections.is_empty());
        let detections = TencentOcrClient::parse_response(r#"{}"#).unwrap();
        assert!(detections.is_empty());
    }

    #[test]
    fn parse_response_provider_error() {
        let body = r#"{"Response":{"Error":{"Code":"FailedOperation.ImageDecodeFailed","Message":"decode failed"},"RequestId":"req-2"}}"#;
        match TencentOcrClient::parse_response(body).unwrap_err() {
            CoreError::Gateway {
                code, request_id, ..
            } => {
                assert_eq!(code, "FailedOperation.ImageDecodeFailed");
                assert_eq!(request_id, "req-2");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_response_auth_error() {
        let body = r#"{"Response":{"Error":{"Code":"AuthFailure.SignatureFailure","Message":"bad signature"},"RequestId":"req-3"}}"#;
        let err = TencentOcrClient::parse_response(body).unwrap_err();
        assert!(matches!(err, CoreError::Auth(_)));
    }

    #[test]
    fn parse_response_invalid_json() {
        let err = TencentOcrClient::parse_response("<html>").unwrap_err();
        assert!(matches!(err, CoreError::Serialization(_)));
    }

    #[tokio::test]
    async fn detect_text_sends_signed_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_header("x-tc-action", "EnglishOCR")
            .match_header("x-tc-version", API_VERSION)
            .match_header("x-tc-region", "ap-guangzhou")
            .match_header("content-type", JSON_CONTENT_TYPE)
            .match_header("x-tc-timestamp", Matcher::Regex(r"^\d+$".to_string()))
            .match_header(
                "authorization",
                Matcher::Regex(
                    r"^TC3-HMAC-SHA256 Credential=AKIDEXAMPLE/\d{4}-\d{2}-\d{2}/ocr/tc3_request, SignedHeaders=content-type;host;x-tc-action, Signature=[0-9a-f]{64}$"
                        .to_string(),
                ),
            )
            .match_body(Matcher::JsonString(
                r#"{"ImageBase64":"iVBORw0KG=="}"#.to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"Response":{"TextDetections":[{"DetectedText":"AB"},{"DetectedText":"CD"}],"RequestId":"req-ok"}}"#,
            )
            .create_async()
            .await;

        let client = TencentOcrClient::new(&config_for(&server.url())).unwrap();
        let detections = client.detect_text("iVBORw0KG==").await.unwrap();

        assert_eq!(detections.len(), 2);
        assert_eq!(detections[1].detected_text.as_deref(), Some("CD"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn detect_text_uses_configured_action() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_header("x-tc-action", "GeneralBasicOCR")
            .with_status(200)
            .with_body(r#"{"Response":{"TextDetections":[],"RequestId":"r"}}"#)
            .create_async()
            .await;

        let mut config = config_for(&server.url());
        config.action = OcrAction::GeneralBasicOcr;
        let client = TencentOcrClient::new(&config).unwrap();
        assert!(client.detect_text("QUJD").await.unwrap().is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn detect_text_http_error_status() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .with_status(500)
            .with_body("internal error")
            .expect(1)
            .create_async()
            .await;

        let client = TencentOcrClient::new(&config_for(&server.url())).unwrap();
        let err = client.detect_text("QUJD").await.unwrap_err();
        assert!(matches!(err, CoreError::Network(_)));
        assert!(err.to_string().contains("500"));
        // 재시도 없음
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn detect_text_provider_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body(r#"{"Response":{"Error":{"Code":"LimitExceeded","Message":"too many"},"RequestId":"r"}}"#)
            .create_async()
            .await;

        let client = TencentOcrClient::new(&config_for(&server.url())).unwrap();
        let err = client.detect_text("QUJD").await.unwrap_err();
        assert!(matches!(err, CoreError::Gateway { .. }));
    }

    #[tokio::test]
    async fn detect_text_unreachable_endpoint() {
        // 도달 불가 URL → 네트워크 에러
        let client = TencentOcrClient::new(&config_for("http://127.0.0.1:1")).unwrap();
        let err = client.detect_text("QUJD").await.unwrap_err();
        assert!(matches!(err, CoreError::Network(_)));
    }
}
