//! TC3-HMAC-SHA256 요청 서명.
//!
//! Tencent Cloud API 3.0의 `Authorization` 헤더를 만든다.
//! 서명은 (자격증명, 서비스, 호스트, 액션, 본문, 타임스탬프)의 순수 함수다.
//!
//! 서명 절차:
//! 1. CanonicalRequest = 메서드 / URI / 쿼리 / 정규 헤더 / 서명 헤더 목록 / 본문 SHA256
//! 2. StringToSign = 알고리즘 / 타임스탬프 / 자격증명 범위 / CanonicalRequest SHA256
//! 3. 키 파생: "TC3"+SecretKey → 날짜 → 서비스 → "tc3_request"
//! 4. Signature = HMAC(파생 키, StringToSign)의 hex

use chrono::DateTime;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use ocrgate_core::error::CoreError;

type HmacSha256 = Hmac<Sha256>;

/// 서명 알고리즘 이름
pub const ALGORITHM: &str = "TC3-HMAC-SHA256";

/// 서명에 포함되는 헤더 목록 (소문자, 알파벳순)
pub const SIGNED_HEADERS: &str = "content-type;host;x-tc-action";

/// 서명 대상 요청
#[derive(Debug, Clone)]
pub struct SignableRequest<'a> {
    /// `Host` 헤더 값
    pub host: &'a str,
    /// `X-TC-Action` 헤더 값 (예: "EnglishOCR")
    pub action: &'a str,
    /// `Content-Type` 헤더 값
    pub content_type: &'a str,
    /// 요청 본문
    pub payload: &'a [u8],
    /// Unix 타임스탬프 (초, `X-TC-Timestamp`와 동일해야 함)
    pub timestamp: i64,
}

/// TC3 서명기
pub struct Tc3Signer<'a> {
    secret_id: &'a str,
    secret_key: &'a str,
    service: &'a str,
}

impl<'a> Tc3Signer<'a> {
    /// 새 서명기 생성
    pub fn new(secret_id: &'a str, secret_key: &'a str, service: &'a str) -> Self {
        Self {
            secret_id,
            secret_key,
            service,
        }
    }

    /// `Authorization` 헤더 값 생성
    pub fn authorization(&self, request: &SignableRequest<'_>) -> Result<String, CoreError> {
        let date = utc_date(request.timestamp)?;
        let scope = self.credential_scope(&date);
        let string_to_sign = self.string_to_sign(request, &scope);

        let secret_date = hmac_sha256(format!("TC3{}", self.secret_key).as_bytes(), &date)?;
        let secret_service = hmac_sha256(&secret_date, self.service)?;
        let secret_signing = hmac_sha256(&secret_service, "tc3_request")?;
        let signature = hmac_sha256_hex(&secret_signing, &string_to_sign)?;

        Ok(format!(
            "{ALGORITHM} Credential={}/{scope}, SignedHeaders={SIGNED_HEADERS}, Signature={signature}",
            self.secret_id
        ))
    }

    fn credential_scope(&self, date: &str) -> String {
        format!("{date}/{}/tc3_request", self.service)
    }

    pub(crate) fn string_to_sign(&self, request: &SignableRequest<'_>, scope: &str) -> String {
        let canonical = canonical_request(request);
        format!(
            "{ALGORITHM}\n{}\n{scope}\n{}",
            request.timestamp,
            sha256_hex(canonical.as_bytes())
        )
    }
}

/// CanonicalRequest 문자열 (POST, 루트 경로, 쿼리 없음)
pub(crate) fn canonical_request(request: &SignableRequest<'_>) -> String {
    let canonical_headers = format!(
        "content-type:{}\nhost:{}\nx-tc-action:{}\n",
        request.content_type.to_ascii_lowercase(),
        request.host.to_ascii_lowercase(),
        request.action.to_ascii_lowercase()
    );
    format!(
        "POST\n/\n\n{canonical_headers}\n{SIGNED_HEADERS}\n{}",
        sha256_hex(request.payload)
    )
}

/// 타임스탬프의 UTC 날짜 (YYYY-MM-DD)
fn utc_date(timestamp: i64) -> Result<String, CoreError> {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .ok_or_else(|| CoreError::Internal(format!("잘못된 서명 타임스탬프: {timestamp}")))
}

fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

fn hmac_sha256(key: &[u8], message: &str) -> Result<Vec<u8>, CoreError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| CoreError::Internal(format!("HMAC 키 초기화 실패: {e}")))?;
    mac.update(message.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

fn hmac_sha256_hex(key: &[u8], message: &str) -> Result<String, CoreError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| CoreError::Internal(format!("HMAC 키 초기화 실패: {e}")))?;
    mac.update(message.as_bytes());
    Ok(format!("{:x}", mac.finalize().into_bytes()))
}
