//! ocrgate 핵심 에러 타입.
//!
//! 어댑터 crate와 웹 레이어는 자체 에러 타입에서 `CoreError`를 래핑한다.

use thiserror::Error;

/// 코어 레이어 에러.
/// 직렬화, 설정, 외부 OCR 호출 등 도메인 공통 에러를 정의한다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// 필드 유효성 검증 실패
    #[error("유효성 검증 실패 ({field}): {message}")]
    Validation {
        /// 검증 실패한 필드명
        field: String,
        /// 실패 사유
        message: String,
    },

    /// 인증 실패 (서명 불일치, 자격증명 오류 등)
    #[error("인증 에러: {0}")]
    Auth(String),

    /// 네트워크 에러 (연결 실패, 비정상 HTTP 상태)
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// OCR 제공자가 반환한 에러
    #[error("OCR 게이트웨이 에러 [{code}]: {message} (request_id={request_id})")]
    Gateway {
        /// 제공자 에러 코드 (예: "FailedOperation.ImageDecodeFailed")
        code: String,
        /// 제공자 에러 메시지
        message: String,
        /// 제공자 요청 ID (없으면 빈 문자열)
        request_id: String,
    },

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_error_display_includes_code_and_request_id() {
        let err = CoreError::Gateway {
            code: "FailedOperation.ImageDecodeFailed".to_string(),
            message: "image decode failed".to_string(),
            request_id: "req-1".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("FailedOperation.ImageDecodeFailed"));
        assert!(msg.contains("req-1"));
    }

    #[test]
    fn serialization_error_converts() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Serialization(_)));
    }
}
