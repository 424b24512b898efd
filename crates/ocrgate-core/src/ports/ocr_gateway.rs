//! OCR 게이트웨이 포트.
//!
//! 외부 클라우드 OCR 서비스를 추상화하는 인터페이스를 정의한다.
//! 구현체는 읽기 전용 핸들로 생성 후 여러 요청 태스크에서 공유된다.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// 텍스트 검출 조각 (제공자 무관 표준 구조)
///
/// 이미지의 텍스트 영역 하나에 대응한다. 제공자가 반환한 순서를 유지한다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextDetection {
    /// 인식된 텍스트 (제공자가 비워둘 수 있음)
    pub detected_text: Option<String>,
    /// 인식 신뢰도 (제공자 기준, 0 ~ 100)
    #[serde(default)]
    pub confidence: Option<i64>,
}

impl TextDetection {
    /// 텍스트만 가진 검출 조각 생성
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            detected_text: Some(text.into()),
            confidence: None,
        }
    }
}

/// OCR 게이트웨이: 외부 OCR API 호출 1회를 표현
#[async_trait]
pub trait OcrGateway: Send + Sync {
    /// base64 이미지에서 텍스트 조각 검출
    ///
    /// - `image_base64`: data URI 접두사가 제거된 base64 문자열
    ///
    /// 재시도하지 않으며, 실패는 그대로 호출자에게 전달된다.
    async fn detect_text(&self, image_base64: &str) -> Result<Vec<TextDetection>, CoreError>;

    /// 제공자 이름 (예: "tencent-cloud-ocr")
    fn provider_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_detection_serde() {
        let detection = TextDetection {
            detected_text: Some("저장".to_string()),
            confidence: Some(99),
        };
        let json = serde_json::to_string(&detection).unwrap();
        let deser: TextDetection = serde_json::from_str(&json).unwrap();
        assert_eq!(deser, detection);
    }

    #[test]
    fn text_detection_missing_confidence() {
        let deser: TextDetection = serde_json::from_str(r#"{"detected_text":null}"#).unwrap();
        assert!(deser.detected_text.is_none());
        assert!(deser.confidence.is_none());
    }
}
