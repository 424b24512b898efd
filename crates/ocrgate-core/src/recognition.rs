//! 텍스트 인식: 정규화, 게이트웨이 호출, 조각 결합.

use std::sync::Arc;

use tracing::debug;

use crate::error::CoreError;
use crate::image_payload::normalize_image_data;
use crate::ports::ocr_gateway::{OcrGateway, TextDetection};

/// 검출 조각을 하나의 문자열로 결합
///
/// 제공자 순서를 유지하며 각 조각의 공백(' ')을 모두 제거한다.
/// 텍스트가 없는 조각은 건너뛴다.
pub fn concat_detections(detections: &[TextDetection]) -> String {
    detections
        .iter()
        .filter_map(|d| d.detected_text.as_deref())
        .filter(|text| !text.is_empty())
        .flat_map(|text| text.chars().filter(|c| *c != ' '))
        .collect()
}

/// 검출 조각 중 가장 낮은 신뢰도 (보고된 값이 없으면 `None`)
pub(crate) fn min_confidence(detections: &[TextDetection]) -> Option<i64> {
    detections.iter().filter_map(|d| d.confidence).min()
}

/// 텍스트 인식기
///
/// 시작 시 한 번 생성된 게이트웨이 핸들을 공유한다. 요청 간 가변 상태 없음.
#[derive(Clone)]
pub struct TextRecognizer {
    gateway: Arc<dyn OcrGateway>,
}

impl TextRecognizer {
    /// 새 인식기 생성
    pub fn new(gateway: Arc<dyn OcrGateway>) -> Self {
        Self { gateway }
    }

    /// 게이트웨이 제공자 이름
    pub fn provider_name(&self) -> &str {
        self.gateway.provider_name()
    }

    /// `imgdata` 원문에서 텍스트 인식
    ///
    /// 게이트웨이 에러는 재시도 없이 그대로 반환한다.
    pub async fn recognize(&self, image_data: &str) -> Result<String, CoreError> {
        let payload = normalize_image_data(image_data);
        let detections = self.gateway.detect_text(payload).await?;
        let text = concat_detections(&detections);

        debug!(
            provider = self.gateway.provider_name(),
            segments = detections.len(),
            min_confidence = ?min_confidence(&detections),
            chars = text.chars().count(),
            "OCR 결과 결합"
        );
        Ok(text)
    }
}

impl std::fmt::Debug for TextRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextRecognizer")
            .field("provider", &self.gateway.provider_name())
            .finish()
    }
}
