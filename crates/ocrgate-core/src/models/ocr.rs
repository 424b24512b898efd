//! `/ocr` 요청/응답 모델.

use std::fmt;

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// 요청 본문의 이미지 필드 이름
const IMAGE_FIELD: &str = "imgdata";

/// OCR 요청 본문
///
/// `imgdata`는 base64 문자열 또는 `<prefix>;base64,<data>` 형식의 data URI.
///
/// 디코딩 규칙:
/// - 키 이름은 대소문자를 구분하지 않는다 (`ImgData`도 허용). 중복되면 마지막 값이 남는다.
/// - 필드가 없거나 `null`이면 빈 문자열, 알 수 없는 필드는 무시한다.
/// - 문자열이 아닌 값은 에러.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OcrRequest {
    /// 이미지 데이터
    #[serde(rename = "imgdata")]
    pub image_data: String,
}

impl OcrRequest {
    /// 요청 본문 디코딩
    ///
    /// 본문 전체가 `null`이면 빈 요청으로 취급한다.
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let request: Option<Self> = serde_json::from_slice(bytes)?;
        Ok(request.unwrap_or_default())
    }
}

impl<'de> Deserialize<'de> for OcrRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(OcrRequestVisitor)
    }
}

struct OcrRequestVisitor;

impl<'de> Visitor<'de> for OcrRequestVisitor {
    type Value = OcrRequest;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("`imgdata` 필드를 가진 JSON 객체")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut request = OcrRequest::default();
        while let Some(key) = map.next_key::<String>()? {
            if key.eq_ignore_ascii_case(IMAGE_FIELD) {
                // null은 기존 값을 유지
                if let Some(value) = map.next_value::<Option<String>>()? {
                    request.image_data = value;
                }
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(request)
    }
}

/// OCR 응답 본문
///
/// `code == 1`이면 인식된 텍스트가 있고, `code == 0`이면 `result`가 빈 문자열이다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrResponse {
    /// 인식 여부 플래그 (1: 텍스트 있음, 0: 없음)
    pub code: i32,
    /// 공백이 제거된 인식 텍스트
    pub result: String,
}

impl OcrResponse {
    /// 인식 텍스트로부터 응답 생성. `code`는 텍스트 유무로 결정된다.
    pub fn from_text(text: String) -> Self {
        let code = if text.is_empty() { 0 } else { 1 };
        Self { code, result: text }
    }
}
