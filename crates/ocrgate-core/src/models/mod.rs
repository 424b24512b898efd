//! ocrgate 도메인 모델.
//!
//! `/ocr` 엔드포인트의 요청/응답 구조체를 정의한다.
//! 모두 요청 단위로 생성되고 응답 전송 후 버려진다.

pub mod ocr;
