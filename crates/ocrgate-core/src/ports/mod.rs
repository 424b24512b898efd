//! 포트 인터페이스 (trait).
//!
//! 어댑터 crate(`ocrgate-network`)가 이 trait을 구현하며,
//! `ocrgate-app`에서 `Arc<dyn OcrGateway>`로 와이어링한다.

pub mod ocr_gateway;
