//! # ocrgate-network
//!
//! 외부 OCR 제공자 네트워크 어댑터.
//! `OcrGateway` 포트를 Tencent Cloud OCR API 호출로 구현한다.
//!
//! ## 사용 예시
//!
//! ```rust,ignore
//! use ocrgate_core::config::GatewayConfig;
//! use ocrgate_network::tencent_ocr::TencentOcrClient;
//!
//! let config = GatewayConfig::new("AKID...", "secret", "ap-guangzhou");
//! let client = TencentOcrClient::new(&config)?;
//! ```

pub mod tc3;
pub mod tencent_ocr;
