//! # ocrgate-core
//!
//! ocrgate 도메인 모델, 포트(trait) 정의, 에러 타입.
//! 모든 크레이트가 공유하는 핵심 타입과 인터페이스를 제공한다.
//!
//! ## 구조
//!
//! - [`models`]: 요청/응답 데이터 구조체 (serde Serialize/Deserialize)
//! - [`ports`]: 외부 OCR 게이트웨이 포트 인터페이스 (async_trait)
//! - [`image_payload`]: data URI 접두사 제거
//! - [`recognition`]: 게이트웨이 호출 + 텍스트 조각 결합
//! - [`error`]: 핵심 에러 타입 (thiserror)
//! - [`config`]: 애플리케이션 설정 구조체

pub mod config;
pub mod error;
pub mod image_payload;
pub mod models;
pub mod ports;
pub mod recognition;
