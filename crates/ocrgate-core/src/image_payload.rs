//! 이미지 페이로드 정규화.
//!
//! data URI(`data:image/png;base64,....`)로 들어온 이미지에서 base64 본문만 남긴다.

/// data URI의 base64 구분자
pub const BASE64_MARKER: &str = ";base64,";

/// 게이트웨이에 전달할 base64 본문 추출
///
/// 첫 번째 `;base64,` 이후 부분을 반환하고, 구분자가 없으면 입력을 그대로 반환한다.
/// base64 유효성은 검사하지 않는다 (잘못된 입력은 게이트웨이 호출에서 실패).
pub fn normalize_image_data(input: &str) -> &str {
    match input.find(BASE64_MARKER) {
        Some(pos) => &input[pos + BASE64_MARKER.len()..],
        None => input,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_base64_is_unchanged() {
        for s in ["", "iVBORw0KG==", "base64,abc", ";base64", "data:image/png,abc"] {
            assert_eq!(normalize_image_data(s), s);
        }
    }

    #[test]
    fn data_uri_prefix_is_stripped() {
        assert_eq!(
            normalize_image_data("data:image/png;base64,iVBORw0KG=="),
            "iVBORw0KG=="
        );
        assert_eq!(normalize_image_data(";base64,abc"), "abc");
        assert_eq!(normalize_image_data("anything;base64,"), "");
    }

    #[test]
    fn only_first_marker_is_consumed() {
        assert_eq!(normalize_image_data("a;base64,b;base64,c"), "b;base64,c");
    }

    #[test]
    fn prefix_plus_payload_yields_payload() {
        let prefixes = ["", "data:image/jpeg", "x", "데이터"];
        let payloads = ["", "QUJD", "/9j/4AAQSkZJRg==", "a b c"];
        for p in prefixes {
            for d in payloads {
                let input = format!("{p}{BASE64_MARKER}{d}");
                assert_eq!(normalize_image_data(&input), d);
            }
        }
    }
}
