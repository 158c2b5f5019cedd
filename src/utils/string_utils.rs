//! # 문자열 유틸리티
//!
//! 문자열 처리와 관련된 공통 유틸리티 함수들입니다.

use serde::Deserialize;

/// 검증 메시지에 쓰일 사람이 읽는 필드 이름을 만듭니다.
///
/// camelCase 경계와 `_`를 공백으로 바꾸고 소문자로 만듭니다.
///
/// # 예제
/// ```rust,ignore
/// use crate::utils::string_utils::humanize_attribute;
///
/// assert_eq!(humanize_attribute("postId"), "post id");
/// assert_eq!(humanize_attribute("category_ids"), "category ids");
/// ```
pub fn humanize_attribute(wire: &str) -> String {
    let mut out = String::with_capacity(wire.len() + 4);
    let mut previous_lower = false;

    for c in wire.chars() {
        if c == '_' || c == '-' || c == '.' {
            if !out.ends_with(' ') && !out.is_empty() {
                out.push(' ');
            }
            previous_lower = false;
            continue;
        }
        if c.is_uppercase() && previous_lower {
            out.push(' ');
        }
        previous_lower = c.is_lowercase() || c.is_ascii_digit();
        out.extend(c.to_lowercase());
    }

    out.trim_end().to_string()
}

/// URL에 쓸 수 있는 슬러그를 만듭니다.
///
/// 라틴 악센트 문자는 ASCII로 바꾸고, 영숫자가 아닌 문자 연속은 `-` 하나로
/// 합칩니다. 앞뒤의 `-`는 제거됩니다.
///
/// # 예제
/// ```rust,ignore
/// use crate::utils::string_utils::slugify;
///
/// assert_eq!(slugify("Introdução ao Rust!"), "introducao-ao-rust");
/// ```
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;

    for c in value.chars().flat_map(char::to_lowercase) {
        let c = fold_accent(c);
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

/// 선택적 문자열 필드 정리
///
/// None 값이거나 빈 문자열/공백만 있는 경우 None을 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 Some 옵션으로 반환합니다.
///
/// # 예제
/// ```rust,ignore
/// use crate::utils::string_utils::clean_optional_string;
///
/// assert_eq!(clean_optional_string(Some("  Hello  ".to_string())), Some("Hello".to_string()));
/// assert_eq!(clean_optional_string(Some("   ".to_string())), None);
/// assert_eq!(clean_optional_string(None), None);
/// ```
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 선택적 문자열 필드를 위한 serde deserializer
///
/// 빈 문자열이나 공백만 있는 문자열을 None으로 변환하고, 유효한 문자열은
/// 앞뒤 공백을 제거합니다.
///
/// ```rust,ignore
/// #[derive(Deserialize)]
/// struct CreatePostData {
///     #[serde(default, deserialize_with = "deserialize_optional_string")]
///     excerpt: Option<String>,
/// }
/// ```
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

/// 부분 업데이트에서 비울 수 있는 문자열 필드를 위한 serde deserializer
///
/// `#[serde(default)]`와 함께 쓰면 필드가 없을 때 `None`, 명시적 null이나
/// 공백 문자열이면 `Some(None)`, 값이 있으면 `Some(Some(..))`이 됩니다.
pub fn deserialize_nullable_string<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    deserialize_optional_string(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize_attribute() {
        assert_eq!(humanize_attribute("name"), "name");
        assert_eq!(humanize_attribute("postId"), "post id");
        assert_eq!(humanize_attribute("category_ids"), "category ids");
        assert_eq!(humanize_attribute("password_confirmation"), "password confirmation");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  Introdução ao Rust!  "), "introducao-ao-rust");
        assert_eq!(slugify("a -- b"), "a-b");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some("  World  ".to_string())), Some("World".to_string()));
        assert_eq!(clean_optional_string(Some("   ".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }

    #[test]
    fn test_deserialize_optional_string() {
        #[derive(Deserialize)]
        struct TestStruct {
            #[serde(default, deserialize_with = "deserialize_optional_string")]
            optional_field: Option<String>,
        }

        let result: TestStruct = serde_json::from_str(r#"{"optional_field": "  Olá  "}"#).unwrap();
        assert_eq!(result.optional_field, Some("Olá".to_string()));

        let result: TestStruct = serde_json::from_str(r#"{"optional_field": "   "}"#).unwrap();
        assert_eq!(result.optional_field, None);

        let result: TestStruct = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(result.optional_field, None);
    }
}
