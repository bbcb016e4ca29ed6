//! 评论校验与查重

use super::model::{Comment, CommentPayload};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommentValidationError {
    #[error("Comment is absent or empty")]
    Empty,
    #[error("Field '{0}' is absent")]
    MissingField(&'static str),
}

/// 按固定顺序检查必填字段，报告第一个缺失的
pub fn validate_comment(payload: &CommentPayload) -> Result<(), CommentValidationError> {
    if payload.is_empty() {
        return Err(CommentValidationError::Empty);
    }

    let required = [
        ("name", &payload.name),
        ("email", &payload.email),
        ("body", &payload.body),
        ("productId", &payload.product_id),
    ];

    match required
        .iter()
        .find(|(_, value)| value.as_deref().map_or(true, str::is_empty))
    {
        Some((field, _)) => Err(CommentValidationError::MissingField(*field)),
        None => Ok(()),
    }
}

fn same(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// 只比较第一条 email 相同的评论：其 body、name、productId 也都相同时视为重复
pub fn is_comment_unique(payload: &CommentPayload, existing: &[Comment]) -> bool {
    let email = payload.email.as_deref().unwrap_or_default();

    let Some(candidate) = existing.iter().find(|c| same(email, &c.email)) else {
        return true;
    };

    !(same(payload.body.as_deref().unwrap_or_default(), &candidate.body)
        && same(payload.name.as_deref().unwrap_or_default(), &candidate.name)
        && same(
            payload.product_id.as_deref().unwrap_or_default(),
            &candidate.product_id,
        ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, email: &str, body: &str, product_id: &str) -> CommentPayload {
        CommentPayload {
            id: None,
            name: Some(name.into()),
            email: Some(email.into()),
            body: Some(body.into()),
            product_id: Some(product_id.into()),
            extra: Default::default(),
        }
    }

    fn comment(id: &str, name: &str, email: &str, body: &str, product_id: &str) -> Comment {
        Comment {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            body: body.into(),
            product_id: product_id.into(),
        }
    }

    #[test]
    fn test_empty_payload() {
        assert_eq!(
            validate_comment(&CommentPayload::default()),
            Err(CommentValidationError::Empty)
        );
    }

    #[test]
    fn test_unknown_keys_only_report_missing_name() {
        let unknown: CommentPayload = serde_json::from_str(r#"{"foo":"bar"}"#).unwrap();
        assert_eq!(
            validate_comment(&unknown),
            Err(CommentValidationError::MissingField("name"))
        );
    }

    #[test]
    fn test_first_missing_field_is_reported() {
        let only_name = CommentPayload {
            name: Some("x".into()),
            ..Default::default()
        };
        let err = validate_comment(&only_name).unwrap_err();
        assert_eq!(err, CommentValidationError::MissingField("email"));
        assert_eq!(err.to_string(), "Field 'email' is absent");

        let mut no_product = payload("x", "x@y.z", "hi", "p1");
        no_product.product_id = None;
        assert_eq!(
            validate_comment(&no_product),
            Err(CommentValidationError::MissingField("productId"))
        );
    }

    #[test]
    fn test_empty_string_counts_as_missing() {
        let blank_body = payload("x", "x@y.z", "", "p1");
        assert_eq!(
            validate_comment(&blank_body),
            Err(CommentValidationError::MissingField("body"))
        );
    }

    #[test]
    fn test_complete_payload_is_valid() {
        assert!(validate_comment(&payload("x", "x@y.z", "hi", "p1")).is_ok());
    }

    #[test]
    fn test_unique_when_no_email_matches() {
        let existing = vec![comment("c1", "Ann", "ann@x.io", "hello", "p1")];
        assert!(is_comment_unique(&payload("Ann", "bob@x.io", "hello", "p1"), &existing));
    }

    #[test]
    fn test_same_email_different_body_is_unique() {
        let existing = vec![comment("c1", "Ann", "ann@x.io", "hello", "p1")];
        assert!(is_comment_unique(&payload("Ann", "ann@x.io", "bye", "p1"), &existing));
    }

    #[test]
    fn test_duplicate_is_case_insensitive() {
        let existing = vec![comment("c1", "Ann", "ann@x.io", "Hello", "p1")];
        assert!(!is_comment_unique(&payload("ANN", "Ann@X.io", "hello", "P1"), &existing));
    }

    #[test]
    fn test_only_first_email_match_is_checked() {
        let existing = vec![
            comment("c1", "Ann", "ann@x.io", "first", "p1"),
            comment("c2", "Ann", "ann@x.io", "second", "p1"),
        ];
        // 与第二条完全相同，但只比较第一条
        assert!(is_comment_unique(&payload("Ann", "ann@x.io", "second", "p1"), &existing));
    }
}
