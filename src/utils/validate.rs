//! Form field checks shared by the submit handlers.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use validator::Validate;

use crate::error::ValidationFieldError;

/// Runs the derived validator rules and flattens the failures into field errors.
pub fn field_errors<T: Validate>(form: &T) -> Vec<ValidationFieldError> {
    match form.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => ValidationFieldError::from_validation(&errors),
    }
}

/// Parses a decimal form field. Blank input reads as zero.
pub fn parse_decimal(
    field: &str,
    raw: &str,
    errors: &mut Vec<ValidationFieldError>,
) -> BigDecimal {
    let raw = raw.trim();
    if raw.is_empty() {
        return BigDecimal::from(0);
    }
    match BigDecimal::from_str(raw) {
        Ok(value) => value,
        Err(_) => {
            errors.push(ValidationFieldError::new(field, "数値を入力してください"));
            BigDecimal::from(0)
        }
    }
}

/// Parses an optional numeric form field. Blank input reads as `None`.
pub fn parse_optional<T: FromStr>(
    field: &str,
    raw: &str,
    errors: &mut Vec<ValidationFieldError>,
) -> Option<T> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.push(ValidationFieldError::new(field, "数値を入力してください"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;
    use axum::extract::{Form, FromRequest, Request};
    use axum::http::{Method, header};
    use serde::de::DeserializeOwned;

    #[derive(Debug, Deserialize, Validate)]
    struct TestForm {
        #[validate(length(min = 3, max = 20, message = "3文字以上で入力してください"))]
        username: String,
        #[validate(email)]
        email: String,
    }

    async fn bind<T: DeserializeOwned>(body: &'static str) -> T {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/test")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        let Form(value) = Form::<T>::from_request(request, &()).await.unwrap();
        value
    }

    #[tokio::test]
    async fn test_valid_form_has_no_errors() {
        let form: TestForm = bind("username=tester&email=t%40example.com").await;

        assert!(field_errors(&form).is_empty());
    }

    #[tokio::test]
    async fn test_invalid_fields_are_reported() {
        let form: TestForm = bind("username=ab&email=nope").await;
        let errors = field_errors(&form);

        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["email", "username"]);
        assert_eq!(errors[1].message, "3文字以上で入力してください");
    }

    #[test]
    fn test_parse_decimal() {
        let mut errors = Vec::new();

        assert_eq!(
            parse_decimal("price", "12.50", &mut errors),
            BigDecimal::from_str("12.5").unwrap()
        );
        assert_eq!(parse_decimal("price", " ", &mut errors), BigDecimal::from(0));
        assert!(errors.is_empty());

        parse_decimal("cost", "abc", &mut errors);
        assert_eq!(
            errors,
            vec![ValidationFieldError::new("cost", "数値を入力してください")]
        );
    }

    #[test]
    fn test_parse_optional() {
        let mut errors = Vec::new();

        assert_eq!(parse_optional::<i64>("brand_id", " 7 ", &mut errors), Some(7));
        assert_eq!(parse_optional::<i64>("brand_id", "", &mut errors), None);
        assert!(errors.is_empty());

        assert_eq!(parse_optional::<i32>("in_stock", "3.5", &mut errors), None);
        assert_eq!(
            errors,
            vec![ValidationFieldError::new("in_stock", "数値を入力してください")]
        );
    }
}
