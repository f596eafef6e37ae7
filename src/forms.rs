//! # Form Values
//!
//! Handlers read request fields through [`FormValues`], which merges an
//! url-encoded body with the query string and never rejects a request.
//!
//! ## Repeated fields
//!
//! A field holds the first value posted for its name. Body values come ahead
//! of query values, so `?id=9` with a body of `id=1&id=2` reads `id` as `1`.
//!
//! ## Parse-or-zero
//!
//! [`FormValues::int`], [`FormValues::float`] and [`FormValues::flag`] keep the
//! storefront's long-standing behaviour: a missing or malformed field is the
//! zero value, silently. Code that needs to know about bad input uses
//! [`FormValues::parse`], which reports [`FormError`] instead.

use std::collections::HashMap;
use std::convert::Infallible;
use std::str::FromStr;

use async_trait::async_trait;
use axum::extract::{Form, FromRequest, Query, Request};
use thiserror::Error;
use tracing::debug;

/// Errors reported by the strict [`FormValues::parse`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    /// The request carried no field with this name.
    #[error("Missing form field: {0}")]
    Missing(String),

    /// The field was present but did not parse.
    #[error("Invalid value for {field}: {value:?}")]
    Invalid { field: String, value: String },
}

/// Parses a base-10 integer, `0` when malformed.
pub fn parse_int_or_zero(value: &str) -> i64 {
    value.parse().unwrap_or(0)
}

/// Parses a float, `0.0` when malformed.
pub fn parse_float_or_zero(value: &str) -> f64 {
    value.parse().unwrap_or(0.0)
}

/// Boolean spellings accepted by the store's forms.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Request fields from the query string and body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues {
    values: HashMap<String, String>,
}

impl FormValues {
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut values = HashMap::new();
        for (key, value) in pairs {
            values.entry(key.into()).or_insert_with(|| value.into());
        }
        Self { values }
    }

    /// The raw field, empty when absent.
    pub fn text(&self, name: &str) -> String {
        self.values.get(name).cloned().unwrap_or_default()
    }

    pub fn int(&self, name: &str) -> i64 {
        self.values
            .get(name)
            .map(|v| parse_int_or_zero(v))
            .unwrap_or(0)
    }

    pub fn float(&self, name: &str) -> f64 {
        self.values
            .get(name)
            .map(|v| parse_float_or_zero(v))
            .unwrap_or(0.0)
    }

    pub fn flag(&self, name: &str) -> bool {
        self.values
            .get(name)
            .and_then(|v| parse_bool(v))
            .unwrap_or(false)
    }

    /// Strict parse: reports a missing or malformed field.
    pub fn parse<T: FromStr>(&self, name: &str) -> Result<T, FormError> {
        let value = self
            .values
            .get(name)
            .ok_or_else(|| FormError::Missing(name.to_string()))?;
        value.parse().map_err(|_| FormError::Invalid {
            field: name.to_string(),
            value: value.clone(),
        })
    }
}

#[async_trait]
impl<S> FromRequest<S> for FormValues
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let query = Query::<Vec<(String, String)>>::try_from_uri(req.uri())
            .map(|Query(query)| query)
            .unwrap_or_default();

        let body = match Form::<Vec<(String, String)>>::from_request(req, state).await {
            Ok(Form(body)) => body,
            Err(rejection) => {
                debug!(%rejection, "No form body");
                Vec::new()
            }
        };

        Ok(Self::from_pairs(body.into_iter().chain(query)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_numbers_become_zero() {
        let form = FormValues::from_pairs([("id", "12x"), ("total", "abc"), ("taxes", "1.25")]);
        assert_eq!(form.int("id"), 0);
        assert_eq!(form.int("missing"), 0);
        assert_eq!(form.float("total"), 0.0);
        assert_eq!(form.float("taxes"), 1.25);
    }

    #[test]
    fn test_flag_spellings() {
        for yes in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(parse_bool(yes), Some(true), "{yes}");
        }
        for no in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(parse_bool(no), Some(false), "{no}");
        }
        let form = FormValues::from_pairs([("pickup", "yes"), ("dropship", "T")]);
        assert!(!form.flag("pickup"));
        assert!(form.flag("dropship"));
    }

    #[test]
    fn test_strict_parse_reports_errors() {
        let form = FormValues::from_pairs([("cid", "nine")]);
        assert_eq!(
            form.parse::<i64>("cid"),
            Err(FormError::Invalid {
                field: "cid".to_string(),
                value: "nine".to_string()
            })
        );
        assert_eq!(
            form.parse::<i64>("id"),
            Err(FormError::Missing("id".to_string()))
        );
    }

    #[test]
    fn test_repeated_field_keeps_first_value() {
        let form = FormValues::from_pairs([("id", "1"), ("id", "2")]);
        assert_eq!(form.int("id"), 1);
    }

    #[tokio::test]
    async fn test_repeated_body_field_keeps_first_value() {
        use axum::body::Body;
        use axum::http::{header, Method};

        let req = Request::builder()
            .method(Method::POST)
            .uri("/admin/updateOrder?id=9")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("id=1&id=2"))
            .unwrap();

        let form = FormValues::from_request(req, &()).await.unwrap();
        assert_eq!(form.int("id"), 1);
    }

    #[tokio::test]
    async fn test_body_overrides_query() {
        use axum::body::Body;
        use axum::http::{header, Method};

        let req = Request::builder()
            .method(Method::POST)
            .uri("/deleteAddress?id=1&cid=9")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("id=5"))
            .unwrap();

        let form = FormValues::from_request(req, &()).await.unwrap();
        assert_eq!(form.int("id"), 5);
        assert_eq!(form.int("cid"), 9);
    }
}
