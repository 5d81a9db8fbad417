//! Custom Askama template filters.
//!
//! Templates that use these must have `crate::filters` in scope as `filters`.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Year for the footer copyright line.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Fingerprint of `static/css/main.css`, computed by `build.rs`.
///
/// Usage in templates: `/static/css/derived/main.{{ ""|css_hash }}.css`
#[askama::filter_fn]
pub fn css_hash(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(env!("CSS_HASH"))
}

/// Left-pad a value with zeros to two characters; longer values are kept.
///
/// Usage in templates: `{{ slide.position|two_digits }}` renders `7` as `07`.
#[askama::filter_fn]
pub fn two_digits(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format!("{:0>2}", value.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use askama::Template;

    use crate::filters;

    #[derive(Template)]
    #[template(source = "{{ position|two_digits }}/{{ total|two_digits }}", ext = "txt")]
    struct Counter {
        position: usize,
        total: usize,
    }

    #[test]
    fn test_two_digits_pads_counter() {
        let counter = Counter {
            position: 7,
            total: 11,
        };
        assert_eq!(counter.render().unwrap(), "07/11");
    }

    #[test]
    fn test_two_digits_keeps_wide_values() {
        let counter = Counter {
            position: 123,
            total: 123,
        };
        assert_eq!(counter.render().unwrap(), "123/123");
    }
}
