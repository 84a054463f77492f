use serde::Deserialize;

use crate::error::ApiError;

/// Fixed page size for every paginated listing.
pub const PAGE_SIZE: u64 = 10;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// Page number defaults to 1 when absent and must be a positive integer.
pub fn parse_page(raw: Option<&str>) -> Result<u64, ApiError> {
    let Some(raw) = raw else {
        return Ok(1);
    };

    let page: u64 = raw
        .parse()
        .map_err(|_| ApiError::Validation(vec!["The page field must be an integer.".into()]))?;

    if page < 1 {
        return Err(ApiError::Validation(vec![
            "The page field must be at least 1.".into(),
        ]));
    }

    Ok(page)
}

pub fn offset(page: u64) -> u64 {
    (page - 1) * PAGE_SIZE
}

pub fn total_pages(total_rows: u64) -> u64 {
    total_rows.div_ceil(PAGE_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_defaults_to_one() {
        assert_eq!(parse_page(None).unwrap(), 1);
        assert_eq!(parse_page(Some("1")).unwrap(), 1);
        assert_eq!(parse_page(Some("42")).unwrap(), 42);
    }

    #[test]
    fn rejects_non_positive_and_non_numeric_pages() {
        assert!(parse_page(Some("0")).is_err());
        assert!(parse_page(Some("-1")).is_err());
        assert!(parse_page(Some("abc")).is_err());
        assert!(parse_page(Some("1.5")).is_err());
    }

    #[test]
    fn offsets_step_by_page_size() {
        assert_eq!(offset(1), 0);
        assert_eq!(offset(2), 10);
        assert_eq!(offset(5), 40);
    }

    #[test]
    fn total_pages_is_ceiling_division() {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(10), 1);
        assert_eq!(total_pages(11), 2);
        assert_eq!(total_pages(95), 10);
    }
}
