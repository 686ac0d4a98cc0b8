use super::ApiError;
use crate::constants::search::{MAX_PAGE, MAX_QUERY_LEN};
use crate::domain::PlaceId;

pub fn validate_place_id(id: i32) -> Result<PlaceId, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid place ID: {}. ID must be a positive integer",
            id
        )));
    }
    Ok(PlaceId::new(id))
}

pub fn validate_page(page: u64) -> Result<u64, ApiError> {
    if page == 0 {
        return Err(ApiError::validation(
            "Invalid page: 0. Pages start at 1",
        ));
    }
    if page > MAX_PAGE {
        return Err(ApiError::validation(format!(
            "Invalid page: {}. Page must be {} or less",
            page, MAX_PAGE
        )));
    }
    Ok(page)
}

/// Blank queries are allowed and mean "no text filter"; only overlong ones
/// are rejected.
pub fn validate_search_query(query: Option<&str>) -> Result<Option<&str>, ApiError> {
    let Some(trimmed) = query.map(str::trim).filter(|q| !q.is_empty()) else {
        return Ok(None);
    };

    if trimmed.chars().count() > MAX_QUERY_LEN {
        return Err(ApiError::validation(format!(
            "Search query must be {} characters or less",
            MAX_QUERY_LEN
        )));
    }
    Ok(Some(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_place_id() {
        assert_eq!(validate_place_id(1).unwrap(), PlaceId::new(1));
        assert!(validate_place_id(12345).is_ok());
        assert!(validate_place_id(0).is_err());
        assert!(validate_place_id(-1).is_err());
    }

    #[test]
    fn test_validate_page() {
        assert!(validate_page(1).is_ok());
        assert!(validate_page(40).is_ok());
        assert!(validate_page(0).is_err());
        assert!(validate_page(MAX_PAGE).is_ok());
        assert!(validate_page(MAX_PAGE + 1).is_err());
        assert!(validate_page(u64::MAX).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query(Some("Tokyo")).unwrap(), Some("Tokyo"));
        assert_eq!(validate_search_query(Some("  trimmed  ")).unwrap(), Some("trimmed"));
        assert_eq!(validate_search_query(Some("   ")).unwrap(), None);
        assert_eq!(validate_search_query(None).unwrap(), None);
        assert!(validate_search_query(Some("a".repeat(201).as_str())).is_err());
    }
}
