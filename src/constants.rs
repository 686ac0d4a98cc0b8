pub mod search {
    /// Page size for listings and full search results.
    pub const DEFAULT_PAGE_SIZE: u64 = 50;

    /// Upper bound for a page size or an explicit search limit.
    pub const MAX_PAGE_SIZE: u64 = 1_000;

    pub const MAX_PAGE: u64 = 100_000;

    /// Largest row offset the database drivers can bind.
    pub const MAX_OFFSET: u64 = i64::MAX.unsigned_abs();

    pub const DEFAULT_SUGGESTIONS: u64 = 8;

    pub const MAX_SUGGESTIONS: u64 = 20;

    /// Rows fetched before suggestion strings are extracted and ranked.
    pub const SUGGESTION_CANDIDATES: u64 = 50;

    pub const MAX_QUERY_LEN: usize = 200;
}

pub mod places {
    pub const MAX_NAME_LEN: usize = 200;

    /// Address fields joined by single spaces, absent fields rendered empty.
    /// Shared by the generated `full_address_cached` column and the live
    /// expression so both produce the same string.
    pub const FULL_ADDRESS_SQL: &str = "COALESCE(address_line, '') || ' ' || COALESCE(city, '') \
         || ' ' || COALESCE(state, '') || ' ' || COALESCE(postal_code, '') \
         || ' ' || COALESCE(country, '')";

    /// The same concatenation for engines without a `||` string operator.
    pub const FULL_ADDRESS_CONCAT_SQL: &str = "CONCAT(COALESCE(address_line, ''), ' ', \
         COALESCE(city, ''), ' ', COALESCE(state, ''), ' ', COALESCE(postal_code, ''), ' ', \
         COALESCE(country, ''))";
}
