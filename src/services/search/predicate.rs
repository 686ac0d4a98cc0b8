//! Text-match predicate shared by every search strategy.
//!
//! Inclusion is case-insensitive substring containment over `name`, `city`,
//! `description` and the full address. The user text only ever reaches the
//! database as a bound pattern with its wildcards escaped.
//!
//! SQLite's `LOWER` and `LIKE` only fold ASCII, so on SQLite every cased
//! character becomes a `GLOB` class of its case variants instead
//! (`Ö` -> `[Öö]`). Other backends fold with `LOWER` on both sides.

use sea_orm::sea_query::{Alias, BinOper, Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{Condition, DbBackend};

use crate::constants::places::{FULL_ADDRESS_CONCAT_SQL, FULL_ADDRESS_SQL};
use crate::entities::places;

pub const LIKE_ESCAPE: char = '\\';

pub const FULL_ADDRESS_COLUMN: &str = "full_address_cached";

/// Escapes `LIKE` wildcards so the text matches literally.
#[must_use]
pub fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// `%needle%` pattern for a lowercased, escaped needle.
#[must_use]
pub fn contains_pattern(text: &str) -> String {
    format!("%{}%", escape_like(&text.to_lowercase()))
}

/// Single-character case variants of `c`, `c` itself first.
fn case_variants(c: char) -> Vec<char> {
    let mut variants = vec![c];
    let lower = c.to_lowercase();
    let upper = c.to_uppercase();
    for mapped in [lower.collect::<Vec<_>>(), upper.collect::<Vec<_>>()] {
        if let [single] = mapped[..]
            && !variants.contains(&single)
        {
            variants.push(single);
        }
    }
    variants
}

/// `*needle*` `GLOB` pattern matching `text` in any letter case.
#[must_use]
pub fn contains_glob(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() * 4 + 2);
    pattern.push('*');
    for c in text.chars() {
        let variants = case_variants(c);
        if variants.len() > 1 || matches!(c, '*' | '?' | '[') {
            pattern.push('[');
            pattern.extend(variants);
            pattern.push(']');
        } else {
            pattern.push(c);
        }
    }
    pattern.push('*');
    pattern
}

/// The columns a query matches and ranks over, resolved for one backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchFields {
    backend: DbBackend,
    cached_address: bool,
}

impl MatchFields {
    #[must_use]
    pub const fn new(backend: DbBackend, cached_address: bool) -> Self {
        Self {
            backend,
            cached_address,
        }
    }

    #[must_use]
    pub const fn uses_cached_address(&self) -> bool {
        self.cached_address
    }

    /// Full address, read from the generated column when the table has one.
    #[must_use]
    pub fn address_expr(&self) -> SimpleExpr {
        if self.cached_address {
            return Expr::col(Alias::new(FULL_ADDRESS_COLUMN)).into();
        }

        if self.backend == DbBackend::MySql {
            Expr::cust(FULL_ADDRESS_CONCAT_SQL)
        } else {
            Expr::cust(FULL_ADDRESS_SQL)
        }
    }

    /// The four searchable values of a row, with absent text as `''`.
    #[must_use]
    pub fn text_exprs(&self) -> [SimpleExpr; 4] {
        let coalesced = |column: places::Column| -> SimpleExpr {
            Func::coalesce([Expr::col(column).into(), Expr::val("").into()]).into()
        };

        [
            coalesced(places::Column::Name),
            coalesced(places::Column::City),
            coalesced(places::Column::Description),
            self.address_expr(),
        ]
    }

    /// OR of a case-insensitive containment test across the searchable fields.
    #[must_use]
    pub fn predicate(&self, text: &str) -> Condition {
        let fields: [SimpleExpr; 4] = [
            Expr::col(places::Column::Name).into(),
            Expr::col(places::Column::City).into(),
            Expr::col(places::Column::Description).into(),
            self.address_expr(),
        ];

        if self.backend == DbBackend::Sqlite {
            let pattern = contains_glob(text);
            return fields
                .into_iter()
                .fold(Condition::any(), |condition, field| {
                    condition.add(
                        Expr::expr(field)
                            .binary(BinOper::Custom("GLOB"), Expr::val(pattern.clone())),
                    )
                });
        }

        let pattern = contains_pattern(text);
        fields
            .into_iter()
            .fold(Condition::any(), |condition, field| {
                condition.add(
                    Expr::expr(Func::lower(field))
                        .like(LikeExpr::new(pattern.clone()).escape(LIKE_ESCAPE)),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::sea_query::{PostgresQueryBuilder, Query, SqliteQueryBuilder};

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like(r"c:\dir"), r"c:\\dir");
    }

    #[test]
    fn test_contains_pattern_lowercases() {
        assert_eq!(contains_pattern("Shin_juku"), "%shin\\_juku%");
    }

    #[test]
    fn test_contains_glob_covers_both_cases() {
        assert_eq!(contains_glob("Ös"), "*[Öö][sS]*");
        assert_eq!(contains_glob("école"), "*[éÉ][cC][oO][lL][eE]*");
        assert_eq!(contains_glob("4-1"), "*4-1*");
    }

    #[test]
    fn test_contains_glob_escapes_wildcards() {
        assert_eq!(contains_glob("a*b?[c]"), "*[aA][*][bB][?][[][cC]]*");
        assert_eq!(contains_glob("100%_"), "*100%_*");
    }

    #[test]
    fn test_contains_glob_keeps_multi_char_case_maps_literal() {
        assert_eq!(contains_glob("ß"), "*ß*");
    }

    #[test]
    fn test_predicate_binds_user_text() {
        let fields = MatchFields::new(DbBackend::Postgres, false);
        let (sql, values) = Query::select()
            .column(places::Column::Id)
            .from(places::Entity)
            .cond_where(fields.predicate("x' OR 1=1 --"))
            .build(PostgresQueryBuilder);

        assert!(!sql.contains("OR 1=1"));
        assert!(sql.contains("ESCAPE"));
        assert_eq!(sql.matches("LIKE").count(), 4);
        assert_eq!(values.0.len(), 4);
    }

    #[test]
    fn test_sqlite_predicate_uses_glob() {
        let fields = MatchFields::new(DbBackend::Sqlite, false);
        let (sql, values) = Query::select()
            .column(places::Column::Id)
            .from(places::Entity)
            .cond_where(fields.predicate("x' OR 1=1 --"))
            .build(SqliteQueryBuilder);

        assert!(!sql.contains("OR 1=1"));
        assert!(!sql.contains("LOWER"));
        assert_eq!(sql.matches("GLOB").count(), 4);
        assert_eq!(values.0.len(), 4);
    }

    #[test]
    fn test_address_expr_prefers_cached_column() {
        let cached = MatchFields::new(DbBackend::Postgres, true);
        let (sql, _) = Query::select()
            .expr(cached.address_expr())
            .from(places::Entity)
            .build(SqliteQueryBuilder);
        assert!(sql.contains(FULL_ADDRESS_COLUMN));

        let live = MatchFields::new(DbBackend::Sqlite, false);
        let (sql, _) = Query::select()
            .expr(live.address_expr())
            .from(places::Entity)
            .build(SqliteQueryBuilder);
        assert!(sql.contains("COALESCE(postal_code, '')"));
        assert!(!sql.contains(FULL_ADDRESS_COLUMN));
    }
}
