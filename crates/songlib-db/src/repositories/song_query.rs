//! Dynamic song queries.
//!
//! Filters are first reduced to a list of [`Predicate`]s, then rendered
//! into a `QueryBuilder` with every value bound. Column names come from
//! this module only; user input never reaches the SQL text.

use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite};

use songlib_core::{SongChanges, SongFilter, SongId};

use super::row_mappers::SONG_SELECT_COLUMNS;

/// One AND-ed condition of a song search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Case-insensitive substring match against a `*_folded` column.
    Contains {
        column: &'static str,
        needle: String,
    },
    Equals {
        column: &'static str,
        value: String,
    },
    OnOrAfter {
        column: &'static str,
        date: NaiveDate,
    },
    OnOrBefore {
        column: &'static str,
        date: NaiveDate,
    },
}

impl Predicate {
    fn push_to(self, qb: &mut QueryBuilder<'static, Sqlite>) {
        match self {
            Self::Contains { column, needle } => {
                qb.push(column)
                    .push(" LIKE ")
                    .push_bind(format!("%{}%", escape_like(&fold_case(&needle))))
                    .push(" ESCAPE '\\'");
            }
            Self::Equals { column, value } => {
                qb.push(column).push(" = ").push_bind(value);
            }
            Self::OnOrAfter { column, date } => {
                qb.push(column).push(" >= ").push_bind(date);
            }
            Self::OnOrBefore { column, date } => {
                qb.push(column).push(" <= ").push_bind(date);
            }
        }
    }
}

/// Lowercase text for storage in, and matching against, `*_folded` columns.
pub fn fold_case(value: &str) -> String {
    value.to_lowercase()
}

/// Escape `LIKE` wildcards so the value matches literally.
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}

/// Reduce a filter to its active predicates, in a fixed order.
pub fn predicates(filter: &SongFilter) -> Vec<Predicate> {
    let mut out = Vec::new();

    if let Some(needle) = non_empty(filter.title.as_ref()) {
        out.push(Predicate::Contains {
            column: "s.title_folded",
            needle,
        });
    }
    if let Some(needle) = non_empty(filter.group.as_ref()) {
        out.push(Predicate::Contains {
            column: "g.name_folded",
            needle,
        });
    }
    if let Some(value) = non_empty(filter.link.as_ref()) {
        out.push(Predicate::Equals {
            column: "s.link",
            value,
        });
    }
    if let Some(needle) = non_empty(filter.text.as_ref()) {
        out.push(Predicate::Contains {
            column: "v.verse_folded",
            needle,
        });
    }
    if let Some(date) = filter.released_from {
        out.push(Predicate::OnOrAfter {
            column: "s.release_date",
            date,
        });
    }
    if let Some(date) = filter.released_to {
        out.push(Predicate::OnOrBefore {
            column: "s.release_date",
            date,
        });
    }

    out
}

/// Build the search statement for `filter`.
///
/// Songs are joined to their group and left-joined to their verses, then
/// grouped by song so a song matching through several verses (or having
/// none) appears once.
pub fn search_query(filter: &SongFilter) -> QueryBuilder<'static, Sqlite> {
    let mut qb = QueryBuilder::new(format!(
        "SELECT {SONG_SELECT_COLUMNS} FROM songs s \
         JOIN groups g ON g.id = s.group_id \
         LEFT JOIN lyrics_verses v ON v.song_id = s.id"
    ));

    for (i, predicate) in predicates(filter).into_iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        predicate.push_to(&mut qb);
    }

    qb.push(" GROUP BY s.id ORDER BY s.id ASC, s.release_date DESC");

    if filter.limit > 0 {
        qb.push(" LIMIT ").push_bind(i64::from(filter.limit));
    }
    if filter.offset > 0 {
        if filter.limit == 0 {
            qb.push(" LIMIT -1");
        }
        qb.push(" OFFSET ").push_bind(i64::from(filter.offset));
    }

    qb
}

/// Build an UPDATE touching only the present columns.
///
/// Returns `None` when `changes` is empty.
pub fn update_query(id: SongId, changes: &SongChanges) -> Option<QueryBuilder<'static, Sqlite>> {
    if changes.is_empty() {
        return None;
    }

    let mut qb = QueryBuilder::new("UPDATE songs SET ");
    {
        let mut set = qb.separated(", ");
        if let Some(title) = &changes.title {
            set.push("title = ").push_bind_unseparated(title.clone());
            set.push("title_folded = ")
                .push_bind_unseparated(fold_case(title));
        }
        if let Some(date) = changes.release_date {
            set.push("release_date = ").push_bind_unseparated(date);
        }
        if let Some(group_id) = changes.group_id {
            set.push("group_id = ")
                .push_bind_unseparated(group_id.to_string());
        }
        if let Some(link) = &changes.link {
            set.push("link = ").push_bind_unseparated(link.clone());
        }
    }
    qb.push(" WHERE id = ").push_bind(id.to_string());

    Some(qb)
}
