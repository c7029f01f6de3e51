use regex::{Regex, RegexBuilder};
use std::cmp::Ordering;
use tracing::debug;

use crate::domain::InstitutionRecord;

/// Number of institutions in a top list unless asked otherwise.
pub const DEFAULT_TOP_LIMIT: usize = 4;

/// Case-insensitive search pattern. Input that is not a valid regular
/// expression is matched as a literal substring.
#[derive(Debug, Clone)]
pub enum SearchPattern {
    Regex(Regex),
    Literal(String),
}

impl SearchPattern {
    pub fn new(pattern: &str) -> Self {
        let pattern = pattern.trim();
        match RegexBuilder::new(pattern).case_insensitive(true).build() {
            Ok(regex) => SearchPattern::Regex(regex),
            Err(e) => {
                debug!("Search pattern {:?} is not a regex ({}), matching literally", pattern, e);
                SearchPattern::Literal(pattern.to_lowercase())
            }
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        match self {
            SearchPattern::Regex(regex) => regex.is_match(text),
            SearchPattern::Literal(needle) => text.to_lowercase().contains(needle.as_str()),
        }
    }

    fn any<'a>(&self, mut values: impl Iterator<Item = &'a str>) -> bool {
        values.any(|v| self.is_match(v))
    }
}

fn by_score_desc(a: &&InstitutionRecord, b: &&InstitutionRecord) -> Ordering {
    b.score.total_cmp(&a.score)
}

fn matches_query(record: &InstitutionRecord, pattern: &SearchPattern) -> bool {
    pattern.is_match(&record.name)
        || pattern.is_match(record.kind.label())
        || pattern.any(record.top_recruiters.iter().map(String::as_str))
        || pattern.any(record.acceptance_exams.iter().map(|e| e.label()))
        || pattern.is_match(&record.location.city)
        || pattern.is_match(&record.location.state)
        || pattern.any(record.courses_offered.iter().map(|c| c.name.as_str()))
}

/// Highest-scoring institutions for a free-text query.
///
/// With a query, a record matches when its name, type, recruiters, exams,
/// city, state or course names match. Without one, records are filtered by
/// course name only (all records when `course` is also absent). Ties keep
/// their input order.
pub fn top_list<'a>(
    records: &'a [InstitutionRecord],
    query: Option<&str>,
    course: Option<&str>,
    limit: usize,
) -> Vec<&'a InstitutionRecord> {
    let query = query.map(str::trim).filter(|q| !q.is_empty());
    let mut ranked: Vec<&InstitutionRecord> = match query {
        Some(query) => {
            let pattern = SearchPattern::new(query);
            records.iter().filter(|r| matches_query(r, &pattern)).collect()
        }
        None => {
            let course = course.map(SearchPattern::new);
            records
                .iter()
                .filter(|r| match &course {
                    Some(pattern) => pattern.any(r.courses_offered.iter().map(|c| c.name.as_str())),
                    None => true,
                })
                .collect()
        }
    };
    ranked.sort_by(by_score_desc);
    ranked.truncate(limit);
    ranked
}

/// Institutions offering a course matching `category` and teaching a
/// discipline matching `branch`, best score first. Absent filters match all.
pub fn filter_colleges<'a>(
    records: &'a [InstitutionRecord],
    category: Option<&str>,
    branch: Option<&str>,
) -> Vec<&'a InstitutionRecord> {
    let category = category.map(SearchPattern::new);
    let branch = branch.map(SearchPattern::new);

    let mut colleges: Vec<&InstitutionRecord> = records
        .iter()
        .filter(|r| {
            category
                .as_ref()
                .map_or(true, |p| p.any(r.courses_offered.iter().map(|c| c.name.as_str())))
        })
        .filter(|r| {
            branch
                .as_ref()
                .map_or(true, |p| p.any(r.field_taught.iter().map(|d| d.label())))
        })
        .collect();
    colleges.sort_by(by_score_desc);
    colleges
}

/// Listing behind the `rank` command.
///
/// With a `branch`, every college matching the branch (and `course` as the
/// category) is returned, cut only when `limit` is given. Otherwise this is
/// a top list of `limit` entries, `DEFAULT_TOP_LIMIT` when unset.
pub fn rank<'a>(
    records: &'a [InstitutionRecord],
    query: Option<&str>,
    course: Option<&str>,
    branch: Option<&str>,
    limit: Option<usize>,
) -> Vec<&'a InstitutionRecord> {
    match branch {
        Some(branch) => {
            let mut colleges = filter_colleges(records, course, Some(branch));
            if let Some(limit) = limit {
                colleges.truncate(limit);
            }
            colleges
        }
        None => top_list(records, query, course, limit.unwrap_or(DEFAULT_TOP_LIMIT)),
    }
}
