//! Filter, sort and slice helpers for the paged query pipeline
//!
//! Filtering happens in the engine after a full fetch, not in the store.
//! This keeps the matching semantics (case-insensitive substring, clause
//! conjunction) in one place; pushing them into the store would have to
//! reproduce them byte-for-byte.

use crate::db::models::{Employee, Filter};

/// Attributes a filter clause or sort column may name (wire spelling)
pub const QUERYABLE_FIELDS: [&str; 10] = [
    "name",
    "designation",
    "reportingTo",
    "billableStatus",
    "skills",
    "projectAllocation",
    "location",
    "email",
    "joinDate",
    "remarks",
];

/// Look up a record attribute by wire name; `None` for unrecognized fields.
/// Field names match case-insensitively.
pub fn field_value<'a>(record: &'a Employee, field: &str) -> Option<&'a str> {
    let slot = if field.eq_ignore_ascii_case("name") {
        &record.name
    } else if field.eq_ignore_ascii_case("designation") {
        &record.designation
    } else if field.eq_ignore_ascii_case("reportingTo") {
        &record.reporting_to
    } else if field.eq_ignore_ascii_case("billableStatus") {
        &record.billable_status
    } else if field.eq_ignore_ascii_case("skills") {
        &record.skills
    } else if field.eq_ignore_ascii_case("projectAllocation") {
        &record.project_allocation
    } else if field.eq_ignore_ascii_case("location") {
        &record.location
    } else if field.eq_ignore_ascii_case("email") {
        &record.email
    } else if field.eq_ignore_ascii_case("joinDate") {
        &record.join_date
    } else if field.eq_ignore_ascii_case("remarks") {
        &record.remarks
    } else {
        return None;
    };
    Some(slot.as_deref().unwrap_or(""))
}

fn is_recognized(field: &str) -> bool {
    QUERYABLE_FIELDS.iter().any(|f| f.eq_ignore_ascii_case(field))
}

/// Does one clause retain the record?
///
/// A clause with an empty or unrecognized field, or an empty value, is a
/// no-op and retains everything.
fn clause_matches(record: &Employee, clause: &Filter) -> bool {
    if clause.field.is_empty() || clause.value.is_empty() {
        return true;
    }
    // Unrecognized field: the clause is a no-op, not an error
    let Some(value) = field_value(record, &clause.field) else {
        return true;
    };
    value.to_lowercase().contains(&clause.value.to_lowercase())
}

/// Apply the clauses in order, conjunctively
pub fn apply_filters(records: Vec<Employee>, filters: &[Filter]) -> Vec<Employee> {
    records
        .into_iter()
        .filter(|record| filters.iter().all(|clause| clause_matches(record, clause)))
        .collect()
}

/// Sort by exactly one key
///
/// A recognized `sort_column` orders by that field's natural string
/// ordering (missing values sort as empty strings), ascending unless
/// `sort_dir` is "desc". Anything else falls back to ascending id;
/// the fallback ignores `sort_dir`. The sort is stable, so records
/// with equal keys keep their prior order.
pub fn sort_records(records: &mut [Employee], sort_column: Option<&str>, sort_dir: Option<&str>) {
    match sort_column.filter(|col| is_recognized(col)) {
        Some(column) => {
            let descending = sort_dir
                .map(|d| d.eq_ignore_ascii_case("desc"))
                .unwrap_or(false);
            records.sort_by(|a, b| {
                let left = field_value(a, column).unwrap_or("");
                let right = field_value(b, column).unwrap_or("");
                if descending {
                    right.cmp(left)
                } else {
                    left.cmp(right)
                }
            });
        }
        None => {
            records.sort_by(|a, b| {
                let left = a.id.unwrap_or(i64::MAX);
                let right = b.id.unwrap_or(i64::MAX);
                left.cmp(&right)
            });
        }
    }
}

/// Slice one page; an out-of-range offset yields an empty page
pub fn page_slice(records: Vec<Employee>, page_number: u32, page_size: u32) -> Vec<Employee> {
    let offset = (page_number as usize - 1) * page_size as usize;
    records
        .into_iter()
        .skip(offset)
        .take(page_size as usize)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, name: &str, designation: &str) -> Employee {
        Employee {
            id: Some(id),
            name: Some(name.to_string()),
            designation: Some(designation.to_string()),
            ..Default::default()
        }
    }

    fn clause(field: &str, value: &str) -> Filter {
        Filter {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let records = vec![
            record(1, "Ana", "Senior Engineer"),
            record(2, "Ben", "Manager"),
            record(3, "Cam", "engineer"),
        ];

        let kept = apply_filters(records, &[clause("designation", "ENGINEER")]);
        let ids: Vec<i64> = kept.iter().filter_map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_clauses_compose_conjunctively() {
        let records = vec![
            record(1, "Ana", "Engineer"),
            record(2, "Anabel", "Manager"),
            record(3, "Ben", "Engineer"),
        ];

        let kept = apply_filters(
            records,
            &[clause("name", "an"), clause("designation", "engineer")],
        );
        let ids: Vec<i64> = kept.iter().filter_map(|e| e.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_unrecognized_or_empty_clause_is_skipped() {
        let records = vec![record(1, "Ana", "Engineer"), record(2, "Ben", "Manager")];

        let kept = apply_filters(
            records.clone(),
            &[clause("salary", "100"), clause("name", "")],
        );
        assert_eq!(kept.len(), 2);

        // Missing field values never match a non-empty clause value
        let mut sparse = record(3, "Cam", "Engineer");
        sparse.location = None;
        let kept = apply_filters(vec![sparse], &[clause("location", "Lisbon")]);
        assert!(kept.is_empty());
    }

    #[test]
    fn test_sort_by_recognized_column_and_direction() {
        let mut records = vec![
            record(1, "Cam", "Engineer"),
            record(2, "Ana", "Engineer"),
            record(3, "Ben", "Engineer"),
        ];

        sort_records(&mut records, Some("name"), None);
        let names: Vec<&str> = records.iter().filter_map(|e| e.name.as_deref()).collect();
        assert_eq!(names, vec!["Ana", "Ben", "Cam"]);

        sort_records(&mut records, Some("name"), Some("desc"));
        let names: Vec<&str> = records.iter().filter_map(|e| e.name.as_deref()).collect();
        assert_eq!(names, vec!["Cam", "Ben", "Ana"]);
    }

    #[test]
    fn test_unrecognized_sort_column_falls_back_to_id_asc() {
        let mut records = vec![
            record(3, "Cam", "Engineer"),
            record(1, "Ana", "Engineer"),
            record(2, "Ben", "Engineer"),
        ];

        sort_records(&mut records, Some("salary"), None);
        let ids: Vec<i64> = records.iter().filter_map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        // The id fallback ignores the direction flag
        let mut records = vec![
            record(2, "Ben", "Engineer"),
            record(1, "Ana", "Engineer"),
            record(3, "Cam", "Engineer"),
        ];
        sort_records(&mut records, Some("salary"), Some("desc"));
        let ids: Vec<i64> = records.iter().filter_map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_page_slice_out_of_range_is_empty() {
        let records = vec![record(1, "Ana", "Engineer"), record(2, "Ben", "Manager")];

        assert_eq!(page_slice(records.clone(), 1, 1).len(), 1);
        assert_eq!(page_slice(records.clone(), 2, 1).len(), 1);
        assert!(page_slice(records, 5, 10).is_empty());
    }
}
