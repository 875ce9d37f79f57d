// Table engine - Client-side filtering and pagination of user rows
use crate::domain::records::{Role, UserRecord, UserStatus};
use crate::domain::table::TableFilterState;

/// Case-insensitive substring match against name, email, role and status.
/// An empty search matches every row.
pub fn matches_search(row: &UserRecord, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    [
        row.name.as_str(),
        row.email.as_str(),
        row.role.as_str(),
        row.status.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

pub fn matches_filters(row: &UserRecord, filter: &TableFilterState) -> bool {
    matches_search(row, &filter.search_text)
        && filter.role_filter.is_none_or(|role| row.role == role)
        && filter.status_filter.is_none_or(|status| row.status == status)
}

pub fn filter_rows(rows: &[UserRecord], filter: &TableFilterState) -> Vec<UserRecord> {
    rows.iter()
        .filter(|row| matches_filters(row, filter))
        .cloned()
        .collect()
}

pub fn page_count(row_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    row_count.div_ceil(page_size)
}

/// `rows[page_index * page_size .. (page_index + 1) * page_size]`, or an
/// empty slice when the page is out of range.
pub fn paginate(rows: &[UserRecord], page_index: usize, page_size: usize) -> &[UserRecord] {
    let start = page_index.saturating_mul(page_size);
    if start >= rows.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(rows.len());
    &rows[start..end]
}

/// Clamp into `[0, page_count - 1]`; 0 when there are no pages
pub fn clamp_page_index(page_index: usize, page_count: usize) -> usize {
    page_index.min(page_count.saturating_sub(1))
}

/// Distinct roles in first-seen order
pub fn role_options(rows: &[UserRecord]) -> Vec<Role> {
    distinct(rows.iter().map(|row| row.role))
}

/// Distinct statuses in first-seen order
pub fn status_options(rows: &[UserRecord]) -> Vec<UserStatus> {
    distinct(rows.iter().map(|row| row.status))
}

fn distinct<T: PartialEq>(values: impl Iterator<Item = T>) -> Vec<T> {
    let mut seen = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::records::sample_users;

    fn two_rows() -> Vec<UserRecord> {
        vec![
            UserRecord::new(1, "John Doe", "john.doe@example.com", Role::Admin, "2023-01-15", UserStatus::Active),
            UserRecord::new(2, "Jane Smith", "jane.smith@example.com", Role::Editor, "2023-02-20", UserStatus::Inactive),
        ]
    }

    fn filter(search: &str, role: Option<Role>, status: Option<UserStatus>) -> TableFilterState {
        TableFilterState {
            search_text: search.to_string(),
            role_filter: role,
            status_filter: status,
            ..TableFilterState::default()
        }
    }

    #[test]
    fn test_filter_composition() {
        let rows = two_rows();

        let by_name = filter_rows(&rows, &filter("john", None, None));
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "John Doe");

        let by_role = filter_rows(&rows, &filter("", Some(Role::Editor), None));
        assert_eq!(by_role.len(), 1);
        assert_eq!(by_role[0].name, "Jane Smith");

        assert!(filter_rows(&rows, &filter("doe", Some(Role::Editor), None)).is_empty());
    }

    #[test]
    fn test_search_covers_email_role_and_status() {
        let rows = two_rows();
        assert_eq!(filter_rows(&rows, &filter("SMITH@", None, None))[0].id, 2);
        assert_eq!(filter_rows(&rows, &filter("admin", None, None))[0].id, 1);
        // "active" is a substring of "Inactive" too
        assert_eq!(filter_rows(&rows, &filter("active", None, None)).len(), 2);
        assert_eq!(filter_rows(&rows, &filter("inact", None, None))[0].id, 2);
        assert_eq!(filter_rows(&rows, &filter("", None, None)).len(), 2);
    }

    #[test]
    fn test_status_filter_is_exact() {
        let rows = sample_users();
        let pending = filter_rows(&rows, &filter("", None, Some(UserStatus::Pending)));
        assert_eq!(pending.iter().map(|r| r.id).collect::<Vec<_>>(), vec![5, 9]);

        let viewers_active = filter_rows(&rows, &filter("", Some(Role::Viewer), Some(UserStatus::Active)));
        assert_eq!(viewers_active.iter().map(|r| r.id).collect::<Vec<_>>(), vec![8, 10]);
    }

    #[test]
    fn test_pagination_boundaries() {
        let mut rows = sample_users();
        rows.extend(sample_users().into_iter().take(5));
        assert_eq!(rows.len(), 15);

        assert_eq!(page_count(rows.len(), 10), 2);
        assert_eq!(paginate(&rows, 0, 10).len(), 10);
        assert_eq!(paginate(&rows, 1, 10).len(), 5);
        assert!(paginate(&rows, 2, 10).is_empty());
        assert!(paginate(&rows, usize::MAX, 10).is_empty());
        assert_eq!(clamp_page_index(2, 2), 1);
    }

    #[test]
    fn test_empty_rows() {
        assert_eq!(page_count(0, 10), 0);
        assert!(paginate(&[], 0, 10).is_empty());
        assert_eq!(clamp_page_index(3, 0), 0);
        assert_eq!(page_count(5, 0), 0);
    }

    #[test]
    fn test_options_are_distinct_in_first_seen_order() {
        let rows = sample_users();
        assert_eq!(role_options(&rows), vec![Role::Admin, Role::Editor, Role::Viewer]);
        assert_eq!(
            status_options(&rows),
            vec![UserStatus::Active, UserStatus::Inactive, UserStatus::Pending]
        );
        assert!(role_options(&[]).is_empty());
    }
}
