// Plain-text rendering of dashboard panels and the user table
use crate::application::table_view::TablePage;
use crate::domain::resource::{DashboardSnapshot, ResourceState};
use std::fmt::Write;

/// What a single dashboard surface shows, decided only by its own resource.
#[derive(Debug, PartialEq)]
pub enum PanelState<'a, T> {
    Loading,
    Failed(&'a str),
    Empty,
    Ready(&'a [T]),
}

impl<'a, T> PanelState<'a, T> {
    pub fn of(state: &'a ResourceState<T>) -> Self {
        if state.is_loading {
            PanelState::Loading
        } else if let Some(error) = &state.error {
            PanelState::Failed(error)
        } else if state.data.is_empty() {
            PanelState::Empty
        } else {
            PanelState::Ready(&state.data)
        }
    }
}

fn render_panel<T>(out: &mut String, title: &str, state: &ResourceState<T>, row: impl Fn(&T) -> String) {
    let _ = writeln!(out, "== {}", title);
    match PanelState::of(state) {
        PanelState::Loading => out.push_str("  loading...\n"),
        PanelState::Failed(error) => {
            let _ = writeln!(out, "  error: {}", error);
        }
        PanelState::Empty => out.push_str("  no data available\n"),
        PanelState::Ready(rows) => {
            for item in rows {
                let _ = writeln!(out, "  {}", row(item));
            }
        }
    }
}

pub fn render_dashboard(snapshot: &DashboardSnapshot) -> String {
    let mut out = String::new();
    render_panel(&mut out, "Stats", &snapshot.stats, |stat| {
        format!("{}: {} ({})", stat.title, stat.value, stat.change)
    });
    render_panel(&mut out, "Sales Overview", &snapshot.sales, |sale| {
        format!("{}: {} sales, ${} revenue", sale.name, sale.sales, sale.revenue)
    });
    render_panel(&mut out, "Devices", &snapshot.devices, |device| {
        format!("{}: {}%", device.name, device.value)
    });
    render_panel(&mut out, "Performance", &snapshot.performance, |perf| {
        format!("{}: uv {} / pv {}", perf.name, perf.uv, perf.pv)
    });
    render_panel(&mut out, "Recent Activity", &snapshot.activity, |item| {
        format!("{} {} - {} ({})", item.icon, item.title, item.subtitle, item.time)
    });
    render_panel(&mut out, "Users", &snapshot.table, |user| {
        format!("{} <{}>", user.name, user.email)
    });
    out
}

pub fn render_table_page(page: &TablePage) -> String {
    let mut out = String::new();
    out.push_str("ID | Name | Email | Role | Created At | Status\n");
    for user in &page.current_page_rows {
        let _ = writeln!(
            out,
            "{} | {} | {} | {} | {} | {}",
            user.id, user.name, user.email, user.role, user.created_at, user.status
        );
    }
    if page.page_count == 0 {
        out.push_str("No matching users\n");
    } else {
        let _ = writeln!(
            out,
            "Page {} of {} ({} results, {} per page)",
            page.page_index + 1,
            page.page_count,
            page.filtered_rows.len(),
            page.page_size.get()
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::records::{SalesRecord, sample_users};
    use crate::domain::resource::{ResourceData, ResourceKey};

    #[test]
    fn test_panel_state_precedence() {
        let mut snapshot = DashboardSnapshot::default();
        assert_eq!(PanelState::of(&snapshot.sales), PanelState::Loading);

        snapshot.apply_loaded(ResourceData::Sales(Vec::new()));
        assert_eq!(PanelState::of(&snapshot.sales), PanelState::Empty);

        let rows = vec![SalesRecord {
            name: "Jan".to_string(),
            sales: 1500,
            revenue: 4000,
        }];
        snapshot.apply_loaded(ResourceData::Sales(rows.clone()));
        assert_eq!(PanelState::of(&snapshot.sales), PanelState::Ready(&rows[..]));

        snapshot.apply_failed(ResourceKey::Sales, "Failed to fetch sales data".to_string());
        assert_eq!(
            PanelState::of(&snapshot.sales),
            PanelState::Failed("Failed to fetch sales data")
        );
    }

    #[test]
    fn test_one_failure_does_not_blank_other_panels() {
        let mut snapshot = DashboardSnapshot::default();
        snapshot.apply_loaded(ResourceData::Table(sample_users()));
        snapshot.apply_failed(ResourceKey::Stats, "Failed to fetch stats data".to_string());

        let text = render_dashboard(&snapshot);
        assert!(text.contains("error: Failed to fetch stats data"));
        assert!(text.contains("John Doe <john.doe@example.com>"));
        assert!(text.contains("== Devices\n  loading..."));
    }
}
