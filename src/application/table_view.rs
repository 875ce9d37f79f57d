// Table view - Reactive wrapper that keeps a filtered, paginated page up to date
use crate::application::debounce::debounce;
use crate::application::table_engine;
use crate::domain::records::{Role, UserRecord, UserStatus};
use crate::domain::resource::DashboardSnapshot;
use crate::domain::table::{PageSize, TableError, TableFilterState};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// What the table surface renders.
#[derive(Debug, Clone, PartialEq)]
pub struct TablePage {
    pub filtered_rows: Vec<UserRecord>,
    pub current_page_rows: Vec<UserRecord>,
    pub page_count: usize,
    pub page_index: usize,
    pub page_size: PageSize,
    /// Search text after debouncing
    pub applied_search: String,
    pub role_filter: Option<Role>,
    pub status_filter: Option<UserStatus>,
    pub role_options: Vec<Role>,
    pub status_options: Vec<UserStatus>,
    /// Incremented on every recomputation
    pub revision: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct TableControls {
    role_filter: Option<Role>,
    status_filter: Option<UserStatus>,
    page_index: usize,
    page_size: PageSize,
}

/// Source rows plus the option lists derived from them.
struct TableSource {
    rows: Vec<UserRecord>,
    role_options: Vec<Role>,
    status_options: Vec<UserStatus>,
    revision: u64,
}

impl TableSource {
    fn new(rows: Vec<UserRecord>) -> Self {
        let mut source = Self {
            rows: Vec::new(),
            role_options: Vec::new(),
            status_options: Vec::new(),
            revision: 0,
        };
        source.replace_rows(rows);
        source
    }

    fn replace_rows(&mut self, rows: Vec<UserRecord>) {
        self.role_options = table_engine::role_options(&rows);
        self.status_options = table_engine::status_options(&rows);
        self.rows = rows;
    }

    fn recompute(&mut self, filter: &TableFilterState) -> TablePage {
        self.revision += 1;
        let filtered_rows = table_engine::filter_rows(&self.rows, filter);
        let page_size = filter.page_size.get();
        let page_count = table_engine::page_count(filtered_rows.len(), page_size);
        let page_index = table_engine::clamp_page_index(filter.page_index, page_count);
        let current_page_rows = table_engine::paginate(&filtered_rows, page_index, page_size).to_vec();

        TablePage {
            filtered_rows,
            current_page_rows,
            page_count,
            page_index,
            page_size: filter.page_size,
            applied_search: filter.search_text.clone(),
            role_filter: filter.role_filter,
            status_filter: filter.status_filter,
            role_options: self.role_options.clone(),
            status_options: self.status_options.clone(),
            revision: self.revision,
        }
    }
}

fn filter_state(search: &str, controls: &TableControls) -> TableFilterState {
    TableFilterState {
        search_text: search.to_string(),
        role_filter: controls.role_filter,
        status_filter: controls.status_filter,
        page_index: controls.page_index,
        page_size: controls.page_size,
    }
}

/// Input side and output side of a running table view. Dropping the handle
/// stops the background task.
pub struct TableHandle {
    search: watch::Sender<String>,
    controls: Arc<watch::Sender<TableControls>>,
    page: watch::Receiver<TablePage>,
}

impl TableHandle {
    /// Takes effect once typing pauses for the debounce window
    pub fn set_search_text(&self, text: impl Into<String>) {
        self.search.send_replace(text.into());
    }

    pub fn set_role_filter(&self, role: Option<Role>) {
        self.update_controls(|controls| controls.role_filter = role);
    }

    pub fn set_status_filter(&self, status: Option<UserStatus>) {
        self.update_controls(|controls| controls.status_filter = status);
    }

    pub fn set_page_index(&self, page_index: usize) {
        self.update_controls(|controls| controls.page_index = page_index);
    }

    pub fn set_page_size(&self, page_size: usize) -> Result<(), TableError> {
        let page_size = PageSize::new(page_size)?;
        self.update_controls(|controls| controls.page_size = page_size);
        Ok(())
    }

    pub fn subscribe(&self) -> watch::Receiver<TablePage> {
        self.page.clone()
    }

    pub fn current(&self) -> TablePage {
        self.page.borrow().clone()
    }

    fn update_controls(&self, update: impl FnOnce(&mut TableControls)) {
        self.controls.send_if_modified(|controls| {
            let before = controls.clone();
            update(controls);
            *controls != before
        });
    }
}

pub struct TableView;

impl TableView {
    /// Start a table view over `rows`. Must be called inside a tokio runtime.
    pub fn spawn(
        mut rows: watch::Receiver<Vec<UserRecord>>,
        debounce_delay: Duration,
        page_size: PageSize,
    ) -> TableHandle {
        let (search_tx, search_rx) = watch::channel(String::new());
        let mut applied_search = debounce(search_rx, debounce_delay);
        let (controls_tx, mut controls_rx) = watch::channel(TableControls {
            page_size,
            ..TableControls::default()
        });
        let controls_tx = Arc::new(controls_tx);

        let mut source = TableSource::new(rows.borrow_and_update().clone());
        let first = source.recompute(&filter_state("", &controls_rx.borrow_and_update()));
        let (page_tx, page_rx) = watch::channel(first);

        let controls_writer = Arc::clone(&controls_tx);
        tokio::spawn(async move {
            let mut rows_open = true;
            loop {
                tokio::select! {
                    changed = rows.changed(), if rows_open => {
                        match changed {
                            Ok(()) => source.replace_rows(rows.borrow_and_update().clone()),
                            Err(_) => {
                                // Keep serving the last rows after the source goes away
                                rows_open = false;
                                continue;
                            }
                        }
                    }
                    changed = applied_search.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                    changed = controls_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                    _ = page_tx.closed() => break,
                }

                let search = applied_search.borrow_and_update().clone();
                let controls = controls_rx.borrow_and_update().clone();
                let page = source.recompute(&filter_state(&search, &controls));

                if page.page_index != controls.page_index {
                    tracing::debug!(
                        "Clamping table page {} to {} of {}",
                        controls.page_index,
                        page.page_index,
                        page.page_count
                    );
                    let clamped = page.page_index;
                    // Silent write-back so the clamp sticks without another recompute
                    controls_writer.send_if_modified(|controls| {
                        controls.page_index = clamped;
                        false
                    });
                }

                page_tx.send_replace(page);
            }
            tracing::debug!("Table view task finished");
        });

        TableHandle {
            search: search_tx,
            controls: controls_tx,
            page: page_rx,
        }
    }
}

/// Follow the table dataset of the orchestrator's snapshot channel. Only
/// publishes when the rows actually change.
pub fn project_table_rows(
    mut snapshots: watch::Receiver<DashboardSnapshot>,
) -> watch::Receiver<Vec<UserRecord>> {
    let initial = snapshots.borrow_and_update().table.data.clone();
    let (tx, rx) = watch::channel(initial);

    tokio::spawn(async move {
        loop {
            tokio::select! {
                changed = snapshots.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                _ = tx.closed() => break,
            }
            let latest = snapshots.borrow_and_update().table.data.clone();
            tx.send_if_modified(|rows| {
                if *rows == latest {
                    return false;
                }
                *rows = latest;
                true
            });
        }
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::debounce::DEFAULT_DEBOUNCE;
    use crate::domain::records::sample_users;
    use crate::domain::resource::ResourceData;

    fn fifteen_users() -> Vec<UserRecord> {
        let mut rows = sample_users();
        rows.extend(sample_users().into_iter().take(5).map(|mut row| {
            row.id += 10;
            row
        }));
        rows
    }

    async fn next_page(rx: &mut watch::Receiver<TablePage>) -> TablePage {
        rx.changed().await.unwrap();
        rx.borrow_and_update().clone()
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_page() {
        let (_rows_tx, rows_rx) = watch::channel(sample_users());
        let table = TableView::spawn(rows_rx, DEFAULT_DEBOUNCE, PageSize::default());

        let page = table.current();
        assert_eq!(page.revision, 1);
        assert_eq!(page.page_count, 1);
        assert_eq!(page.current_page_rows.len(), 10);
        assert_eq!(page.role_options, vec![Role::Admin, Role::Editor, Role::Viewer]);
        assert_eq!(page.status_options.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_search_recomputes_once_with_last_value() {
        let (_rows_tx, rows_rx) = watch::channel(sample_users());
        let table = TableView::spawn(rows_rx, DEFAULT_DEBOUNCE, PageSize::default());

        for text in ["d", "do", "doe"] {
            table.set_search_text(text);
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert_eq!(table.current().revision, 1);

        tokio::time::sleep(Duration::from_millis(350)).await;
        let page = table.current();
        assert_eq!(page.revision, 2);
        assert_eq!(page.applied_search, "doe");
        assert_eq!(page.filtered_rows.len(), 1);
        assert_eq!(page.filtered_rows[0].name, "John Doe");
    }

    #[tokio::test(start_paused = true)]
    async fn test_role_filter_applies_immediately_and_keeps_options() {
        let (_rows_tx, rows_rx) = watch::channel(sample_users());
        let table = TableView::spawn(rows_rx, DEFAULT_DEBOUNCE, PageSize::default());
        let mut pages = table.subscribe();

        table.set_role_filter(Some(Role::Editor));
        let page = next_page(&mut pages).await;
        let ids: Vec<u32> = page.filtered_rows.iter().map(|row| row.id).collect();
        assert_eq!(ids, vec![2, 4, 7, 9]);
        assert_eq!(page.role_options.len(), 3);

        // Setting the same value again is not a change
        table.set_role_filter(Some(Role::Editor));
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!pages.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_out_of_range_page_is_clamped() {
        let (_rows_tx, rows_rx) = watch::channel(fifteen_users());
        let table = TableView::spawn(rows_rx, DEFAULT_DEBOUNCE, PageSize::default());
        let mut pages = table.subscribe();
        assert_eq!(table.current().page_count, 2);

        table.set_page_index(1);
        let page = next_page(&mut pages).await;
        assert_eq!(page.page_index, 1);
        assert_eq!(page.current_page_rows.len(), 5);

        table.set_status_filter(Some(UserStatus::Pending));
        let page = next_page(&mut pages).await;
        assert_eq!(page.page_count, 1);
        assert_eq!(page.page_index, 0);
        assert_eq!(page.current_page_rows.len(), 3);

        table.set_status_filter(None);
        let page = next_page(&mut pages).await;
        assert_eq!(page.page_index, 0);
        assert_eq!(page.current_page_rows.len(), 10);

        table.set_page_index(2);
        let page = next_page(&mut pages).await;
        assert_eq!(page.page_index, 1);
        assert_eq!(page.current_page_rows.len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_result_has_no_pages() {
        let (_rows_tx, rows_rx) = watch::channel(sample_users());
        let table = TableView::spawn(rows_rx, Duration::ZERO, PageSize::default());
        let mut pages = table.subscribe();

        table.set_search_text("nobody");
        let page = next_page(&mut pages).await;
        assert_eq!(page.page_count, 0);
        assert_eq!(page.page_index, 0);
        assert!(page.current_page_rows.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_page_size_changes() {
        let (_rows_tx, rows_rx) = watch::channel(fifteen_users());
        let table = TableView::spawn(rows_rx, DEFAULT_DEBOUNCE, PageSize::default());
        let mut pages = table.subscribe();

        assert_eq!(table.set_page_size(7), Err(TableError::InvalidPageSize(7)));
        table.set_page_size(25).unwrap();
        let page = next_page(&mut pages).await;
        assert_eq!(page.page_size.get(), 25);
        assert_eq!(page.page_count, 1);
        assert_eq!(page.current_page_rows.len(), 15);
    }

    #[tokio::test(start_paused = true)]
    async fn test_options_follow_source_rows() {
        let (rows_tx, rows_rx) = watch::channel(sample_users());
        let table = TableView::spawn(rows_rx, DEFAULT_DEBOUNCE, PageSize::default());
        let mut pages = table.subscribe();

        let admins: Vec<UserRecord> = sample_users()
            .into_iter()
            .filter(|row| row.role == Role::Admin)
            .collect();
        rows_tx.send(admins).unwrap();
        let page = next_page(&mut pages).await;
        assert_eq!(page.role_options, vec![Role::Admin]);
        assert_eq!(page.status_options, vec![UserStatus::Active]);
        assert_eq!(page.filtered_rows.len(), 2);

        // Source gone: filters keep working on the last rows
        drop(rows_tx);
        table.set_status_filter(Some(UserStatus::Inactive));
        let page = next_page(&mut pages).await;
        assert!(page.filtered_rows.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_project_table_rows_tracks_snapshot() {
        let (snapshot_tx, snapshot_rx) = watch::channel(DashboardSnapshot::default());
        let mut rows = project_table_rows(snapshot_rx);
        assert!(rows.borrow_and_update().is_empty());

        snapshot_tx.send_modify(|snapshot| snapshot.apply_loaded(ResourceData::Table(sample_users())));
        rows.changed().await.unwrap();
        assert_eq!(rows.borrow_and_update().len(), 10);

        // Unrelated resource updates do not republish the rows
        snapshot_tx.send_modify(|snapshot| snapshot.begin_cycle());
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!rows.has_changed().unwrap());
    }
}
