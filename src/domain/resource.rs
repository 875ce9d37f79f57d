// Dashboard resource domain models
use super::records::{
    ActivityRecord, DeviceUsageRecord, PerformanceRecord, SalesRecord, StatRecord, UserRecord,
};
use std::fmt;

/// One of the six dashboard datasets. Identifies a cache slot and a state triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKey {
    Activity,
    Sales,
    Devices,
    Performance,
    Table,
    Stats,
}

impl ResourceKey {
    pub const ALL: [ResourceKey; 6] = [
        ResourceKey::Activity,
        ResourceKey::Sales,
        ResourceKey::Devices,
        ResourceKey::Performance,
        ResourceKey::Table,
        ResourceKey::Stats,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKey::Activity => "activity",
            ResourceKey::Sales => "sales",
            ResourceKey::Devices => "devices",
            ResourceKey::Performance => "performance",
            ResourceKey::Table => "table",
            ResourceKey::Stats => "stats",
        }
    }

    /// Human label used in user-facing error messages
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKey::Devices => "device usage",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fetched collection, tagged by the resource it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceData {
    Activity(Vec<ActivityRecord>),
    Sales(Vec<SalesRecord>),
    Devices(Vec<DeviceUsageRecord>),
    Performance(Vec<PerformanceRecord>),
    Table(Vec<UserRecord>),
    Stats(Vec<StatRecord>),
}

impl ResourceData {
    pub fn key(&self) -> ResourceKey {
        match self {
            ResourceData::Activity(_) => ResourceKey::Activity,
            ResourceData::Sales(_) => ResourceKey::Sales,
            ResourceData::Devices(_) => ResourceKey::Devices,
            ResourceData::Performance(_) => ResourceKey::Performance,
            ResourceData::Table(_) => ResourceKey::Table,
            ResourceData::Stats(_) => ResourceKey::Stats,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ResourceData::Activity(rows) => rows.len(),
            ResourceData::Sales(rows) => rows.len(),
            ResourceData::Devices(rows) => rows.len(),
            ResourceData::Performance(rows) => rows.len(),
            ResourceData::Table(rows) => rows.len(),
            ResourceData::Stats(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The `{data, isLoading, error}` triple for one resource.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<T> {
    pub data: Vec<T>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            is_loading: true,
            error: None,
        }
    }
}

impl<T> ResourceState<T> {
    /// Enter Loading. Stale data stays visible until the cycle settles.
    fn begin_loading(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    fn load(&mut self, data: Vec<T>) {
        self.data = data;
        self.is_loading = false;
        self.error = None;
    }

    fn fail(&mut self, message: String) {
        self.is_loading = false;
        self.error = Some(message);
    }

    fn fail_if_loading(&mut self, message: &str) {
        if self.is_loading {
            self.fail(message.to_string());
        }
    }
}

/// All six resource triples as seen by the presentation layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSnapshot {
    pub activity: ResourceState<ActivityRecord>,
    pub sales: ResourceState<SalesRecord>,
    pub devices: ResourceState<DeviceUsageRecord>,
    pub performance: ResourceState<PerformanceRecord>,
    pub table: ResourceState<UserRecord>,
    pub stats: ResourceState<StatRecord>,
}

impl DashboardSnapshot {
    /// Clear every error and mark every resource as loading.
    pub fn begin_cycle(&mut self) {
        self.activity.begin_loading();
        self.sales.begin_loading();
        self.devices.begin_loading();
        self.performance.begin_loading();
        self.table.begin_loading();
        self.stats.begin_loading();
    }

    pub fn apply_loaded(&mut self, data: ResourceData) {
        match data {
            ResourceData::Activity(rows) => self.activity.load(rows),
            ResourceData::Sales(rows) => self.sales.load(rows),
            ResourceData::Devices(rows) => self.devices.load(rows),
            ResourceData::Performance(rows) => self.performance.load(rows),
            ResourceData::Table(rows) => self.table.load(rows),
            ResourceData::Stats(rows) => self.stats.load(rows),
        }
    }

    pub fn apply_failed(&mut self, key: ResourceKey, message: String) {
        match key {
            ResourceKey::Activity => self.activity.fail(message),
            ResourceKey::Sales => self.sales.fail(message),
            ResourceKey::Devices => self.devices.fail(message),
            ResourceKey::Performance => self.performance.fail(message),
            ResourceKey::Table => self.table.fail(message),
            ResourceKey::Stats => self.stats.fail(message),
        }
    }

    /// Force every resource that is still loading into a failed state.
    pub fn fail_pending(&mut self, message: &str) {
        self.activity.fail_if_loading(message);
        self.sales.fail_if_loading(message);
        self.devices.fail_if_loading(message);
        self.performance.fail_if_loading(message);
        self.table.fail_if_loading(message);
        self.stats.fail_if_loading(message);
    }

    pub fn is_loading(&self, key: ResourceKey) -> bool {
        match key {
            ResourceKey::Activity => self.activity.is_loading,
            ResourceKey::Sales => self.sales.is_loading,
            ResourceKey::Devices => self.devices.is_loading,
            ResourceKey::Performance => self.performance.is_loading,
            ResourceKey::Table => self.table.is_loading,
            ResourceKey::Stats => self.stats.is_loading,
        }
    }

    pub fn error(&self, key: ResourceKey) -> Option<&str> {
        let error = match key {
            ResourceKey::Activity => &self.activity.error,
            ResourceKey::Sales => &self.sales.error,
            ResourceKey::Devices => &self.devices.error,
            ResourceKey::Performance => &self.performance.error,
            ResourceKey::Table => &self.table.error,
            ResourceKey::Stats => &self.stats.error,
        };
        error.as_deref()
    }

    pub fn data_len(&self, key: ResourceKey) -> usize {
        match key {
            ResourceKey::Activity => self.activity.data.len(),
            ResourceKey::Sales => self.sales.data.len(),
            ResourceKey::Devices => self.devices.data.len(),
            ResourceKey::Performance => self.performance.data.len(),
            ResourceKey::Table => self.table.data.len(),
            ResourceKey::Stats => self.stats.data.len(),
        }
    }

    /// True once no resource is loading
    pub fn is_settled(&self) -> bool {
        ResourceKey::ALL.iter().all(|key| !self.is_loading(*key))
    }
}
