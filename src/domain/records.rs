// Dashboard record domain models
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: u32,
    pub icon: String,
    pub title: String,
    pub subtitle: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// Month label, e.g. "Jan"
    pub name: String,
    pub sales: u32,
    pub revenue: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceUsageRecord {
    /// Device class: Desktop, Mobile or Tablet
    pub name: String,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    pub name: String,
    pub uv: u32,
    pub pv: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Editor,
    Viewer,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Editor, Role::Viewer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Editor => "Editor",
            Role::Viewer => "Viewer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserStatus {
    Active,
    Inactive,
    Pending,
}

impl UserStatus {
    pub const ALL: [UserStatus; 3] = [UserStatus::Active, UserStatus::Inactive, UserStatus::Pending];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "Active",
            UserStatus::Inactive => "Inactive",
            UserStatus::Pending => "Pending",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown value: {0}")]
pub struct UnknownVariant(pub String);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Date string in `YYYY-MM-DD` form
    pub created_at: String,
    pub status: UserStatus,
}

impl UserRecord {
    pub fn new(id: u32, name: &str, email: &str, role: Role, created_at: &str, status: UserStatus) -> Self {
        Self {
            id,
            name: name.to_string(),
            email: email.to_string(),
            role,
            created_at: created_at.to_string(),
            status,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatIcon {
    Dollar,
    Users,
    ShoppingCart,
    BarChart,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatRecord {
    pub id: u32,
    pub title: String,
    pub value: String,
    pub change: String,
    pub is_positive: bool,
    pub icon: StatIcon,
}

/// Fixed user set used for fixtures and the demo table.
pub fn sample_users() -> Vec<UserRecord> {
    use Role::*;
    use UserStatus::*;

    vec![
        UserRecord::new(1, "John Doe", "john.doe@example.com", Admin, "2023-01-15", Active),
        UserRecord::new(2, "Jane Smith", "jane.smith@example.com", Editor, "2023-02-20", Active),
        UserRecord::new(3, "Sam Wilson", "sam.wilson@example.com", Viewer, "2023-03-10", Inactive),
        UserRecord::new(4, "Alice Johnson", "alice.johnson@example.com", Editor, "2023-04-05", Active),
        UserRecord::new(5, "Chris Lee", "chris.lee@example.com", Viewer, "2023-05-21", Pending),
        UserRecord::new(6, "Patricia Brown", "patricia.brown@example.com", Admin, "2023-06-12", Active),
        UserRecord::new(7, "Michael Clark", "michael.clark@example.com", Editor, "2023-07-30", Inactive),
        UserRecord::new(8, "Linda Davis", "linda.davis@example.com", Viewer, "2023-08-18", Active),
        UserRecord::new(9, "James Rodriguez", "james.rodriguez@example.com", Editor, "2023-09-25", Pending),
        UserRecord::new(10, "Barbara Martinez", "barbara.martinez@example.com", Viewer, "2023-10-02", Active),
    ]
}
