// Synthetic record generation for the simulated backend
use crate::domain::records::{
    ActivityRecord, DeviceUsageRecord, PerformanceRecord, Role, SalesRecord, StatIcon, StatRecord,
    UserRecord, UserStatus,
};
use crate::domain::resource::{ResourceData, ResourceKey};
use chrono::NaiveDate;
use rand::Rng;
use rand::seq::SliceRandom;

const MONTHS: [&str; 7] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul"];
const PAGES: [&str; 7] = ["A", "B", "C", "D", "E", "F", "G"];
const USER_COUNT: u32 = 15;

pub fn generate<R: Rng + ?Sized>(key: ResourceKey, rng: &mut R) -> ResourceData {
    match key {
        ResourceKey::Activity => ResourceData::Activity(activity(rng)),
        ResourceKey::Sales => ResourceData::Sales(sales(rng)),
        ResourceKey::Devices => ResourceData::Devices(device_usage(rng)),
        ResourceKey::Performance => ResourceData::Performance(performance(rng)),
        ResourceKey::Table => ResourceData::Table(users(rng)),
        ResourceKey::Stats => ResourceData::Stats(stats(rng)),
    }
}

fn activity_item(id: u32, icon: &str, title: &str, subtitle: String, time: String) -> ActivityRecord {
    ActivityRecord {
        id,
        icon: icon.to_string(),
        title: title.to_string(),
        subtitle,
        time,
    }
}

pub fn activity<R: Rng + ?Sized>(rng: &mut R) -> Vec<ActivityRecord> {
    vec![
        activity_item(
            1,
            "📊",
            "New report generated",
            "Monthly performance report is ready".to_string(),
            format!("{} min ago", rng.gen_range(1..=10)),
        ),
        activity_item(
            2,
            "👤",
            "New user registered",
            "Alex Johnson joined the platform".to_string(),
            format!("{} hour ago", rng.gen_range(1..=5)),
        ),
        activity_item(
            3,
            "🛒",
            "New order received",
            format!(
                "Order #{} for ${}.00",
                rng.gen_range(10_000..20_000),
                rng.gen_range(100..600)
            ),
            format!("{} hours ago", rng.gen_range(1..=12)),
        ),
        activity_item(
            4,
            "📈",
            "Sales target achieved",
            "Reached 95% of monthly sales goal".to_string(),
            format!("{} hours ago", rng.gen_range(1..=24)),
        ),
        activity_item(
            5,
            "🔧",
            "System updated",
            "Dashboard version 2.1.0 installed".to_string(),
            format!("{} days ago", rng.gen_range(1..=7)),
        ),
    ]
}

pub fn sales<R: Rng + ?Sized>(rng: &mut R) -> Vec<SalesRecord> {
    MONTHS
        .iter()
        .map(|month| SalesRecord {
            name: month.to_string(),
            sales: rng.gen_range(1_000..6_000),
            revenue: rng.gen_range(2_000..12_000),
        })
        .collect()
}

pub fn device_usage<R: Rng + ?Sized>(rng: &mut R) -> Vec<DeviceUsageRecord> {
    [("Desktop", 50..90), ("Mobile", 20..50), ("Tablet", 5..20)]
        .into_iter()
        .map(|(name, range)| DeviceUsageRecord {
            name: name.to_string(),
            value: rng.gen_range(range),
        })
        .collect()
}

pub fn performance<R: Rng + ?Sized>(rng: &mut R) -> Vec<PerformanceRecord> {
    PAGES
        .iter()
        .map(|letter| PerformanceRecord {
            name: format!("Page {}", letter),
            uv: rng.gen_range(1_000..6_000),
            pv: rng.gen_range(1_000..6_000),
        })
        .collect()
}

pub fn users<R: Rng + ?Sized>(rng: &mut R) -> Vec<UserRecord> {
    (1..=USER_COUNT)
        .map(|n| {
            let created = NaiveDate::from_ymd_opt(2023, rng.gen_range(1..=12), rng.gen_range(1..=28))
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            UserRecord {
                id: n,
                name: format!("User {}", n),
                email: format!("user{}@example.com", n),
                role: *Role::ALL.choose(rng).unwrap_or(&Role::Viewer),
                created_at: created,
                status: *UserStatus::ALL.choose(rng).unwrap_or(&UserStatus::Active),
            }
        })
        .collect()
}

fn change<R: Rng + ?Sized>(rng: &mut R, max_percent: f64) -> String {
    let arrow = if rng.gen_bool(0.5) { '↑' } else { '↓' };
    format!("{} {:.1}%", arrow, rng.gen_range(0.0..max_percent))
}

pub fn stats<R: Rng + ?Sized>(rng: &mut R) -> Vec<StatRecord> {
    vec![
        StatRecord {
            id: 1,
            title: "Total Revenue".to_string(),
            value: format!("${},000", rng.gen_range(20_000..30_000)),
            change: change(rng, 20.0),
            is_positive: rng.gen_bool(0.5),
            icon: StatIcon::Dollar,
        },
        StatRecord {
            id: 2,
            title: "New Customers".to_string(),
            value: rng.gen_range(1_000..2_000).to_string(),
            change: change(rng, 15.0),
            is_positive: rng.gen_bool(0.5),
            icon: StatIcon::Users,
        },
        StatRecord {
            id: 3,
            title: "Pending Orders".to_string(),
            value: rng.gen_range(50..150).to_string(),
            change: change(rng, 10.0),
            is_positive: rng.gen_bool(0.5),
            icon: StatIcon::ShoppingCart,
        },
        StatRecord {
            id: 4,
            title: "Bounce Rate".to_string(),
            value: format!("{:.1}%", rng.gen_range(10.0..30.0)),
            change: change(rng, 10.0),
            is_positive: rng.gen_bool(0.5),
            icon: StatIcon::BarChart,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_device_usage_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let devices = device_usage(&mut rng);
            assert_eq!(devices.len(), 3);
            assert!((50..90).contains(&devices[0].value));
            assert!((20..50).contains(&devices[1].value));
            assert!((5..20).contains(&devices[2].value));
            assert_eq!(devices[2].name, "Tablet");
        }
    }

    #[test]
    fn test_users_shape() {
        let mut rng = StdRng::seed_from_u64(42);
        let rows = users(&mut rng);
        assert_eq!(rows.len(), 15);
        assert_eq!(rows[0].name, "User 1");
        assert_eq!(rows[14].email, "user15@example.com");
        for row in &rows {
            assert_eq!(row.created_at.len(), 10);
            assert!(row.created_at.starts_with("2023-"));
        }
    }

    #[test]
    fn test_sales_and_performance_labels() {
        let mut rng = StdRng::seed_from_u64(1);
        let months: Vec<String> = sales(&mut rng).into_iter().map(|r| r.name).collect();
        assert_eq!(months, MONTHS);
        let perf = performance(&mut rng);
        assert_eq!(perf[6].name, "Page G");
        assert!(perf.iter().all(|p| (1_000..6_000).contains(&p.uv)));
    }

    #[test]
    fn test_generate_matches_key() {
        let mut rng = StdRng::seed_from_u64(3);
        for key in ResourceKey::ALL {
            let data = generate(key, &mut rng);
            assert_eq!(data.key(), key);
            assert!(!data.is_empty());
        }
        let stats = stats(&mut rng);
        assert_eq!(stats[3].icon, StatIcon::BarChart);
        assert!(stats[3].value.ends_with('%'));
    }
}
