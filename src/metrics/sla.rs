//! SLA metrics aggregation.
//!
//! Computes compliance rate, breach counts, mean time to repair, and
//! first-time-fix rate over work orders linked to an SLA policy. An order
//! qualifies for the time-based metrics only when it has both an actual
//! start and an actual end timestamp.

use crate::models::WorkOrder;
use crate::sla::SlaPolicy;
use serde::Serialize;

/// Aggregated SLA performance for one policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SlaMetrics {
    /// All orders passed in.
    pub total_orders: usize,
    /// Orders with both actual start and end timestamps.
    pub qualifying_orders: usize,
    /// Mean time to repair in hours over qualifying orders; 0 if none.
    pub mttr_hours: f64,
    /// First-time fixes / qualifying orders, as a percentage; 0 if none.
    pub first_time_fix_rate: f64,
    /// Qualifying orders whose realized time exceeds the resolution
    /// threshold.
    pub breached_orders: usize,
    /// Qualifying orders whose realized time exceeds the critical
    /// threshold.
    pub critical_breaches: usize,
    /// (1 - breached/qualifying) as a percentage; 0 when nothing
    /// qualifies.
    pub compliance_rate: f64,
}

/// Aggregate SLA metrics over a work order collection against one policy.
pub fn compute(orders: &[WorkOrder], sla: &SlaPolicy) -> SlaMetrics {
    let mut metrics = SlaMetrics {
        total_orders: orders.len(),
        ..SlaMetrics::default()
    };

    let mut total_hours = 0.0;
    let mut first_time_fixes = 0;

    for order in orders {
        let hours = match order.realized_hours() {
            Some(hours) => hours,
            None => continue,
        };

        metrics.qualifying_orders += 1;
        total_hours += hours;

        if order.first_time_fix {
            first_time_fixes += 1;
        }

        if hours > sla.resolution_time_hours {
            metrics.breached_orders += 1;
        }
        if hours > sla.critical_threshold_hours {
            metrics.critical_breaches += 1;
        }
    }

    if metrics.qualifying_orders > 0 {
        let qualifying = metrics.qualifying_orders as f64;
        metrics.mttr_hours = total_hours / qualifying;
        metrics.first_time_fix_rate = (first_time_fixes as f64 / qualifying) * 100.0;
        metrics.compliance_rate =
            (1.0 - metrics.breached_orders as f64 / qualifying) * 100.0;
    }

    metrics
}

/// Count of open orders (neither done nor cancelled) assigned to the
/// given technician.
pub fn open_workload(orders: &[WorkOrder], technician: &str) -> usize {
    orders
        .iter()
        .filter(|o| o.is_open() && o.technician.as_deref() == Some(technician))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkOrderStatus;
    use chrono::{DateTime, Duration, Utc};

    fn base_time() -> DateTime<Utc> {
        "2024-06-01T08:00:00Z".parse().unwrap()
    }

    fn make_order(id: &str, duration_hours: Option<f64>) -> WorkOrder {
        let start = base_time();
        WorkOrder {
            id: id.to_string(),
            name: format!("WO {}", id),
            sla: Some("Default SLA".to_string()),
            technician: None,
            status: WorkOrderStatus::Done,
            actual_start: duration_hours.map(|_| start),
            actual_end: duration_hours
                .map(|h| start + Duration::minutes((h * 60.0) as i64)),
            first_time_fix: false,
        }
    }

    fn make_policy() -> SlaPolicy {
        SlaPolicy {
            name: "Default SLA".to_string(),
            description: None,
            priority: 10,
            active: true,
            response_time_hours: 4.0,
            resolution_time_hours: 24.0,
            warning_threshold_hours: 2.0,
            critical_threshold_hours: 48.0,
            target_mttr_hours: 8.0,
            target_first_time_fix_rate: 85.0,
            target_compliance_rate: 95.0,
            audit_log: Vec::new(),
        }
    }

    #[test]
    fn test_empty_collection_yields_zero_metrics() {
        let metrics = compute(&[], &make_policy());
        assert_eq!(metrics.total_orders, 0);
        assert_eq!(metrics.mttr_hours, 0.0);
        assert_eq!(metrics.compliance_rate, 0.0);
        assert_eq!(metrics.first_time_fix_rate, 0.0);
    }

    #[test]
    fn test_one_breach_in_four_gives_75_percent_compliance() {
        let orders = vec![
            make_order("1", Some(2.0)),
            make_order("2", Some(8.0)),
            make_order("3", Some(12.0)),
            make_order("4", Some(30.0)), // beyond the 24h resolution time
        ];

        let metrics = compute(&orders, &make_policy());
        assert_eq!(metrics.qualifying_orders, 4);
        assert_eq!(metrics.breached_orders, 1);
        assert_eq!(metrics.compliance_rate, 75.0);
    }

    #[test]
    fn test_critical_breach_requires_exceeding_critical_threshold() {
        let orders = vec![
            make_order("1", Some(30.0)), // breach, not critical
            make_order("2", Some(50.0)), // breach and critical (>48h)
        ];

        let metrics = compute(&orders, &make_policy());
        assert_eq!(metrics.breached_orders, 2);
        assert_eq!(metrics.critical_breaches, 1);
    }

    #[test]
    fn test_mttr_averages_qualifying_orders_only() {
        let orders = vec![
            make_order("1", Some(2.0)),
            make_order("2", None), // no timestamps, excluded
            make_order("3", Some(4.0)),
        ];

        let metrics = compute(&orders, &make_policy());
        assert_eq!(metrics.total_orders, 3);
        assert_eq!(metrics.qualifying_orders, 2);
        assert_eq!(metrics.mttr_hours, 3.0);
    }

    #[test]
    fn test_first_time_fix_rate() {
        let mut fixed = make_order("1", Some(2.0));
        fixed.first_time_fix = true;
        let repeat = make_order("2", Some(3.0));

        let metrics = compute(&[fixed, repeat], &make_policy());
        assert_eq!(metrics.first_time_fix_rate, 50.0);
    }

    #[test]
    fn test_open_workload_counts_open_orders_for_technician() {
        let mut open_a = make_order("1", None);
        open_a.status = WorkOrderStatus::InProgress;
        open_a.technician = Some("dana".to_string());

        let mut open_b = make_order("2", None);
        open_b.status = WorkOrderStatus::Assigned;
        open_b.technician = Some("dana".to_string());

        let mut done = make_order("3", Some(2.0));
        done.technician = Some("dana".to_string());

        let mut other_tech = make_order("4", None);
        other_tech.status = WorkOrderStatus::Draft;
        other_tech.technician = Some("eli".to_string());

        let mut cancelled = make_order("5", None);
        cancelled.status = WorkOrderStatus::Cancelled;
        cancelled.technician = Some("dana".to_string());

        let orders = vec![open_a, open_b, done, other_tech, cancelled];
        assert_eq!(open_workload(&orders, "dana"), 2);
        assert_eq!(open_workload(&orders, "eli"), 1);
        assert_eq!(open_workload(&orders, "noone"), 0);
    }
}
