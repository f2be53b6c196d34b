//! Rollups - the five read-only views derived from one dataset snapshot.
//!
//! `aggregate` is a pure function of the dataset: the same snapshot always
//! yields the same rollup. Grouped tables are sorted descending by their
//! measure; ties keep ascending key order so the output is deterministic.

use serde::Serialize;
use std::collections::BTreeMap;

use super::trend::{minute_trend, TrendBucket};
use super::{AppointmentRow, Dataset};
use crate::domain::appointment::AppointmentStatus;

/// Headline KPI scalars.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Kpis {
    pub total_appointments: usize,
    pub total_cost: f64,
    pub average_cost: f64,
    pub completed: usize,
    pub cancelled: usize,
    /// Percentage in `[0, 100]`.
    pub completion_rate: f64,
    pub average_copay: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusMixRow {
    pub status: AppointmentStatus,
    pub appointments: usize,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrgencyByDepartmentRow {
    pub department: String,
    pub urgency: String,
    pub appointments: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentMethodRow {
    pub payment_method: String,
    pub average_cost: f64,
    pub average_copay: f64,
    pub volume: usize,
}

/// All derived views for one refresh cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Rollup {
    pub kpis: Kpis,
    pub status_mix: Vec<StatusMixRow>,
    pub urgency_by_department: Vec<UrgencyByDepartmentRow>,
    pub payment_methods: Vec<PaymentMethodRow>,
    /// Empty when no row carries a timestamp.
    pub trend: Vec<TrendBucket>,
}

/// Computes every rollup for a dataset.
pub fn aggregate(dataset: &Dataset) -> Rollup {
    let rows = dataset.rows();
    Rollup {
        kpis: kpis(rows),
        status_mix: status_mix(rows),
        urgency_by_department: urgency_by_department(rows),
        payment_methods: payment_methods(rows),
        trend: minute_trend(rows),
    }
}

fn ratio(numerator: f64, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator / denominator as f64
    }
}

/// Headline KPIs; every scalar is zero for an empty dataset.
pub fn kpis(rows: &[AppointmentRow]) -> Kpis {
    let total_appointments = rows.len();
    let total_cost: f64 = rows.iter().map(|row| row.cost).sum();
    let completed = rows.iter().filter(|row| row.status.is_completed()).count();
    let cancelled = rows.iter().filter(|row| row.status.is_cancelled()).count();

    let copays: Vec<f64> = rows.iter().filter_map(|row| row.copay).collect();
    let average_copay = ratio(copays.iter().sum(), copays.len());

    Kpis {
        total_appointments,
        total_cost,
        average_cost: ratio(total_cost, total_appointments),
        completed,
        cancelled,
        completion_rate: ratio(completed as f64, total_appointments) * 100.0,
        average_copay,
    }
}

/// Count and revenue per status, busiest first.
pub fn status_mix(rows: &[AppointmentRow]) -> Vec<StatusMixRow> {
    let mut groups: BTreeMap<AppointmentStatus, (usize, f64)> = BTreeMap::new();
    for row in rows {
        let entry = groups.entry(row.status).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += row.cost;
    }

    let mut table: Vec<StatusMixRow> = groups
        .into_iter()
        .map(|(status, (appointments, revenue))| StatusMixRow {
            status,
            appointments,
            revenue,
        })
        .collect();
    table.sort_by(|a, b| b.appointments.cmp(&a.appointments));
    table
}

/// Count per (department, urgency) pair, busiest first.
pub fn urgency_by_department(rows: &[AppointmentRow]) -> Vec<UrgencyByDepartmentRow> {
    let mut groups: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    for row in rows {
        *groups
            .entry((row.department.as_str(), row.urgency.as_str()))
            .or_insert(0) += 1;
    }

    let mut table: Vec<UrgencyByDepartmentRow> = groups
        .into_iter()
        .map(|((department, urgency), appointments)| UrgencyByDepartmentRow {
            department: department.to_string(),
            urgency: urgency.to_string(),
            appointments,
        })
        .collect();
    table.sort_by(|a, b| b.appointments.cmp(&a.appointments));
    table
}

#[derive(Default)]
struct PaymentAccumulator {
    volume: usize,
    cost_sum: f64,
    copay_sum: f64,
    copay_count: usize,
}

/// Mean cost, mean copay and volume per payment method, most expensive first.
pub fn payment_methods(rows: &[AppointmentRow]) -> Vec<PaymentMethodRow> {
    let mut groups: BTreeMap<&str, PaymentAccumulator> = BTreeMap::new();
    for row in rows {
        let acc = groups.entry(row.payment_method.as_str()).or_default();
        acc.volume += 1;
        acc.cost_sum += row.cost;
        if let Some(copay) = row.copay {
            acc.copay_sum += copay;
            acc.copay_count += 1;
        }
    }

    let mut table: Vec<PaymentMethodRow> = groups
        .into_iter()
        .map(|(payment_method, acc)| PaymentMethodRow {
            payment_method: payment_method.to_string(),
            average_cost: ratio(acc.cost_sum, acc.volume),
            average_copay: ratio(acc.copay_sum, acc.copay_count),
            volume: acc.volume,
        })
        .collect();
    table.sort_by(|a, b| b.average_cost.total_cmp(&a.average_cost));
    table
}
