//! Read-only aggregation over the current snapshot.
//!
//! Every function here recomputes from scratch; nothing is cached. That is
//! acceptable because the engine is single-writer and the collections are
//! small. Queries never mutate state and never error: payments whose
//! resident no longer resolves are skipped where a lookup is needed.

use chrono::{Datelike, NaiveDate, Utc};
use uuid::Uuid;

use crate::{Engine, MonthKey, Payment, PaymentKind, PaymentStatus, RoomStatus};

/// Paid totals per payment kind, in minor units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RevenueByKind {
    pub rent_minor: i64,
    pub mess_minor: i64,
    pub security_minor: i64,
    pub other_minor: i64,
}

/// Payment counts per status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub paid: usize,
    pub pending: usize,
    pub overdue: usize,
}

/// Beds occupied against total capacity, maintenance rooms excluded.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OccupancySummary {
    pub capacity: u64,
    pub occupied: u64,
    pub rate_percent: f64,
}

/// One point of the trailing revenue series.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthlyRevenue {
    pub month: MonthKey,
    pub revenue_minor: i64,
}

impl Engine {
    /// All outstanding payments (pending or overdue), in store order. No
    /// ordering is imposed here; callers sort as they see fit.
    pub fn pending_payments(&self) -> Vec<&Payment> {
        self.payments
            .iter()
            .filter(|payment| payment.status.is_outstanding())
            .collect()
    }

    /// Full payment history for a resident, in store order. Works for
    /// inactive residents too.
    pub fn payments_for(&self, resident_id: Uuid) -> Vec<&Payment> {
        self.payments
            .iter()
            .filter(|payment| payment.resident_id == resident_id)
            .collect()
    }

    /// Sum of all paid, non-security amounts.
    pub fn total_revenue(&self) -> i64 {
        self.payments
            .iter()
            .filter(|payment| payment.counts_toward_revenue())
            .map(|payment| payment.amount_minor)
            .sum()
    }

    /// Like [`total_revenue`](Self::total_revenue), restricted to payments
    /// targeting the current month.
    pub fn current_month_revenue(&self) -> i64 {
        let current = MonthKey::current();
        self.payments
            .iter()
            .filter(|payment| payment.counts_toward_revenue() && payment.month == current)
            .map(|payment| payment.amount_minor)
            .sum()
    }

    /// Paid, non-security revenue with a payment date in `[start, end)`.
    pub fn revenue_between(&self, start: NaiveDate, end: NaiveDate) -> i64 {
        self.payments
            .iter()
            .filter(|payment| {
                payment.counts_toward_revenue()
                    && payment.paid_on >= start
                    && payment.paid_on < end
            })
            .map(|payment| payment.amount_minor)
            .sum()
    }

    /// Paid totals per kind with a payment date on or after `since`. Unlike
    /// the revenue figures, this includes security deposits so reports can
    /// show money held in trust.
    pub fn revenue_by_kind(&self, since: NaiveDate) -> RevenueByKind {
        let mut breakdown = RevenueByKind::default();
        for payment in &self.payments {
            if payment.status != PaymentStatus::Paid || payment.paid_on < since {
                continue;
            }
            let slot = match payment.kind {
                PaymentKind::Rent => &mut breakdown.rent_minor,
                PaymentKind::Mess => &mut breakdown.mess_minor,
                PaymentKind::Security => &mut breakdown.security_minor,
                PaymentKind::Other => &mut breakdown.other_minor,
            };
            *slot += payment.amount_minor;
        }
        breakdown
    }

    /// Status distribution of payments dated on or after `since`. Money that
    /// is still owed stays in the picture no matter how old it is, so only
    /// paid payments are subject to the date filter.
    pub fn payment_status_counts(&self, since: NaiveDate) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for payment in &self.payments {
            if payment.status == PaymentStatus::Paid && payment.paid_on < since {
                continue;
            }
            match payment.status {
                PaymentStatus::Paid => counts.paid += 1,
                PaymentStatus::Pending => counts.pending += 1,
                PaymentStatus::Overdue => counts.overdue += 1,
            }
        }
        counts
    }

    /// Occupied beds against total capacity. Rooms under maintenance offer
    /// no beds and are left out of the denominator.
    pub fn occupancy_summary(&self) -> OccupancySummary {
        let mut capacity = 0u64;
        let mut occupied = 0u64;
        for room in &self.rooms {
            if room.status() == RoomStatus::Maintenance {
                continue;
            }
            capacity += u64::from(room.capacity);
            occupied += room.occupants().len() as u64;
        }
        let rate_percent = if capacity == 0 {
            0.0
        } else {
            occupied as f64 * 100.0 / capacity as f64
        };
        OccupancySummary {
            capacity,
            occupied,
            rate_percent,
        }
    }

    /// Paid, non-security totals bucketed by target month for the trailing
    /// `months` months, oldest first, ending with the current month.
    pub fn monthly_revenue(&self, months: u32) -> Vec<MonthlyRevenue> {
        let now = Utc::now().date_naive();
        let (mut year, mut month) = (now.year(), now.month());

        let mut keys = Vec::with_capacity(months as usize);
        for _ in 0..months {
            keys.push(MonthKey::from_parts(year, month));
            if month == 1 {
                year -= 1;
                month = 12;
            } else {
                month -= 1;
            }
        }
        keys.reverse();

        keys.into_iter()
            .map(|key| {
                let revenue_minor = self
                    .payments
                    .iter()
                    .filter(|payment| payment.counts_toward_revenue() && payment.month == key)
                    .map(|payment| payment.amount_minor)
                    .sum();
                MonthlyRevenue {
                    month: key,
                    revenue_minor,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NewResident, RecordPayment};

    fn engine_with_resident() -> (Engine, Uuid) {
        let mut engine = Engine::builder().build().unwrap();
        let id = engine
            .add_resident(
                NewResident::new(
                    "Asha",
                    "101",
                    7500,
                    5,
                    NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                )
                .contact_number("555-0101")
                .home_address("12 Hill Road"),
            )
            .unwrap();
        (engine, id)
    }

    fn record(
        engine: &mut Engine,
        resident: Uuid,
        amount: i64,
        kind: PaymentKind,
        status: PaymentStatus,
        month: &str,
        paid_on: NaiveDate,
    ) -> Uuid {
        engine
            .record_payment(
                RecordPayment::new(resident, amount, kind, month.parse().unwrap())
                    .status(status)
                    .paid_on(paid_on),
            )
            .unwrap()
    }

    #[test]
    fn total_revenue_skips_deposits_and_unpaid() {
        let (mut engine, id) = engine_with_resident();
        let date = NaiveDate::from_ymd_opt(2024, 2, 5).unwrap();

        record(&mut engine, id, 7500, PaymentKind::Rent, PaymentStatus::Paid, "2024-02", date);
        record(&mut engine, id, 2000, PaymentKind::Mess, PaymentStatus::Pending, "2024-02", date);
        record(&mut engine, id, 5000, PaymentKind::Security, PaymentStatus::Paid, "2024-02", date);

        assert_eq!(engine.total_revenue(), 7500);
    }

    #[test]
    fn current_month_revenue_only_counts_the_current_key() {
        let (mut engine, id) = engine_with_resident();
        let today = Utc::now().date_naive();
        let current = MonthKey::current();

        record(
            &mut engine,
            id,
            7500,
            PaymentKind::Rent,
            PaymentStatus::Paid,
            current.as_str(),
            today,
        );
        record(&mut engine, id, 9999, PaymentKind::Rent, PaymentStatus::Paid, "2020-01",
            NaiveDate::from_ymd_opt(2020, 1, 5).unwrap());

        assert_eq!(engine.current_month_revenue(), 7500);
        assert_eq!(engine.total_revenue(), 7500 + 9999);
    }

    #[test]
    fn revenue_between_is_half_open() {
        let (mut engine, id) = engine_with_resident();
        let jan = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let feb = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();

        record(&mut engine, id, 100, PaymentKind::Rent, PaymentStatus::Paid, "2024-01", jan);
        record(&mut engine, id, 200, PaymentKind::Rent, PaymentStatus::Paid, "2024-02", feb);

        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(engine.revenue_between(start, feb), 100);
        let march = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(engine.revenue_between(start, march), 300);
    }

    #[test]
    fn pending_payments_keep_store_order() {
        let (mut engine, id) = engine_with_resident();
        let date = NaiveDate::from_ymd_opt(2024, 2, 5).unwrap();

        let first = record(&mut engine, id, 1, PaymentKind::Rent, PaymentStatus::Pending, "2024-02", date);
        record(&mut engine, id, 2, PaymentKind::Rent, PaymentStatus::Paid, "2024-02", date);
        let third = record(&mut engine, id, 3, PaymentKind::Mess, PaymentStatus::Overdue, "2024-02", date);

        let ids: Vec<Uuid> = engine.pending_payments().iter().map(|p| p.id).collect();
        assert_eq!(ids, [first, third]);
    }

    #[test]
    fn breakdown_by_kind_includes_deposits() {
        let (mut engine, id) = engine_with_resident();
        let date = NaiveDate::from_ymd_opt(2024, 2, 5).unwrap();

        record(&mut engine, id, 7500, PaymentKind::Rent, PaymentStatus::Paid, "2024-02", date);
        record(&mut engine, id, 2000, PaymentKind::Mess, PaymentStatus::Paid, "2024-02", date);
        record(&mut engine, id, 5000, PaymentKind::Security, PaymentStatus::Paid, "2024-02", date);
        record(&mut engine, id, 300, PaymentKind::Other, PaymentStatus::Pending, "2024-02", date);

        let since = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let breakdown = engine.revenue_by_kind(since);
        assert_eq!(
            breakdown,
            RevenueByKind {
                rent_minor: 7500,
                mess_minor: 2000,
                security_minor: 5000,
                other_minor: 0,
            }
        );
    }

    #[test]
    fn status_counts_date_filter_only_applies_to_paid() {
        let (mut engine, id) = engine_with_resident();
        let old = NaiveDate::from_ymd_opt(2020, 1, 5).unwrap();
        let recent = NaiveDate::from_ymd_opt(2024, 2, 5).unwrap();

        record(&mut engine, id, 1, PaymentKind::Rent, PaymentStatus::Paid, "2020-01", old);
        record(&mut engine, id, 2, PaymentKind::Rent, PaymentStatus::Pending, "2020-02", old);
        record(&mut engine, id, 3, PaymentKind::Rent, PaymentStatus::Paid, "2024-02", recent);
        record(&mut engine, id, 4, PaymentKind::Rent, PaymentStatus::Overdue, "2024-02", recent);

        let counts = engine.payment_status_counts(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(
            counts,
            StatusCounts {
                paid: 1,
                pending: 1,
                overdue: 1,
            }
        );
    }

    #[test]
    fn occupancy_excludes_maintenance_rooms() {
        let (mut engine, _) = engine_with_resident();
        engine
            .update_room(crate::UpdateRoom::new("102").status(RoomStatus::Maintenance))
            .unwrap();

        let summary = engine.occupancy_summary();
        assert_eq!(summary.capacity, 2);
        assert_eq!(summary.occupied, 1);
        assert!((summary.rate_percent - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn occupancy_of_empty_house_is_zero() {
        let mut engine = Engine::builder().build().unwrap();
        engine
            .update_room(crate::UpdateRoom::new("101").status(RoomStatus::Maintenance))
            .unwrap();
        engine
            .update_room(crate::UpdateRoom::new("102").status(RoomStatus::Maintenance))
            .unwrap();

        let summary = engine.occupancy_summary();
        assert_eq!(summary.capacity, 0);
        assert_eq!(summary.rate_percent, 0.0);
    }

    #[test]
    fn monthly_revenue_covers_the_trailing_window() {
        let (mut engine, id) = engine_with_resident();
        let today = Utc::now().date_naive();
        let current = MonthKey::current();

        record(
            &mut engine,
            id,
            7500,
            PaymentKind::Rent,
            PaymentStatus::Paid,
            current.as_str(),
            today,
        );

        let series = engine.monthly_revenue(3);
        assert_eq!(series.len(), 3);
        assert_eq!(series[2].month, current);
        assert_eq!(series[2].revenue_minor, 7500);
        assert_eq!(series[0].revenue_minor, 0);
        assert!(series[0].month < series[1].month);
    }
}
