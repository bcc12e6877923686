//! Payment schedule ("échéancier") generation
//!
//! The policy year starting at the effective date is cut into N contiguous
//! periods of 12/N months. Every cost component is spread over the periods pro
//! rata temporis and rounded to the cent per instalment; the first instalment
//! absorbs the rounding residual so each component sums exactly to its annual
//! amount.

use crate::declaration::InstalmentFrequency;
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Annual amounts to spread over the schedule
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleTotals {
    pub base_premium: f64,
    pub management_fee: f64,
    pub splitting_fee: f64,
    pub insurance_tax: f64,
    pub legal_protection_ht: f64,
    pub legal_protection_tax: f64,
    pub retroactive_ht: f64,
    pub retroactive_tax: f64,
}

impl ScheduleTotals {
    /// Sum of every component
    pub fn total(&self) -> f64 {
        self.base_premium
            + self.management_fee
            + self.splitting_fee
            + self.insurance_tax
            + self.legal_protection_ht
            + self.legal_protection_tax
            + self.retroactive_ht
            + self.retroactive_tax
    }
}

/// One dated instalment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instalment {
    /// Sequence number, starting at 1
    pub index: u32,
    pub due_date: NaiveDate,
    pub period_start: NaiveDate,
    /// Last covered day (inclusive)
    pub period_end: NaiveDate,

    // Component breakdown
    pub base_premium: f64,
    pub management_fee: f64,
    pub splitting_fee: f64,
    /// Legal protection including its tax
    pub legal_protection: f64,
    /// Retroactive cover including its tax
    pub retroactive: f64,

    // Totals
    pub amount_ht: f64,
    pub tax: f64,
    pub amount_ttc: f64,
}

/// Period boundaries (start, inclusive end) for a frequency
pub fn periods(effective_date: NaiveDate, frequency: InstalmentFrequency) -> Vec<(NaiveDate, NaiveDate)> {
    let count = frequency.instalment_count();
    let step = frequency.period_months();
    let boundary = |k: u32| {
        effective_date
            .checked_add_months(Months::new(k * step))
            .unwrap_or(NaiveDate::MAX)
    };

    (0..count)
        .map(|k| {
            let start = boundary(k);
            let end = boundary(k + 1).pred_opt().unwrap_or(start);
            (start, end)
        })
        .collect()
}

/// Amount in cents, clamped to the i64 range and widened so sums cannot overflow
fn to_cents(amount: f64) -> i128 {
    i128::from((amount * 100.0).round() as i64)
}

/// Split an amount over weights, in cents; the first slot takes the residual
fn allocate(total: f64, weights: &[f64]) -> Vec<i128> {
    let total_cents = to_cents(total);
    let mut cents: Vec<i128> = weights.iter().map(|w| to_cents(total * w)).collect();
    if let Some(first) = cents.first_mut() {
        *first = 0;
    }
    let rest: i128 = cents.iter().sum();
    if let Some(first) = cents.first_mut() {
        *first = total_cents - rest;
    }
    cents
}

/// Generate the instalment schedule
pub fn generate(
    totals: &ScheduleTotals,
    effective_date: NaiveDate,
    frequency: InstalmentFrequency,
) -> Vec<Instalment> {
    let bounds = periods(effective_date, frequency);
    let year_days: i64 = bounds
        .iter()
        .map(|(start, end)| (*end - *start).num_days() + 1)
        .sum();
    let weights: Vec<f64> = bounds
        .iter()
        .map(|(start, end)| ((*end - *start).num_days() + 1) as f64 / year_days.max(1) as f64)
        .collect();

    let base = allocate(totals.base_premium, &weights);
    let management = allocate(totals.management_fee, &weights);
    let splitting = allocate(totals.splitting_fee, &weights);
    let tax = allocate(totals.insurance_tax, &weights);
    let lp_ht = allocate(totals.legal_protection_ht, &weights);
    let lp_tax = allocate(totals.legal_protection_tax, &weights);
    let retro_ht = allocate(totals.retroactive_ht, &weights);
    let retro_tax = allocate(totals.retroactive_tax, &weights);

    bounds
        .iter()
        .enumerate()
        .map(|(i, &(period_start, period_end))| {
            let ht = base[i] + management[i] + splitting[i] + lp_ht[i] + retro_ht[i];
            let taxes = tax[i] + lp_tax[i] + retro_tax[i];

            Instalment {
                index: i as u32 + 1,
                due_date: period_start,
                period_start,
                period_end,
                base_premium: base[i] as f64 / 100.0,
                management_fee: management[i] as f64 / 100.0,
                splitting_fee: splitting[i] as f64 / 100.0,
                legal_protection: (lp_ht[i] + lp_tax[i]) as f64 / 100.0,
                retroactive: (retro_ht[i] + retro_tax[i]) as f64 / 100.0,
                amount_ht: ht as f64 / 100.0,
                tax: taxes as f64 / 100.0,
                amount_ttc: (ht + taxes) as f64 / 100.0,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn totals() -> ScheduleTotals {
        ScheduleTotals {
            base_premium: 4_321.17,
            management_fee: 432.12,
            splitting_fee: 60.0,
            insurance_tax: 394.31,
            legal_protection_ht: 100.0,
            legal_protection_tax: 13.4,
            retroactive_ht: 0.0,
            retroactive_tax: 0.0,
        }
    }

    #[test]
    fn test_quarterly_periods_contiguous() {
        let bounds = periods(date(2026, 1, 1), InstalmentFrequency::Quarterly);
        assert_eq!(
            bounds,
            vec![
                (date(2026, 1, 1), date(2026, 3, 31)),
                (date(2026, 4, 1), date(2026, 6, 30)),
                (date(2026, 7, 1), date(2026, 9, 30)),
                (date(2026, 10, 1), date(2026, 12, 31)),
            ]
        );
    }

    #[test]
    fn test_month_end_effective_date() {
        let bounds = periods(date(2026, 1, 31), InstalmentFrequency::Monthly);
        assert_eq!(bounds.len(), 12);
        assert_eq!(bounds[0], (date(2026, 1, 31), date(2026, 2, 27)));
        assert_eq!(bounds[1].0, date(2026, 2, 28));
        for pair in bounds.windows(2) {
            assert_eq!(pair[0].1.succ_opt().unwrap(), pair[1].0);
        }
        assert_eq!(bounds[11].1, date(2027, 1, 30));
    }

    #[test]
    fn test_amounts_sum_to_total() {
        for frequency in [
            InstalmentFrequency::Annual,
            InstalmentFrequency::SemiAnnual,
            InstalmentFrequency::Quarterly,
            InstalmentFrequency::Monthly,
        ] {
            let t = totals();
            let schedule = generate(&t, date(2026, 3, 15), frequency);
            assert_eq!(schedule.len() as u32, frequency.instalment_count());

            let sum: f64 = schedule.iter().map(|i| i.amount_ttc).sum();
            assert!((sum - t.total()).abs() < 0.01, "{:?}: {} vs {}", frequency, sum, t.total());

            let base: f64 = schedule.iter().map(|i| i.base_premium).sum();
            assert!((base - t.base_premium).abs() < 0.005);
        }
    }

    #[test]
    fn test_annual_single_instalment() {
        let t = totals();
        let schedule = generate(&t, date(2026, 5, 1), InstalmentFrequency::Annual);
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule[0].index, 1);
        assert_eq!(schedule[0].period_start, date(2026, 5, 1));
        assert_eq!(schedule[0].period_end, date(2027, 4, 30));
        assert_eq!(schedule[0].due_date, date(2026, 5, 1));
    }

    #[test]
    fn test_pro_rata_by_days() {
        let t = ScheduleTotals { base_premium: 365.0, ..Default::default() };
        let schedule = generate(&t, date(2026, 1, 1), InstalmentFrequency::SemiAnnual);

        // Jan-Jun has 181 days, Jul-Dec 184
        assert_eq!(schedule[0].base_premium, 181.0);
        assert_eq!(schedule[1].base_premium, 184.0);
    }

    #[test]
    fn test_huge_totals_do_not_overflow() {
        let t = ScheduleTotals {
            base_premium: f64::MAX,
            management_fee: f64::MAX,
            insurance_tax: 1e300,
            ..Default::default()
        };
        let schedule = generate(&t, date(2026, 1, 1), InstalmentFrequency::Monthly);
        assert_eq!(schedule.len(), 12);
        assert!(schedule.iter().all(|i| i.amount_ttc.is_finite()));
    }
}
