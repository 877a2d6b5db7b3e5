//! The ledger engine: daily target debits, catch-up, work and relax.
//!
//! Every public operation opens one store transaction, reconciles missed days
//! first, then does its own work. Callers never have to remember to reconcile,
//! and the catch-up write and the follow-up mutation commit as one unit.

use crate::core::clock::Clock;
use crate::core::input::{INVALID_MINUTES, TARGET_NOT_POSITIVE};
use crate::db::store::{Settings, SettingsStore, keys};
use crate::errors::{AppError, AppResult};
use crate::utils::date::days_between;
use chrono::NaiveDate;
use serde::Serialize;

/// Minutes of focused work owed per calendar day when nothing else is configured.
pub const DEFAULT_TARGET: i64 = 120;

/// Snapshot returned by [`Ledger::state`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerState {
    pub balance: i64,
    pub target: i64,
    /// Minutes of work currently owed: `max(0, -balance)`.
    pub need: i64,
    pub today: NaiveDate,
    pub last_applied: NaiveDate,
}

pub fn need_for(balance: i64) -> i64 {
    balance.checked_neg().unwrap_or(i64::MAX).max(0)
}

pub struct Ledger {
    store: SettingsStore,
    clock: Box<dyn Clock>,
    default_target: i64,
}

impl Ledger {
    pub fn new(store: SettingsStore, clock: impl Clock + 'static) -> Self {
        Self {
            store,
            clock: Box::new(clock),
            default_target: DEFAULT_TARGET,
        }
    }

    /// Target seeded on first run. Non-positive values are ignored.
    pub fn with_default_target(mut self, target: i64) -> Self {
        if target > 0 {
            self.default_target = target;
        }
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    /// Seed balance, target and last-applied date if this is a fresh store.
    /// Returns `true` when seeding happened.
    pub fn ensure_initialized(&self) -> AppResult<bool> {
        let today = self.today();
        self.store.atomically(|s| self.seed(s, today))
    }

    /// Charge the daily target for every calendar day since the last charge.
    /// Returns the number of days charged.
    pub fn reconcile(&self) -> AppResult<i64> {
        let today = self.today();
        self.store.atomically(|s| self.catch_up(s, today))
    }

    /// Current balance, target and owed minutes, after reconciling.
    pub fn state(&self) -> AppResult<LedgerState> {
        let today = self.today();
        self.store.atomically(|s| {
            self.catch_up(s, today)?;

            let balance = s.get_i64(keys::BALANCE)?.unwrap_or(0);
            Ok(LedgerState {
                balance,
                target: self.read_target(s)?,
                need: need_for(balance),
                today,
                last_applied: s.get_date(keys::LAST_APPLIED)?.unwrap_or(today),
            })
        })
    }

    /// Credit focused work. Reconciles first. Returns the new balance.
    pub fn add_work(&self, minutes: i64) -> AppResult<i64> {
        let balance = self.adjust_balance(Some(minutes))?;
        tracing::debug!(minutes, balance, "work credited");
        Ok(balance)
    }

    /// Spend relaxation minutes. Reconciles first. Returns the new balance.
    pub fn spend_relax(&self, minutes: i64) -> AppResult<i64> {
        let balance = self.adjust_balance(minutes.checked_neg())?;
        tracing::debug!(minutes, balance, "relax spent");
        Ok(balance)
    }

    /// Current daily target. Reconciles first.
    pub fn target(&self) -> AppResult<i64> {
        let today = self.today();
        self.store.atomically(|s| {
            self.catch_up(s, today)?;
            self.read_target(s)
        })
    }

    /// Replace the daily target. Only future days are charged at the new rate.
    /// A rejected target still reconciles.
    pub fn set_target(&self, target: i64) -> AppResult<i64> {
        if target <= 0 {
            self.reconcile()?;
            return Err(AppError::invalid_input(TARGET_NOT_POSITIVE));
        }

        let today = self.today();
        self.store.atomically(|s| {
            self.catch_up(s, today)?;
            s.set(keys::TARGET, target)?;
            Ok(())
        })?;

        tracing::info!(target, "daily target updated");
        Ok(target)
    }

    fn adjust_balance(&self, delta: Option<i64>) -> AppResult<i64> {
        let today = self.today();
        self.store.atomically(|s| {
            self.catch_up(s, today)?;

            let balance = s.get_i64(keys::BALANCE)?.unwrap_or(0);
            let new_balance = delta
                .and_then(|d| balance.checked_add(d))
                .ok_or_else(|| AppError::invalid_input(INVALID_MINUTES))?;
            s.set(keys::BALANCE, new_balance)?;
            Ok(new_balance)
        })
    }

    fn read_target(&self, s: &Settings<'_>) -> AppResult<i64> {
        Ok(s.get_i64(keys::TARGET)?.unwrap_or(self.default_target))
    }

    fn seed(&self, s: &Settings<'_>, today: NaiveDate) -> AppResult<bool> {
        if s.get(keys::INITIALIZED)?.is_some() {
            return Ok(false);
        }

        s.set(keys::BALANCE, 0)?;
        s.set(keys::TARGET, self.default_target)?;
        // No charge for the day the ledger is created.
        s.set_date(keys::LAST_APPLIED, &today)?;
        s.set(keys::INITIALIZED, 1)?;

        tracing::info!(%today, target = self.default_target, "ledger initialized");
        Ok(true)
    }

    fn catch_up(&self, s: &Settings<'_>, today: NaiveDate) -> AppResult<i64> {
        self.seed(s, today)?;

        let Some(last) = s.get_date(keys::LAST_APPLIED)? else {
            tracing::warn!(%today, "last_applied missing, resetting without charge");
            s.set_date(keys::LAST_APPLIED, &today)?;
            return Ok(0);
        };

        let days = days_between(last, today);
        if days <= 0 {
            return Ok(0);
        }

        let target = self.read_target(s)?;
        let balance = s.get_i64(keys::BALANCE)?.unwrap_or(0);
        let new_balance = balance.saturating_sub(target.saturating_mul(days));

        s.set(keys::BALANCE, new_balance)?;
        s.set_date(keys::LAST_APPLIED, &today)?;

        tracing::info!(
            days,
            target,
            from = balance,
            to = new_balance,
            %last,
            %today,
            "daily target charged"
        );
        Ok(days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use std::sync::Arc;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn ledger_at(date: &str) -> (Ledger, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(day(date)));
        let store = SettingsStore::open_in_memory().unwrap();
        (Ledger::new(store, clock.clone()), clock)
    }

    fn raw(ledger: &Ledger, key: &str) -> Option<String> {
        ledger.store().atomically(|s| s.get(key)).unwrap()
    }

    #[test]
    fn first_run_seeds_without_charging_day_zero() {
        let (ledger, _) = ledger_at("2026-10-16");

        assert_eq!(ledger.reconcile().unwrap(), 0);
        let st = ledger.state().unwrap();
        assert_eq!(st.balance, 0);
        assert_eq!(st.target, DEFAULT_TARGET);
        assert_eq!(st.need, 0);
        assert_eq!(st.last_applied, day("2026-10-16"));
        assert_eq!(raw(&ledger, keys::INITIALIZED).as_deref(), Some("1"));
    }

    #[test]
    fn ensure_initialized_only_seeds_once() {
        let (ledger, _) = ledger_at("2026-10-16");
        assert!(ledger.ensure_initialized().unwrap());
        ledger.add_work(30).unwrap();
        assert!(!ledger.ensure_initialized().unwrap());
        assert_eq!(ledger.state().unwrap().balance, 30);
    }

    #[test]
    fn reconcile_twice_on_same_day_is_a_noop() {
        let (ledger, clock) = ledger_at("2026-10-10");
        ledger.add_work(50).unwrap();
        clock.advance(2);

        assert_eq!(ledger.reconcile().unwrap(), 2);
        let first = ledger.state().unwrap();
        assert_eq!(ledger.reconcile().unwrap(), 0);
        let second = ledger.state().unwrap();
        assert_eq!(first, second);
        assert_eq!(second.balance, 50 - 2 * DEFAULT_TARGET);
    }

    #[test]
    fn catch_up_charges_target_times_elapsed_days() {
        for k in [1u64, 2, 7, 31, 400] {
            let (ledger, clock) = ledger_at("2024-02-27");
            ledger.set_target(45).unwrap();
            ledger.add_work(1000).unwrap();

            clock.advance(k);
            assert_eq!(ledger.reconcile().unwrap(), k as i64);

            let st = ledger.state().unwrap();
            assert_eq!(st.balance, 1000 - 45 * k as i64);
            assert_eq!(st.last_applied, clock.today());
            assert_eq!(st.today, clock.today());
        }
    }

    #[test]
    fn clock_moving_backwards_never_charges() {
        let (ledger, clock) = ledger_at("2026-10-16");
        ledger.add_work(10).unwrap();

        clock.rewind(3);
        assert_eq!(ledger.reconcile().unwrap(), 0);
        let st = ledger.state().unwrap();
        assert_eq!(st.balance, 10);
        assert_eq!(st.last_applied, day("2026-10-16"));

        // Back to the original day: still nothing owed.
        clock.advance(3);
        assert_eq!(ledger.reconcile().unwrap(), 0);
        assert_eq!(ledger.state().unwrap().balance, 10);
    }

    #[test]
    fn missing_last_applied_self_heals_without_charge() {
        let (ledger, clock) = ledger_at("2026-10-01");
        ledger.ensure_initialized().unwrap();
        ledger
            .store()
            .atomically(|s| s.set(keys::LAST_APPLIED, ""))
            .unwrap();

        clock.advance(5);
        assert_eq!(ledger.reconcile().unwrap(), 0);
        let st = ledger.state().unwrap();
        assert_eq!(st.balance, 0);
        assert_eq!(st.last_applied, day("2026-10-06"));
    }

    #[test]
    fn corrupt_balance_is_an_error_not_a_reset() {
        let (ledger, clock) = ledger_at("2026-10-01");
        ledger.ensure_initialized().unwrap();
        ledger
            .store()
            .atomically(|s| s.set(keys::BALANCE, "lots"))
            .unwrap();

        clock.advance(1);
        assert!(matches!(
            ledger.reconcile(),
            Err(AppError::CorruptValue { .. })
        ));
        // The failed catch-up left last_applied where it was.
        assert_eq!(raw(&ledger, keys::LAST_APPLIED).as_deref(), Some("2026-10-01"));
    }

    #[test]
    fn work_then_relax_round_trips() {
        let (ledger, _) = ledger_at("2026-10-16");
        ledger.add_work(17).unwrap();
        let before = ledger.state().unwrap().balance;

        assert_eq!(ledger.add_work(75).unwrap(), before + 75);
        assert_eq!(ledger.spend_relax(75).unwrap(), before);
    }

    #[test]
    fn negative_minutes_are_accepted_as_corrections() {
        let (ledger, _) = ledger_at("2026-10-16");
        assert_eq!(ledger.add_work(-20).unwrap(), -20);
        assert_eq!(ledger.spend_relax(-20).unwrap(), 0);
    }

    #[test]
    fn balance_overflow_is_invalid_input() {
        let (ledger, _) = ledger_at("2026-10-16");
        ledger.add_work(i64::MAX).unwrap();
        let err = ledger.add_work(1).unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(ledger.state().unwrap().balance, i64::MAX);

        let err = ledger.spend_relax(i64::MIN).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn need_is_the_owed_part_of_the_balance() {
        for b in [i64::MIN, -210, -1, 0, 1, 150, i64::MAX] {
            assert_eq!(need_for(b), if b < 0 { b.saturating_neg() } else { 0 });
        }

        let (ledger, _) = ledger_at("2026-10-16");
        for delta in [-5, 30, -100, 75] {
            ledger.add_work(delta).unwrap();
            let st = ledger.state().unwrap();
            assert_eq!(st.need, (-st.balance).max(0));
        }
    }

    #[test]
    fn set_target_validates_and_applies_forward_only() {
        let (ledger, clock) = ledger_at("2026-10-16");

        for bad in [0, -5] {
            let err = ledger.set_target(bad).unwrap_err();
            assert!(matches!(err, AppError::InvalidInput(ref m) if m == TARGET_NOT_POSITIVE));
        }
        assert_eq!(ledger.target().unwrap(), DEFAULT_TARGET);

        clock.advance(1);
        // Yesterday is charged at the old rate before the change lands.
        assert_eq!(ledger.set_target(90).unwrap(), 90);
        let st = ledger.state().unwrap();
        assert_eq!(st.target, 90);
        assert_eq!(st.balance, -DEFAULT_TARGET);

        clock.advance(1);
        assert_eq!(ledger.state().unwrap().balance, -DEFAULT_TARGET - 90);
    }

    #[test]
    fn configured_default_target_seeds_the_store() {
        let clock = ManualClock::new(day("2026-10-16"));
        let store = SettingsStore::open_in_memory().unwrap();
        let ledger = Ledger::new(store, clock).with_default_target(60);
        assert_eq!(ledger.target().unwrap(), 60);

        let store = SettingsStore::open_in_memory().unwrap();
        let ledger = Ledger::new(store, ManualClock::new(day("2026-10-16"))).with_default_target(0);
        assert_eq!(ledger.target().unwrap(), DEFAULT_TARGET);
    }

    #[test]
    fn three_day_gap_scenario() {
        let (ledger, clock) = ledger_at("2026-10-01");

        assert_eq!(ledger.add_work(150).unwrap(), 150);
        assert_eq!(ledger.target().unwrap(), 120);

        clock.advance(3);
        let st = ledger.state().unwrap();
        assert_eq!(st.balance, -210);
        assert_eq!(st.need, 210);
        assert_eq!(st.last_applied, day("2026-10-04"));
    }

    #[test]
    fn concurrent_reconciles_charge_each_day_once() {
        let (ledger, clock) = ledger_at("2026-10-01");
        ledger.ensure_initialized().unwrap();
        clock.advance(4);

        let ledger = Arc::new(ledger);
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let l = ledger.clone();
                std::thread::spawn(move || l.reconcile().unwrap())
            })
            .collect();
        let charged: i64 = handles.into_iter().map(|h| h.join().unwrap()).sum();

        assert_eq!(charged, 4);
        assert_eq!(ledger.state().unwrap().balance, -4 * DEFAULT_TARGET);
    }

    #[test]
    fn rejected_target_still_reconciles() {
        let (ledger, clock) = ledger_at("2026-10-01");
        ledger.ensure_initialized().unwrap();
        clock.advance(2);

        assert!(ledger.set_target(0).unwrap_err().is_invalid_input());
        assert_eq!(raw(&ledger, keys::LAST_APPLIED).as_deref(), Some("2026-10-03"));
        assert_eq!(raw(&ledger, keys::BALANCE).as_deref(), Some("-240"));
        assert_eq!(raw(&ledger, keys::TARGET).as_deref(), Some("120"));
    }
}
