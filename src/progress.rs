//! Satisfaction meter and daily challenge
//!
//! Satisfaction is session-only: a 0-100 value that only goes up. The daily
//! challenge lives in the preference store and is shared with the host's other
//! screens, so every update is a fresh read-modify-write with no caching.

use crate::consts::{DEFAULT_DAILY_GOAL, SATISFACTION_MAX};
use crate::persistence::{PrefKey, PrefStore, PrefValue, read_bool, read_int, read_string, write_or_warn};

/// Listener invoked with the new satisfaction value
pub type SatisfactionListener = Box<dyn FnMut(u8)>;

/// Bounded satisfaction meter
#[derive(Default)]
pub struct SatisfactionMeter {
    value: u8,
    listener: Option<SatisfactionListener>,
}

impl std::fmt::Debug for SatisfactionMeter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SatisfactionMeter")
            .field("value", &self.value)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

impl SatisfactionMeter {
    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn set_listener(&mut self, listener: impl FnMut(u8) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Add `amount`, clamped at the maximum. Notifies only if the value moved.
    pub fn add(&mut self, amount: u8) -> u8 {
        let next = self.value.saturating_add(amount).min(SATISFACTION_MAX);
        if next != self.value {
            self.value = next;
            if let Some(listener) = self.listener.as_mut() {
                listener(next);
            }
        }
        self.value
    }
}

/// One-shot rewards for hitting the daily goal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unlock {
    SuperSplash,
}

impl Unlock {
    pub fn key(&self) -> PrefKey {
        match self {
            Unlock::SuperSplash => PrefKey::UnlockSuperSplash,
        }
    }

    /// Notification text for the host
    pub fn message(&self) -> &'static str {
        match self {
            Unlock::SuperSplash => "Super Splash Unlocked!",
        }
    }
}

/// Daily challenge counters, backed by the preference store
pub struct DailyChallenge;

impl DailyChallenge {
    /// Start a new day if `today` differs from the last played date
    ///
    /// Returns true if the counters were reset.
    pub fn begin_day(store: &mut impl PrefStore, today: &str) -> bool {
        let last = read_string(store, PrefKey::LastPlayDate, "");
        if last == today {
            return false;
        }
        write_or_warn(store, PrefKey::LastPlayDate, PrefValue::Str(today.to_string()));
        write_or_warn(store, PrefKey::DailyProgress, PrefValue::Int(0));
        write_or_warn(store, PrefKey::DailyGoal, PrefValue::Int(DEFAULT_DAILY_GOAL));
        log::info!("New day {today}, daily challenge reset (last played {last:?})");
        true
    }

    pub fn progress(store: &impl PrefStore) -> i64 {
        read_int(store, PrefKey::DailyProgress, 0)
    }

    pub fn goal(store: &impl PrefStore) -> i64 {
        read_int(store, PrefKey::DailyGoal, DEFAULT_DAILY_GOAL)
    }

    /// Count one qualifying action. Returns the unlock the first time the goal is reached.
    pub fn record_action(store: &mut impl PrefStore) -> Option<Unlock> {
        let current = Self::progress(store) + 1;
        write_or_warn(store, PrefKey::DailyProgress, PrefValue::Int(current));

        let goal = Self::goal(store);
        let unlock = Unlock::SuperSplash;
        if current >= goal && !read_bool(store, unlock.key(), false) {
            write_or_warn(store, unlock.key(), PrefValue::Bool(true));
            log::info!("Daily goal {goal} reached: {}", unlock.message());
            return Some(unlock);
        }
        None
    }
}
