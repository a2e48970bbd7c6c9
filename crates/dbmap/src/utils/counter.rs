//! Process-wide diagnostic counters.
//!
//! Counters are created lazily on first use by the [counter!] macro, are cheap to bump from any
//! thread and are dumped to the log by [report_counters]. They compile to nothing without the
//! `counter` feature.

use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex,
    },
};

pub enum Counter {
    CounterU64(CounterU64),
    CounterTime(CounterTime),
}

impl Counter {
    pub fn format(&self) -> String {
        match self {
            Counter::CounterU64(a) => a.format(),
            Counter::CounterTime(a) => a.format(),
        }
    }
}

#[derive(Default)]
pub struct CounterU64 {
    atomic: AtomicU64,
}
impl CounterU64 {
    pub const fn new() -> Self {
        Self {
            atomic: AtomicU64::new(0),
        }
    }
    pub fn inc(&self) {
        self.add(1)
    }
    pub fn add(&self, n: u64) {
        self.atomic.fetch_add(n, Ordering::Relaxed); // Adding is associative and commutative
    }
    pub fn value(&self) -> u64 {
        self.atomic.load(Ordering::Acquire)
    }
    fn format(&self) -> String {
        format!("{}", self.value())
    }
}

#[derive(Default)]
pub struct CounterTime {
    // Note: can only store up to 213503 days of duration or 564 years
    nanos: AtomicU64,
}

impl CounterTime {
    pub const fn new() -> Self {
        Self {
            nanos: AtomicU64::new(0),
        }
    }
    pub fn add(&self, dur: std::time::Duration) {
        self.nanos
            .fetch_add(dur.as_nanos() as u64, Ordering::Relaxed);
    }
    pub fn value(&self) -> std::time::Duration {
        std::time::Duration::from_nanos(self.nanos.load(Ordering::Acquire))
    }
    pub fn format(&self) -> String {
        super::timer::format_elapsed(self.value())
    }
}

/// Logs every counter, in name order, under the `counter_report` target
pub fn report_counters() {
    let Ok(counters) = __COUNTERS.lock() else {
        log::warn!("counter registry is poisoned, no report");
        return;
    };
    for (counter_name, counter) in counters.iter() {
        log::log!(target: "counter_report", log::Level::Info, "{}: {} ", counter_name, counter.format())
    }
}

/// Current value of a [CounterU64], if it was ever bumped
pub fn counter_value(descr: &str) -> Option<u64> {
    let counters = __COUNTERS.lock().ok()?;
    match &**counters.get(descr)? {
        Counter::CounterU64(c) => Some(c.value()),
        Counter::CounterTime(_) => None,
    }
}

lazy_static::lazy_static! {
    pub static ref __COUNTERS: Mutex<BTreeMap<&'static str, Arc<Counter>>> = Mutex::new(BTreeMap::new());
}

pub fn insert_counter(descr: &'static str, counter: Counter) -> Arc<Counter> {
    let arc = Arc::new(counter);
    match __COUNTERS.lock() {
        Ok(mut counters) => counters.entry(descr).or_insert(arc).clone(),
        // Still count, just without reporting
        Err(_) => arc,
    }
}

#[macro_export]
macro_rules! counter {
    ($descr:literal) => {
        $crate::counter!($descr, 1)
    };
    ($descr:literal, $n:expr) => {
        if cfg!(feature = "counter") {
            use $crate::utils::counter::{insert_counter, lazy_static, Counter, CounterU64};
            lazy_static::lazy_static! {
                static ref COUNTER_REF: std::sync::Arc<Counter> = {
                    insert_counter($descr, Counter::CounterU64(CounterU64::new()))
                };
            }

            if let Counter::CounterU64(c) = &**COUNTER_REF {
                c.add($n as u64);
            }
        };
    };
}

pub use counter;
// Reexport for ease of use
pub use lazy_static;
