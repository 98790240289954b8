//! Simulated GNSS satellite registry
//!
//! Desktop platforms expose no raw GNSS measurements, so the status table is
//! driven by an in-process constellation. Records are generated once per
//! mount and then drift on a fixed tick. All randomness goes through the
//! registry's [`Rng`], which makes seeded runs reproducible.

use std::fmt;
use std::time::Duration;

use bevy::time::{Timer, TimerMode};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::SatelliteConfig;
use crate::lifecycle::ViewLifecycle;

/// Lowest C/N0 a record can drift to
pub const SIGNAL_FLOOR: f64 = 10.0;
/// Highest C/N0 a record can drift to
pub const SIGNAL_CEILING: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Constellation {
    Gps,
    Glonass,
    Galileo,
    BeiDou,
}

impl Constellation {
    pub const ALL: [Constellation; 4] = [
        Constellation::Gps,
        Constellation::Glonass,
        Constellation::Galileo,
        Constellation::BeiDou,
    ];
}

impl fmt::Display for Constellation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Constellation::Gps => "GPS",
            Constellation::Glonass => "GLONASS",
            Constellation::Galileo => "Galileo",
            Constellation::BeiDou => "BeiDou",
        };
        f.write_str(name)
    }
}

/// One row of the satellite status table
#[derive(Debug, Clone, PartialEq)]
pub struct SatelliteRecord {
    /// SVID, `1..=count`, fixed for the record's lifetime
    pub id: u32,
    pub constellation: Constellation,
    /// C/N0 in dB-Hz, always within `[SIGNAL_FLOOR, SIGNAL_CEILING]`
    pub signal_level: f64,
    pub elevation_deg: u16,
    pub azimuth_deg: u16,
    pub in_use: bool,
}

impl SatelliteRecord {
    pub fn tier(&self) -> SignalTier {
        SignalTier::from_level(self.signal_level)
    }
}

/// Colour band of the signal-strength bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalTier {
    Strong,
    Medium,
    Weak,
    Poor,
}

impl SignalTier {
    pub fn from_level(level: f64) -> Self {
        if level >= 40.0 {
            SignalTier::Strong
        } else if level >= 30.0 {
            SignalTier::Medium
        } else if level >= 20.0 {
            SignalTier::Weak
        } else {
            SignalTier::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SignalTier::Strong => "strong",
            SignalTier::Medium => "medium",
            SignalTier::Weak => "weak",
            SignalTier::Poor => "poor",
        }
    }
}

/// Width of the signal bar in percent, mapping 10..50 dB-Hz onto 0..100
pub fn signal_bar_percent(level: f64) -> f64 {
    ((level - SIGNAL_FLOOR) * 2.5).clamp(0.0, 100.0)
}

/// Fixed-size simulated constellation with a periodic drift tick
pub struct SatelliteRegistry<R: Rng = StdRng> {
    /// Records in insertion (id) order
    records: Vec<SatelliteRecord>,
    /// Indices into `records`, strongest first
    ranking: Vec<usize>,
    config: SatelliteConfig,
    rng: R,
    expanded: Option<u32>,
    ticker: Option<Timer>,
    ticks: u64,
}

impl SatelliteRegistry<StdRng> {
    /// Registry seeded from the config, or from entropy when no seed is set
    pub fn from_config(config: SatelliteConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::generate(config, rng)
    }
}

impl<R: Rng> SatelliteRegistry<R> {
    /// Populate `config.count` random records
    pub fn generate(config: SatelliteConfig, mut rng: R) -> Self {
        let records = generate_records(&config, &mut rng);
        info!("🛰️ Generated {} simulated satellites", records.len());
        Self::assemble(records, config, rng)
    }

    /// Build a registry around existing records, kept in the given order
    pub fn from_records(records: Vec<SatelliteRecord>, config: SatelliteConfig, rng: R) -> Self {
        Self::assemble(records, config, rng)
    }

    fn assemble(records: Vec<SatelliteRecord>, config: SatelliteConfig, rng: R) -> Self {
        let mut registry = Self {
            ranking: (0..records.len()).collect(),
            records,
            config,
            rng,
            expanded: None,
            ticker: None,
            ticks: 0,
        };
        registry.rerank();
        registry
    }

    /// Drift every record once and re-rank
    pub fn tick(&mut self) {
        // NaN falls through to zero drift below
        let drift = self.config.drift.clamp(0.0, SIGNAL_CEILING - SIGNAL_FLOOR);
        let threshold = self.config.in_use_threshold;
        let in_use_probability = self.config.tick_in_use_probability;

        for record in &mut self.records {
            let delta = if drift > 0.0 {
                self.rng.gen_range(-drift..=drift)
            } else {
                0.0
            };
            record.signal_level = (record.signal_level + delta).clamp(SIGNAL_FLOOR, SIGNAL_CEILING);
            record.in_use =
                record.signal_level > threshold && self.rng.gen_bool(in_use_probability);
        }

        self.ticks += 1;
        self.rerank();
        debug!(
            "Satellite tick {}: {} of {} in use",
            self.ticks,
            self.in_use_count(),
            self.records.len()
        );
    }

    /// Run every tick that came due within `elapsed`. No-op while unmounted.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let due = match self.ticker.as_mut() {
            Some(ticker) => {
                ticker.tick(elapsed);
                ticker.times_finished_this_tick()
            }
            None => 0,
        };
        for _ in 0..due {
            self.tick();
        }
        due
    }

    /// Stable descending sort by signal level over insertion order
    fn rerank(&mut self) {
        let records = &self.records;
        self.ranking = (0..records.len()).collect();
        self.ranking.sort_by(|&a, &b| {
            records[b]
                .signal_level
                .total_cmp(&records[a].signal_level)
        });
    }

    /// Records strongest first; equal levels keep insertion order
    pub fn ranked(&self) -> impl Iterator<Item = &SatelliteRecord> + '_ {
        self.ranking.iter().map(move |&i| &self.records[i])
    }

    /// Records in insertion (id) order
    pub fn records(&self) -> &[SatelliteRecord] {
        &self.records
    }

    pub fn get(&self, id: u32) -> Option<&SatelliteRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn in_use_count(&self) -> usize {
        self.records.iter().filter(|r| r.in_use).count()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn config(&self) -> &SatelliteConfig {
        &self.config
    }

    /// Id of the row whose detail panel is open
    pub fn expanded(&self) -> Option<u32> {
        self.expanded
    }

    /// Open the detail row for `id`, or close it if it is already open
    pub fn toggle_expanded(&mut self, id: u32) {
        if self.expanded == Some(id) {
            self.expanded = None;
        } else if self.get(id).is_some() {
            self.expanded = Some(id);
        }
    }

    /// Whether the drift timer is armed
    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    fn arm_ticker(&mut self) {
        let interval = Duration::from_millis(self.config.tick_interval_ms);
        self.ticker = Some(Timer::new(interval, TimerMode::Repeating));
    }
}

impl<R: Rng + Send + Sync> ViewLifecycle for SatelliteRegistry<R> {
    fn mount(&mut self) {
        self.records = generate_records(&self.config, &mut self.rng);
        self.expanded = None;
        self.ticks = 0;
        self.rerank();
        self.arm_ticker();
        info!(
            "🛰️ Satellite view mounted, ticking every {} ms",
            self.config.tick_interval_ms
        );
    }

    fn unmount(&mut self) {
        self.ticker = None;
        info!("Satellite view unmounted, tick timer released");
    }
}

fn generate_records<R: Rng>(config: &SatelliteConfig, rng: &mut R) -> Vec<SatelliteRecord> {
    let low = config.initial_signal_min.clamp(SIGNAL_FLOOR, SIGNAL_CEILING);
    let high = config.initial_signal_max.clamp(SIGNAL_FLOOR, SIGNAL_CEILING);
    (1..=config.count)
        .map(|id| {
            let constellation = Constellation::ALL[rng.gen_range(0..Constellation::ALL.len())];
            SatelliteRecord {
                id,
                constellation,
                signal_level: if low < high {
                    rng.gen_range(low..high)
                } else {
                    SIGNAL_FLOOR
                },
                elevation_deg: rng.gen_range(0..90),
                azimuth_deg: rng.gen_range(0..360),
                in_use: rng.gen_bool(config.initial_in_use_probability),
            }
        })
        .collect()
}
