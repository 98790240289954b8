//! Live position tracking
//!
//! Holds the last known fix from a location stream. The stream is only
//! subscribed while tracking is enabled and the view is mounted; switching
//! tracking off drops the subscription, which releases the underlying watch.

use tracing::{debug, info, warn};

use crate::error::{combined_advisory, SensorError};
use crate::lifecycle::ViewLifecycle;
use crate::stream::{StreamEvent, StreamProvider, Subscription};

/// A complete location fix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionSample {
    pub lat: f64,
    pub lng: f64,
    pub accuracy_m: f64,
    pub altitude_m: Option<f64>,
    pub speed_mps: Option<f64>,
    /// Milliseconds since the Unix epoch
    pub timestamp_ms: Option<u64>,
}

impl PositionSample {
    pub fn new(lat: f64, lng: f64, accuracy_m: f64) -> Self {
        Self {
            lat,
            lng,
            accuracy_m,
            altitude_m: None,
            speed_mps: None,
            timestamp_ms: None,
        }
    }

    pub fn speed_kmh(&self) -> Option<f64> {
        self.speed_mps.map(|mps| mps * 3.6)
    }

    pub fn map_target(&self) -> MapTarget {
        MapTarget {
            lat: self.lat,
            lng: self.lng,
            accuracy_radius_m: self.accuracy_m,
        }
    }
}

/// What the map renderer needs to re-center and draw the accuracy circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapTarget {
    pub lat: f64,
    pub lng: f64,
    pub accuracy_radius_m: f64,
}

/// Format a Unix timestamp in milliseconds as a UTC wall clock `HH:MM:SS`
pub fn format_clock(timestamp_ms: u64) -> String {
    let secs_of_day = (timestamp_ms / 1000) % 86_400;
    format!(
        "{:02}:{:02}:{:02}",
        secs_of_day / 3600,
        (secs_of_day % 3600) / 60,
        secs_of_day % 60
    )
}

/// State of the Map tab
pub struct PositionTracker {
    provider: Box<dyn StreamProvider<PositionSample>>,
    subscription: Option<Subscription<PositionSample>>,
    tracking: bool,
    mounted: bool,
    position: Option<PositionSample>,
    advisory: Option<SensorError>,
}

impl PositionTracker {
    pub fn new(provider: Box<dyn StreamProvider<PositionSample>>) -> Self {
        Self {
            provider,
            subscription: None,
            tracking: true,
            mounted: false,
            position: None,
            advisory: None,
        }
    }

    pub fn position(&self) -> Option<&PositionSample> {
        self.position.as_ref()
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Whether a location watch is currently held
    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn error(&self) -> Option<&SensorError> {
        self.advisory.as_ref()
    }

    /// Message for the advisory banner, if any
    pub fn advisory(&self) -> Option<String> {
        combined_advisory(self.advisory.iter())
    }

    /// True while tracking with nothing to show yet
    pub fn is_waiting(&self) -> bool {
        self.position.is_none() && self.advisory.is_none()
    }

    pub fn toggle_tracking(&mut self) {
        let enabled = !self.tracking;
        self.set_tracking(enabled);
    }

    pub fn set_tracking(&mut self, enabled: bool) {
        if enabled == self.tracking {
            return;
        }
        self.tracking = enabled;

        if enabled {
            info!("📍 Location tracking resumed");
            self.advisory = None;
            self.ensure_subscribed();
        } else {
            info!("📍 Location tracking paused");
            self.subscription = None;
            self.advisory = Some(SensorError::UserPausedTracking);
        }
    }

    /// Drain pending location events. Returns how many fixes were applied.
    pub fn poll(&mut self) -> usize {
        let Some(subscription) = self.subscription.as_ref() else {
            return 0;
        };

        let mut applied = 0;
        let mut release = false;
        for event in subscription.drain() {
            match event {
                StreamEvent::Update(sample) => {
                    self.position = Some(sample);
                    self.advisory = None;
                    applied += 1;
                }
                StreamEvent::Error(error) => {
                    warn!("Location stream error: {}", error);
                    release = error.is_permission_denied();
                    self.advisory = Some(error);
                    if release {
                        break;
                    }
                }
            }
        }

        if release {
            // Recovery requires the user to toggle tracking.
            self.subscription = None;
        }
        if applied > 0 {
            debug!("Applied {} location updates", applied);
        }
        applied
    }

    fn ensure_subscribed(&mut self) {
        if !self.mounted || !self.tracking || self.subscription.is_some() {
            return;
        }
        match self.provider.subscribe() {
            Ok(subscription) => {
                debug!("Location watch started");
                self.subscription = Some(subscription);
            }
            Err(error) => {
                warn!("Location watch could not start: {}", error);
                self.advisory = Some(error);
            }
        }
    }
}

impl ViewLifecycle for PositionTracker {
    fn mount(&mut self) {
        self.mounted = true;
        self.tracking = true;
        self.position = None;
        self.advisory = None;
        self.ensure_subscribed();
    }

    fn unmount(&mut self) {
        self.mounted = false;
        self.subscription = None;
    }
}
