//! Ghosthand - human-behaviour emulation for tick-driven game automation
//!
//! This library provides the randomized building blocks an automation
//! plugin composes so its inputs look like manual play: wait durations,
//! click points, camera motion and item disposal order.
//!
//! ## Components
//!
//! - `timing`: weighted-bucket delay sampling in game ticks
//! - `click`: centre-biased click points inside arbitrary shapes
//! - `camera`: smoothed, wrap-aware rotation plus idle fidgets
//! - `disposal`: serpentine drop order with deliberate misses
//!
//! Every component owns its own random source. [`Ghosthand`] builds them
//! from one [`Settings`] and one session seed.

pub mod camera;
pub mod click;
pub mod config;
pub mod disposal;
pub mod stealth;
pub mod timing;

use crate::camera::{CameraController, CameraMutator, PositionSource};
use crate::click::ClickSampler;
use crate::config::{ConfigError, Settings};
use crate::disposal::{DropCycle, DropSink, InventorySource, SlotItem};
use crate::stealth::Humanizer;
use crate::timing::{presets, DelayProfile, DelaySampler, TimingError};

/// Session-level entry point
pub struct Ghosthand {
    /// Validated settings
    settings: Settings,
    /// Seeds handed to each component
    seeds: Humanizer,
    /// Delay sampler
    delays: DelaySampler,
    /// Click point sampler
    clicks: ClickSampler,
}

impl Ghosthand {
    /// Create a session with the given settings
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        settings.validate()?;

        let mut seeds = match settings.seed {
            Some(seed) => Humanizer::from_seed(seed),
            None => Humanizer::new(),
        };

        let delays = DelaySampler::new(seeds.fork(), settings.tick_duration_ms)
            .with_debug(settings.debug_logging);
        let clicks = ClickSampler::new(seeds.fork(), settings.click.clone())
            .with_debug(settings.debug_logging);

        log::info!(
            "Ghosthand session ready ({}ms ticks, {} custom profiles)",
            settings.tick_duration_ms,
            settings.profiles.len()
        );

        Ok(Self {
            settings,
            seeds,
            delays,
            clicks,
        })
    }

    /// Create a session with a fixed seed
    pub fn with_seed(mut settings: Settings, seed: u64) -> Result<Self, ConfigError> {
        settings.seed = Some(seed);
        Self::new(settings)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Look up a profile, custom profiles first, then built-ins
    pub fn profile(&self, name: &str) -> Option<&DelayProfile> {
        find_profile(&self.settings.profiles, name)
    }

    /// Sample a delay in ticks from a named profile
    pub fn delay(&mut self, name: &str) -> Result<u32, TimingError> {
        let profile = find_profile(&self.settings.profiles, name)
            .ok_or_else(|| TimingError::UnknownProfile(name.to_string()))?;

        Ok(self.delays.sample(profile))
    }

    /// The session's delay sampler
    pub fn delays(&mut self) -> &mut DelaySampler {
        &mut self.delays
    }

    /// The session's click sampler
    pub fn clicks(&mut self) -> &mut ClickSampler {
        &mut self.clicks
    }

    /// Build a camera controller for the host's camera
    pub fn camera<C: CameraMutator, P: PositionSource>(
        &mut self,
        camera: C,
        positions: P,
    ) -> CameraController<C, P> {
        CameraController::new(
            camera,
            positions,
            self.seeds.fork(),
            self.settings.camera.clone(),
            self.settings.fidget.clone(),
        )
        .with_debug(self.settings.debug_logging)
    }

    /// Begin a new disposal episode
    pub fn drop_cycle<S: InventorySource, K: DropSink>(
        &mut self,
        source: S,
        sink: K,
        eligible: impl Fn(&SlotItem) -> bool + 'static,
    ) -> DropCycle<S, K> {
        DropCycle::new(
            source,
            sink,
            eligible,
            self.seeds.fork(),
            self.settings.disposal.clone(),
        )
        .with_debug(self.settings.debug_logging)
    }
}

fn find_profile<'a>(custom: &'a [DelayProfile], name: &str) -> Option<&'a DelayProfile> {
    custom
        .iter()
        .find(|p| p.name() == name)
        .or_else(|| presets::get(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::Bucket;

    #[test]
    fn test_invalid_settings_rejected() {
        let mut settings = Settings::default();
        settings.disposal.columns = 0;
        assert!(Ghosthand::new(settings).is_err());
    }

    #[test]
    fn test_named_delays() {
        let mut session = Ghosthand::with_seed(Settings::default(), 1).unwrap();

        for name in [presets::ACTION, presets::BANK, presets::REACTION] {
            assert!(session.delay(name).unwrap() >= 1);
        }
        assert!(matches!(
            session.delay("nope"),
            Err(TimingError::UnknownProfile(_))
        ));
    }

    #[test]
    fn test_custom_profile_shadows_preset() {
        let mut settings = Settings::default();
        settings.profiles.push(
            DelayProfile::new(presets::ACTION, vec![Bucket::ticks(9, 9, 1)]).unwrap(),
        );
        let mut session = Ghosthand::with_seed(settings, 2).unwrap();

        assert_eq!(session.delay(presets::ACTION).unwrap(), 9);
        assert_eq!(session.profile(presets::ACTION).unwrap().buckets().len(), 1);
    }

    #[test]
    fn test_same_seed_same_session() {
        let mut a = Ghosthand::with_seed(Settings::default(), 42).unwrap();
        let mut b = Ghosthand::with_seed(Settings::default(), 42).unwrap();

        for _ in 0..20 {
            assert_eq!(
                a.delay(presets::AFK_SHORT).unwrap(),
                b.delay(presets::AFK_SHORT).unwrap()
            );
        }
    }

    #[test]
    fn test_drop_cycle_from_session() {
        let mut session = Ghosthand::with_seed(Settings::default(), 3).unwrap();
        let source = || vec![SlotItem::new(0, 1), SlotItem::new(1, 2)];
        let mut cycle = session
            .drop_cycle(source, Vec::<SlotItem>::new(), |item: &SlotItem| item.item_id == 2)
            .with_miss_count(0);

        assert!(cycle.drop_next_batch());
        assert_eq!(cycle.sink(), &vec![SlotItem::new(1, 2)]);
    }
}
