//! One disposal episode, advanced one batch per tick

use std::collections::HashSet;

use crate::config::settings::DisposalSettings;
use crate::stealth::Humanizer;

use super::{DropSink, InventorySource, ItemKey, SlotItem, SlotLayout};

/// Which pass the last batch came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropPhase {
    /// Sweeping items that were not picked to be missed
    Normal,
    /// Collecting the items skipped on the first pass
    Cleanup,
}

/// Eligibility filter applied to every snapshot
pub type EligibleFn = Box<dyn Fn(&SlotItem) -> bool>;

/// A single disposal episode.
///
/// Call [`drop_next_batch`](Self::drop_next_batch) at most once per tick.
/// Once it returns false the episode is over and the cycle should be
/// discarded; start a new one for the next episode.
pub struct DropCycle<S, K> {
    /// Live inventory
    source: S,
    /// Where drops are queued
    sink: K,
    /// Which items this episode disposes of
    eligible: EligibleFn,
    /// Slot grid used for ordering
    layout: SlotLayout,
    /// Random source owned by this cycle
    humanizer: Humanizer,
    /// Batch and miss limits
    settings: DisposalSettings,
    /// Items held back until the normal pass is done
    missed: HashSet<ItemKey>,
    /// Miss count override
    forced_miss_count: Option<usize>,
    /// Whether the miss set has been chosen
    initialized: bool,
    /// Phase of the last batch
    phase: DropPhase,
    /// Emit per-batch debug lines
    debug: bool,
}

impl<S: InventorySource, K: DropSink> DropCycle<S, K> {
    /// Start a new disposal episode
    pub fn new(
        source: S,
        sink: K,
        eligible: impl Fn(&SlotItem) -> bool + 'static,
        humanizer: Humanizer,
        settings: DisposalSettings,
    ) -> Self {
        Self {
            source,
            sink,
            eligible: Box::new(eligible),
            layout: SlotLayout::new(settings.columns, settings.rows),
            humanizer,
            settings,
            missed: HashSet::new(),
            forced_miss_count: None,
            initialized: false,
            phase: DropPhase::Normal,
            debug: false,
        }
    }

    /// Use a fixed number of missed items instead of a random one
    pub fn with_miss_count(mut self, count: usize) -> Self {
        self.forced_miss_count = Some(count);
        self
    }

    /// Enable or disable per-batch debug logging
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn phase(&self) -> DropPhase {
        self.phase
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Items picked to be skipped on the first pass
    pub fn missed(&self) -> &HashSet<ItemKey> {
        &self.missed
    }

    pub fn layout(&self) -> SlotLayout {
        self.layout
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    /// Hand back the collaborators once the episode is over
    pub fn into_parts(self) -> (S, K) {
        (self.source, self.sink)
    }

    /// Queue the next batch of drops.
    ///
    /// Returns true while work remains and false once nothing eligible is
    /// left.
    pub fn drop_next_batch(&mut self) -> bool {
        let mut eligible: Vec<SlotItem> = self
            .source
            .items()
            .into_iter()
            .filter(|item| (self.eligible)(item))
            .collect();

        if eligible.is_empty() {
            return false;
        }

        if !self.initialized {
            self.choose_missed(&eligible);
            self.initialized = true;
        }

        self.layout.sort_zigzag(&mut eligible);
        let (missed, normal): (Vec<SlotItem>, Vec<SlotItem>) = eligible
            .into_iter()
            .partition(|item| self.missed.contains(&item.key()));

        let (phase, pool) = if !normal.is_empty() {
            (DropPhase::Normal, normal)
        } else if !missed.is_empty() {
            (DropPhase::Cleanup, missed)
        } else {
            return false;
        };

        // At least one drop per call
        let batch = (self
            .humanizer
            .range_inclusive(self.settings.min_batch as i64, self.settings.max_batch as i64)
            as usize)
            .max(1)
            .min(pool.len());

        for item in &pool[..batch] {
            self.sink.queue_drop(item);
        }

        if self.debug {
            log::debug!(
                "{:?} batch: dropped {} of {} remaining",
                phase,
                batch,
                pool.len()
            );
        }
        self.phase = phase;
        true
    }

    fn choose_missed(&mut self, snapshot: &[SlotItem]) {
        let limit = self.settings.max_missed.min(snapshot.len() + 1);
        let count = self
            .forced_miss_count
            .unwrap_or_else(|| self.humanizer.index(limit))
            .min(snapshot.len());

        self.missed = self
            .humanizer
            .distinct_indices(snapshot.len(), count)
            .into_iter()
            .map(|i| snapshot[i].key())
            .collect();

        if self.debug {
            log::debug!("missing {} of {} items on the first pass", count, snapshot.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    type Shared = Rc<RefCell<Vec<SlotItem>>>;

    struct SharedInventory(Shared);

    impl InventorySource for SharedInventory {
        fn items(&self) -> Vec<SlotItem> {
            self.0.borrow().clone()
        }
    }

    /// Removes dropped items from the shared inventory and logs each batch
    struct Dropper {
        inventory: Shared,
        dropped: Vec<SlotItem>,
    }

    impl DropSink for Dropper {
        fn queue_drop(&mut self, item: &SlotItem) {
            self.inventory.borrow_mut().retain(|i| i != item);
            self.dropped.push(*item);
        }
    }

    const ORE: u32 = 440;
    const PICKAXE: u32 = 1265;

    fn inventory(items: Vec<SlotItem>) -> Shared {
        Rc::new(RefCell::new(items))
    }

    fn cycle(
        inv: &Shared,
        seed: u64,
        settings: DisposalSettings,
    ) -> DropCycle<SharedInventory, Dropper> {
        DropCycle::new(
            SharedInventory(inv.clone()),
            Dropper {
                inventory: inv.clone(),
                dropped: Vec::new(),
            },
            |item: &SlotItem| item.item_id == ORE,
            Humanizer::from_seed(seed),
            settings,
        )
    }

    #[test]
    fn test_empty_inventory_finishes_immediately() {
        let inv = inventory(vec![SlotItem::new(0, PICKAXE)]);
        let mut cycle = cycle(&inv, 1, DisposalSettings::default());

        assert!(!cycle.drop_next_batch());
        assert!(!cycle.is_initialized());
        assert!(cycle.sink().dropped.is_empty());
    }

    #[test]
    fn test_miss_then_cleanup() {
        let items: Vec<SlotItem> = (0..10).map(|slot| SlotItem::new(slot, ORE)).collect();
        let inv = inventory(items);
        let mut cycle = cycle(&inv, 7, DisposalSettings::default()).with_miss_count(3);

        let mut calls = 0;
        let mut phases = Vec::new();
        while cycle.drop_next_batch() {
            phases.push(cycle.phase());
            calls += 1;
            assert!(calls < 20, "sequencer never finished");
        }

        assert_eq!(cycle.missed().len(), 3);
        let dropped = &cycle.sink().dropped;
        assert_eq!(dropped.len(), 10);

        // Seven normal drops first, then the three held back
        for item in &dropped[..7] {
            assert!(!cycle.missed().contains(&item.key()));
        }
        for item in &dropped[7..] {
            assert!(cycle.missed().contains(&item.key()));
        }

        // Phases never go back from cleanup to normal
        let first_cleanup = phases
            .iter()
            .position(|p| *p == DropPhase::Cleanup)
            .expect("cleanup phase expected");
        assert!(phases[..first_cleanup].iter().all(|p| *p == DropPhase::Normal));
        assert!(phases[first_cleanup..].iter().all(|p| *p == DropPhase::Cleanup));

        assert!(inv.borrow().is_empty());
        assert!(!cycle.drop_next_batch());
    }

    #[test]
    fn test_batches_follow_zigzag_and_size_limits() {
        // Full 4x7 inventory of ore except a pickaxe in slot 0
        let mut items: Vec<SlotItem> = (1..28).map(|slot| SlotItem::new(slot, ORE)).collect();
        items.push(SlotItem::new(0, PICKAXE));
        let inv = inventory(items);
        let mut cycle = cycle(&inv, 11, DisposalSettings::default()).with_miss_count(0);

        let mut previous = 0;
        while cycle.drop_next_batch() {
            let total = cycle.sink().dropped.len();
            let batch = total - previous;
            let remaining_before = 27 - previous;
            assert!(batch >= 2.min(remaining_before) && batch <= 5, "batch {batch}");
            previous = total;
        }

        let expected: Vec<usize> = SlotLayout::new(4, 7)
            .zigzag_slots()
            .into_iter()
            .filter(|slot| *slot != 0)
            .collect();
        let order: Vec<usize> = cycle.sink().dropped.iter().map(|i| i.slot).collect();
        assert_eq!(order, expected);
        assert_eq!(inv.borrow().as_slice(), &[SlotItem::new(0, PICKAXE)]);
    }

    #[test]
    fn test_miss_set_fixed_after_first_call() {
        let items: Vec<SlotItem> = (0..12).map(|slot| SlotItem::new(slot, ORE)).collect();
        let inv = inventory(items);
        let mut cycle = cycle(&inv, 3, DisposalSettings::default()).with_miss_count(4);

        assert!(cycle.drop_next_batch());
        let chosen = cycle.missed().clone();
        assert_eq!(chosen.len(), 4);

        // New items appearing mid-episode are never added to the miss set
        inv.borrow_mut().push(SlotItem::new(20, ORE));
        while cycle.drop_next_batch() {
            assert_eq!(cycle.missed(), &chosen);
        }
    }

    #[test]
    fn test_random_miss_count_bounds() {
        for seed in 0..200 {
            let items: Vec<SlotItem> = (0..3).map(|slot| SlotItem::new(slot, ORE)).collect();
            let inv = inventory(items);
            let mut cycle = cycle(&inv, seed, DisposalSettings::default());

            assert!(cycle.drop_next_batch());
            // With 3 eligible items the count is drawn from [0, 4)
            assert!(cycle.missed().len() <= 3);
        }
    }

    #[test]
    fn test_forced_miss_count_capped() {
        let inv = inventory(vec![SlotItem::new(0, ORE), SlotItem::new(1, ORE)]);
        let mut cycle = cycle(&inv, 5, DisposalSettings::default()).with_miss_count(6);

        assert!(cycle.drop_next_batch());
        assert_eq!(cycle.missed().len(), 2);
        assert_eq!(cycle.phase(), DropPhase::Cleanup);
        assert!(!cycle.drop_next_batch());
    }

    #[test]
    fn test_zero_batch_settings_still_progress() {
        let items: Vec<SlotItem> = (0..6).map(|slot| SlotItem::new(slot, ORE)).collect();
        let inv = inventory(items);
        let settings = DisposalSettings {
            min_batch: 0,
            max_batch: 0,
            ..Default::default()
        };
        let mut cycle = cycle(&inv, 13, settings).with_miss_count(0);

        let mut calls = 0;
        while cycle.drop_next_batch() {
            calls += 1;
            assert_eq!(cycle.sink().dropped.len(), calls);
            assert!(calls <= 6, "sequencer never finished");
        }

        assert_eq!(calls, 6);
        assert!(inv.borrow().is_empty());
    }

    #[test]
    fn test_closure_source_and_vec_sink() {
        let source = || vec![SlotItem::new(2, ORE), SlotItem::new(5, ORE)];
        let mut cycle = DropCycle::new(
            source,
            Vec::<SlotItem>::new(),
            |_: &SlotItem| true,
            Humanizer::from_seed(9),
            DisposalSettings::default(),
        )
        .with_miss_count(0);

        assert!(cycle.drop_next_batch());
        let (_, sink) = cycle.into_parts();
        // Slot 2 is column 2 (even), slot 5 is column 1 (odd): 5 sweeps first
        assert_eq!(sink, vec![SlotItem::new(5, ORE), SlotItem::new(2, ORE)]);
    }
}
