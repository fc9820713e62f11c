//! Ghosthand CLI - try the engine without a game client
//!
//! Runs a short simulated session against in-memory stand-ins for the
//! camera and inventory and prints what each component decided.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use ghosthand::camera::{CameraMutator, PositionSource, WorldPoint};
use ghosthand::click::{Polygon, Rect};
use ghosthand::config::Settings;
use ghosthand::disposal::{DropSink, InventorySource, SlotItem};
use ghosthand::timing::presets;
use ghosthand::Ghosthand;

/// Camera that applies every command instantly
#[derive(Default)]
struct SimCamera {
    yaw: i32,
    pitch: i32,
}

impl CameraMutator for SimCamera {
    fn yaw(&self) -> i32 {
        self.yaw
    }

    fn pitch(&self) -> i32 {
        self.pitch
    }

    fn set_yaw(&mut self, yaw: i32) {
        self.yaw = yaw;
    }

    fn set_pitch(&mut self, pitch: i32) {
        self.pitch = pitch;
    }
}

struct Standing(WorldPoint);

impl PositionSource for Standing {
    fn local_position(&self) -> Option<WorldPoint> {
        Some(self.0)
    }
}

/// Inventory shared between the snapshot side and the drop side
#[derive(Clone)]
struct Backpack(Rc<RefCell<Vec<SlotItem>>>);

impl InventorySource for Backpack {
    fn items(&self) -> Vec<SlotItem> {
        self.0.borrow().clone()
    }
}

/// Drops items from the backpack, remembering the current batch
struct Hand {
    backpack: Backpack,
    batch: Vec<usize>,
}

impl DropSink for Hand {
    fn queue_drop(&mut self, item: &SlotItem) {
        self.backpack.0.borrow_mut().retain(|i| i != item);
        self.batch.push(item.slot);
    }
}

fn main() {
    println!("Ghosthand - human-behaviour emulation");
    println!("=====================================");
    println!();

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::from_file(&path) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("Failed to load {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };

    let mut session = match Ghosthand::new(settings) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Invalid settings: {}", e);
            std::process::exit(1);
        }
    };

    println!("Current Configuration:");
    println!("  - Tick length: {}ms", session.settings().tick_duration_ms);
    println!(
        "  - Fidget mean interval: {}s",
        session.settings().fidget.mean_interval_secs
    );
    println!(
        "  - Inventory grid: {}x{}",
        session.settings().disposal.columns,
        session.settings().disposal.rows
    );
    println!();

    println!("Delays (ticks):");
    for profile in presets::all() {
        let name = profile.name();
        let draws: Vec<u32> = (0..8).filter_map(|_| session.delay(name).ok()).collect();
        println!("  - {:<13} {:?}", name, draws);
    }
    println!();

    println!("Click points:");
    let button = Rect::new(560, 420, 90, 30);
    let rock = Polygon::from(vec![(300, 200), (340, 190), (360, 230), (320, 260), (290, 235)]);
    for _ in 0..4 {
        let on_button = session.clicks().sample_default(&button);
        let on_rock = session.clicks().sample_point(&rock, 0.6);
        let shaky = session.clicks().jitter_default(on_rock);
        println!(
            "  - button {:?}  rock {:?} (jittered {:?})",
            on_button, on_rock, shaky
        );
    }
    println!();

    println!("Camera:");
    let mut camera = session.camera(SimCamera::default(), Standing(WorldPoint::new(3200, 3200)));
    let mut now = Instant::now();
    let target = WorldPoint::new(3190, 3185);
    let visible = camera.ensure_visible(target, now);
    println!("  - target already visible: {}", visible);
    let mut polls = 0;
    while camera.poll(now) {
        now += Duration::from_millis(20);
        polls += 1;
    }
    println!("  - settled at yaw {} after {} polls", camera.camera().yaw(), polls);

    camera.maybe_fidget(session.settings().fidget.mean_interval_secs, now);
    for _ in 0..600 {
        now += Duration::from_secs(1);
        let outcome = camera.maybe_fidget(session.settings().fidget.mean_interval_secs, now);
        if outcome.is_performed() {
            println!("  - {:?}", outcome);
        }
        while camera.poll(now) {
            now += Duration::from_millis(20);
        }
    }
    println!();

    println!("Disposal:");
    let backpack = Backpack(Rc::new(RefCell::new(
        (0..28)
            .map(|slot| SlotItem::new(slot, if slot == 0 { 1265 } else { 440 }))
            .collect(),
    )));
    let hand = Hand {
        backpack: backpack.clone(),
        batch: Vec::new(),
    };
    let mut cycle = session.drop_cycle(backpack.clone(), hand, |item| item.item_id == 440);
    let mut tick = 0;
    while cycle.drop_next_batch() {
        tick += 1;
        let batch = std::mem::take(&mut cycle.sink_mut().batch);
        println!("  - tick {:>2} {:?}: {:?}", tick, cycle.phase(), batch);
    }
    println!("  - {} item(s) left", backpack.items().len());
}
