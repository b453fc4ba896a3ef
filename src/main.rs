//! Headless driver: streams terrain around a scripted observer and digs
//! along the way.
#![forbid(unsafe_code)]

mod config;

use std::error::Error;
use std::sync::Arc;

use clap::Parser;
use log::{info, warn};
use terrace_blocks::MiningTable;
use terrace_chunk::{HeadlessSpawner, VisualSpawner};
use terrace_edit::{EditSession, MiningStep};
use terrace_runtime::{ChunkDirectory, Precompute, StreamingController};
use terrace_world::worldgen::{WorldGenParams, load_params_from_path};
use terrace_world::{BlockPos, World, WorldSeed};

use crate::config::{AppConfig, Cli};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let cfg = AppConfig::resolve(&cli)?;

    let params = match &cfg.worldgen {
        Some(path) => load_params_from_path(path)?,
        None => WorldGenParams::default(),
    };
    let table = match &cfg.mining {
        Some(path) => MiningTable::from_path(path)?,
        None => MiningTable::default(),
    };
    let world = Arc::new(World::new(WorldSeed::initialize(cfg.seed), params));
    info!("seed {}", world.seed.value());

    let precompute = Precompute::new(Arc::clone(&world), cfg.workers)?;
    let mut dir = ChunkDirectory::new();
    let mut spawner = HeadlessSpawner::new();
    let mut session = EditSession::new(table);

    let start = observer_at(&world, 0, 0);
    let mut stream = StreamingController::new(cfg.render_distance, start.chunk());
    stream.bootstrap(&mut dir, &mut spawner);
    stream.tick(&mut dir, &precompute, &mut spawner);

    let walk = &cfg.walk;
    for step in 1..=walk.steps {
        let x = step as i32 * walk.stride_x;
        let z = step as i32 * walk.stride_z;
        let observer = observer_at(&world, x, z);
        stream.update_observer_position(observer, &mut dir, &mut spawner);
        stream.tick(&mut dir, &precompute, &mut spawner);

        if walk.dig_every > 0 && step % walk.dig_every == 0 {
            dig_and_rebuild(&mut session, &mut dir, observer, walk.dt, &mut spawner);
        }
    }

    info!(
        "done: {} chunks stored, {} visuals live ({} spawned, {} despawned), {} blocks held",
        dir.len(),
        spawner.live_count(),
        spawner.spawned_total,
        spawner.despawned_total,
        session.inventory.total()
    );
    Ok(())
}

fn observer_at(world: &World, x: i32, z: i32) -> BlockPos {
    BlockPos::new(x, world.spawn_height(x, z), z)
}

/// Top cell of the column under `pos`, if its chunk is stored.
fn ground_under(dir: &ChunkDirectory, pos: BlockPos) -> Option<BlockPos> {
    let (lx, lz) = pos.local();
    let (y, _) = dir.get(pos.chunk())?.column(lx, lz)?.top()?;
    Some(BlockPos::new(pos.x, y, pos.z))
}

/// Mines the block under the observer, then sets it down one column over.
fn dig_and_rebuild(
    session: &mut EditSession,
    dir: &mut ChunkDirectory,
    observer: BlockPos,
    dt: f32,
    spawner: &mut dyn VisualSpawner,
) {
    let Some(target) = ground_under(dir, observer) else {
        warn!("no ground under {:?}", observer);
        return;
    };
    let Ok(kind) = dir.type_at(target) else {
        return;
    };
    let mut ticks = 0u32;
    let mined = loop {
        match session.mine(dir, target, dt, spawner) {
            Ok(MiningStep::Complete) => break true,
            Ok(MiningStep::InProgress(_)) if ticks < 10_000 => ticks += 1,
            Ok(step) => {
                info!("gave up mining {:?}: {:?}", target, step);
                session.stop_mining();
                break false;
            }
            Err(e) => {
                warn!("mining {:?} failed: {}", target, e);
                session.stop_mining();
                break false;
            }
        }
    };
    if !mined {
        return;
    }
    info!("dug {:?} after {} ticks", target, ticks);

    session.selector.select(kind);
    let beside = BlockPos::new(observer.x + 1, 0, observer.z);
    let Some(ground) = ground_under(dir, beside) else {
        return;
    };
    match session.place(dir, ground.offset(0, 1, 0), Some(observer), spawner) {
        Ok(kind) => info!("placed {} at {:?}", kind, ground.offset(0, 1, 0)),
        Err(e) => warn!("placing failed: {}", e),
    }
}
