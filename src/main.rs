use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use voxland::overview;
use voxland::{AppConfig, InputIntent, Session};
use voxland_geom::Vec3;

/// Headless walk through a streamed voxel landscape.
#[derive(Parser, Debug)]
#[command(name = "voxland", version, about)]
struct Args {
    /// TOML config with [world], [terrain], [trees] and [player] sections
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the world seed
    #[arg(long)]
    seed: Option<i32>,
    /// Number of ticks to simulate
    #[arg(long, default_value_t = 600)]
    ticks: u32,
    /// Seconds per tick
    #[arg(long, default_value_t = 1.0 / 30.0)]
    dt: f32,
    /// Walking direction in degrees; 0 faces +X, 90 faces +Z
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    heading: f32,
    /// Press jump every N ticks (0 never jumps)
    #[arg(long, default_value_t = 0)]
    jump_every: u32,
    /// Print an ASCII height map of this radius around the final position
    #[arg(long)]
    overview: Option<i32>,
    /// Log filter, e.g. `debug` or `stream=debug,player=trace`
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(filter) = args.log_level.as_deref() {
        builder.parse_filters(filter);
    }
    builder.format_timestamp_millis().init();

    let mut cfg = match &args.config {
        Some(path) => AppConfig::load(path).inspect_err(|e| log::error!("{e}"))?,
        None => AppConfig::default(),
    };
    if let Some(seed) = args.seed {
        cfg.worldgen.world.seed = seed;
    }

    let mut session = Session::from_config(&cfg);
    let yaw = args.heading.to_radians();
    let camera = Vec3::new(yaw.cos(), 0.0, yaw.sin());

    let mut crossings = 0u32;
    let mut jumps = 0u32;
    let mut autojumps = 0u32;
    let mut blocked = 0u32;
    for i in 1..=args.ticks {
        let jump = args.jump_every > 0 && i % args.jump_every == 0;
        let report = session
            .submit_input(InputIntent::forward().with_jump(jump), camera, args.dt)
            .inspect_err(|e| log::error!("{e}"))?;
        jumps += u32::from(report.jumped);
        autojumps += u32::from(report.autojumped);
        blocked += u32::from(report.blocked_by_tree);
        if let Some(stream) = report.stream {
            crossings += 1;
            let p = session.player_state().position;
            log::info!(
                target: "stream",
                "tick {i}: entered chunk ({}, {}) at ({:.1}, {:.1}, {:.1}); {} resident",
                stream.center.cx,
                stream.center.cz,
                p.x,
                p.y,
                p.z,
                stream.resident
            );
        }
    }

    let state = session.player_state();
    let (generated, evicted) = session.store().totals();
    log::info!(
        "walked {} ticks to ({:.2}, {:.2}, {:.2}) over surface {:.0}; {} chunk crossings, {} jumps, {} autojumps, {} tree blocks",
        args.ticks,
        state.position.x,
        state.position.y,
        state.position.z,
        session.surface_under_player(),
        crossings,
        jumps,
        autojumps,
        blocked
    );
    log::info!(
        "chunks generated={} evicted={} resident={}",
        generated,
        evicted,
        session.resident_chunks().count()
    );

    if let Some(radius) = args.overview {
        let sample = session.sample_area(radius);
        let trees: Vec<_> = session
            .trees_near(session.player_chunk())
            .iter()
            .map(|t| session.tree_blocks(t))
            .collect();
        let column = (
            state.position.x.floor() as i32,
            state.position.z.floor() as i32,
        );
        print!("{}", overview::render(&sample, &trees, column));
    }
    Ok(())
}
