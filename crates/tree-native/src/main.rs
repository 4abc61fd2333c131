use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use tree_core::{
    Category, ControlIndicator, InstanceData, SimulationContext, TrackerStatus,
    TreeConfig, TreeParticles,
};

mod tracker;

const FRAME_RATE: f32 = 60.0;
const TRACKER_RATE: f32 = 30.0;
const MANUAL_CLICK_EVERY_SEC: f32 = 4.0;

struct Options {
    seconds: f32,
    no_camera: bool,
    realtime: bool,
}

fn parse_options() -> anyhow::Result<Options> {
    let mut opts = Options {
        seconds: 12.0,
        no_camera: false,
        realtime: false,
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--no-camera" => opts.no_camera = true,
            "--realtime" => opts.realtime = true,
            "--seconds" => {
                let value = args.next().context("--seconds needs a value")?;
                opts.seconds = value
                    .parse()
                    .with_context(|| format!("invalid --seconds value {value:?}"))?;
            }
            other => anyhow::bail!("unknown argument {other:?}"),
        }
    }
    Ok(opts)
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let opts = parse_options()?;
    let particles =
        TreeParticles::new(&TreeConfig::default()).context("building tree particles")?;
    log::info!("[scene] {} particles in total", particles.total_len());

    let mut sim = SimulationContext::new();
    let mut tracker = tracker::ScriptedTracker::new(TRACKER_RATE);
    if opts.no_camera {
        sim.set_tracker_status(TrackerStatus::Unavailable {
            reason: "no video input device".into(),
        });
    }

    // One reusable instance buffer per category, as an instanced renderer would keep.
    let mut buffers: Vec<Vec<InstanceData>> = particles
        .sets()
        .iter()
        .map(|set| Vec::with_capacity(set.len()))
        .collect();

    let dt = 1.0 / FRAME_RATE;
    let frames = (opts.seconds * FRAME_RATE).max(0.0) as u64;
    let started = Instant::now();
    let mut last_state = sim.state();
    let mut last_indicator = sim.indicator();
    let mut since_click = 0.0_f32;
    let mut uploaded_bytes = 0usize;

    for frame in 0..frames {
        let time_sec = frame as f32 * dt;

        if sim.tracker_status().is_active() {
            if let Some(sample) = tracker.poll(dt) {
                sim.push_sample(sample);
            }
        } else {
            since_click += dt;
            if since_click >= MANUAL_CLICK_EVERY_SEC {
                since_click = 0.0;
                sim.pointer_click();
            }
        }

        sim.tick(dt);

        let progress = sim.progress();
        for (set, buffer) in particles.sets().iter().zip(buffers.iter_mut()) {
            set.write_instances(progress, time_sec, buffer);
            uploaded_bytes += bytemuck::cast_slice::<InstanceData, u8>(buffer.as_slice()).len();
        }
        let view_proj = sim.camera().view_proj().to_cols_array();
        uploaded_bytes += bytemuck::bytes_of(&view_proj).len();

        if sim.state() != last_state {
            log::info!(
                "[t={:5.2}s] formation {:?} -> {:?}",
                time_sec,
                last_state,
                sim.state()
            );
            last_state = sim.state();
        }
        if sim.indicator() != last_indicator {
            log::info!("[t={:5.2}s] indicator {}", time_sec, describe(sim.indicator()));
            last_indicator = sim.indicator();
        }
        if frame % FRAME_RATE as u64 == 0 {
            let eye = sim.camera().eye;
            let photo = particles.get(Category::Photo).particles().first();
            log::info!(
                "[t={:5.2}s] progress={:.3} state={:?} eye=({:.2},{:.2},{:.2}) photo0={:?}",
                time_sec,
                progress,
                sim.state(),
                eye.x,
                eye.y,
                eye.z,
                photo.map(|p| p.effective_position(progress))
            );
        }

        if opts.realtime {
            thread::sleep(Duration::from_secs_f32(dt));
        }
    }

    log::info!(
        "[scene] {} frames in {:.2?}, {:.1} MiB of instance data",
        frames,
        started.elapsed(),
        uploaded_bytes as f64 / (1024.0 * 1024.0)
    );
    Ok(())
}

fn describe(indicator: ControlIndicator) -> &'static str {
    match indicator {
        ControlIndicator::Tracking => "tracking hand",
        ControlIndicator::Searching => "searching for hand",
        ControlIndicator::Manual => "manual control (click to toggle)",
    }
}
