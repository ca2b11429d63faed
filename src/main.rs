//! Headless demo: generate seeded tracks and drive them until the car crashes
//!
//! Usage: `raceline [seed] [tracks]`

use raceline::config::Config;
use raceline::sim::Simulation;

const MAX_TICKS_PER_TRACK: u64 = 100_000;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
    let tracks: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(3);

    let mut sim = match Simulation::new(Config::default(), seed) {
        Ok(sim) => sim,
        Err(err) => {
            log::error!("track generation failed: {err}");
            std::process::exit(1);
        }
    };

    println!("seed {seed}");
    for lap in 0..tracks {
        if lap > 0 {
            if let Err(err) = sim.regenerate() {
                log::error!("regeneration failed: {err}");
                std::process::exit(1);
            }
        }
        let ticks = sim.run_until_crash(MAX_TICKS_PER_TRACK);
        let car = sim.car();
        println!(
            "track {}: {} drivable pixels, survived {} ticks, ended at ({:.0}, {:.0}){}",
            lap + 1,
            sim.track().mask().population(),
            ticks,
            car.pos.x,
            car.pos.y,
            if car.crashed { "" } else { " (tick limit)" },
        );
    }
}
