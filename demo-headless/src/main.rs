use clap::Parser;
use flame_sim_core::{
    FireBehaviorSample, FlameSimulation, FrameRateCounter, RawFireBehavior, RecordingSurface,
    RenderSurface, Rgba, Vec2,
};
use tracing::info;

/// Flame animation demo with configurable fire-behavior inputs
#[derive(Parser, Debug)]
#[command(name = "flame-sim-demo")]
#[command(about = "Headless flame particle simulation demo", long_about = None)]
struct Args {
    /// Simulation duration in seconds
    #[arg(short, long, default_value_t = 10.0)]
    duration: f64,

    /// Frame rate to simulate at
    #[arg(short, long, default_value_t = 60.0)]
    frame_rate: f64,

    /// Canvas width in pixels
    #[arg(long, default_value_t = 640.0)]
    width: f64,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 480.0)]
    height: f64,

    /// Flame length in feet
    #[arg(long, default_value_t = 23.14)]
    flame_length: f64,

    /// Fireline intensity in Btu/ft/s
    #[arg(long, default_value_t = 5246.0)]
    fireline_intensity: f64,

    /// Fuel-bed heat release in Btu/ft²
    #[arg(long, default_value_t = 1261.0)]
    heat_release: f64,

    /// Fuel-bed depth in feet
    #[arg(long, default_value_t = 2.0)]
    fuel_bed_depth: f64,

    /// Effective wind speed in mph
    #[arg(short, long, default_value_t = 5.26)]
    wind_speed: f64,

    /// Flame residence time in minutes
    #[arg(long, default_value_t = 0.23)]
    residence_time: f64,

    /// Report interval in seconds
    #[arg(short, long, default_value_t = 1.0)]
    report_interval: f64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let sample = match FireBehaviorSample::from_raw(RawFireBehavior {
        flame_length: args.flame_length,
        fireline_intensity: args.fireline_intensity,
        rate_of_spread_max: 114.6,
        rate_of_spread_flanking: 11.2,
        effective_wind_speed: args.wind_speed,
        heat_release: args.heat_release,
        fuel_bed_depth: args.fuel_bed_depth,
        characteristic_sav: 1672.0,
        flame_residence_time: args.residence_time,
        reaction_velocity: 13.5,
    }) {
        Ok(sample) => sample,
        Err(e) => {
            eprintln!("invalid fire behavior input: {e}");
            std::process::exit(1);
        }
    };

    let mut sim = FlameSimulation::new();
    sim.set_fire_behavior(&sample);

    // Emission origin: horizontal center, just above the bottom edge
    let origin = Vec2::new(args.width / 2.0, args.height - 10.0);

    let frame_rate = args.frame_rate.max(1.0);
    let total_frames = (args.duration * frame_rate).ceil() as u64;
    let report_every = (args.report_interval * frame_rate).max(1.0) as u64;
    let frame_nanos = (1_000_000_000.0 / frame_rate) as u64;

    let mut fps_counter = FrameRateCounter::new();
    let mut peak = 0usize;
    let mut total_spawned = 0usize;

    for frame in 1..=total_frames {
        let measured_fps = fps_counter.record(frame * frame_nanos);
        let stats = sim.advance(origin, measured_fps);
        total_spawned += stats.spawned;
        peak = peak.max(stats.live_particles);

        if frame % report_every == 0 {
            info!(
                "t={:5.1}s  fps={:5.1}  particles={:4}  spawned={:3}  expired={:3}",
                frame as f64 / frame_rate,
                measured_fps,
                stats.live_particles,
                stats.spawned,
                stats.expired,
            );
        }
    }

    // Draw the final frame into a recording surface to show the render path
    let mut surface = RecordingSurface::new();
    surface.clear(Rgba::BLACK);
    sim.render(&mut surface);

    println!("--- flame simulation summary ---");
    println!("frames simulated:   {total_frames}");
    println!("particles spawned:  {total_spawned}");
    println!("peak pool size:     {peak}");
    println!("final pool size:    {}", sim.particle_count());
    println!("final frame draws:  {} ovals", surface.oval_count());
}
