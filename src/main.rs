mod simulation;

use anyhow::Result;
use clap::Parser;
use log::info;

use simulation::{run_simulation, SimConfig};

#[derive(Parser)]
#[command(name = "bridge_sim")]
#[command(about = "One-lane bridge shared by cars and pedestrians")]
struct Cli {
    /// Number of cars to release in each direction
    #[arg(long, default_value_t = simulation::DEFAULT_CARS_PER_DIRECTION)]
    cars: u32,

    /// Number of pedestrians to release
    #[arg(long, default_value_t = simulation::DEFAULT_PEDESTRIANS)]
    pedestrians: u32,

    /// Mean gap between car arrivals in seconds, per direction
    #[arg(long, default_value_t = simulation::DEFAULT_CAR_ARRIVAL_MEAN_SECS)]
    car_interval: f64,

    /// Mean gap between pedestrian arrivals in seconds
    #[arg(long, default_value_t = simulation::DEFAULT_PED_ARRIVAL_MEAN_SECS)]
    ped_interval: f64,

    /// Mean car crossing time in seconds
    #[arg(long, default_value_t = simulation::DEFAULT_CAR_CROSSING_MEAN_SECS)]
    car_time: f64,

    /// Standard deviation of the car crossing time in seconds
    #[arg(long, default_value_t = simulation::DEFAULT_CAR_CROSSING_STD_SECS)]
    car_time_std: f64,

    /// Mean pedestrian crossing time in seconds
    #[arg(long, default_value_t = simulation::DEFAULT_PED_CROSSING_MEAN_SECS)]
    ped_time: f64,

    /// Standard deviation of the pedestrian crossing time in seconds
    #[arg(long, default_value_t = simulation::DEFAULT_PED_CROSSING_STD_SECS)]
    ped_time_std: f64,

    /// Seed for reproducible sampling
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = SimConfig {
        cars_per_direction: cli.cars,
        pedestrians: cli.pedestrians,
        car_arrival_mean_secs: cli.car_interval,
        ped_arrival_mean_secs: cli.ped_interval,
        car_crossing_mean_secs: cli.car_time,
        car_crossing_std_secs: cli.car_time_std,
        ped_crossing_mean_secs: cli.ped_time,
        ped_crossing_std_secs: cli.ped_time_std,
        seed: cli.seed,
    };

    let report = run_simulation(&config)?;

    info!("=== SIMULATION COMPLETE ===");
    info!("Cars crossed north: {}", report.cars_north);
    info!("Cars crossed south: {}", report.cars_south);
    info!("Pedestrians crossed: {}", report.pedestrians);
    info!("Total crossings: {}", report.total_crossings());
    info!("Class conflicts: {}", report.class_conflicts);
    info!("Longest wait: {:.2}s", report.longest_wait.as_secs_f64());
    info!("Average wait: {:.2}s", report.average_wait.as_secs_f64());
    info!("Wall clock: {:.2}s", report.wall_clock.as_secs_f64());

    Ok(())
}
