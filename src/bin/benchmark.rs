//! Throughput benchmark: sparse stepping on random soups, single workload vs split

use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use sparse_life::{
    EngineConfig, EngineError, Simulation, Size, application::format_number, domain::random_soup,
};

struct Run {
    ms_per_gen: f64,
    evaluated_per_gen: f64,
}

fn benchmark(
    size: usize,
    density: f64,
    iterations: u32,
    config: EngineConfig,
) -> Result<Run, EngineError> {
    let size = Size::new(size, size);
    let mut rng = StdRng::seed_from_u64(42);
    let mut sim = Simulation::new(size, config);
    sim.insert_drawings(&[random_soup(size, density, &mut rng)]);

    let mut evaluated = 0;
    let start = Instant::now();
    for _ in 0..iterations {
        evaluated += sim.step()?;
    }
    let elapsed = start.elapsed().as_secs_f64();

    Ok(Run {
        ms_per_gen: elapsed * 1000.0 / iterations as f64,
        evaluated_per_gen: evaluated as f64 / iterations as f64,
    })
}

fn main() -> Result<(), EngineError> {
    env_logger::init();
    println!("=== Sparse Life Benchmark ===\n");

    let sizes = [100, 500, 1000, 2000, 4000];
    let densities = [0.05, 0.3];
    let iterations = 20;

    let split = EngineConfig::from_env();
    let single = split.clone().split_threshold(usize::MAX);
    println!("Worker threads: {}\n", split.worker_threads());

    println!(
        "{:>10} {:>8} {:>12} {:>12} {:>12} {:>10}",
        "Size", "Density", "Evaluated", "Single", "Split", "Speedup"
    );
    println!("{:-<70}", "");

    for size in sizes {
        for density in densities {
            let one = benchmark(size, density, iterations, single.clone())?;
            let many = benchmark(size, density, iterations, split.clone())?;

            println!(
                "{:>10} {:>8.2} {:>12} {:>10.2}ms {:>10.2}ms {:>9.1}x",
                format!("{}x{}", size, size),
                density,
                format_number(many.evaluated_per_gen as usize),
                one.ms_per_gen,
                many.ms_per_gen,
                one.ms_per_gen / many.ms_per_gen
            );
        }
    }

    println!("\n=== Throughput at 4000x4000, density 0.30 ===\n");
    let run = benchmark(4000, 0.3, iterations, split)?;
    println!(
        "Split:  {:.2} ms/gen, {} cells/sec",
        run.ms_per_gen,
        format_number((run.evaluated_per_gen / (run.ms_per_gen / 1000.0)) as usize)
    );
    Ok(())
}
