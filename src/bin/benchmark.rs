//! Step throughput benchmark: serial vs parallel stepping on random soups

use std::time::Instant;
use life_frames::{Algorithm, Grid, RuleTable, presets};

fn soup(size: usize) -> Grid {
    let mut grid = Grid::new(size, size).expect("benchmark sizes are positive");
    grid.seed(&presets::soup().live_cells(size, size, 42));
    grid
}

fn benchmark(algorithm: Algorithm, size: usize, iterations: u32) -> f64 {
    let rules = RuleTable::conway();
    let mut grid = soup(size);

    let start = Instant::now();
    for _ in 0..iterations {
        grid = algorithm.step(&grid, &rules);
    }
    start.elapsed().as_secs_f64() * 1000.0 / iterations as f64
}

fn main() {
    println!("=== Life Step Benchmark ===\n");

    let sizes = [100, 250, 500, 1000, 2000];
    let iterations = 20;

    for algorithm in Algorithm::all() {
        println!("{:>10}: {}", algorithm.name(), algorithm.description());
    }
    println!();

    println!("{:>10} {:>12} {:>12} {:>10}", "Size", "Serial", "Parallel", "Speedup");
    println!("{:-<48}", "");

    for size in sizes {
        let serial_ms = benchmark(Algorithm::Serial, size, iterations);
        let parallel_ms = benchmark(Algorithm::Parallel, size, iterations);

        println!(
            "{:>10} {:>12.3} {:>12.3} {:>9.1}x",
            format!("{}x{}", size, size),
            serial_ms,
            parallel_ms,
            serial_ms / parallel_ms
        );
    }

    let size = 1000;
    let cells = (size * size) as f64;
    let parallel_ms = benchmark(Algorithm::Parallel, size, iterations);
    println!(
        "\nParallel at {size}x{size}: {:.2} ms/gen, {:.1}M cells/sec",
        parallel_ms,
        cells / (parallel_ms / 1000.0) / 1_000_000.0
    );
}
