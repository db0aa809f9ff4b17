use std::fmt;
use std::fs;
use std::io::{stdout, Write};
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::errors::*;

pub enum Unit {
    Nanosecond,
    Microsecond,
    Millisecond,
    Second,
}

impl Unit {
    pub fn format(&self, d: &Duration, width: usize) -> String {
        let (symbol, value) = match self {
            Self::Nanosecond => ("ns", d.as_nanos()),
            Self::Microsecond => ("us", d.as_micros()),
            Self::Millisecond => ("ms", d.as_millis()),
            Self::Second => ("s", d.as_secs() as u128),
        };
        format!("{:>width$}{:<2}", value, symbol)
    }

    pub fn scaled(d: &Duration, treshold: u128) -> Self {
        if d.as_nanos() < treshold {
            Self::Nanosecond
        } else if d.as_micros() < treshold {
            Self::Microsecond
        } else if d.as_millis() < treshold {
            Self::Millisecond
        } else {
            Self::Second
        }
    }
}

/// Pixels produced over a wall-clock interval.
#[derive(Copy, Clone, Debug)]
pub struct Throughput {
    pub pixels: usize,
    pub elapsed: Duration,
}

impl Throughput {
    pub fn new(pixels: usize, elapsed: Duration) -> Self {
        Self { pixels, elapsed }
    }

    pub fn measure<T, F: FnOnce() -> T>(pixels: usize, f: F) -> (T, Self) {
        let start = Instant::now();
        let out = f();
        (out, Self::new(pixels, start.elapsed()))
    }

    pub fn pixels_per_us(&self) -> f64 {
        let us = self.elapsed.as_secs_f64() * 1.0e6;
        if us > 0.0 {
            self.pixels as f64 / us
        } else {
            f64::INFINITY
        }
    }
}

impl fmt::Display for Throughput {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Time taken: {} (microsec)", self.elapsed.as_micros())?;
        writeln!(f, "Pixels: {}", self.pixels)?;
        write!(f, "Pixels per microsec: {:.6}", self.pixels_per_us())
    }
}

/// A named render workload, run `repeats` times in a row.
#[derive(Clone)]
pub struct Benchmark {
    f: Rc<dyn Fn()>,
    name: String,
    repeats: usize,
    pixels: usize,
}

impl Benchmark {
    pub fn iter<F: Fn() + 'static>(name: &str, repeats: usize, pixels: usize, f: F) -> Self {
        Self {
            f: Rc::new(f),
            name: name.to_string(),
            repeats,
            pixels,
        }
    }

    fn run(&self) -> Duration {
        let start = Instant::now();
        for _ in 0..self.repeats {
            (self.f)();
        }
        start.elapsed()
    }
}

struct BenchResult {
    name: String,
    repeats: usize,
    total: Duration,
    throughput: Throughput,
}

pub struct BenchmarkReport {
    benches: Vec<Benchmark>,
    results: Vec<BenchResult>,
}

impl BenchmarkReport {
    pub fn with_benches(benches: &[Benchmark]) -> Self {
        Self {
            benches: benches.to_vec(),
            results: vec![],
        }
    }

    pub fn run(&mut self) {
        for bench in &self.benches {
            let total = bench.run();
            self.results.push(BenchResult {
                name: bench.name.to_string(),
                repeats: bench.repeats,
                total,
                throughput: Throughput::new(bench.pixels * bench.repeats, total),
            });
            print!(".");
            let _ = stdout().flush();
        }
        println!();
    }

    pub fn show(&self) {
        println!(
            "  {: <30} {: >8}   {: >8}   {: >10}",
            "benchmark", "total", "per_call", "px/us"
        );
        for r in &self.results {
            let per_call = r.total.div_f64(r.repeats.max(1) as f64);
            println!(
                "  {: <30} {}   {}   {:>10.3}",
                r.name,
                Unit::scaled(&r.total, 100000).format(&r.total, 6),
                Unit::scaled(&per_call, 100000).format(&per_call, 6),
                r.throughput.pixels_per_us(),
            )
        }
        let _ = stdout().flush();
    }

    pub fn csv(&self) -> String {
        let mut lines: Vec<String> =
            vec!["benchmark,total_us,repeats,per_call_us,pixels_per_us".to_string()];
        for r in &self.results {
            lines.push(format!(
                "{},{},{},{},{:.3}",
                r.name,
                r.total.as_micros(),
                r.repeats,
                r.total.as_micros() / r.repeats.max(1) as u128,
                r.throughput.pixels_per_us(),
            ));
        }
        lines.push("".to_string());
        lines.join("\n")
    }

    pub fn write_csv(&self, filename: &str) -> Result<()> {
        fs::write(filename, self.csv()).chain_err(|| format!("could not write '{}'", filename))
    }

    pub fn report(&mut self, name: &str) -> Result<()> {
        print!("Benchmark: {}", name);
        self.run();
        self.show();
        self.write_csv(&format!("benchmark_{}.csv", name))
    }
}
