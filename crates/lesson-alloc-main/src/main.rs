// Copyright (c) 2025 the lesson-alloc authors.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use lesson_alloc_engine::prelude::*;
use lesson_alloc_model::prelude::*;
use lesson_alloc_model::snapshot::RawAllocation;
use serde::Serialize;
use std::{fs::File, io::BufWriter, time::Instant};
use tracing_subscriber::EnvFilter;

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

#[derive(Debug, Clone, Serialize)]
struct AllocationReport {
    cycle_start: String,
    cycle_end: String,
    requested: usize,
    placed: usize,
    elapsed_ms: u128,
    allocations: Vec<RawAllocation>,
}

fn load_input(path: &str) -> AllocationInput {
    let file = File::open(path).expect("open snapshot file");
    let raw: RawSnapshot = serde_json::from_reader(file).expect("parse snapshot json");
    AllocationInput::from_raw(&raw).expect("valid snapshot")
}

fn demo_input() -> AllocationInput {
    let config = GeneratorConfig::default();
    tracing::info!(seed = config.seed, pupils = config.num_pupils, "generating demo instance");
    InstanceGenerator::new(config).generate()
}

fn main() {
    enable_tracing();

    let input = match std::env::args().nth(1) {
        Some(path) => load_input(&path),
        None => demo_input(),
    };

    let t0 = Instant::now();
    let outcome = AllocationDriver::new(&input).allocate_cycle();
    let elapsed = t0.elapsed();

    let report = AllocationReport {
        cycle_start: input.cycle().start().to_string(),
        cycle_end: input.cycle().end().to_string(),
        requested: outcome.requested(),
        placed: outcome.placed(),
        elapsed_ms: elapsed.as_millis(),
        allocations: outcome.allocations().to_raw(),
    };

    let file = File::create("allocations.json").expect("create allocations.json");
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &report).expect("write json report");

    println!(
        "Placed {}/{} course-weeks over cycle {} .. {} in {} ms ({} allocations written).",
        report.placed,
        report.requested,
        report.cycle_start,
        report.cycle_end,
        report.elapsed_ms,
        report.allocations.len()
    );
    if report.placed < report.requested {
        println!(
            "{} course-weeks could not be placed; see allocations.json for the partial result.",
            report.requested - report.placed
        );
    }
}
