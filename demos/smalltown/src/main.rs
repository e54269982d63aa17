//! smalltown: runnable demo of the housing-market microsimulation.
//!
//! Builds a synthetic town of 1 200 dwellings in two regions, reads a JSON
//! scenario (the embedded `scenario.json`, or the path given as the first
//! argument) and runs demolition and migration year by year, writing CSV
//! output to `output/smalltown`.
//!
//! ```text
//! cargo run -p smalltown --release
//! cargo run -p smalltown --release -- my_scenario.json
//! ```

mod town;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use memory_stats::memory_stats;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use msm_core::Year;
use msm_output::writer::OutputWriter;
use msm_output::{CsvWriter, SimOutputObserver};
use msm_sim::{Event, ScenarioConfig, SimBuilder, SimObserver, World, YearSummary};

use town::{accessibility, build_town};

// ── Constants ─────────────────────────────────────────────────────────────────

const DWELLINGS:  u32  = 1_200;
const TOWN_SEED:  u64  = 7;
const OUTPUT_DIR: &str = "output/smalltown";

const DEFAULT_SCENARIO: &str = include_str!("../scenario.json");

fn mem_mb() -> f64 {
    memory_stats()
        .map(|s| s.physical_mem as f64 / (1024.0 * 1024.0))
        .unwrap_or(0.0)
}

// ── Observer wrapper to keep the yearly summaries ─────────────────────────────

struct RecordingObserver<W: OutputWriter> {
    inner:     SimOutputObserver<W>,
    summaries: Vec<YearSummary>,
    events:    usize,
}

impl<W: OutputWriter> RecordingObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, summaries: Vec::new(), events: 0 }
    }
}

impl<W: OutputWriter> SimObserver for RecordingObserver<W> {
    fn on_event(&mut self, _year: Year, _model: &str, _event: &Event, changed: bool) {
        self.events += usize::from(changed);
    }

    fn on_year_end(&mut self, summary: &YearSummary, world: &World) {
        self.summaries.push(summary.clone());
        self.inner.on_year_end(summary, world);
    }

    fn on_sim_end(&mut self, final_year: Year) {
        self.inner.on_sim_end(final_year);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // 1. Scenario.
    let (scenario, base_dir): (ScenarioConfig, PathBuf) = match std::env::args().nth(1) {
        Some(path) => {
            let path = PathBuf::from(path);
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading scenario {}", path.display()))?;
            let base = path.parent().map(Path::to_path_buf).unwrap_or_default();
            (serde_json::from_str(&text)?, base)
        }
        None => (serde_json::from_str(DEFAULT_SCENARIO)?, PathBuf::from(env!("CARGO_MANIFEST_DIR"))),
    };

    println!("=== smalltown: housing-market microsimulation ===");
    println!(
        "Years: {}..={}  |  Seed: {}  |  Migration: {}",
        scenario.run.start_year, scenario.run.end_year, scenario.run.seed, scenario.migration.policy
    );
    println!();

    // 2. Base-year population.
    let mem_before = mem_mb();
    let registry = build_town(DWELLINGS, scenario.run.start_year, TOWN_SEED)?;
    println!(
        "Town: {} dwellings ({} vacant), {} households, {} persons",
        registry.dwelling_count(),
        registry.vacancy().total(),
        registry.household_count(),
        registry.person_count(),
    );

    // 3. Build sim.
    let mut sim = SimBuilder::from_scenario(&scenario, registry, &base_dir)?
        .accessibility(accessibility())
        .build()?;
    let mem_built = mem_mb();

    // 4. Output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = RecordingObserver::new(SimOutputObserver::new(writer));

    // 5. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();
    info!(seconds = elapsed.as_secs_f64(), "simulation complete");

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 6. Summary.
    println!();
    println!(
        "{:<6} {:>9} {:>10} {:>9} {:>8} {:>7} {:>7} {:>6}",
        "Year", "Persons", "Households", "Dwellings", "Vacancy", "In", "Out", "Demol"
    );
    println!("{}", "-".repeat(70));
    for s in &obs.summaries {
        println!(
            "{:<6} {:>9} {:>10} {:>9} {:>7.1}% {:>7} {:>7} {:>6}",
            s.year.to_string(),
            s.population,
            s.households,
            s.dwellings,
            100.0 * s.vacancy_rate(),
            s.tally.inmigrant_persons,
            s.tally.outmigrant_persons,
            s.tally.demolished_dwellings,
        );
    }
    let unhoused: usize = obs
        .summaries
        .iter()
        .map(|s| s.issues.lack_of_dwelling_failed_inmigration + s.issues.lack_of_dwelling_forced_outmigration)
        .sum();
    println!();
    println!("Events that changed the world: {}", obs.events);
    println!("Households that could not be housed: {unhoused}");
    println!("Simulation time: {:.3} s", elapsed.as_secs_f64());
    println!(
        "Memory: {:.1} MB before town, {:.1} MB after build, {:.1} MB at end",
        mem_before,
        mem_built,
        mem_mb()
    );
    println!("Output written to {OUTPUT_DIR}/");

    Ok(())
}
