//! Command-line driver.
//!
//! `compute` reads a packed raw link file, runs the requested number of
//! PageRank iterations with per-iteration progress on stdout, and writes the
//! raw rank vector. `sort-titles` ranks a list of titles against an already
//! computed vector and writes the report.
//!
//! Title maps are plain UTF-8 text, one `title<TAB>id` entry per line. The
//! binary caches of the upstream ingestion tooling are not consumed here.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rustc_hash::FxHashMap;

use wikirank::pagerank::{IterationReport, RankObserver};
use wikirank::{io as raw_io, rank_titles, report, stats, Pagerank, RankConfig};

#[derive(Parser)]
#[command(name = "wikirank", version, about = "PageRank over a packed wiki link graph")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the rank vector from a packed raw link file.
    Compute {
        /// Packed link file (big-endian i32 records).
        #[arg(long)]
        links: PathBuf,
        /// Output rank vector file (big-endian f64 per page id).
        #[arg(long)]
        output: PathBuf,
        /// Number of full-graph iterations.
        #[arg(long, default_value_t = 30)]
        iterations: usize,
        /// Damping factor in [0, 1].
        #[arg(long, default_value_t = 0.85)]
        damping: f64,
        /// Optional title map (title<TAB>id per line) for printing the top
        /// pages after each iteration.
        #[arg(long)]
        titles: Option<PathBuf>,
        /// How many top pages to print per iteration when --titles is set.
        #[arg(long, default_value_t = 30)]
        top: usize,
    },
    /// Sort a list of page titles by a computed rank vector.
    SortTitles {
        /// Title map file, title<TAB>id per line.
        #[arg(long)]
        titles_map: PathBuf,
        /// Rank vector file written by `compute`.
        #[arg(long)]
        ranks: PathBuf,
        /// Titles to sort, one per line.
        #[arg(long)]
        input: PathBuf,
        /// Output report file.
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Compute {
            links,
            output,
            iterations,
            damping,
            titles,
            top,
        } => compute(&links, &output, iterations, damping, titles.as_deref(), top),
        Command::SortTitles {
            titles_map,
            ranks,
            input,
            output,
        } => sort_titles(&titles_map, &ranks, &input, &output),
    }
}

fn compute(
    links_path: &Path,
    output: &Path,
    iterations: usize,
    damping: f64,
    titles: Option<&Path>,
    top: usize,
) -> Result<()> {
    let links = raw_io::read_links_file(links_path)
        .with_context(|| format!("reading links from {}", links_path.display()))?;
    println!(
        "Read {} link records ({} links)",
        links.num_records(),
        links.num_links()
    );

    let id_to_title = match titles {
        Some(path) => {
            let map = read_title_map(path)?;
            Some(map.into_iter().map(|(title, id)| (id, title)).collect())
        }
        None => None,
    };

    println!("Computing PageRank...");
    let mut pr = Pagerank::new(links)?;
    println!(
        "Active pages: {} of {}",
        pr.meta().num_active,
        pr.meta().id_limit
    );

    let cfg = RankConfig::new()
        .with_damping(damping)
        .with_iterations(iterations);
    let mut progress = ProgressObserver { id_to_title, top };
    pr.run(&cfg, &mut progress)?;

    raw_io::write_ranks_file(output, pr.ranks())
        .with_context(|| format!("writing ranks to {}", output.display()))?;
    println!("Wrote {}", output.display());
    Ok(())
}

fn sort_titles(titles_map: &Path, ranks_path: &Path, input: &Path, output: &Path) -> Result<()> {
    let title_to_id = read_title_map(titles_map)?;
    let ranks = raw_io::read_ranks_file(ranks_path)
        .with_context(|| format!("reading ranks from {}", ranks_path.display()))?;

    let reader = BufReader::new(
        File::open(input).with_context(|| format!("opening {}", input.display()))?,
    );
    let titles: Vec<String> = reader.lines().collect::<std::io::Result<_>>()?;

    let ranking = rank_titles(&ranks, &title_to_id, titles);
    for skip in &ranking.skipped {
        match skip.reason {
            wikirank::SkipReason::Duplicate => println!("Duplicate removed: {}", skip.title),
            wikirank::SkipReason::UnknownTitle => {
                println!("Nonexistent page title removed: {}", skip.title);
            }
            wikirank::SkipReason::ZeroRank => {
                println!("Unranked page title removed: {}", skip.title);
            }
        }
    }

    let writer = BufWriter::new(
        File::create(output).with_context(|| format!("creating {}", output.display()))?,
    );
    report::write_report(writer, &ranking)?;
    println!("Wrote {} ranked titles", ranking.entries.len());
    Ok(())
}

/// Parse a `title<TAB>id` map file.
fn read_title_map(path: &Path) -> Result<FxHashMap<String, u32>> {
    let reader =
        BufReader::new(File::open(path).with_context(|| format!("opening {}", path.display()))?);
    let mut map = FxHashMap::default();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        let Some((title, id)) = line.rsplit_once('\t') else {
            bail!("{}:{}: expected title<TAB>id", path.display(), lineno + 1);
        };
        let id: u32 = id
            .parse()
            .with_context(|| format!("{}:{}: bad page id {id:?}", path.display(), lineno + 1))?;
        map.insert(title.to_string(), id);
    }
    Ok(map)
}

/// Prints per-iteration progress in the style of the batch logs: timing,
/// change-ratio range, and optionally the current top pages.
struct ProgressObserver {
    id_to_title: Option<FxHashMap<u32, String>>,
    top: usize,
}

impl RankObserver for ProgressObserver {
    fn on_iteration_end(&mut self, report: &IterationReport, ranks: &[f64]) {
        println!(
            "Iteration {} ({:.3} s)",
            report.iteration,
            report.elapsed.as_secs_f64()
        );
        if let Some((min, max)) = report.change_ratio {
            println!("Range of ratio of changes: {min} to {max}");
        }
        if let Some(titles) = &self.id_to_title {
            for (score, title) in stats::top_pages(ranks, titles, self.top) {
                println!("  {score:.3}  {title}");
            }
        }
    }
}
