use crate::classify::{ScoreCutTagger, Tagger};
use crate::dataset::Table;
use crate::geometry::DimensionScan;
use crate::plot::ExportFormat;
use crate::tasks::TaggerComparison;
use crate::ui::drivers::PromptDriver;
use anyhow::{Context, Result};
use std::path::PathBuf;
use strum::{EnumMessage, IntoEnumIterator};
use strum_macros::{EnumIter, EnumMessage as EnumMessageDerive, IntoStaticStr};

#[derive(Debug, Clone, Copy, EnumIter, EnumMessageDerive, IntoStaticStr)]
pub enum AnalysisKind {
    #[strum(
        message = "Tagger comparison",
        detailed_message = "Score a selection cut against a stored benchmark on a labeled table."
    )]
    TaggerComparison,
    #[strum(
        message = "Dimensionality demo",
        detailed_message = "Monte Carlo volume of the unit hypersphere across dimensions."
    )]
    DimensionalityDemo,
}

impl AnalysisKind {
    fn label(&self) -> String {
        self.get_message()
            .map(str::to_string)
            .unwrap_or_else(|| <&'static str>::from(*self).to_string())
    }
}

/// Top-level interactive flow: pick an analysis, prompt its parameters, run
/// it, print the result.
pub fn run<D: PromptDriver>(driver: &D) -> Result<()> {
    let kinds: Vec<AnalysisKind> = AnalysisKind::iter().collect();
    let labels: Vec<String> = kinds.iter().map(AnalysisKind::label).collect();
    let index = driver.ask_choice("Choose an analysis:", &labels)?;
    match kinds[index] {
        AnalysisKind::TaggerComparison => run_comparison(driver),
        AnalysisKind::DimensionalityDemo => run_dimensionality(driver),
    }
}

fn run_comparison<D: PromptDriver>(driver: &D) -> Result<()> {
    let path = prompt_existing_path(driver, "Dataset file:", "data.csv")?;
    let table =
        Table::from_path(&path).with_context(|| format!("loading {}", path.display()))?;

    let truth = driver.ask_string("Truth column:", "Stored 0/1 label column", "isb")?;
    let score = driver.ask_string(
        "Selection column:",
        "Continuous discriminant for your own cut",
        "prob_b",
    )?;
    let cut = driver.ask_f64(
        "Selection cut:",
        "Jets scoring strictly above are tagged signal",
        0.5,
    )?;
    let benchmark = driver.ask_string(
        "Benchmark column:",
        "Legacy network score to compare against",
        "nnbjet",
    )?;
    let benchmark_cut = driver.ask_f64("Benchmark cut:", "Working point of the benchmark", 0.5)?;

    let taggers: Vec<Box<dyn Tagger>> = vec![
        Box::new(ScoreCutTagger::new("selection", score.as_str(), cut)),
        Box::new(ScoreCutTagger::new("benchmark", benchmark.as_str(), benchmark_cut)),
    ];

    let save_plots = driver.ask_bool("Persist plots and report to disk?", "", false)?;
    let (output_dir, format) = if save_plots {
        let output = PathBuf::from(driver.ask_string("Output directory:", "", "tagbench-out")?);
        (output, prompt_format(driver)?)
    } else {
        (PathBuf::new(), ExportFormat::Csv)
    };

    let task = TaggerComparison::new(table, &truth, &score, taggers, save_plots, output_dir)?
        .with_export_format(format);
    let report = task.run()?;
    println!("{report}");
    Ok(())
}

fn run_dimensionality<D: PromptDriver>(driver: &D) -> Result<()> {
    let max_dims = driver.ask_u64("Highest dimension:", "Scan runs from 1 up to here", 10)?;
    let samples = driver.ask_u64("Samples per dimension:", "", 100_000)?;
    let seed = driver.ask_u64("Seed:", "Same seed repeats the draw", 1)?;

    let scan = DimensionScan::run(max_dims as u32, samples, seed)?;
    for row in scan.rows() {
        println!("{row}");
    }

    if driver.ask_bool("Persist the scan to disk?", "", false)? {
        let output = PathBuf::from(driver.ask_string("Output directory:", "", "tagbench-out")?);
        let format = prompt_format(driver)?;
        std::fs::create_dir_all(&output)?;
        let file = output.join(format!("dimension_scan.{format}"));
        scan.export(&file, format)
            .with_context(|| format!("writing {}", file.display()))?;
        println!("wrote {}", file.display());
    }
    Ok(())
}

fn prompt_format<D: PromptDriver>(driver: &D) -> Result<ExportFormat> {
    let formats: Vec<ExportFormat> = ExportFormat::iter().collect();
    let labels: Vec<String> = formats.iter().map(ExportFormat::to_string).collect();
    let index = driver.ask_choice("Export format:", &labels)?;
    Ok(formats[index])
}

/// Re-asks until the answer names an existing file.
fn prompt_existing_path<D: PromptDriver>(
    driver: &D,
    title: &str,
    default: &str,
) -> Result<PathBuf> {
    loop {
        let answer = driver.ask_string(title, "Path to a delimited table with a header row", default)?;
        let path = PathBuf::from(answer.trim());
        if path.is_file() {
            return Ok(path);
        }
    }
}
