// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-m2mc CLI
//!
//! Command-line interface for converting maize locus positions between
//! genetic, physical and cytological coordinates.

use clap::{ArgAction, Parser, Subcommand};
use ferro_m2mc::calibration::{
    CalibrationProvider, Chromosome, ColumnLayout, DataDirProvider, ReferenceMap,
};
use ferro_m2mc::cli::{output_error, write_anchors, write_report, OutputFormat};
use ferro_m2mc::config::{CliOverrides, M2mcConfig, Settings};
use ferro_m2mc::convert::{convert_request, ConversionRequest, LocusSource};
use ferro_m2mc::coords::Direction;
use ferro_m2mc::export::{write_feature_files, write_rn_feature_file};
use ferro_m2mc::locus::parse_locus_list;
use ferro_m2mc::M2mcError;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ferro-m2mc")]
#[command(author, version, about = "Maize genetic-to-cytological map converter")]
#[command(
    long_about = "Convert maize locus positions between genetic (cM), RN-cM, physical (um) and
cytological (cMC) coordinates using per-chromosome calibration tables.

Examples:
  ferro-m2mc convert --chrom 3 --from genetic -i my_map.tsv
  ferro-m2mc convert --chrom 3 --from genetic --reference-map umc98
  printf 'cent3\\t0\\nsh2\\t45\\n' | ferro-m2mc convert --chrom 3 --from cytological --factor 1.2
  ferro-m2mc table --chrom 3 -f json"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a locus list
    Convert {
        /// Chromosome (1-10, optionally prefixed with chr)
        #[arg(long)]
        chrom: Chromosome,

        /// Coordinate system of the input map (genetic or cytological)
        #[arg(long)]
        from: Direction,

        /// Locus list, one 'name<TAB>position' per line (use - for stdin)
        #[arg(short, long, conflicts_with = "reference_map")]
        input: Option<PathBuf>,

        /// Use a built-in reference map instead of an input list (umc98 or genetic)
        #[arg(long)]
        reference_map: Option<ReferenceMap>,

        /// Multiplier for converted genetic positions (cytological input)
        #[arg(long)]
        factor: Option<f64>,

        /// Write diagram feature files (GFF), including the RN track, into this directory
        #[arg(long)]
        gff_dir: Option<PathBuf>,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Show the anchors of a calibration table
    Table {
        /// Chromosome (1-10, optionally prefixed with chr)
        #[arg(long)]
        chrom: Chromosome,

        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(clap::Args)]
struct CommonArgs {
    /// Data directory holding cmrn/, umc/ and gen/
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Column order of calibration files (genetic-first or cytological-first)
    #[arg(long)]
    layout: Option<ColumnLayout>,

    /// Output format
    #[arg(short = 'f', long)]
    format: Option<OutputFormat>,

    /// Decimal places in text and TSV output
    #[arg(long)]
    precision: Option<usize>,
}

impl CommonArgs {
    fn settings(&self, factor: Option<f64>) -> Settings {
        let cli = CliOverrides {
            data_dir: self.data_dir.clone(),
            layout: self.layout,
            format: self.format,
            precision: self.precision,
            factor,
        };
        M2mcConfig::load()
            .unwrap_or_default()
            .merge_with_cli(&cli)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let (result, format) = match cli.command {
        Commands::Convert {
            chrom,
            from,
            input,
            reference_map,
            factor,
            gff_dir,
            common,
        } => {
            let settings = common.settings(factor);
            let format = settings.format;
            (
                run_convert(chrom, from, input, reference_map, gff_dir, &settings),
                format,
            )
        }
        Commands::Table { chrom, common } => {
            let settings = common.settings(None);
            let format = settings.format;
            (run_table(chrom, &settings), format)
        }
    };

    if let Err(e) = result {
        output_error(&mut io::stderr().lock(), &e, format)?;
        std::process::exit(1);
    }
    Ok(())
}

fn run_convert(
    chrom: Chromosome,
    direction: Direction,
    input: Option<PathBuf>,
    reference_map: Option<ReferenceMap>,
    gff_dir: Option<PathBuf>,
    settings: &Settings,
) -> Result<(), M2mcError> {
    let provider = DataDirProvider::new(&settings.data_dir, settings.layout);

    let source = match (reference_map, input) {
        (Some(map), _) => LocusSource::ReferenceMap(map),
        (None, Some(path)) if path.as_os_str() != "-" => {
            LocusSource::Submitted(parse_locus_list(ferro_m2mc::io::open_text(&path)?)?)
        }
        (None, _) => LocusSource::Submitted(parse_locus_list(io::stdin().lock())?),
    };

    let request = ConversionRequest::new(chrom, direction, source).with_factor(settings.factor);
    let report = convert_request(&provider, &request)?;
    let rn_track = match gff_dir {
        Some(_) => Some(provider.load_rn_map(chrom)?),
        None => None,
    };

    // Nothing is printed unless the whole request succeeded
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    write_report(&mut writer, &report, settings.format, settings.precision)?;
    writer.flush()?;

    if let Some(dir) = gff_dir {
        std::fs::create_dir_all(&dir)?;
        write_feature_files(&dir, &report)?;
        if let Some(measures) = rn_track {
            write_rn_feature_file(&dir, &chrom.to_string(), &measures)?;
        }
    }
    Ok(())
}

fn run_table(chrom: Chromosome, settings: &Settings) -> Result<(), M2mcError> {
    let provider = DataDirProvider::new(&settings.data_dir, settings.layout);
    let table = provider.load_table(chrom)?;
    let anchors = table.anchors()?;

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    write_anchors(
        &mut writer,
        table.chromosome(),
        table.len(),
        &anchors,
        settings.format,
    )?;
    writer.flush()?;
    Ok(())
}
