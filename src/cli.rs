// Command-line front end for inspecting raw cache buffers.
//
// Every subcommand works on files already extracted and decompressed from
// a cache: a single record blob, a config archive, or a region's landscape
// and object files. Output goes to stdout, diagnostics to stderr.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};
use log::{debug, info};
use serde::Serialize;

use crate::buffer::ByteCursor;
use crate::config::{AnyDefinition, ConfigKind};
use crate::error::CacheError;
use crate::region::{RegionDefinition, RenderRule, region_id};
use crate::store::Archive;

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// Decoder for game cache config records and map regions.
#[derive(Parser, Debug)]
#[command(
    name = "runedata",
    version,
    about = "Decode cache config records and map regions",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,

    /// Quiet mode (errors only).
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Print decoded values as JSON.
    #[arg(long = "json", global = true)]
    json_output: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// List config kinds and their archive slots.
    Kinds,
    /// Decode one raw config record.
    Record(RecordArgs),
    /// Split a decompressed config archive and decode every child.
    Archive(ArchiveArgs),
    /// Decode a region's landscape and, optionally, its objects.
    Region(RegionArgs),
}

#[derive(Args, Debug)]
struct RecordArgs {
    /// Record kind (e.g. item, npc, object).
    #[arg(long, short = 'k', value_parser = parse_kind)]
    kind: ConfigKind,

    /// Record id reported in the output.
    #[arg(long, default_value_t = 0)]
    id: u32,

    /// Raw record bytes.
    #[arg(value_hint = ValueHint::FilePath)]
    file: PathBuf,
}

#[derive(Args, Debug)]
struct ArchiveArgs {
    /// Record kind stored in the archive.
    #[arg(long, short = 'k', value_parser = parse_kind)]
    kind: ConfigKind,

    /// Number of children in the archive.
    #[arg(long, short = 'n', value_parser = clap::value_parser!(u32).range(1..))]
    children: u32,

    /// Decompressed archive bytes.
    #[arg(value_hint = ValueHint::FilePath)]
    file: PathBuf,
}

#[derive(Args, Debug)]
struct RegionArgs {
    /// Region x coordinate.
    #[arg(long)]
    x: u8,

    /// Region y coordinate.
    #[arg(long)]
    y: u8,

    /// Decompressed landscape file.
    #[arg(value_hint = ValueHint::FilePath)]
    landscape: PathBuf,

    /// Decrypted, decompressed object file.
    #[arg(value_hint = ValueHint::FilePath)]
    objects: Option<PathBuf>,
}

fn parse_kind(s: &str) -> Result<ConfigKind, String> {
    s.parse()
}

fn log_filter(quiet: bool, verbose: u8) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    }
}

#[cfg(any(test, feature = "fuzzing"))]
pub fn fuzz_try_parse_args(args: &[String]) {
    let argv: Vec<String> = std::iter::once("runedata".to_string())
        .chain(args.iter().cloned())
        .collect();
    if let Ok(cli) = Cli::try_parse_from(argv) {
        let _ = log_filter(cli.quiet, cli.verbose);
    }
}

// ---------------------------------------------------------------------------
// Output helpers
// ---------------------------------------------------------------------------

fn read_input(path: &Path) -> Result<Vec<u8>, i32> {
    fs::read(path).map_err(|e| {
        eprintln!("runedata: {}: {e}", path.display());
        1
    })
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            0
        }
        Err(e) => {
            eprintln!("runedata: json: {e}");
            1
        }
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_kinds(json_output: bool) -> i32 {
    if json_output {
        let kinds: Vec<_> = ConfigKind::ALL
            .iter()
            .map(|k| serde_json::json!({ "kind": k, "archive": k.archive() }))
            .collect();
        return print_json(&kinds);
    }
    for kind in ConfigKind::ALL {
        println!("{:<10} {}", kind.name(), kind.archive());
    }
    0
}

fn cmd_record(args: &RecordArgs, json_output: bool) -> i32 {
    let data = match read_input(&args.file) {
        Ok(data) => data,
        Err(code) => return code,
    };
    debug!("{}: {} byte(s)", args.file.display(), data.len());

    match args.kind.decode_any(args.id, &data) {
        Ok(record) if json_output => print_json(&record),
        Ok(record) => {
            println!("{record:#?}");
            0
        }
        Err(e) => {
            eprintln!("runedata: {} {}: {e}", args.kind, args.id);
            1
        }
    }
}

fn cmd_archive(args: &ArchiveArgs, json_output: bool) -> i32 {
    let data = match read_input(&args.file) {
        Ok(data) => data,
        Err(code) => return code,
    };
    let archive = match Archive::decode(&data, args.children as usize) {
        Ok(archive) => archive,
        Err(e) => {
            eprintln!("runedata: {}: {e}", args.file.display());
            return 1;
        }
    };

    let mut records: Vec<AnyDefinition> = Vec::with_capacity(archive.len());
    for index in 0..args.children {
        let Some(bytes) = archive.entry(index) else {
            eprintln!(
                "runedata: {}",
                CacheError::MissingEntry {
                    archive: args.kind.archive(),
                    index,
                }
            );
            return 1;
        };
        match args.kind.decode_any(index, bytes) {
            Ok(record) => records.push(record),
            Err(source) => {
                let err = CacheError::Record {
                    kind: args.kind,
                    id: index,
                    source,
                };
                eprintln!("runedata: {err}");
                return 1;
            }
        }
    }
    info!("decoded {} {} record(s)", records.len(), args.kind);

    if json_output {
        return print_json(&records);
    }
    for record in &records {
        println!("{record:?}");
    }
    0
}

fn cmd_region(args: &RegionArgs, json_output: bool) -> i32 {
    let mut region = RegionDefinition::new(args.x, args.y);

    let landscape = match read_input(&args.landscape) {
        Ok(data) => data,
        Err(code) => return code,
    };
    if let Err(e) = region.decode_landscape(&mut ByteCursor::new(&landscape)) {
        eprintln!("runedata: {}: landscape: {e}", args.landscape.display());
        return 1;
    }

    if let Some(path) = &args.objects {
        let objects = match read_input(path) {
            Ok(data) => data,
            Err(code) => return code,
        };
        if let Err(e) = region.decode_objects(&mut ByteCursor::new(&objects)) {
            eprintln!("runedata: {}: objects: {e}", path.display());
            return 1;
        }
    }

    if json_output {
        return print_json(&region);
    }

    let bridges = region
        .render_rules
        .iter()
        .filter(|r| r.contains(RenderRule::BRIDGE))
        .count();
    let overlays = region.overlay_ids.iter().filter(|&id| id != 0).count();
    println!(
        "region {} ({}, {})",
        region_id(args.x, args.y),
        args.x,
        args.y
    );
    println!("  base: ({}, {})", region.base_x(), region.base_y());
    println!("  overlay tiles: {overlays}");
    println!("  bridge tiles: {bridges}");
    println!("  objects: {}", region.objects.len());
    0
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Run the CLI and exit the process.
pub fn run() -> ! {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_filter(cli.quiet, cli.verbose)),
    )
    .format_timestamp(None)
    .format_target(false)
    .init();

    let json_output = cli.json_output;
    let exit_code = match &cli.command {
        Cmd::Kinds => cmd_kinds(json_output),
        Cmd::Record(args) => cmd_record(args, json_output),
        Cmd::Archive(args) => cmd_archive(args, json_output),
        Cmd::Region(args) => cmd_region(args, json_output),
    };

    process::exit(exit_code);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let argv: Vec<String> = std::iter::once("runedata".to_string())
            .chain(args.iter().map(|s| s.to_string()))
            .collect();
        Cli::try_parse_from(argv).expect("cli parse failed")
    }

    #[test]
    fn record_args() {
        let cli = parse(&["record", "--kind", "item", "--id", "4151", "whip.dat"]);
        match cli.command {
            Cmd::Record(args) => {
                assert_eq!(args.kind, ConfigKind::Item);
                assert_eq!(args.id, 4151);
                assert_eq!(args.file, PathBuf::from("whip.dat"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let argv = ["runedata", "record", "--kind", "widget", "x.dat"];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn archive_needs_children() {
        assert!(Cli::try_parse_from(["runedata", "archive", "-k", "npc", "a.dat"]).is_err());
        assert!(Cli::try_parse_from(["runedata", "archive", "-k", "npc", "-n", "0", "a.dat"]).is_err());
        let cli = parse(&["archive", "-k", "npc", "-n", "3", "a.dat"]);
        assert!(matches!(cli.command, Cmd::Archive(ArchiveArgs { children: 3, .. })));
    }

    #[test]
    fn region_objects_are_optional() {
        let cli = parse(&["region", "--x", "50", "--y", "50", "m50_50"]);
        match cli.command {
            Cmd::Region(args) => {
                assert_eq!((args.x, args.y), (50, 50));
                assert!(args.objects.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags() {
        let cli = parse(&["-vv", "kinds", "--json"]);
        assert_eq!(cli.verbose, 2);
        assert!(cli.json_output);
        assert_eq!(log_filter(cli.quiet, cli.verbose), "debug");
        assert_eq!(log_filter(true, 0), "error");
        assert!(Cli::try_parse_from(["runedata", "-q", "-v", "kinds"]).is_err());
    }

    #[test]
    fn fuzz_parser_tolerates_garbage() {
        fuzz_try_parse_args(&["--bogus".to_string(), "\u{0}".to_string()]);
    }
}
