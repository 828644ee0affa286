// Command-line front end for Oxilzss.
//
// Subcommands mirror the two classic modes (compress / decompress) plus
// header inspection. Inputs are read fully into memory, and output files
// are only created once the codec has succeeded.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};
use log::info;

use crate::compress::decoder::decompress;
use crate::compress::encoder::{CompressOptions, compress_with_stats};
use crate::lzss::decoder::read_header;
use crate::lzss::header::{
    DEFAULT_DICTIONARY_LENGTH, Dictionary, HEADER_LEN, MAX_DICTIONARY_LENGTH,
    MIN_DICTIONARY_LENGTH,
};

const BUF_SIZE: usize = 64 * 1024;

// ---------------------------------------------------------------------------
// Size parsing (supports K suffix)
// ---------------------------------------------------------------------------

fn parse_byte_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty size string".into());
    }
    let (num_part, multiplier) = match s.as_bytes().last() {
        Some(b'k' | b'K') => (&s[..s.len() - 1], 1024u64),
        _ => (s, 1u64),
    };
    let num: u64 = num_part
        .trim()
        .parse()
        .map_err(|e| format!("invalid size '{s}': {e}"))?;
    num.checked_mul(multiplier)
        .ok_or_else(|| format!("size overflow: '{s}'"))
}

/// Parse and validate a dictionary length (`4096`, `8K`, ...).
fn parse_dictionary(s: &str) -> Result<u32, String> {
    let size = parse_byte_size(s)?;
    let size = u32::try_from(size).map_err(|_| format!("dictionary length too large: '{s}'"))?;
    Dictionary::new(size).map_err(|e| e.to_string())?;
    Ok(size)
}

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// Word-packed LZSS compressor/decompressor.
#[derive(Parser, Debug)]
#[command(
    name = "oxilzss",
    version,
    about = "LZSS compressor/decompressor",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,

    /// Force overwrite existing output files.
    #[arg(short = 'f', long, global = true)]
    force: bool,

    /// Quiet mode (suppress non-error output).
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Output stats as JSON to stderr.
    #[arg(long = "json", global = true)]
    json_output: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Compress an input file.
    Compress(CompressArgs),
    /// Decompress an input file.
    Decompress(DecompressArgs),
    /// Print the header of a compressed file.
    Header(HeaderArgs),
    /// Print build/configuration details.
    Config,
}

#[derive(Args, Debug)]
struct CompressArgs {
    /// Dictionary (window) length: power of two in 4..=16384, K suffix allowed.
    #[arg(long, short = 'd', value_parser = parse_dictionary, default_value_t = DEFAULT_DICTIONARY_LENGTH)]
    dictionary: u32,

    /// Write output to stdout.
    #[arg(short = 'c', long)]
    stdout: bool,

    /// Input file (default: stdin).
    #[arg(value_hint = ValueHint::FilePath)]
    input: Option<PathBuf>,

    /// Output file (default: stdout).
    #[arg(value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct DecompressArgs {
    /// Write output to stdout.
    #[arg(short = 'c', long)]
    stdout: bool,

    /// Compressed input file (default: stdin).
    #[arg(value_hint = ValueHint::FilePath)]
    input: Option<PathBuf>,

    /// Output file (default: stdout).
    #[arg(value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct HeaderArgs {
    /// Compressed input file.
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,
}

// ---------------------------------------------------------------------------
// Resolved command + options (flattened from Cli)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Compress,
    Decompress,
    Header,
    Config,
}

#[derive(Debug)]
struct Options {
    command: Command,
    use_stdout: bool,
    force: bool,
    quiet: bool,
    verbose: u8,
    json_output: bool,
    dictionary_length: u32,
    input_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
}

fn resolve_options(cli: Cli) -> Options {
    let mut opts = Options {
        command: Command::Config,
        use_stdout: false,
        force: cli.force,
        quiet: cli.quiet,
        verbose: cli.verbose,
        json_output: cli.json_output,
        dictionary_length: DEFAULT_DICTIONARY_LENGTH,
        input_file: None,
        output_file: None,
    };

    match cli.command {
        Cmd::Compress(args) => {
            opts.command = Command::Compress;
            opts.dictionary_length = args.dictionary;
            opts.use_stdout = args.stdout;
            opts.input_file = args.input;
            opts.output_file = args.output;
        }
        Cmd::Decompress(args) => {
            opts.command = Command::Decompress;
            opts.use_stdout = args.stdout;
            opts.input_file = args.input;
            opts.output_file = args.output;
        }
        Cmd::Header(args) => {
            opts.command = Command::Header;
            opts.input_file = Some(args.input);
        }
        Cmd::Config => {}
    }

    opts
}

#[cfg(any(test, feature = "fuzzing"))]
pub fn fuzz_try_parse_args(args: &[String]) {
    let argv: Vec<String> = std::iter::once("oxilzss".to_string())
        .chain(args.iter().cloned())
        .collect();
    if let Ok(cli) = Cli::try_parse_from(argv) {
        let opts = resolve_options(cli);
        let _ = log_filter(&opts);
    }
}

fn log_filter(opts: &Options) -> &'static str {
    match (opts.quiet, opts.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    }
}

// ---------------------------------------------------------------------------
// Input / output helpers
// ---------------------------------------------------------------------------

fn read_input(opts: &Options) -> Result<Vec<u8>, String> {
    let mut data = Vec::new();
    match &opts.input_file {
        Some(path) => {
            let mut f = File::open(path).map_err(|e| format!("input file: {}: {e}", path.display()))?;
            f.read_to_end(&mut data)
                .map_err(|e| format!("read error: {}: {e}", path.display()))?;
        }
        None => {
            io::stdin()
                .lock()
                .read_to_end(&mut data)
                .map_err(|e| format!("read error: {e}"))?;
        }
    }
    Ok(data)
}

fn write_output(opts: &Options, data: &[u8]) -> Result<(), String> {
    match (opts.use_stdout, &opts.output_file) {
        (false, Some(path)) => {
            if path.exists() && !opts.force {
                return Err(format!(
                    "output file exists, use -f to overwrite: {}",
                    path.display()
                ));
            }
            let file =
                File::create(path).map_err(|e| format!("output file: {}: {e}", path.display()))?;
            write_all(BufWriter::with_capacity(BUF_SIZE, file), data)
        }
        _ => write_all(BufWriter::with_capacity(BUF_SIZE, io::stdout().lock()), data),
    }
}

fn write_all<W: Write>(mut writer: W, data: &[u8]) -> Result<(), String> {
    writer
        .write_all(data)
        .and_then(|()| writer.flush())
        .map_err(|e| format!("write error: {e}"))
}

fn display_name(path: Option<&Path>) -> String {
    path.map_or_else(|| "(stdin)".to_string(), |p| p.display().to_string())
}

fn emit_json(value: serde_json::Value) {
    if let Ok(text) = serde_json::to_string_pretty(&value) {
        eprintln!("{text}");
    }
}

// ---------------------------------------------------------------------------
// Compress command
// ---------------------------------------------------------------------------

fn cmd_compress(opts: &Options) -> i32 {
    info!("compressing {}", display_name(opts.input_file.as_deref()));

    let input = match read_input(opts) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("oxilzss: {e}");
            return 1;
        }
    };

    let compress_opts = CompressOptions {
        dictionary_length: opts.dictionary_length,
    };
    let (output, stats) = match compress_with_stats(&input, &compress_opts) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("oxilzss: compress error: {e}");
            return 1;
        }
    };

    if let Err(e) = write_output(opts, &output) {
        eprintln!("oxilzss: {e}");
        return 1;
    }

    if opts.verbose > 0 && !opts.quiet {
        eprintln!(
            "oxilzss: compressor: input size: {}, output size: {}, strings: {}, literals: {}",
            stats.input_len, stats.output_len, stats.strings, stats.literals
        );
    }

    if opts.json_output {
        emit_json(serde_json::json!({
            "command": "compress",
            "input_size": stats.input_len,
            "output_size": stats.output_len,
            "dictionary_length": opts.dictionary_length,
            "strings": stats.strings,
            "literals": stats.literals,
            "flag_words": stats.flag_words,
            "string_words": stats.string_words,
            "byte_words": stats.byte_words,
        }));
    }

    0
}

// ---------------------------------------------------------------------------
// Decompress command
// ---------------------------------------------------------------------------

fn cmd_decompress(opts: &Options) -> i32 {
    info!("decompressing {}", display_name(opts.input_file.as_deref()));

    let input = match read_input(opts) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("oxilzss: {e}");
            return 1;
        }
    };

    let output = match decompress(&input) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("oxilzss: decompress error: {e}");
            return 1;
        }
    };

    if let Err(e) = write_output(opts, &output) {
        eprintln!("oxilzss: {e}");
        return 1;
    }

    if opts.verbose > 0 && !opts.quiet {
        eprintln!(
            "oxilzss: decompressor: input size: {}, output size: {}",
            input.len(),
            output.len()
        );
    }

    if opts.json_output {
        emit_json(serde_json::json!({
            "command": "decompress",
            "input_size": input.len(),
            "output_size": output.len(),
        }));
    }

    0
}

// ---------------------------------------------------------------------------
// Header command
// ---------------------------------------------------------------------------

fn cmd_header(opts: &Options) -> i32 {
    let Some(path) = &opts.input_file else {
        eprintln!("oxilzss: header requires an input file");
        return 1;
    };

    let mut prefix = [0u8; HEADER_LEN];
    let got = match File::open(path).and_then(|f| read_prefix(f, &mut prefix)) {
        Ok(n) => n,
        Err(e) => {
            eprintln!("oxilzss: input file: {}: {e}", path.display());
            return 1;
        }
    };

    let header = match read_header(&prefix[..got]) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("oxilzss: {}: {e}", path.display());
            return 1;
        }
    };

    println!("uncompressed length: {}", header.uncompressed_len);
    println!("dictionary length:   {}", header.dictionary_len);
    let dict = header.dictionary();
    match &dict {
        Ok(d) => {
            println!("max offset:          {}", d.max_offset());
            println!("max match:           {}", d.max_match());
        }
        Err(e) => println!("invalid dictionary:  {e}"),
    }

    if opts.json_output {
        emit_json(serde_json::json!({
            "command": "header",
            "uncompressed_length": header.uncompressed_len,
            "dictionary_length": header.dictionary_len,
            "valid": dict.is_ok(),
        }));
    }

    if dict.is_ok() { 0 } else { 1 }
}

fn read_prefix<R: Read>(reader: R, buf: &mut [u8]) -> io::Result<usize> {
    let mut n = 0;
    let mut reader = reader.take(buf.len() as u64);
    while n < buf.len() {
        let got = reader.read(&mut buf[n..])?;
        if got == 0 {
            break;
        }
        n += got;
    }
    Ok(n)
}

// ---------------------------------------------------------------------------
// Config command
// ---------------------------------------------------------------------------

fn cmd_config() -> i32 {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!("oxilzss version {version} (Rust)");

    let file_io = cfg!(feature = "file-io") as u8;
    let ptr_size = std::mem::size_of::<*const ()>();

    eprintln!("FILE_IO={file_io}");
    eprintln!("DEFAULT_DICTIONARY_LENGTH={DEFAULT_DICTIONARY_LENGTH}");
    eprintln!("MIN_DICTIONARY_LENGTH={MIN_DICTIONARY_LENGTH}");
    eprintln!("MAX_DICTIONARY_LENGTH={MAX_DICTIONARY_LENGTH}");
    eprintln!("NATIVE_ENDIAN={}", if cfg!(target_endian = "little") { "little" } else { "big" });
    eprintln!("sizeof(usize)={ptr_size}");

    0
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run() -> ! {
    let cli = Cli::parse();
    let opts = resolve_options(cli);

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_filter(&opts)))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let exit_code = match opts.command {
        Command::Compress => cmd_compress(&opts),
        Command::Decompress => cmd_decompress(&opts),
        Command::Header => cmd_header(&opts),
        Command::Config => cmd_config(),
    };

    process::exit(exit_code);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
