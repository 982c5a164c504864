use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use scop_kernel::{InitPolicy, KernelKind, DEFAULT_DIM};

#[derive(Parser, Debug)]
#[command(
    name = "scop",
    version = env!("CARGO_PKG_VERSION"),
    about = "Matrix multiplication around a polyhedral region, plus a dependence-cycle checker."
)]
pub struct Cli {
    #[command(flatten)]
    pub g: GlobalOpts,

    /// Without a command, multiply two zeroed 1024x1024 matrices and exit.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Args, Debug)]
pub struct GlobalOpts {
    // verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(short = 't', long, global = true, help = "Worker threads for the parallel kernel")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one multiplication
    Matmul(MatmulArgs),
    /// Write the annotated C kernel for Clan
    Emit(EmitArgs),
    /// Report dependence cycles of a C source (or an existing Candl output)
    Cycles(CyclesArgs),
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum InitArg {
    Zero,
    Pattern,
    Random,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum ElementArg {
    I16,
    #[value(alias = "int")]
    I32,
    I64,
}

#[derive(Args, Debug)]
pub struct MatmulArgs {
    /// Edge length of A, B and C
    #[arg(short = 'n', long, default_value_t = DEFAULT_DIM)]
    pub dim: usize,

    /// reference | interchanged | tiled | parallel
    #[arg(short, long, default_value = "reference")]
    pub kernel: KernelKind,

    #[arg(long, value_enum, default_value = "zero")]
    pub init: InitArg,

    /// Modulus for `--init pattern`
    #[arg(long, default_value_t = 7)]
    pub modulus: u32,

    /// Seed for `--init random`
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Values of `--init random` fall in [-bound, bound]
    #[arg(long, default_value_t = 100)]
    pub bound: u32,

    /// Tile edge for the tiled kernel
    #[arg(long, default_value_t = 32)]
    pub tile: usize,

    #[arg(short, long, value_enum, default_value = "i32")]
    pub element: ElementArg,

    /// Check C against the definition of the product
    #[arg(long)]
    pub verify: bool,

    /// Print C to stdout
    #[arg(long)]
    pub print: bool,
}

impl MatmulArgs {
    pub fn init_policy(&self) -> InitPolicy {
        match self.init {
            InitArg::Zero => InitPolicy::Zero,
            InitArg::Pattern => InitPolicy::Pattern {
                modulus: self.modulus,
            },
            InitArg::Random => InitPolicy::Random {
                seed: self.seed,
                bound: self.bound,
            },
        }
    }
}

#[derive(Args, Debug)]
pub struct EmitArgs {
    #[arg(short = 'n', long, default_value_t = DEFAULT_DIM)]
    pub dim: usize,

    // write to a file instead of stdout
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CyclesArgs {
    /// C source with a `#pragma scop` region
    #[arg(value_name = "SOURCE", value_hint = clap::ValueHint::FilePath)]
    pub source: PathBuf,

    /// SOURCE is already Candl output; skip Clan and Candl
    #[arg(long)]
    pub candl_output: bool,

    #[arg(long, value_name = "PATH", default_value = scop_deps::pipeline::DEFAULT_CLAN)]
    pub clan: PathBuf,

    #[arg(long, value_name = "PATH", default_value = scop_deps::pipeline::DEFAULT_CANDL)]
    pub candl: PathBuf,
}
