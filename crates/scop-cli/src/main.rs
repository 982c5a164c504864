mod cli;

use anyhow::Context;
use clap::Parser;
use log::debug;

use crate::cli::{Cli, Command, CyclesArgs, ElementArg, EmitArgs, GlobalOpts, MatmulArgs};
use scop_deps::{analyze_file, Toolchain, VariableReport};
use scop_kernel::{run_config, scop, Element, MatmulConfig, DEFAULT_DIM};

// -v => debug, -vv => trace; RUST_LOG still wins when set.
fn setup_logging(level: u8) {
    let level = match level {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init();
}

fn run_matmul<T: Element>(config: &MatmulConfig, print: bool) -> anyhow::Result<()> {
    let ws = run_config::<T>(config)?;
    if print {
        print!("{}", ws.c());
    }
    Ok(())
}

pub fn run_matmul_cmd(cmd: MatmulArgs, globals: &GlobalOpts) -> anyhow::Result<()> {
    let config = MatmulConfig {
        dim: cmd.dim,
        kernel: cmd.kernel,
        init: cmd.init_policy(),
        tile: cmd.tile,
        threads: globals.threads,
        verify: cmd.verify,
    };
    debug!("scop matmul: {:?} ({:?})", config, cmd.element);

    match cmd.element {
        ElementArg::I16 => run_matmul::<i16>(&config, cmd.print),
        ElementArg::I32 => run_matmul::<i32>(&config, cmd.print),
        ElementArg::I64 => run_matmul::<i64>(&config, cmd.print),
    }
}

/// Compute the product of two zeroed `dim x dim` matrices and report nothing.
pub fn run_default_cmd(globals: &GlobalOpts, dim: usize) -> anyhow::Result<()> {
    let config = MatmulConfig {
        dim,
        threads: globals.threads,
        ..Default::default()
    };
    run_config::<i32>(&config)?;
    Ok(())
}

pub fn run_emit_cmd(cmd: EmitArgs) -> anyhow::Result<()> {
    anyhow::ensure!(cmd.dim > 0, "dimension must be at least 1");
    let src = scop::emit_c_source(cmd.dim);
    match &cmd.output {
        Some(path) => std::fs::write(path, src)
            .with_context(|| format!("writing {}", path.display()))?,
        None => print!("{}", src),
    }
    Ok(())
}

pub fn run_cycles_cmd(cmd: CyclesArgs) -> anyhow::Result<()> {
    debug!("scop cycles: {:#?}", &cmd);
    let reports: Vec<VariableReport> = if cmd.candl_output {
        analyze_file(&cmd.source)
            .with_context(|| format!("reading candl output {}", cmd.source.display()))?
    } else {
        Toolchain::new(cmd.clan, cmd.candl).check_source(&cmd.source)?
    };

    for report in &reports {
        print!("{}", report);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.g.verbose);

    match cli.command {
        Some(Command::Matmul(cmd)) => run_matmul_cmd(cmd, &cli.g),
        Some(Command::Emit(cmd)) => run_emit_cmd(cmd),
        Some(Command::Cycles(cmd)) => run_cycles_cmd(cmd),
        None => run_default_cmd(&cli.g, DEFAULT_DIM),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::cli::InitArg;

    use clap::CommandFactory;
    use scop_kernel::{InitPolicy, KernelKind};
    use std::path::Path;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments() {
        let cli = Cli::try_parse_from(["scop"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.g.verbose, 0);
        assert_eq!(cli.g.threads, None);
    }

    #[test]
    fn test_run_default_small() {
        let cli = Cli::try_parse_from(["scop"]).unwrap();
        run_default_cmd(&cli.g, 8).unwrap();
    }

    #[test]
    fn test_run_default_rejects_zero_dim() {
        let cli = Cli::try_parse_from(["scop"]).unwrap();
        assert!(run_default_cmd(&cli.g, 0).is_err());
    }

    #[test]
    fn test_matmul_defaults() {
        let cli = Cli::try_parse_from(["scop", "matmul"]).unwrap();
        let Some(Command::Matmul(cmd)) = cli.command else {
            panic!("expected matmul");
        };
        assert_eq!(cmd.dim, 1024);
        assert_eq!(cmd.kernel, KernelKind::Reference);
        assert_eq!(cmd.init, InitArg::Zero);
        assert_eq!(cmd.element, ElementArg::I32);
        assert_eq!(cmd.init_policy(), InitPolicy::Zero);
        assert!(!cmd.verify && !cmd.print);
    }

    #[test]
    fn test_matmul_options() {
        let cli = Cli::try_parse_from([
            "scop", "-vv", "matmul", "--dim", "16", "--kernel", "Tiled", "--init", "random",
            "--seed", "3", "--bound", "9", "--element", "i64", "--verify", "-t", "2",
        ])
        .unwrap();
        assert_eq!(cli.g.verbose, 2);
        assert_eq!(cli.g.threads, Some(2));
        let Some(Command::Matmul(cmd)) = cli.command else {
            panic!("expected matmul");
        };
        assert_eq!(cmd.dim, 16);
        assert_eq!(cmd.kernel, KernelKind::Tiled);
        assert_eq!(cmd.element, ElementArg::I64);
        assert_eq!(cmd.init_policy(), InitPolicy::Random { seed: 3, bound: 9 });
        assert!(cmd.verify);
    }

    #[test]
    fn test_unknown_kernel_rejected() {
        assert!(Cli::try_parse_from(["scop", "matmul", "--kernel", "strassen"]).is_err());
    }

    #[test]
    fn test_cycles_defaults() {
        let cli = Cli::try_parse_from(["scop", "cycles", "mm.c"]).unwrap();
        let Some(Command::Cycles(cmd)) = cli.command else {
            panic!("expected cycles");
        };
        assert_eq!(cmd.source, Path::new("mm.c"));
        assert!(!cmd.candl_output);
        assert_eq!(cmd.clan, Path::new("../clan/clan"));
        assert_eq!(cmd.candl, Path::new("../candl/candl"));
    }

    #[test]
    fn test_cycles_requires_source() {
        assert!(Cli::try_parse_from(["scop", "cycles"]).is_err());
    }

    #[test]
    fn test_run_matmul_verifies_small_product() {
        let cli = Cli::try_parse_from([
            "scop", "matmul", "-n", "12", "--kernel", "parallel", "--init", "pattern", "--verify",
        ])
        .unwrap();
        let Some(Command::Matmul(cmd)) = cli.command else {
            panic!("expected matmul");
        };
        run_matmul_cmd(cmd, &cli.g).unwrap();
    }

    #[test]
    fn test_run_matmul_rejects_zero_dim() {
        let cli = Cli::try_parse_from(["scop", "matmul", "-n", "0"]).unwrap();
        let Some(Command::Matmul(cmd)) = cli.command else {
            panic!("expected matmul");
        };
        assert!(run_matmul_cmd(cmd, &cli.g).is_err());
    }

    #[test]
    fn test_emit_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("mm.c");
        run_emit_cmd(EmitArgs {
            dim: 8,
            output: Some(out.clone()),
        })
        .unwrap();
        let src = std::fs::read_to_string(&out).unwrap();
        assert!(src.contains("#pragma scop"));
        assert!(src.contains("#pragma endscop"));
    }

    #[test]
    fn test_emit_rejects_zero_dim() {
        assert!(run_emit_cmd(EmitArgs {
            dim: 0,
            output: None
        })
        .is_err());
    }

    #[test]
    fn test_run_cycles_on_candl_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mm.c.candl");
        std::fs::write(
            &path,
            "S1 -> S1 [label=\" RAW depth 1, ref 0->1 var x->x\"];\n",
        )
        .unwrap();
        let cli = Cli::try_parse_from([
            "scop",
            "cycles",
            "--candl-output",
            path.to_str().unwrap(),
        ])
        .unwrap();
        let Some(Command::Cycles(cmd)) = cli.command else {
            panic!("expected cycles");
        };
        run_cycles_cmd(cmd).unwrap();
    }
}
