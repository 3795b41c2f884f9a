mod args;
mod config;

use anyhow::Context;
use args::Args;
use clap::Parser;
use codelocation::Denylist;
use std::{
    fs,
    io::{self, Read},
    path::Path,
    process::ExitCode,
};

fn main() -> ExitCode {
    env_logger::init();

    let result = run();

    if let Err(error) = &result {
        eprintln!("error: {error:#}");
    }

    ExitCode::from(exit_status(&result))
}

fn exit_status(result: &anyhow::Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

fn run() -> anyhow::Result<()> {
    let args = Args::parse();

    let output = execute(&args, io::stdin().lock())?;

    if !output.is_empty() {
        println!("{output}");
    }

    Ok(())
}

/// Produce everything `prunestack` prints for `args`, reading the trace from
/// `stdin` if no file is given.
fn execute(args: &Args, stdin: impl Read) -> anyhow::Result<String> {
    let denylist = config::denylist(args)?;

    if args.print_denylist {
        return Ok(serde_json::to_string_pretty(&denylist.patterns())?);
    }

    let trace = read_trace(args.path.as_deref(), stdin)?;

    Ok(prune_input(&trace, args.skip, &denylist))
}

fn read_trace(path: Option<&Path>, mut stdin: impl Read) -> anyhow::Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut trace = String::new();
            stdin
                .read_to_string(&mut trace)
                .context("failed to read stdin")?;

            Ok(trace)
        }
    }
}

fn prune_input(input: &str, skip: usize, denylist: &Denylist) -> String {
    // A trailing newline ends the last line rather than starting a new one
    let trace = input.strip_suffix('\n').unwrap_or(input);

    codelocation::prune_with(trace, skip, denylist)
}

#[cfg(test)]
mod tests {
    use super::*;
    use codelocation::PatternConfig;
    use tempdir::TempDir;

    const TRACE: &str = "pkgA.Fn\n/app/a.go:10\nginkgo/runner.go_call\n/go/src/ginkgo/runner.go:55\npkgB.Fn\n/app/b.go:20\n";

    fn args(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("prunestack").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_strips_one_trailing_newline() {
        // Six lines, so `--skip 2` has nothing to skip; counting an empty
        // seventh line would skip everything
        assert_eq!(
            prune_input(TRACE, 2, &Denylist::go()),
            "pkgA.Fn\n/app/a.go:10\npkgB.Fn\n/app/b.go:20"
        );
        assert_eq!(
            prune_input(TRACE, 2, &Denylist::go()),
            prune_input(TRACE.trim_end(), 2, &Denylist::go())
        );
    }

    #[test]
    fn test_reads_stdin() {
        for args in [args(&[]), args(&["-"])] {
            let output = execute(&args, TRACE.as_bytes()).unwrap();
            assert_eq!(output, "pkgB.Fn\n/app/b.go:20");
        }
    }

    #[test]
    fn test_reads_file() {
        let dir = TempDir::new("prunestack").unwrap();
        let path = dir.path().join("failure.trace");
        fs::write(&path, TRACE).unwrap();

        let args = args(&[path.to_str().unwrap(), "--skip", "2"]);

        // The file wins over stdin
        let output = execute(&args, "unused\nunused\n".as_bytes()).unwrap();
        assert_eq!(output, "pkgA.Fn\n/app/a.go:10\npkgB.Fn\n/app/b.go:20");
    }

    #[test]
    fn test_missing_file_fails() {
        let args = args(&["/nonexistent/failure.trace"]);

        let result = execute(&args, io::empty()).map(|_| ());

        let error = result.as_ref().unwrap_err();
        assert!(
            format!("{error:#}").contains("failed to read /nonexistent/failure.trace"),
            "{error:#}"
        );
        assert_eq!(exit_status(&result), 1);
        assert_eq!(exit_status(&Ok(())), 0);
    }

    #[test]
    fn test_print_denylist() {
        let args = args(&["--print-denylist", "--preset", "rust"]);

        let output = execute(&args, io::empty()).unwrap();

        let patterns: Vec<PatternConfig> = serde_json::from_str(&output).unwrap();
        assert_eq!(patterns, Denylist::rust().patterns());
    }
}
