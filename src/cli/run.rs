use std::path::PathBuf;
use std::time::Duration;

use eyre::{Result, WrapErr, bail, eyre};

use crate::checklist;
use crate::patch::{self, AppendRequest, PatchOutcome, PatchRequest};
use crate::plan;
use crate::probe::{self, ProbeRequest};

const USAGE: &str = "\
mend — idempotent fixups for source trees

Usage:
  mend insert <file> --anchor <text> (--text <block> | --text-file <path>) [--marker <text>]
  mend append <file> KEY=VALUE
  mend apply <plan.json>
  mend check <file> <needle> [<needle> ...]
  mend probe <METHOD> <url> [--body <json>] [--expect <status>] [--timeout <secs>]
  mend help
  mend version

insert splices the block before the last occurrence of the anchor, once:
re-running is a no-op while the marker (default: the block itself) is present.
append adds the line unless the key already occurs; missing files are skipped.
apply runs every step of a JSON plan in order; a failed step never aborts the
rest, each is reported on its own line.
check greps a file for each needle and prints one PASS/FAIL line per needle.
probe fires a single HTTP request and reports status and body; no retries.
";

/// CLI entrypoint: dispatch on the first positional argument.
pub async fn run() -> Result<()> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        print!("{USAGE}");
        return Ok(());
    }

    let command = args.remove(0);
    match command.as_str() {
        "insert" => run_insert(args),
        "append" => run_append(args),
        "apply" => run_apply(args),
        "check" => run_check(args),
        "probe" => run_probe(args).await,
        "help" | "--help" | "-h" => {
            print!("{USAGE}");
            Ok(())
        }
        "version" | "--version" => {
            println!("mend {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => bail!("unknown command {other:?}; try `mend help`"),
    }
}

/// Pull `--name <value>` out of `args`, leaving positionals in place.
fn take_flag(args: &mut Vec<String>, name: &str) -> Result<Option<String>> {
    let Some(i) = args.iter().position(|a| a == name) else {
        return Ok(None);
    };
    if i + 1 >= args.len() {
        bail!("{name} requires a value");
    }
    let value = args.remove(i + 1);
    args.remove(i);
    Ok(Some(value))
}

fn take_single_positional(args: Vec<String>, what: &str) -> Result<String> {
    let mut args = args;
    if args.len() != 1 {
        bail!("expected exactly one {what}, got {}", args.len());
    }
    Ok(args.remove(0))
}

fn print_outcome(outcome: PatchOutcome, target: &str) {
    match outcome {
        PatchOutcome::Applied => println!("applied: {target}"),
        PatchOutcome::AlreadyApplied => println!("already applied: {target}"),
        PatchOutcome::Skipped => println!("skipped (no such file): {target}"),
    }
}

fn run_insert(mut args: Vec<String>) -> Result<()> {
    let anchor = take_flag(&mut args, "--anchor")?.ok_or_else(|| eyre!("insert requires --anchor"))?;
    let text = take_flag(&mut args, "--text")?;
    let text_file = take_flag(&mut args, "--text-file")?;
    let marker = take_flag(&mut args, "--marker")?;
    let target = take_single_positional(args, "target file")?;

    let insertion = match (text, text_file) {
        (Some(block), None) => block,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .wrap_err_with(|| format!("reading insertion text from {path}"))?
            .trim_end_matches('\n')
            .to_string(),
        _ => bail!("insert requires exactly one of --text or --text-file"),
    };
    // Without an explicit marker the whole block identifies itself.
    let marker = marker.unwrap_or_else(|| insertion.clone());

    let request = PatchRequest {
        target: PathBuf::from(&target),
        anchor,
        marker,
        insertion,
    };
    let outcome = patch::insert_before_anchor(&request)?;
    print_outcome(outcome, &target);
    Ok(())
}

fn run_append(mut args: Vec<String>) -> Result<()> {
    if args.len() != 2 {
        bail!("append requires <file> KEY=VALUE");
    }
    let line = args.remove(1);
    let target = args.remove(0);
    let Some((key, _)) = line.split_once('=') else {
        bail!("expected KEY=VALUE, got {line:?}");
    };

    let request = AppendRequest {
        target: PathBuf::from(&target),
        key: key.to_string(),
        line: line.clone(),
    };
    let outcome = patch::append_line_if_absent(&request)?;
    print_outcome(outcome, &target);
    Ok(())
}

fn run_apply(args: Vec<String>) -> Result<()> {
    let path = PathBuf::from(take_single_positional(args, "plan file")?);
    let plan = plan::load(&path)?;
    let reports = plan::execute(&plan);

    let mut applied = 0usize;
    for report in &reports {
        match &report.result {
            Ok(outcome) => {
                if *outcome == PatchOutcome::Applied {
                    applied += 1;
                }
                print_outcome(*outcome, &report.label);
            }
            Err(e) => println!("failed: {}: {e}", report.label),
        }
    }
    println!("{applied}/{} steps applied", reports.len());
    Ok(())
}

fn run_check(mut args: Vec<String>) -> Result<()> {
    if args.len() < 2 {
        bail!("check requires <file> and at least one needle");
    }
    let target = PathBuf::from(args.remove(0));
    let outcomes = checklist::run_checks(&target, &args)?;
    print!("{}", checklist::render(&outcomes));
    Ok(())
}

async fn run_probe(mut args: Vec<String>) -> Result<()> {
    let body = take_flag(&mut args, "--body")?
        .map(|raw| serde_json::from_str(&raw))
        .transpose()
        .wrap_err("parsing --body as JSON")?;
    let expect = take_flag(&mut args, "--expect")?
        .map(|s| s.parse::<u16>())
        .transpose()
        .wrap_err("--expect must be a status code")?
        .unwrap_or(200);
    let timeout = take_flag(&mut args, "--timeout")?
        .map(|s| s.parse::<u64>())
        .transpose()
        .wrap_err("--timeout must be whole seconds")?
        .unwrap_or(10);

    if args.len() != 2 {
        bail!("probe requires <METHOD> <url>");
    }
    let url = args.remove(1);
    let method: reqwest::Method = args[0]
        .to_ascii_uppercase()
        .parse()
        .map_err(|_| eyre!("unsupported method {:?}", args[0]))?;

    let client = probe::client(Duration::from_secs(timeout))?;
    let request = ProbeRequest {
        method,
        url: url.clone(),
        body,
        expect,
    };
    let outcome = probe::fire(&client, &request).await;

    match outcome.status {
        Some(status) => {
            let verdict = if outcome.passed(request.expect) {
                "PASS"
            } else {
                "FAIL"
            };
            println!("{verdict} {status} {url}");
            if !outcome.data.is_null() {
                println!("{}", outcome.data);
            }
        }
        None => {
            let reason = outcome.error.as_deref().unwrap_or("unknown transport error");
            println!("FAIL - {url}: {reason}");
        }
    }
    Ok(())
}
