#![allow(missing_docs)]

#[cfg(test)]
mod live;

use rstest::rstest;

#[rstest]
fn fixtures(#[files("fixtures/*.trace")] file: std::path::PathBuf) {
    use codelocation::Denylist;
    use std::fs;

    let file_name = file.file_stem().unwrap().to_string_lossy().into_owned();

    let source = fs::read_to_string(&file).expect("failed to read file");

    let (header, trace) = source.split_once('\n').expect("fixture is empty");

    let (preset, skip) = header
        .strip_prefix("-- prune ")
        .and_then(|args| args.split_once(' '))
        .expect("expected fixture to begin with `-- prune <preset> <skip>`");

    let denylist = match preset {
        "go" => Denylist::go(),
        "rust" => Denylist::rust(),
        "none" => Denylist::new(),
        _ => panic!("unknown preset `{preset}`"),
    };

    let skip = skip.trim().parse::<usize>().expect("invalid skip");

    let trace = trace.strip_suffix('\n').unwrap_or(trace);

    let pruned = codelocation::prune_with(trace, skip, &denylist);

    insta::with_settings!({
        snapshot_path => format!("{}/snapshots", env!("CARGO_MANIFEST_DIR")),
        prepend_module_to_snapshot => false,
    }, {
        insta::assert_snapshot!(file_name, pruned);
    });
}
