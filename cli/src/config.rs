use crate::args::{Args, Preset};
use anyhow::Context;
use codelocation::{Denylist, PatternConfig};
use std::{fs, path::Path};

pub fn denylist(args: &Args) -> anyhow::Result<Denylist> {
    let preset = match args.preset {
        Preset::Go => Denylist::go(),
        Preset::Rust => Denylist::rust(),
    };

    let Some(path) = &args.denylist else {
        return Ok(preset);
    };

    let custom = load_denylist(path)?;

    Ok(if args.extend {
        preset.extend(custom)
    } else {
        custom
    })
}

fn load_denylist(path: &Path) -> anyhow::Result<Denylist> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read denylist {}", path.display()))?;

    parse_denylist(&json).with_context(|| format!("invalid denylist {}", path.display()))
}

pub fn parse_denylist(json: &str) -> anyhow::Result<Denylist> {
    let patterns: Vec<PatternConfig> = serde_json::from_str(json)?;
    log::debug!("loaded {} denylist patterns", patterns.len());

    Ok(Denylist::from_patterns(patterns)?)
}
