use anyhow::{Context, Result, bail};
use ngflow_config::{BlockConfig, BlockDefinitionTable, DefinitionProvider};
use ngflow_engine::{BlockRole, ChainResolver, inspect};
use ngflow_syntax::{AstNode, Root, parse};
use std::{env, fmt::Write as _, path::PathBuf, process};

struct Args {
    config_path: Option<PathBuf>,
    template_path: PathBuf,
}

impl Args {
    fn parse(args: &[String]) -> Option<Self> {
        match args {
            [_, template] => Some(Self {
                config_path: None,
                template_path: PathBuf::from(template),
            }),
            [_, flag, config, template] if flag == "--config" => Some(Self {
                config_path: Some(PathBuf::from(config)),
                template_path: PathBuf::from(template),
            }),
            _ => None,
        }
    }
}

/// Definitions from an explicit config file (which must exist), or from
/// the default config location, falling back to the built-ins.
fn load_definitions(config_path: Option<PathBuf>) -> Result<DefinitionProvider> {
    let path = match config_path {
        Some(path) => {
            let path = BlockConfig::expand_path(&path).unwrap_or(path);
            if !path.exists() {
                bail!("Config file '{}' not found", path.display());
            }
            path
        }
        None => {
            let path = BlockConfig::config_path();
            if !path.exists() {
                log::info!("No config at {}, using built-in blocks", path.display());
            }
            path
        }
    };
    Ok(DefinitionProvider::from_config_file(&path)?)
}

fn role_label(role: BlockRole) -> &'static str {
    match role {
        BlockRole::Primary => "primary",
        BlockRole::Secondary => "secondary",
        BlockRole::Standalone => "standalone",
        BlockRole::Unknown => "unknown",
    }
}

/// One line per block, then one line per diagnostic. Returns the report
/// and the number of diagnostics.
fn report(source: &str, table: &BlockDefinitionTable) -> Result<(String, usize)> {
    let tree = parse(source);
    let root = Root::cast(tree).context("Parser did not produce a document root")?;
    let resolver = ChainResolver::new(table);
    let mut out = String::new();

    for block in root.blocks() {
        let role = resolver.role(&block);
        let chain = match role {
            BlockRole::Primary | BlockRole::Secondary => resolver
                .chain(&block)?
                .iter()
                .map(|b| format!("@{}", b.name()))
                .collect::<Vec<_>>()
                .join(" > "),
            BlockRole::Standalone | BlockRole::Unknown => "-".to_string(),
        };
        writeln!(
            out,
            "@{} {:?} {} {}",
            block.name(),
            block.syntax().text_range(),
            role_label(role),
            chain
        )?;
    }

    let diagnostics = inspect(&root, table);
    for diagnostic in &diagnostics {
        writeln!(out, "{:?}: {}", diagnostic.range, diagnostic)?;
    }

    Ok((out, diagnostics.len()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();

    let args: Vec<String> = env::args().collect();
    let Some(args) = Args::parse(&args) else {
        eprintln!(
            "Usage: {} [--config <blocks.toml>] <template>",
            env::args().next().unwrap_or_else(|| "ngflow-cli".to_string())
        );
        process::exit(2);
    };

    let table = load_definitions(args.config_path)?.table();
    log::debug!("Loaded {} block definitions", table.len());

    let source = std::fs::read_to_string(&args.template_path)
        .with_context(|| format!("Failed to read '{}'", args.template_path.display()))?;

    let (out, diagnostic_count) = report(&source, &table)?;
    print!("{out}");

    if diagnostic_count > 0 {
        process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_template_only() {
        let parsed = Args::parse(&args(&["ngflow-cli", "page.html"])).unwrap();
        assert_eq!(parsed.template_path, PathBuf::from("page.html"));
        assert!(parsed.config_path.is_none());
    }

    #[test]
    fn parses_config_flag() {
        let parsed =
            Args::parse(&args(&["ngflow-cli", "--config", "b.toml", "page.html"])).unwrap();
        assert_eq!(parsed.config_path, Some(PathBuf::from("b.toml")));
        assert_eq!(parsed.template_path, PathBuf::from("page.html"));
    }

    #[test]
    fn rejects_bad_usage() {
        assert!(Args::parse(&args(&["ngflow-cli"])).is_none());
        assert!(Args::parse(&args(&["ngflow-cli", "--cfg", "b.toml", "page.html"])).is_none());
    }

    #[test]
    fn report_lists_blocks_and_diagnostics() {
        let source = "@if (a) {} @else {}\n@switch (x) { @case (1) {} }\n@empty {}\n@bogus";
        let (out, count) = report(source, &BlockDefinitionTable::angular()).unwrap();

        assert_eq!(count, 2);
        assert_snapshot!(out, @r"
        @if 0..10 primary @if > @else
        @else 11..19 secondary @if > @else
        @switch 20..48 standalone -
        @case 34..46 standalone -
        @empty 49..58 secondary @empty
        @bogus 59..65 unknown -
        49..55: @empty does not follow the block it continues
        59..65: unknown block @bogus
        ");
    }

    #[test]
    fn explicit_config_must_exist() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.toml");

        let err = load_definitions(Some(missing)).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn explicit_config_is_used() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("blocks.toml");
        std::fs::write(
            &config_file,
            "builtin = false\n\n[[block]]\nname = \"unless\"\nprimary = true\n",
        )
        .unwrap();

        let table = load_definitions(Some(config_file)).unwrap().table();
        assert_eq!(table.len(), 1);
        assert!(table.get("unless").is_some());
    }
}
