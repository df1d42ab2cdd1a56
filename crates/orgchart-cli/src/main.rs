//! CLI binary for orgchart: decompose a unit/role hierarchy into paths,
//! groups, roots and ranks.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use orgchart_core::builder::GraphBuilder;
use orgchart_core::config::OrgConfig;
use orgchart_core::decompose::Decomposition;
use orgchart_core::layout::Layout;
use orgchart_core::model::{Hierarchy, NodeIdx, NodeKind};
use orgchart_core::rank::RankStrategy;
use orgchart_core::source::Strict;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "orgchart", about = "Organizational hierarchy decomposer")]
struct Cli {
    /// Project root directory holding `.orgchart/config.toml` (defaults to current directory)
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    /// Reject documents with empty ids or relation-less subjects
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show hierarchy and decomposition statistics
    Info {
        /// Hierarchy document (JSON)
        document: PathBuf,
    },

    /// List every root-ward path
    Paths {
        /// Hierarchy document (JSON)
        document: PathBuf,
    },

    /// List the nodes of each group
    Groups {
        /// Hierarchy document (JSON)
        document: PathBuf,
    },

    /// List root candidates per group
    Roots {
        /// Hierarchy document (JSON)
        document: PathBuf,
    },

    /// Rank nodes and print them in (group, rank) order
    Rank {
        /// Hierarchy document (JSON)
        document: PathBuf,

        /// Ranking strategy: short, long (defaults to config)
        #[arg(short, long)]
        strategy: Option<String>,
    },

    /// Write the ranked layout snapshot as JSON
    Export {
        /// Hierarchy document (JSON)
        document: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Ranking strategy: short, long (defaults to config)
        #[arg(short, long)]
        strategy: Option<String>,
    },
}

fn get_project_root(cli: &Cli) -> Result<PathBuf> {
    match &cli.project {
        Some(p) => Ok(p.clone()),
        None => std::env::current_dir().context("failed to get current directory"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let project_root = get_project_root(&cli)?;
    let config = OrgConfig::load(&project_root)?;
    let strict = cli.strict;

    match cli.command {
        Commands::Info { document } => {
            let (hierarchy, decomposition) = load(&config, &document, strict)?;
            cmd_info(&hierarchy, &decomposition);
        }
        Commands::Paths { document } => {
            let (hierarchy, decomposition) = load(&config, &document, strict)?;
            cmd_paths(&hierarchy, &decomposition);
        }
        Commands::Groups { document } => {
            let (hierarchy, decomposition) = load(&config, &document, strict)?;
            cmd_groups(&hierarchy, &decomposition);
        }
        Commands::Roots { document } => {
            let (hierarchy, decomposition) = load(&config, &document, strict)?;
            cmd_roots(&hierarchy, &decomposition);
        }
        Commands::Rank { document, strategy } => {
            let strategy = parse_strategy(strategy.as_deref(), &config)?;
            let (hierarchy, mut decomposition) = load(&config, &document, strict)?;
            cmd_rank(&hierarchy, &mut decomposition, strategy)?;
        }
        Commands::Export {
            document,
            output,
            strategy,
        } => {
            let strategy = parse_strategy(strategy.as_deref(), &config)?;
            let (hierarchy, mut decomposition) = load(&config, &document, strict)?;
            cmd_export(&hierarchy, &mut decomposition, strategy, output.as_deref())?;
        }
    }

    Ok(())
}

fn parse_strategy(arg: Option<&str>, config: &OrgConfig) -> Result<RankStrategy> {
    match arg {
        Some(s) => s.parse().map_err(|e: String| anyhow::anyhow!(e)),
        None => Ok(config.decompose.rank_strategy),
    }
}

/// Read, build and decompose a hierarchy document.
fn load(config: &OrgConfig, document: &Path, strict: bool) -> Result<(Hierarchy, Decomposition)> {
    let doc = orgchart_core::document::load(document)?;
    tracing::debug!(
        "loaded {}: {} units, {} roles, {} subjects",
        document.display(),
        doc.unit.len(),
        doc.role.len(),
        doc.subjects.len()
    );
    let mut builder = GraphBuilder::new(config.layout.clone());
    if strict {
        builder = builder.with_validator(Strict);
    }
    let hierarchy = builder
        .build(&doc)
        .with_context(|| format!("failed to build hierarchy from {}", document.display()))?;
    let decomposition = Decomposition::new(&hierarchy, &config.decompose);
    Ok((hierarchy, decomposition))
}

fn label(hierarchy: &Hierarchy, node: NodeIdx) -> String {
    let n = hierarchy.node(node);
    format!("{}:{}", n.kind, n.id)
}

fn cmd_info(hierarchy: &Hierarchy, decomposition: &Decomposition) {
    println!("Units: {}", hierarchy.nodes_of_kind(NodeKind::Unit).count());
    println!("Roles: {}", hierarchy.nodes_of_kind(NodeKind::Role).count());
    println!("Subjects: {}", hierarchy.subjects.len());
    println!("Skills: {}", hierarchy.skills.len());
    println!("Max subjects per node: {}", hierarchy.max_subject_count);
    println!();
    println!("Paths: {}", decomposition.paths.len());
    println!("Groups: {}", decomposition.groups.count);
    println!("Roots: {}", decomposition.roots.len());
    let longest = decomposition.paths.iter().map(|p| p.len()).max().unwrap_or(0);
    println!("Longest path: {}", longest);
}

fn cmd_paths(hierarchy: &Hierarchy, decomposition: &Decomposition) {
    for (path, group) in decomposition
        .paths
        .iter()
        .zip(&decomposition.groups.path_group)
    {
        let ids: Vec<&str> = path
            .nodes
            .iter()
            .map(|&n| hierarchy.node(n).id.as_str())
            .collect();
        println!("[{}] {}", group, ids.join(" -> "));
    }
}

fn cmd_groups(hierarchy: &Hierarchy, decomposition: &Decomposition) {
    for (group, members) in decomposition.groups.members().iter().enumerate() {
        let labels: Vec<String> = members
            .iter()
            .map(|&n| label(hierarchy, NodeIdx(n)))
            .collect();
        println!("Group {} ({} nodes): {}", group, members.len(), labels.join(", "));
    }
}

fn cmd_roots(hierarchy: &Hierarchy, decomposition: &Decomposition) {
    for group in 0..decomposition.groups.count {
        let roots: Vec<String> = decomposition
            .roots_of(group)
            .map(|n| label(hierarchy, n))
            .collect();
        println!("Group {}: {}", group, roots.join(", "));
    }
}

fn cmd_rank(
    hierarchy: &Hierarchy,
    decomposition: &mut Decomposition,
    strategy: RankStrategy,
) -> Result<()> {
    let order = decomposition.rank(strategy)?.to_vec();
    for node in order {
        let rank = decomposition
            .rank_of(node)
            .map_or_else(|| "-".to_string(), |r| r.to_string());
        println!(
            "{}\t{}\t{}",
            decomposition.group_of(node),
            rank,
            label(hierarchy, node)
        );
    }
    Ok(())
}

fn cmd_export(
    hierarchy: &Hierarchy,
    decomposition: &mut Decomposition,
    strategy: RankStrategy,
    output: Option<&Path>,
) -> Result<()> {
    decomposition.rank(strategy)?;
    let layout = Layout::new(hierarchy, decomposition);
    match output {
        Some(path) => {
            orgchart_core::storage::save_layout(path, &layout)?;
            eprintln!("Wrote layout for {} nodes to {}", layout.nodes.len(), path.display());
        }
        None => println!("{}", orgchart_core::storage::to_json(&layout)?),
    }
    Ok(())
}
