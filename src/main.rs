use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use blockforge::{
    generate_html, Block, BlockType, JsonFileStore, Project, ProjectDraft, ProjectStore,
};

#[derive(Parser)]
#[command(name = "blockforge", version, about = "Render typed page blocks to HTML")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a JSON block list (or a full project record) to an HTML document
    Render {
        /// Path to the JSON input
        input: PathBuf,
        /// Write the document here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Treat the input as a stored project record rather than a bare block list
        #[arg(long)]
        project: bool,
    },
    /// Print a JSON block list with the registered defaults for the given types
    Scaffold {
        /// Block type tags, e.g. heading paragraph list
        #[arg(required = true)]
        types: Vec<String>,
    },
    /// Manage projects in a file-backed store
    Project {
        /// Path to the store file
        #[arg(long, default_value = "projects.json")]
        store: PathBuf,
        #[command(subcommand)]
        action: ProjectAction,
    },
}

#[derive(Subcommand)]
enum ProjectAction {
    /// List stored projects
    List,
    /// Show one project as JSON, or as rendered HTML with --html
    Show {
        id: i64,
        #[arg(long)]
        html: bool,
    },
    /// Create a project, optionally seeded from a JSON block list file
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        blocks: Option<PathBuf>,
    },
    /// Delete a project
    Delete { id: i64 },
}

fn read_blocks(path: &PathBuf, project: bool) -> anyhow::Result<Vec<Block>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    if project {
        let record: Project = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse project record {}", path.display()))?;
        Ok(record.blocks)
    } else {
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse block list {}", path.display()))
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Render {
            input,
            output,
            project,
        } => {
            let blocks = read_blocks(&input, project)?;
            let html = generate_html(&blocks);
            match output {
                Some(path) => fs::write(&path, html)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => println!("{html}"),
            }
        }
        Command::Scaffold { types } => {
            let blocks = types
                .into_iter()
                .map(|tag| Block::new(BlockType::from(tag)))
                .collect::<blockforge::Result<Vec<_>>>()?;
            println!("{}", serde_json::to_string_pretty(&blocks)?);
        }
        Command::Project { store, action } => {
            let store = JsonFileStore::open(&store)?;
            match action {
                ProjectAction::List => {
                    for project in store.all()? {
                        println!(
                            "{:>4}  {}  ({} blocks, updated {})",
                            project.id,
                            project.name,
                            project.blocks.len(),
                            project.updated_at.format("%Y-%m-%d %H:%M:%S")
                        );
                    }
                }
                ProjectAction::Show { id, html } => {
                    let project = store.get_required(id)?;
                    if html {
                        println!("{}", generate_html(&project.blocks));
                    } else {
                        println!("{}", serde_json::to_string_pretty(&project)?);
                    }
                }
                ProjectAction::Create {
                    name,
                    description,
                    blocks,
                } => {
                    let blocks = match blocks {
                        Some(path) => read_blocks(&path, false)?,
                        None => Vec::new(),
                    };
                    let draft = ProjectDraft {
                        name,
                        description,
                        user_id: None,
                        blocks,
                    };
                    draft.validate()?;
                    let project = store.create(draft)?;
                    println!("Created project {} ({})", project.id, project.name);
                }
                ProjectAction::Delete { id } => {
                    if store.delete(id)? {
                        println!("Deleted project {id}");
                    } else {
                        anyhow::bail!("project {id} not found");
                    }
                }
            }
        }
    }

    Ok(())
}
