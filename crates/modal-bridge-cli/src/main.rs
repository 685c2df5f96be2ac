use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use modal_bridge_config::{Config, EditorConfig};
use modal_bridge_engine::editing::lines;
use modal_bridge_engine::host::{TextDocument, TextViewer};
use modal_bridge_engine::models::FontMetrics;
use modal_bridge_engine::{
    FileService, FsWorkspace, MemoryEditor, MemoryEditorOptions, Space, Translator,
};
use std::{
    env,
    path::{Path, PathBuf},
    process,
};

/// Path completion and fold inspection over a project directory
#[derive(Debug, Parser)]
#[command(name = "modal-bridge", version, about)]
struct Cli {
    /// Project root; defaults to the configured root, then the current directory
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, PartialEq, Subcommand)]
enum Command {
    /// Print the next completion of a path prefix
    Complete {
        /// An empty prefix completes everything in the start directory
        #[arg(default_value = "")]
        prefix: String,
        /// Completion returned by the previous call
        #[arg(long)]
        previous: Option<String>,
        /// Directory to search, relative to the root
        #[arg(long, default_value = "")]
        dir: String,
        /// Only complete directories
        #[arg(long = "dirs")]
        dirs_only: bool,
    },
    /// Print every completion of a prefix in cycling order
    Cycle {
        #[arg(default_value = "")]
        prefix: String,
        #[arg(long, default_value = "")]
        dir: String,
    },
    /// Look a file name up along the configured search paths
    Find { filename: String },
    /// Show model and view line counts with the view-to-model line table
    Inspect {
        file: PathBuf,
        /// Collapse lines <first>-<last>; may be repeated
        #[arg(long = "fold", value_parser = parse_fold)]
        folds: Vec<(usize, usize)>,
    },
}

fn parse_fold(range: &str) -> Result<(usize, usize), String> {
    let (first, last) = range
        .split_once('-')
        .ok_or_else(|| format!("fold {range:?} is not <first>-<last>"))?;
    let first: usize = first
        .trim()
        .parse()
        .map_err(|e| format!("invalid first fold line: {e}"))?;
    let last: usize = last
        .trim()
        .parse()
        .map_err(|e| format!("invalid last fold line: {e}"))?;
    if last <= first {
        return Err(format!("fold {range:?} must span more than one line"));
    }
    Ok((first, last))
}

fn editor_options(config: &EditorConfig) -> MemoryEditorOptions {
    MemoryEditorOptions {
        font: FontMetrics {
            average_char_width: config.char_width,
            line_height: config.line_height,
        },
        caret_width: config.caret_width,
        indent: config.indent.clone(),
        tab_width: config.tab_width,
        visible_lines: config.visible_lines,
        ..MemoryEditorOptions::default()
    }
}

fn cycle(files: &FileService<FsWorkspace>, prefix: &str, dir: &str) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut previous: Option<String> = None;
    loop {
        let found = files.file_path_match(prefix, previous.as_deref(), dir);
        if found == prefix || seen.contains(&found) {
            return seen;
        }
        seen.push(found.clone());
        previous = Some(found);
    }
}

fn inspect(file: &Path, folds: &[(usize, usize)], options: MemoryEditorOptions) -> Result<()> {
    let mut editor = MemoryEditor::open(file, options)?;
    for &(first, last) in folds {
        editor
            .collapse_lines(first, last)
            .with_context(|| format!("Cannot fold lines {first}-{last}"))?;
    }

    println!("{}", file.display());
    println!(
        "  model: {} lines, {} bytes",
        editor.line_count(),
        editor.len()
    );
    println!(
        "  view:  {} lines, {} bytes",
        editor.view_line_count(),
        editor.view_len()
    );
    println!("  view line -> model line (offset, length)");
    let translator = Translator::new(editor.projection());
    for view_line in 0..editor.view_line_count() {
        let model_line = translator.to_model_line(view_line);
        let model = lines::line_information(&editor, Space::Model, model_line)?;
        println!(
            "  {view_line:>5} -> {:>5} ({}, {})",
            model.number, model.begin_offset, model.length
        );
    }
    Ok(())
}

fn run(cli: Cli, config: Config) -> Result<()> {
    let cwd = env::current_dir()?;
    let root = cli
        .root
        .unwrap_or_else(|| config.project_root_or(&cwd));
    log::debug!("Project root {}", root.display());
    let options = editor_options(&config.editor);

    match cli.command {
        Command::Complete {
            prefix,
            previous,
            dir,
            dirs_only,
        } => {
            let files = FileService::new(FsWorkspace::with_options(root, options));
            let found = if dirs_only {
                files.dir_path_match(&prefix, previous.as_deref(), &dir)
            } else {
                files.file_path_match(&prefix, previous.as_deref(), &dir)
            };
            println!("{found}");
        }
        Command::Cycle { prefix, dir } => {
            let files = FileService::new(FsWorkspace::with_options(root, options));
            for found in cycle(&files, &prefix, &dir) {
                println!("{found}");
            }
        }
        Command::Find { filename } => {
            let files = FileService::new(FsWorkspace::with_options(root, options));
            println!(
                "{}",
                files.find_file_in_path(&filename, None, config.search_paths.as_slice())
            );
        }
        Command::Inspect { file, folds } => {
            let file = if file.is_absolute() {
                file
            } else {
                root.join(file)
            };
            inspect(&file, &folds, options)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(Some(config)) => config,
        Ok(None) => Config::default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            eprintln!("Fix or remove {}", Config::config_path().display());
            process::exit(1);
        }
    };

    run(cli, config)
}
