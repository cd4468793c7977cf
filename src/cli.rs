//! Command-line driver.
//!
//! Every command that edits a layout loads the file, applies one editor
//! operation and saves. A rejected operation returns an error before the save,
//! so the file on disk is left as it was.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use shelfplan_core::{BoxVariant, Cell, ItemId, Shelf, MAX_GRID_SIZE};
use shelfplan_editor::EditorState;
use shelfplan_layout::{parse_share_url, share_url, ExportMode, LayoutDocument, LayoutMetadata};
use shelfplan_settings::{Config, SettingsPersistence};

#[derive(Debug, Parser)]
#[command(name = "shelfplan", version)]
#[command(about = "Warehouse shelf layout editor")]
pub struct Cli {
    /// Settings file (default: <config dir>/shelfplan/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Write logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an empty layout file
    New {
        file: PathBuf,

        /// Grid size (default from settings)
        #[arg(long)]
        size: Option<usize>,

        /// Layout name stored in the document metadata
        #[arg(long)]
        name: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Place a new shelf at rotation 0
    Add {
        file: PathBuf,

        #[arg(long, allow_hyphen_values = true)]
        x: i32,

        #[arg(long, allow_hyphen_values = true)]
        z: i32,

        /// Column count (default from settings)
        #[arg(long)]
        columns: Option<usize>,

        /// Row count (default from settings)
        #[arg(long)]
        rows: Option<usize>,
    },

    /// Move a shelf to a new anchor, keeping its rotation
    Move {
        file: PathBuf,
        id: ItemId,

        #[arg(long, allow_hyphen_values = true)]
        x: i32,

        #[arg(long, allow_hyphen_values = true)]
        z: i32,
    },

    /// Rotate a shelf 90 degrees about its anchor
    Rotate { file: PathBuf, id: ItemId },

    /// Remove a shelf
    Remove { file: PathBuf, id: ItemId },

    /// Resize the grid (clamped to the configured minimum and the largest supported size)
    Resize { file: PathBuf, size: usize },

    /// Set or clear one box slot: variant is A-E, roll or none
    SetBox {
        file: PathBuf,
        id: ItemId,
        column: usize,
        row: usize,
        variant: String,
    },

    /// Print the layout
    Show {
        file: PathBuf,

        /// Print the layout document as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print box statistics
    Stats {
        file: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// Print a share link for the layout
    Share {
        file: PathBuf,

        /// Editor URL (default from settings)
        #[arg(long)]
        base_url: Option<String>,

        /// Leave box tables out of the link
        #[arg(long)]
        no_boxes: bool,

        /// Also copy the link to the clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Decode a share link and save it as a layout file
    ImportUrl {
        url: String,
        file: PathBuf,

        #[arg(long)]
        force: bool,
    },
}

/// Run a parsed command, writing its output to `out`.
pub fn run(cli: Cli, out: &mut dyn Write) -> Result<()> {
    let mut settings = load_settings(cli.config.as_deref())?;
    let config = settings.config().clone();

    let touched = match cli.command {
        Command::New {
            file,
            size,
            name,
            force,
        } => {
            refuse_overwrite(&file, force)?;
            let size = config
                .editor
                .clamp_grid_size(size.unwrap_or(config.editor.default_grid_size))
                .min(MAX_GRID_SIZE);
            let mut document = LayoutDocument::new(size);
            if let Some(name) = name {
                document = document.with_name(name);
            }
            save_document(&document, &file)?;
            writeln!(out, "Created {}x{} layout {}", size, size, file.display())?;
            file
        }
        Command::Add {
            file,
            x,
            z,
            columns,
            rows,
        } => {
            let mut session = Session::open(&file, &config)?;
            let editor = &mut session.editor;
            if let Some(columns) = columns {
                editor.set_form_columns(columns);
            }
            if let Some(rows) = rows {
                editor.set_form_rows(rows);
            }
            let id = editor
                .add_shelf(Cell::new(x, z))
                .with_context(|| format!("cannot add shelf at {}", Cell::new(x, z)))?;
            session.save()?;
            if let Some(shelf) = session.editor.grid().shelf(id) {
                writeln!(out, "Added {}", describe(shelf))?;
            }
            file
        }
        Command::Move { file, id, x, z } => {
            let mut session = Session::open(&file, &config)?;
            let shelf = session
                .editor
                .move_shelf(id, Cell::new(x, z))
                .with_context(|| format!("cannot move shelf {}", id))?;
            let line = format!("Moved {}", describe(shelf));
            session.save()?;
            writeln!(out, "{}", line)?;
            file
        }
        Command::Rotate { file, id } => {
            let mut session = Session::open(&file, &config)?;
            let shelf = session
                .editor
                .rotate_shelf(id)
                .with_context(|| format!("cannot rotate shelf {}", id))?;
            let line = format!("Rotated {}", describe(shelf));
            session.save()?;
            writeln!(out, "{}", line)?;
            file
        }
        Command::Remove { file, id } => {
            let mut session = Session::open(&file, &config)?;
            session
                .editor
                .remove_shelf(id)
                .with_context(|| format!("cannot remove shelf {}", id))?;
            session.save()?;
            writeln!(out, "Removed shelf {}", id)?;
            file
        }
        Command::Resize { file, size } => {
            let mut session = Session::open(&file, &config)?;
            let applied = session.editor.resize_grid(size)?;
            session.save()?;
            writeln!(out, "Grid is {}x{}", applied, applied)?;
            let grid = session.editor.grid();
            let footprint: usize = grid.shelves().map(|s| s.occupied_cells().len()).sum();
            let unmapped = footprint - grid.occupancy().occupied_count();
            if unmapped > 0 {
                writeln!(out, "{} shelf cells lie outside the grid", unmapped)?;
            }
            file
        }
        Command::SetBox {
            file,
            id,
            column,
            row,
            variant,
        } => {
            let variant = parse_variant(&variant)?;
            let mut session = Session::open(&file, &config)?;
            session
                .editor
                .set_box(id, column, row, variant)
                .with_context(|| format!("cannot set box on shelf {}", id))?;
            session.save()?;
            match variant {
                Some(variant) => writeln!(
                    out,
                    "Shelf {} slot ({}, {}) holds {} ({})",
                    id,
                    column,
                    row,
                    variant,
                    variant.color()
                )?,
                None => writeln!(out, "Shelf {} slot ({}, {}) cleared", id, column, row)?,
            }
            file
        }
        Command::Show { file, json } => {
            let session = Session::open(&file, &config)?;
            if json {
                writeln!(out, "{}", session.document().to_json_pretty()?)?;
            } else {
                print_layout(&session.editor, out)?;
            }
            file
        }
        Command::Stats { file, json } => {
            let session = Session::open(&file, &config)?;
            let stats = session.editor.statistics();
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&stats)?)?;
            } else {
                for entry in &stats.variants {
                    writeln!(
                        out,
                        "{:<5} {:<7} {:>5} {:>7.2}%",
                        entry.variant, entry.color, entry.count, entry.percentage
                    )?;
                }
                writeln!(
                    out,
                    "{} boxes in {} slots ({:.1}% full)",
                    stats.total_boxes,
                    stats.total_slots,
                    stats.fill_ratio() * 100.0
                )?;
            }
            file
        }
        Command::Share {
            file,
            base_url,
            no_boxes,
            copy,
        } => {
            let session = Session::open(&file, &config)?;
            let mode = if no_boxes || !config.share.include_boxes {
                ExportMode::WithoutBoxes
            } else {
                ExportMode::WithBoxes
            };
            let base = base_url.unwrap_or_else(|| config.share.base_url.clone());
            let link = share_url(&base, &session.editor.export(mode))?;
            writeln!(out, "{}", link)?;
            if copy {
                copy_to_clipboard(&link)?;
                tracing::info!("Share link copied to clipboard");
            }
            file
        }
        Command::ImportUrl { url, file, force } => {
            refuse_overwrite(&file, force)?;
            let document = parse_share_url(&url).context("cannot read share link")?;
            let grid = document.to_manager()?;
            save_document(&document, &file)?;
            writeln!(
                out,
                "Imported {} shelves on a {}x{} grid into {}",
                grid.len(),
                grid.grid_size(),
                grid.grid_size(),
                file.display()
            )?;
            file
        }
    };

    remember(&mut settings, &touched);
    Ok(())
}

/// A layout file opened for one command
struct Session {
    path: PathBuf,
    metadata: Option<LayoutMetadata>,
    editor: EditorState,
}

impl Session {
    fn open(path: &Path, config: &Config) -> Result<Self> {
        let document = LayoutDocument::load_from_file(path)
            .with_context(|| format!("cannot open layout {}", path.display()))?;
        let editor = EditorState::from_document(&document, config.editor.clone())
            .with_context(|| format!("cannot import layout {}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            metadata: document.metadata,
            editor,
        })
    }

    fn document(&self) -> LayoutDocument {
        let mut document = self.editor.export(ExportMode::WithBoxes);
        document.metadata = self.metadata.clone();
        document
    }

    fn save(&mut self) -> Result<()> {
        let mut document = self.document();
        document.touch();
        save_document(&document, &self.path)?;
        self.editor.mark_saved();
        Ok(())
    }
}

fn save_document(document: &LayoutDocument, path: &Path) -> Result<()> {
    document
        .save_to_file(path)
        .with_context(|| format!("cannot write layout {}", path.display()))
}

fn load_settings(path: Option<&Path>) -> Result<SettingsPersistence> {
    let settings = match path {
        Some(path) => SettingsPersistence::load_or_default(path),
        None => SettingsPersistence::load_default(),
    };
    settings.context("cannot load settings")
}

/// Record the layout in the recent list. Failing to persist settings never
/// fails the command.
fn remember(settings: &mut SettingsPersistence, layout: &Path) {
    let layout = layout
        .canonicalize()
        .unwrap_or_else(|_| layout.to_path_buf());
    settings.config_mut().add_recent_layout(layout);
    if let Err(e) = settings.save() {
        tracing::warn!("Could not save settings: {}", e);
    }
}

fn refuse_overwrite(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    Ok(())
}

fn parse_variant(name: &str) -> Result<Option<BoxVariant>> {
    if matches!(name.to_ascii_lowercase().as_str(), "none" | "empty" | "-") {
        return Ok(None);
    }
    match BoxVariant::from_name(name) {
        Some(variant) => Ok(Some(variant)),
        None => bail!("unknown box variant '{}' (expected A-E, roll or none)", name),
    }
}

fn describe(shelf: &Shelf) -> String {
    format!(
        "{} at {} facing {}",
        shelf.label(),
        shelf.anchor(),
        shelf.rotation()
    )
}

fn print_layout(editor: &EditorState, out: &mut dyn Write) -> Result<()> {
    let grid = editor.grid();
    writeln!(
        out,
        "Grid {}x{}, {} shelves, {:.1}% occupied",
        grid.grid_size(),
        grid.grid_size(),
        grid.len(),
        grid.occupancy().utilization() * 100.0
    )?;
    for shelf in editor.visible_shelves() {
        writeln!(out, "{}", describe(shelf))?;
        let cells: Vec<String> = shelf
            .occupied_cells()
            .iter()
            .map(|cell| cell.to_string())
            .collect();
        writeln!(out, "  cells: {}", cells.join(" "))?;
        for (column, row, stored) in shelf.boxes().iter() {
            writeln!(out, "  [{}, {}] {}", column, row, stored.variant)?;
        }
    }
    Ok(())
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new().context("clipboard unavailable")?;
    clipboard
        .set_text(text.to_string())
        .context("cannot copy to clipboard")?;
    // Keep the clipboard owner alive long enough for managers to pick it up
    std::thread::sleep(std::time::Duration::from_millis(100));
    Ok(())
}
