//! CLI module for the garden application
//!
//! This module handles the command-line interface for interacting with the
//! note store.
use std::{
    fs::{self, read_to_string, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    process::Command,
};

use console::style;
use log::{debug, info};
use shell_words::split;
use tempfile::Builder;

use crate::{
    content_preview, export_markdown_dir, get_path_name, import_markdown_dir, normalize_path,
    read_content_source, render_html, strip_editor_comments, try_create_path, Commands, Config,
    Directory, GardenError, Note, NoteKind, NoteStore, Result, Snippet, Theme,
};

/// CLI Application handler - processes CLI commands and interfaces with NoteStore
pub struct App {
    /// The note store backend
    store: NoteStore,

    /// Application configuration
    config: Config,

    /// Where the configuration is saved when the theme changes
    config_path: PathBuf,

    /// Whether to display verbose output
    verbose: bool,
}

impl App {
    /// Create a new CLI application with the given store and config
    pub fn new(store: NoteStore, config: Config, config_path: PathBuf, verbose: bool) -> Self {
        Self {
            store,
            config,
            config_path,
            verbose,
        }
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the CLI application with the given command
    pub fn run(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::New {
                path,
                kind,
                title,
                content,
                file,
                edit,
                snippet,
            } => {
                let note = self.create_note(&path, kind, title, content, file, edit, snippet)?;
                println!("Created {} with ID: {}", note.kind, note.id);
            }

            Commands::Edit {
                id,
                title,
                content,
                file,
                edit,
                snippet,
            } => {
                let note = self.edit_note(&id, title, content, file, edit, snippet)?;
                println!("Saved note {} ({})", note.id, note.title);
            }

            Commands::View { id, json, html } => self.view_note(&id, json, html)?,

            Commands::Tree { path, json } => self.show_tree(&path, json)?,

            Commands::Dir { parent, name } => {
                let path = try_create_path(&parent, &name)?;
                println!("{}", path);
                if self.store.tree().find(&path).is_none() {
                    println!(
                        "Directory appears once a note lives there: garden new --path {}",
                        path
                    );
                }
            }

            Commands::Render { id, output } => self.render_note(&id, output.as_deref())?,

            Commands::Theme { set, cycle, list } => self.handle_theme(set, cycle, list)?,

            Commands::Import { source, kind } => {
                let count = import_markdown_dir(&mut self.store, &source, kind)?;
                println!("Imported {} notes from {}", count, source.display());
            }

            Commands::Export { output } => {
                let count = export_markdown_dir(&self.store.tree(), &output)?;
                println!("Exported {} notes to {}", count, output.display());
            }
        }

        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn create_note(
        &mut self,
        path: &str,
        kind: NoteKind,
        title: Option<String>,
        content: Option<String>,
        file: Option<PathBuf>,
        open_editor: bool,
        snippet: Option<Snippet>,
    ) -> Result<Note> {
        let provided = read_content_source(content, file)?;
        if provided.is_some() && open_editor {
            return Err(GardenError::InvalidFormat {
                message: "Cannot combine --edit with --content or --file".to_string(),
            });
        }

        let title = title.unwrap_or_else(|| format!("New {}", kind));
        let mut body = match provided {
            Some(body) => body,
            None if open_editor => self.open_editor_for_content(&title, "")?,
            None => String::new(),
        };
        if let Some(snippet) = snippet {
            snippet.insert(&mut body);
        }

        let mut note = Note::new(path, kind);
        note.apply_edit(&title, body);
        self.store.add_note(note)
    }

    fn edit_note(
        &mut self,
        id: &str,
        title: Option<String>,
        content: Option<String>,
        file: Option<PathBuf>,
        open_editor: bool,
        snippet: Option<Snippet>,
    ) -> Result<Note> {
        let provided = read_content_source(content, file)?;
        if provided.is_some() && open_editor {
            return Err(GardenError::InvalidFormat {
                message: "Cannot combine --edit with --content or --file".to_string(),
            });
        }

        let mut note = self
            .store
            .get_note(id)
            .cloned()
            .ok_or_else(|| GardenError::NoteNotFound { id: id.to_string() })?;

        let title = title.unwrap_or_else(|| note.title.clone());
        let mut body = match provided {
            Some(body) => body,
            None if open_editor => self.open_editor_for_content(&title, &note.content)?,
            None => note.content.clone(),
        };
        if let Some(snippet) = snippet {
            snippet.insert(&mut body);
        }

        note.apply_edit(&title, body);
        self.store.save_note(note.clone())?;
        Ok(note)
    }

    fn open_editor_for_content(&self, title: &str, existing: &str) -> Result<String> {
        let temp_file = Builder::new().suffix(".md").tempfile()?;
        let temp_path = temp_file.path().to_path_buf();

        let editor_cmd = self.config.get_editor_command();
        self.write_editor_template(&temp_path, title, existing)?;

        info!("Opening editor to write note content. Save and exit when done...");
        self.launch_editor(&editor_cmd, &temp_path)?;

        let content = read_to_string(&temp_path)?;
        Ok(strip_editor_comments(&content))
    }

    fn write_editor_template(&self, path: &Path, title: &str, existing: &str) -> Result<()> {
        let mut file = OpenOptions::new().write(true).truncate(true).open(path)?;

        writeln!(file, "<!--")?;
        writeln!(file, "Editing: {}", title)?;
        writeln!(
            file,
            "Markdown is supported, math goes between $...$ or $$...$$."
        )?;
        writeln!(file, "Comment blocks like this one are removed on save.")?;
        writeln!(file, "-->")?;
        write!(file, "{}", existing)?;

        Ok(())
    }

    fn launch_editor(&self, editor_cmd: &str, file_path: &Path) -> Result<()> {
        let args = split(editor_cmd).map_err(|e| GardenError::EditorError {
            message: format!("Failed to parse editor command: {}", e),
        })?;

        let (program, rest) = args.split_first().ok_or_else(|| GardenError::EditorError {
            message: "Empty editor command".to_string(),
        })?;

        debug!("Launching editor {} for {}", program, file_path.display());
        let status = Command::new(program).args(rest).arg(file_path).status()?;

        if !status.success() {
            return Err(GardenError::EditorError {
                message: "Editor exited with non-zero status".to_string(),
            });
        }

        Ok(())
    }

    fn find_note(&self, id: &str) -> Result<&Note> {
        self.store
            .get_note(id)
            .ok_or_else(|| GardenError::NoteNotFound { id: id.to_string() })
    }

    fn view_note(&self, id: &str, json: bool, html: bool) -> Result<()> {
        let note = self.find_note(id)?;

        if json {
            println!("{}", serde_json::to_string_pretty(note)?);
            return Ok(());
        }

        let theme = self.config.theme;
        println!("{}", style(&note.title).bold());
        println!(
            "{}",
            style(format!(
                "{} | {} | updated {}",
                note.kind,
                note.path,
                note.updated_at.format("%b %-d, %Y %H:%M")
            ))
            .fg(theme.muted())
        );
        if self.verbose {
            println!(
                "{}",
                style(format!(
                    "id {} | created {}",
                    note.id,
                    note.created_at.format("%b %-d, %Y %H:%M")
                ))
                .fg(theme.muted())
            );
        }
        println!();

        if html {
            println!("{}", render_html(&note.content));
        } else {
            println!("{}", note.content);
        }
        Ok(())
    }

    fn render_note(&self, id: &str, output: Option<&Path>) -> Result<()> {
        let note = self.find_note(id)?;
        let html = render_html(&note.content);

        match output {
            Some(path) => {
                fs::write(path, html)?;
                println!("Rendered {} to {}", note.id, path.display());
            }
            None => println!("{}", html),
        }
        Ok(())
    }

    fn show_tree(&self, path: &str, json: bool) -> Result<()> {
        let tree = self.store.tree();
        let path = normalize_path(path);
        let subtree = tree
            .find(&path)
            .ok_or_else(|| GardenError::DirectoryNotFound { path: path.clone() })?;

        if json {
            println!("{}", serde_json::to_string_pretty(subtree)?);
            return Ok(());
        }

        let term_width = terminal_size::terminal_size()
            .map(|(w, _)| w.0 as usize)
            .unwrap_or(80);
        for line in self.format_tree(subtree, term_width) {
            println!("{}", line);
        }
        Ok(())
    }

    /// Sidebar-like listing: directories with their note count, then notes.
    fn format_tree(&self, root: &Directory, width: usize) -> Vec<String> {
        let theme = self.config.theme;
        let mut lines = Vec::new();

        for (depth, dir) in root.walk() {
            let indent = "  ".repeat(depth);
            let label = if dir.is_root() {
                dir.name.clone()
            } else {
                get_path_name(&dir.path)
            };
            lines.push(format!(
                "{}{} {}",
                indent,
                style(format!("{}/", label)).fg(theme.accent()).bold(),
                style(format!("({})", dir.note_count())).fg(theme.muted())
            ));

            for note in &dir.notes {
                let marker = match note.kind {
                    NoteKind::Blog => "*",
                    NoteKind::Note => "-",
                };
                let mut line = format!("{}  {} {} [{}]", indent, marker, note.title, note.id);
                if self.verbose {
                    let budget = width.saturating_sub(line.chars().count() + 3).min(60);
                    let preview = content_preview(&note.content, budget);
                    if !preview.is_empty() {
                        line.push_str(&format!(" {}", style(preview).fg(theme.muted())));
                    }
                }
                lines.push(line);
            }
        }
        lines
    }

    fn handle_theme(&mut self, set: Option<Theme>, cycle: bool, list: bool) -> Result<()> {
        if list {
            for theme in Theme::all() {
                let marker = if *theme == self.config.theme { "*" } else { " " };
                println!("{} {}", marker, style(theme.name()).fg(theme.accent()));
            }
            return Ok(());
        }

        let next = match (set, cycle) {
            (Some(theme), _) => theme,
            (None, true) => self.config.theme.next(),
            (None, false) => {
                println!("{}", self.config.theme);
                return Ok(());
            }
        };

        self.config.theme = next;
        self.config.save(&self.config_path)?;
        println!("Theme set to {}", next);
        Ok(())
    }
}
