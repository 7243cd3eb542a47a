//! Terminal front-end for the sticky-note wall.
//!
//! # Responsibility
//! - Form client: list and post notes against the HTTP service.
//! - Board driver: add, edit, delete, re-avatar and show local board notes.

mod args;
mod board_view;
mod client;
mod form;
mod render;

use anyhow::{bail, Context, Result};
use args::{Args, BoardCommand, Command};
use board_view::TerminalBoardView;
use clap::Parser;
use client::HttpNotesApi;
use form::{NoteForm, SubmitOutcome};
use std::path::PathBuf;
use stickywall_core::{init_stderr_logging, Board, SqliteBoardStorage};

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    init_stderr_logging(level).map_err(anyhow::Error::msg)?;

    match args.command.clone() {
        Command::List => run_list(&args),
        Command::Post { author, content } => run_post(&args, author, content),
        Command::Board(command) => run_board(&args, command),
    }
}

fn run_list(args: &Args) -> Result<()> {
    let mut form = NoteForm::new(HttpNotesApi::new(&args.api_base));
    form.load();
    print!("{}", render::render_note_list(&form));
    if form.error().is_some() {
        bail!("could not reach {}", args.api_base);
    }
    Ok(())
}

fn run_post(args: &Args, author: String, content: String) -> Result<()> {
    let mut form = NoteForm::new(HttpNotesApi::new(&args.api_base));
    form.author = author;
    form.content = content;

    match form.submit() {
        SubmitOutcome::Posted => {
            print!("{}", render::render_note_list(&form));
            Ok(())
        }
        SubmitOutcome::Blocked | SubmitOutcome::Failed => {
            bail!("{}", form.error().unwrap_or("failed to post note"))
        }
    }
}

fn run_board(args: &Args, command: BoardCommand) -> Result<()> {
    let db_path = match &args.board_db {
        Some(path) => path.clone(),
        None => default_board_db()?,
    };
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let storage = SqliteBoardStorage::open(&db_path)
        .with_context(|| format!("failed to open board {}", db_path.display()))?;
    let mut board = Board::open(storage, TerminalBoardView::new(args.width))?;

    match command {
        BoardCommand::Show => {}
        BoardCommand::Add => {
            let id = board.add_note()?;
            println!("added note {id}");
        }
        BoardCommand::Edit { id, text } => {
            if !board.edit_text(id, text)? {
                bail!("no note with id {id}");
            }
        }
        BoardCommand::Delete { id } => {
            if !board.delete_note(id)? {
                bail!("no note with id {id}");
            }
        }
        BoardCommand::Avatar { id, file } => {
            if board.note(id).is_none() {
                bail!("no note with id {id}");
            }
            if !board.change_avatar(id, file.as_deref())? {
                println!("no image picked, avatar unchanged");
            }
        }
    }

    print!(
        "{}",
        render::render_board(board.notes(), board.default_avatar())
    );
    Ok(())
}

fn default_board_db() -> Result<PathBuf> {
    let base = dirs::data_local_dir().context("no local data directory on this platform")?;
    Ok(base.join("stickywall").join("board.sqlite3"))
}
