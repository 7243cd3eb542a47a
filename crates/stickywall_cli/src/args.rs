use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_API_BASE: &str = "http://localhost:3000";
pub const DEFAULT_BOARD_WIDTH: i64 = 1200;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Base URL of the note wall service
    #[arg(long, value_name = "URL", env = "STICKYWALL_API_BASE", default_value = DEFAULT_API_BASE, global = true)]
    pub api_base: String,

    /// Local board database (defaults to the platform data directory)
    #[arg(long, value_name = "FILE", global = true)]
    pub board_db: Option<PathBuf>,

    /// Board container width in pixels
    #[arg(long, value_name = "PX", default_value_t = DEFAULT_BOARD_WIDTH, global = true)]
    pub width: i64,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List the notes on the shared wall, newest first
    List,

    /// Post a note to the shared wall
    Post {
        /// Name shown with the note (optional)
        #[arg(short, long, value_name = "NAME", default_value = "")]
        author: String,

        /// Note text
        #[arg(value_name = "CONTENT")]
        content: String,
    },

    /// Work with the local board
    #[command(subcommand)]
    Board(BoardCommand),
}

#[derive(Subcommand, Debug, Clone)]
pub enum BoardCommand {
    /// Print every note with its position
    Show,

    /// Add an empty note
    Add,

    /// Replace the text of a note
    Edit {
        #[arg(value_name = "NOTE_ID")]
        id: i64,

        #[arg(value_name = "TEXT")]
        text: String,
    },

    /// Delete a note
    Delete {
        #[arg(value_name = "NOTE_ID")]
        id: i64,
    },

    /// Change the avatar of a note; without a file nothing changes
    Avatar {
        #[arg(value_name = "NOTE_ID")]
        id: i64,

        #[arg(value_name = "IMAGE")]
        file: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::{Args, BoardCommand, Command, DEFAULT_BOARD_WIDTH};
    use clap::Parser;

    #[test]
    fn post_takes_optional_author() {
        let args = Args::parse_from(["stickywall", "post", "--author", "ann", "hello"]);
        match args.command {
            Command::Post { author, content } => {
                assert_eq!(author, "ann");
                assert_eq!(content, "hello");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn board_avatar_file_is_optional() {
        let args = Args::parse_from(["stickywall", "board", "avatar", "42"]);
        assert_eq!(args.width, DEFAULT_BOARD_WIDTH);
        match args.command {
            Command::Board(BoardCommand::Avatar { id, file }) => {
                assert_eq!(id, 42);
                assert!(file.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let args = Args::parse_from(["stickywall", "board", "show", "--width", "640", "-vv"]);
        assert_eq!(args.width, 640);
        assert_eq!(args.verbose, 2);
    }
}
