use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tl", about = concat!("[x] tasklist v", env!("CARGO_PKG_VERSION"), " - a small to-do list"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different data directory for the task store
    #[arg(short = 'D', long = "data-dir", global = true)]
    pub data_dir: Option<String>,

    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a task
    Add(AddArgs),
    /// List tasks (undone first, newest first)
    List(ListArgs),
    /// Mark a task done
    Done(IdArgs),
    /// Mark a task not done
    Undone(IdArgs),
    /// Permanently delete a task
    Delete(IdArgs),
    /// View or manage the recovery log
    Recovery(RecoveryCmd),
}

#[derive(Args)]
pub struct AddArgs {
    /// Task title (no leading or trailing spaces)
    pub title: String,
    /// Longer description
    #[arg(short, long, default_value = "")]
    pub description: String,
}

#[derive(Args)]
pub struct ListArgs {
    /// Hide completed tasks
    #[arg(long)]
    pub hide_done: bool,
}

#[derive(Args)]
pub struct IdArgs {
    /// Task ID
    pub id: u64,
}

// ---------------------------------------------------------------------------
// Recovery log
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct RecoveryCmd {
    #[command(subcommand)]
    pub action: Option<RecoveryAction>,
    /// Maximum number of entries to show (default: 10)
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Subcommand)]
pub enum RecoveryAction {
    /// Remove old entries
    Prune(RecoveryPruneArgs),
    /// Print the absolute path to the recovery log
    Path,
}

#[derive(Args)]
pub struct RecoveryPruneArgs {
    /// Remove all entries, not only those older than 30 days
    #[arg(long)]
    pub all: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_with_description() {
        let cli = Cli::try_parse_from(["tl", "add", "Buy milk", "-d", "2 liters"]).unwrap();
        match cli.command {
            Some(Commands::Add(args)) => {
                assert_eq!(args.title, "Buy milk");
                assert_eq!(args.description, "2 liters");
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["tl", "list", "--hide-done", "--json", "-D", "/tmp/x"])
            .unwrap();
        assert!(cli.json);
        assert_eq!(cli.data_dir.as_deref(), Some("/tmp/x"));
        assert!(matches!(
            cli.command,
            Some(Commands::List(ListArgs { hide_done: true }))
        ));
    }

    #[test]
    fn no_subcommand_is_none() {
        let cli = Cli::try_parse_from(["tl"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn id_must_be_numeric() {
        assert!(Cli::try_parse_from(["tl", "done", "abc"]).is_err());
    }

    #[test]
    fn title_with_leading_dash_needs_separator() {
        let cli = Cli::try_parse_from(["tl", "add", "--", "-x"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Add(a)) if a.title == "-x"));
    }
}
