use std::path::{Path, PathBuf};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::kv::FileStore;
use crate::io::recovery;
use crate::io::task_store::TaskStore;
use crate::model::config::Config;
use crate::ops::TaskListManager;

/// Everything a command needs: config, resolved data dir and a loaded manager
pub struct Session {
    pub config: Config,
    pub data_dir: PathBuf,
    pub manager: TaskListManager<FileStore>,
}

impl Session {
    /// Read config, open the file store and load the task list.
    pub fn open(data_dir_override: Option<&Path>) -> Self {
        let config = config_io::read_config();
        Self::open_with(config, data_dir_override)
    }

    pub fn open_with(config: Config, data_dir_override: Option<&Path>) -> Self {
        let data_dir = config_io::resolve_data_dir(&config, data_dir_override);
        let store = TaskStore::new(FileStore::new(&data_dir), config.store.key.clone());
        let mut manager = TaskListManager::new(store);
        manager.initialize();
        Session {
            config,
            data_dir,
            manager,
        }
    }

    /// Turn a remembered save failure into an error for the exit code.
    fn check_saved(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self.manager.last_store_error() {
            Some(e) => Err(format!("could not save tasks: {}", e).into()),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let data_dir = cli.data_dir.as_deref().map(Path::new);

    match cli.command {
        // main.rs launches the TUI for a bare `tl`
        None => Ok(()),
        Some(cmd) => {
            let mut session = Session::open(data_dir);
            match cmd {
                Commands::Add(args) => cmd_add(&mut session, args, json),
                Commands::List(args) => cmd_list(&session, args, json),
                Commands::Done(args) => cmd_set_done(&mut session, args.id, true),
                Commands::Undone(args) => cmd_set_done(&mut session, args.id, false),
                Commands::Delete(args) => cmd_delete(&mut session, args.id),
                Commands::Recovery(args) => cmd_recovery(&session, args, json),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_add(session: &mut Session, args: AddArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let id = session.manager.create(&args.title, &args.description)?;
    session.check_saved()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&CreatedJson { id })?);
    } else {
        println!("Created #{}", id);
    }
    Ok(())
}

fn cmd_list(session: &Session, args: ListArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let hide_done = args.hide_done || session.config.ui.hide_completed;
    let list = session.manager.list();
    let view = crate::ops::view::derive_view(&list.tasks, hide_done);

    if json {
        let out = TaskListJson {
            hide_done,
            total: list.len(),
            remaining: list.remaining(),
            tasks: view.iter().map(|t| task_to_json(t)).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if let Some(msg) = crate::ops::view::empty_message(list.len(), view.len()) {
        println!("{}", msg);
        return Ok(());
    }
    for task in view {
        for line in format_task_block(task, &session.config.ui.date_format) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_set_done(session: &mut Session, id: u64, is_done: bool) -> Result<(), Box<dyn std::error::Error>> {
    if session.manager.list().find(id).is_none() {
        eprintln!("no task #{}", id);
        return Ok(());
    }
    session.manager.toggle_status(id, is_done);
    session.check_saved()
}

fn cmd_delete(session: &mut Session, id: u64) -> Result<(), Box<dyn std::error::Error>> {
    if session.manager.list().find(id).is_none() {
        eprintln!("no task #{}", id);
        return Ok(());
    }
    session.manager.delete(id);
    session.check_saved()?;
    println!("Deleted #{}", id);
    Ok(())
}

fn cmd_recovery(session: &Session, args: RecoveryCmd, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    match args.action {
        Some(RecoveryAction::Path) => {
            println!("{}", recovery::recovery_log_path(&session.data_dir).display());
        }
        Some(RecoveryAction::Prune(prune)) => {
            let removed = recovery::prune_recovery(&session.data_dir, None, prune.all)?;
            println!("Pruned {} entries", removed);
        }
        None => {
            let entries =
                recovery::read_recovery_entries(&session.data_dir, Some(args.limit.unwrap_or(10)));
            if json {
                let arr: Vec<serde_json::Value> = entries.iter().map(|e| e.to_json()).collect();
                println!("{}", serde_json::to_string_pretty(&arr)?);
            } else if entries.is_empty() {
                println!("No recovery entries");
            } else {
                for entry in &entries {
                    print!("{}", entry.to_markdown());
                }
            }
        }
    }
    Ok(())
}
