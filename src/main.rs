// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Startpage-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Startpage and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Startpage CLI entrypoint.
//!
//! By default this runs the terminal start page for the selected user. `--serve` runs the remote
//! store server instead; the account and export/import flags run one operation and exit.

use std::error::Error;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use startpage::accounts;
use startpage::model::UserId;
use startpage::notify::{Notice, Notifier};
use startpage::remote::{HttpRemote, DEFAULT_REMOTE_URL};
use startpage::server::{self, DEFAULT_PORT};
use startpage::session::{Session, SessionConfig};
use startpage::store::{LocalMirror, UsersFile, WriteDurability};
use tokio::sync::{mpsc, Mutex};
use tracing::info;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "STARTPAGE_LOG";
const LOG_FILENAME: &str = "startpage.log";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--user <id>] [--remote <url>] [--data-dir <dir>] [--durable-writes]\n  {program} --serve [--port <port>] [--data-dir <dir>] [--durable-writes]\n  {program} --list-users [--remote <url>]\n  {program} --add-user <id> [--remote <url>]\n  {program} --delete-user <id> [--remote <url>]\n  {program} --export <file-or-dir> [--user <id>] [--remote <url>] [--data-dir <dir>]\n  {program} --import <file> [--user <id>] [--remote <url>] [--data-dir <dir>]\n\nWithout --user the last selected user is used.\n--remote defaults to {DEFAULT_REMOTE_URL}; --serve listens on 127.0.0.1:<port> (default {DEFAULT_PORT}, 0 = ephemeral).\n--data-dir defaults to the platform data directory (e.g. ~/.local/share/startpage).\n--durable-writes opts into slower, best-effort durable persistence (fsync/sync where supported).\n\nLogs are filtered by {LOG_ENV} (default `info`) and written to <data-dir>/{LOG_FILENAME} in TUI mode, stderr otherwise."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
enum CliCommand {
    #[default]
    Tui,
    Serve,
    ListUsers,
    AddUser(String),
    DeleteUser(String),
    Export(String),
    Import(String),
}

impl CliCommand {
    fn takes_user(&self) -> bool {
        matches!(self, Self::Tui | Self::Export(_) | Self::Import(_))
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    command: CliCommand,
    user: Option<String>,
    remote: Option<String>,
    data_dir: Option<String>,
    port: Option<u16>,
    durable_writes: bool,
}

fn set_command(options: &mut CliOptions, command: CliCommand) -> Result<(), ()> {
    if options.command != CliCommand::Tui {
        return Err(());
    }
    options.command = command;
    Ok(())
}

fn set_value(slot: &mut Option<String>, args: &mut impl Iterator<Item = String>) -> Result<(), ()> {
    if slot.is_some() {
        return Err(());
    }
    *slot = Some(args.next().ok_or(())?);
    Ok(())
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--user" => set_value(&mut options.user, &mut args)?,
            "--remote" => set_value(&mut options.remote, &mut args)?,
            "--data-dir" => set_value(&mut options.data_dir, &mut args)?,
            "--port" => {
                if options.port.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let port: u16 = raw.parse().map_err(|_| ())?;
                options.port = Some(port);
            }
            "--durable-writes" => {
                if options.durable_writes {
                    return Err(());
                }
                options.durable_writes = true;
            }
            "--serve" => set_command(&mut options, CliCommand::Serve)?,
            "--list-users" => set_command(&mut options, CliCommand::ListUsers)?,
            "--add-user" => {
                let id = args.next().ok_or(())?;
                set_command(&mut options, CliCommand::AddUser(id))?;
            }
            "--delete-user" => {
                let id = args.next().ok_or(())?;
                set_command(&mut options, CliCommand::DeleteUser(id))?;
            }
            "--export" => {
                let file = args.next().ok_or(())?;
                set_command(&mut options, CliCommand::Export(file))?;
            }
            "--import" => {
                let file = args.next().ok_or(())?;
                set_command(&mut options, CliCommand::Import(file))?;
            }
            _ => return Err(()),
        }
    }

    if options.port.is_some() && options.command != CliCommand::Serve {
        return Err(());
    }
    if options.user.is_some() && !options.command.takes_user() {
        return Err(());
    }
    if options.remote.is_some() && options.command == CliCommand::Serve {
        return Err(());
    }

    Ok(options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "startpage".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let data_dir = match options.data_dir.as_deref() {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_dir()
                .map(|dir| dir.join("startpage"))
                .ok_or("cannot determine a data directory; pass --data-dir <dir>")?,
        };
        let durability = if options.durable_writes {
            WriteDurability::Durable
        } else {
            WriteDurability::BestEffort
        };
        init_logging(&options.command, &data_dir)?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(run_command(options, data_dir, durability))
    })();

    if let Err(err) = result {
        eprintln!("startpage: {err}");
        std::process::exit(1);
    }
}

fn init_logging(command: &CliCommand, data_dir: &Path) -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    if *command == CliCommand::Tui {
        fs::create_dir_all(data_dir)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(data_dir.join(LOG_FILENAME))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

async fn run_command(
    options: CliOptions,
    data_dir: PathBuf,
    durability: WriteDurability,
) -> Result<(), Box<dyn Error>> {
    let remote_url = options.remote.as_deref().unwrap_or(DEFAULT_REMOTE_URL);

    match &options.command {
        CliCommand::Serve => {
            let port = options.port.unwrap_or(DEFAULT_PORT);
            serve(&data_dir, durability, port).await
        }
        CliCommand::ListUsers => {
            let remote = HttpRemote::new(remote_url)?;
            for id in accounts::list_users(&remote).await? {
                println!("{id}");
            }
            Ok(())
        }
        CliCommand::AddUser(id) => {
            let remote = HttpRemote::new(remote_url)?;
            let user = accounts::add_user(&remote, id).await?;
            println!("added {user}");
            Ok(())
        }
        CliCommand::DeleteUser(id) => {
            let remote = HttpRemote::new(remote_url)?;
            let user = accounts::delete_user(&remote, id).await?;
            println!("deleted {user}");
            Ok(())
        }
        CliCommand::Tui => {
            let (session, notices) =
                open_session(options.user.as_deref(), remote_url, data_dir, durability).await?;
            let export_dir = std::env::current_dir()?;
            let (session, result) = tokio::task::spawn_blocking(move || {
                startpage::tui::run(session, notices, export_dir)
            })
            .await?;
            let stats = session.shutdown().await;
            info!(sent = stats.sent, failed = stats.failed, "session closed");
            result?;
            Ok(())
        }
        CliCommand::Export(file) => {
            let (session, mut notices) =
                open_session(options.user.as_deref(), remote_url, data_dir, durability).await?;
            let target = PathBuf::from(file);
            let written = if target.is_dir() {
                session.export_to_dir(&target, Local::now().date_naive())?
            } else {
                fs::write(&target, session.export_folders()?)?;
                target
            };
            session.shutdown().await;
            print_notices(&mut notices);
            println!("exported to {}", written.display());
            Ok(())
        }
        CliCommand::Import(file) => {
            let contents = fs::read_to_string(file)?;
            let (mut session, mut notices) =
                open_session(options.user.as_deref(), remote_url, data_dir, durability).await?;
            let outcome = session.import_folders(&contents);
            let stats = session.shutdown().await;
            print_notices(&mut notices);
            outcome?;
            if stats.failed > 0 {
                return Err("import kept locally, but the remote save failed".into());
            }
            Ok(())
        }
    }
}

/// Resolves the user (explicit or last selected) and loads their session.
async fn open_session(
    user: Option<&str>,
    remote_url: &str,
    data_dir: PathBuf,
    durability: WriteDurability,
) -> Result<(Session, mpsc::UnboundedReceiver<Notice>), Box<dyn Error>> {
    let mirror = LocalMirror::new(data_dir).with_durability(durability);
    let user: UserId = match user {
        Some(input) => accounts::select_user(&mirror, input)?,
        None => mirror
            .current_user()?
            .ok_or("no user selected; pass --user <id>")?,
    };
    let remote = Arc::new(HttpRemote::new(remote_url)?);
    let (notifier, notices) = Notifier::channel();
    let session = Session::load(user, remote, mirror, notifier, SessionConfig::default()).await;
    Ok((session, notices))
}

fn print_notices(notices: &mut mpsc::UnboundedReceiver<Notice>) {
    while let Ok(notice) = notices.try_recv() {
        eprintln!("{notice}");
    }
}

async fn serve(
    data_dir: &Path,
    durability: WriteDurability,
    port: u16,
) -> Result<(), Box<dyn Error>> {
    let users = UsersFile::open(data_dir, durability)?;
    info!(
        path = %users.path().display(),
        accounts = users.len(),
        "users file loaded"
    );
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    server::serve(listener, Arc::new(Mutex::new(users)), async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await?;
    Ok(())
}
