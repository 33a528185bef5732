//! LumenShell command-line entry point.
//!
//! Owns the read-eval loop: lines are tokenized into an argv, the first
//! token selects a command, the dispatcher drives it, and the resulting
//! status decides whether the loop continues. Background job completions
//! are reported between commands, never mid-line.

use std::ops::ControlFlow;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Context as _;
use clap::Parser;
use is_terminal::IsTerminal;
use nu_ansi_term::Color;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use lush_core::{
    CommandContext, Config, Dispatch, JobManager, Registry, ShellError, Status, Vfs,
};

/// LumenShell command-line interface.
#[derive(Parser, Debug)]
#[command(author, version, about = "LumenShell command-line interface", long_about = None)]
struct Cli {
    /// Run a single command line and exit instead of starting the REPL.
    #[arg(short = 'c', long = "command")]
    command: Option<String>,

    /// Path to an alternate configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    lush_core::logging::init("warn");

    let mut config = match cli.config.clone().or_else(Config::default_path) {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };
    if !std::io::stdout().is_terminal() {
        config.color = false;
    }

    let vfs = Arc::new(Vfs::new()?);
    let jobs = Arc::new(JobManager::new());
    let mut registry = Registry::new();
    // A collision here is a build defect; exit non-zero instead of
    // dispatching against an ambiguous registry.
    lush_builtins::register_all(&mut registry).context("command registration failed")?;

    let shell = Shell {
        registry,
        vfs,
        config: Arc::new(config),
        jobs,
    };

    match cli.command {
        Some(line) => {
            if !shell.run_line(&line)? {
                std::process::exit(1);
            }
        }
        None => shell.run_repl()?,
    }
    Ok(())
}

struct Shell {
    registry: Registry,
    vfs: Arc<Vfs>,
    config: Arc<Config>,
    jobs: Arc<JobManager>,
}

impl Shell {
    fn context(&self, args: Vec<String>) -> CommandContext {
        CommandContext::with_process_env(
            args,
            Arc::clone(&self.vfs),
            Arc::clone(&self.config),
            Arc::clone(&self.jobs),
        )
    }

    fn run_repl(&self) -> anyhow::Result<()> {
        let mut editor = DefaultEditor::new()?;
        let history_path = Config::state_dir().map(|dir| dir.join(&self.config.history_file));
        if let Some(path) = &history_path {
            let _ = editor.load_history(path);
        }

        loop {
            self.report_completions();
            match editor.readline(&self.prompt()) {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let _ = editor.add_history_entry(line.as_str());
                    if self.eval(&line).is_break() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err.into()),
            }
        }

        self.report_completions();
        if let Some(path) = &history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = editor.save_history(path);
        }
        Ok(())
    }

    /// One-shot `-c` mode. Waits for an asynchronous command so its
    /// outcome is not lost at process exit. Returns false when the
    /// command failed.
    fn run_line(&self, line: &str) -> anyhow::Result<bool> {
        let argv = tokenize(line).map_err(|msg| anyhow::anyhow!("{msg}"))?;
        let Some((name, args)) = argv.split_first() else {
            return Ok(true);
        };
        let ctx = self.context(args.to_vec());
        match self.registry.dispatch(name, ctx) {
            Dispatch::Completed(Status::Ok) | Dispatch::Completed(Status::Exit) => Ok(true),
            Dispatch::Completed(Status::Error(err)) => {
                self.report_error(&err);
                Ok(false)
            }
            Dispatch::Accepted(id) => loop {
                for done in self.jobs.poll_completions() {
                    if done.id != id {
                        continue;
                    }
                    return match done.status {
                        Status::Error(err) => {
                            self.report_error(&err);
                            Ok(false)
                        }
                        _ => Ok(true),
                    };
                }
                thread::sleep(Duration::from_millis(20));
            },
        }
    }

    fn eval(&self, line: &str) -> ControlFlow<()> {
        let argv = match tokenize(line) {
            Ok(argv) => argv,
            Err(msg) => {
                self.report_error(&ShellError::invalid_argument(format!("lush: {msg}")));
                return ControlFlow::Continue(());
            }
        };
        let Some((name, args)) = argv.split_first() else {
            return ControlFlow::Continue(());
        };
        let ctx = self.context(args.to_vec());
        match self.registry.dispatch(name, ctx) {
            Dispatch::Completed(Status::Ok) => ControlFlow::Continue(()),
            Dispatch::Completed(Status::Error(err)) => {
                self.report_error(&err);
                ControlFlow::Continue(())
            }
            Dispatch::Completed(Status::Exit) => ControlFlow::Break(()),
            Dispatch::Accepted(id) => {
                println!("[{id}] {}", line.trim());
                ControlFlow::Continue(())
            }
        }
    }

    fn report_error(&self, err: &ShellError) {
        if self.config.color {
            eprintln!("{}", Color::Red.paint(err.to_string()));
        } else {
            eprintln!("{err}");
        }
    }

    fn report_completions(&self) {
        for done in self.jobs.poll_completions() {
            match &done.status {
                Status::Error(err) => {
                    println!("[{}] failed  {} - {err}", done.id, done.command)
                }
                _ => println!("[{}] done  {}", done.id, done.command),
            }
        }
    }

    fn prompt(&self) -> String {
        let cwd = self.vfs.current_dir();
        self.config
            .prompt
            .replace("{cwd}", &cwd.display().to_string())
    }
}

/// Split a line into an argv: whitespace separates words, single quotes
/// are literal, double quotes allow `\"` and `\\`, and a bare backslash
/// escapes the next character. No globbing, no pipelines, no
/// redirection.
fn tokenize(line: &str) -> Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut has_token = false;
    let mut chars = line.chars();
    while let Some(ch) = chars.next() {
        match ch {
            c if c.is_whitespace() => {
                if has_token {
                    tokens.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            '\'' => {
                has_token = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(c) => current.push(c),
                        None => return Err("unterminated single quote".to_string()),
                    }
                }
            }
            '"' => {
                has_token = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(c @ ('"' | '\\')) => current.push(c),
                            Some(c) => {
                                current.push('\\');
                                current.push(c);
                            }
                            None => return Err("unterminated double quote".to_string()),
                        },
                        Some(c) => current.push(c),
                        None => return Err("unterminated double quote".to_string()),
                    }
                }
            }
            '\\' => {
                has_token = true;
                match chars.next() {
                    Some(c) => current.push(c),
                    None => return Err("trailing backslash".to_string()),
                }
            }
            c => {
                has_token = true;
                current.push(c);
            }
        }
    }
    if has_token {
        tokens.push(current);
    }
    Ok(tokens)
}
