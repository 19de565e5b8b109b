//! # Shell Subcommand
//!
//! `omni shell` is an interactive audit session on a single-threaded event
//! loop. Input lines and network completions are both events:
//!
//! ```text
//!   stdin line ──┐
//!                ├──▶ event loop ──▶ AuditSession ──▶ stdout
//!   completion ──┘        │
//!        ▲                └── spawn_local(service call) ──┐
//!        └────────────────────────────────────────────────┘
//! ```
//!
//! Service calls run as local tasks and report back over a channel tagged
//! with the sequence number they were issued under. Completions for requests
//! that a `:reset` has abandoned settle as stale and print nothing.
//!
//! Must be driven inside a [`tokio::task::LocalSet`].

use std::io::Write;

use anyhow::Result;
use clap::Args;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

use omni_core::{AuditResult, ComplianceService, Policy, PolicyId, ServiceError};
use omni_state::{AuditSession, RequestSeq, Scope, SessionError, Settlement, WorkflowState};
use omni_verdict::{present, IDLE_PLACEHOLDER, LOADING_INDICATOR};

/// Arguments for the `omni shell` subcommand.
#[derive(Args, Debug, Default)]
pub struct ShellArgs {}

const HELP: &str = "\
commands:
  :policies      list the policy catalog
  :scope ID      restrict audits to one policy
  :global        search the entire knowledge base
  :status        show scope, catalog and the current result
  :reset         start a fresh session
  :quit          leave the shell
anything else is submitted as the audit question";

const PROMPT: &str = "omni> ";

/// A finished service call.
#[derive(Debug)]
enum Completion {
    Catalog {
        seq: RequestSeq,
        outcome: Result<Vec<Policy>, ServiceError>,
    },
    Audit {
        seq: RequestSeq,
        outcome: Result<AuditResult, ServiceError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct Shell<'a, S, W> {
    session: AuditSession<S>,
    out: &'a mut W,
    done_tx: mpsc::UnboundedSender<Completion>,
    in_flight: usize,
}

/// Run the shell until `:quit`, or until input ends and every request in
/// flight has completed.
pub async fn run_shell<S, R, W>(service: S, input: R, out: &mut W) -> Result<u8>
where
    S: ComplianceService + Clone + 'static,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let (done_tx, mut done_rx) = mpsc::unbounded_channel();
    let mut shell = Shell {
        session: AuditSession::new(service),
        out,
        done_tx,
        in_flight: 0,
    };

    writeln!(shell.out, "Type :help for commands.")?;
    shell.start_catalog_load()?;
    // Let an immediately available catalog land before the first prompt.
    tokio::task::yield_now().await;

    let mut lines = input.lines();
    let mut input_open = true;
    shell.prompt()?;

    loop {
        tokio::select! {
            biased;
            Some(done) = done_rx.recv() => shell.on_completion(done)?,
            line = lines.next_line(), if input_open => match line? {
                Some(line) => {
                    if shell.on_line(&line)? == Flow::Quit {
                        break;
                    }
                    tokio::task::yield_now().await;
                    shell.prompt()?;
                }
                None => input_open = false,
            },
            else => break,
        }
        if !input_open && shell.in_flight == 0 {
            break;
        }
    }
    Ok(0)
}

impl<S, W> Shell<'_, S, W>
where
    S: ComplianceService + Clone + 'static,
    W: Write,
{
    fn prompt(&mut self) -> Result<()> {
        write!(self.out, "{PROMPT}")?;
        self.out.flush()?;
        Ok(())
    }

    fn start_catalog_load(&mut self) -> Result<()> {
        let seq = self.session.begin_load()?;
        let service = self.session.service().clone();
        let done_tx = self.done_tx.clone();
        self.in_flight += 1;
        tokio::task::spawn_local(async move {
            let outcome = service.list_policies().await;
            // Receiver gone means the shell has exited.
            let _ = done_tx.send(Completion::Catalog { seq, outcome });
        });
        Ok(())
    }

    fn on_line(&mut self, line: &str) -> Result<Flow> {
        let trimmed = line.trim();
        match trimmed {
            "" => {}
            ":quit" | ":q" => return Ok(Flow::Quit),
            ":help" => writeln!(self.out, "{HELP}")?,
            ":policies" => self.list_policies()?,
            ":global" => self.select(Scope::Global)?,
            ":status" => self.status()?,
            ":reset" => {
                self.session.reinitialize();
                writeln!(self.out, "Session reset.")?;
                self.start_catalog_load()?;
            }
            cmd if cmd.split_whitespace().next() == Some(":scope") => {
                let raw = cmd[":scope".len()..].trim();
                match PolicyId::new(raw) {
                    Ok(id) => self.select(Scope::Policy(id))?,
                    Err(err) => writeln!(self.out, "error: {err}")?,
                }
            }
            cmd if cmd.starts_with(':') => {
                writeln!(self.out, "unknown command `{cmd}`; try :help")?;
            }
            _ => self.submit(line)?,
        }
        Ok(Flow::Continue)
    }

    fn list_policies(&mut self) -> Result<()> {
        let catalog = self.session.catalog();
        if let Some(err) = catalog.load_error() {
            writeln!(self.out, "! {err}")?;
        } else if catalog.policies().is_empty() {
            writeln!(self.out, "No policies available ({}).", catalog.state())?;
        } else {
            for policy in catalog.policies() {
                writeln!(self.out, "  {}  {}", policy.id, policy.name)?;
            }
        }
        Ok(())
    }

    fn select(&mut self, scope: Scope) -> Result<()> {
        match self.session.select_scope(scope) {
            Ok(()) => writeln!(self.out, "{}", self.session.scope().description())?,
            Err(err) => writeln!(self.out, "error: {err}")?,
        }
        Ok(())
    }

    fn status(&mut self) -> Result<()> {
        let scope = match self.session.scope() {
            Scope::Global => "global".to_string(),
            Scope::Policy(id) => id.to_string(),
        };
        writeln!(
            self.out,
            "scope: {scope} ({})",
            self.session.scope().description()
        )?;
        writeln!(self.out, "catalog: {}", self.session.catalog().state())?;
        self.render_state()
    }

    fn submit(&mut self, text: &str) -> Result<()> {
        self.session.set_query(text);
        match self.session.begin_submit() {
            Ok(pending) => {
                let service = self.session.service().clone();
                let done_tx = self.done_tx.clone();
                self.in_flight += 1;
                tokio::task::spawn_local(async move {
                    let outcome = service.run_audit(&pending.query).await;
                    let _ = done_tx.send(Completion::Audit {
                        seq: pending.seq,
                        outcome,
                    });
                });
                writeln!(self.out, "{LOADING_INDICATOR}")?;
            }
            Err(SessionError::Workflow(err)) => {
                writeln!(self.out, "busy: {err}; wait for the current audit to finish")?;
            }
            Err(err) => writeln!(self.out, "error: {err}")?,
        }
        Ok(())
    }

    fn on_completion(&mut self, done: Completion) -> Result<()> {
        self.in_flight = self.in_flight.saturating_sub(1);
        match done {
            Completion::Catalog { seq, outcome } => {
                if self.session.finish_load(seq, outcome) == Settlement::Stale {
                    return Ok(());
                }
                let catalog = self.session.catalog();
                match catalog.load_error() {
                    Some(err) => writeln!(self.out, "\n! {err}")?,
                    None => {
                        let count = catalog.policies().len();
                        let noun = if count == 1 { "policy" } else { "policies" };
                        writeln!(self.out, "\nLoaded {count} {noun}.")?;
                    }
                }
            }
            Completion::Audit { seq, outcome } => {
                if self.session.settle_submit(seq, outcome) == Settlement::Stale {
                    return Ok(());
                }
                writeln!(self.out)?;
                self.render_state()?;
            }
        }
        Ok(())
    }

    fn render_state(&mut self) -> Result<()> {
        match self.session.state() {
            WorkflowState::Idle => writeln!(self.out, "{IDLE_PLACEHOLDER}")?,
            WorkflowState::Loading { .. } => writeln!(self.out, "{LOADING_INDICATOR}")?,
            WorkflowState::Success(result) => writeln!(self.out, "{}", present(result))?,
            WorkflowState::Failure(failure) => writeln!(self.out, "error: {failure}")?,
        }
        Ok(())
    }
}
