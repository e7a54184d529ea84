//! Install subprocess execution with streamed output
//!
//! The install command runs on a background thread. Its stdout and stderr
//! share one OS pipe, so lines arrive in the order the child wrote them. Each
//! decoded line is posted to the driver's queue as [`ExecutionEvent::Line`],
//! followed by exactly one [`ExecutionEvent::Done`] once the child has exited.

use crate::decoder::OutputDecoder;
use crate::error::{GkitError, Result};
use crate::types::Candidate;
use std::io::{BufRead, BufReader};
use std::process::{Command, Stdio};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

#[cfg(unix)]
use crate::process_guard::{ChildRegistry, CommandProcessGroup};

/// Events produced by one install run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionEvent {
    /// One output line, terminator removed
    Line(String),
    /// The child has exited; sent once, after the last line
    Done,
}

/// Program and leading arguments; the package identifier is appended last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl InstallCommand {
    /// `go get [-u] <package>`
    pub fn go_get(update: bool) -> Self {
        let mut args = vec!["get".to_string()];
        if update {
            args.push("-u".to_string());
        }
        Self {
            program: "go".to_string(),
            args,
        }
    }

    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Full argv for `identifier`, for logs and the status bar.
    pub fn command_line(&self, identifier: &str) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 2);
        parts.push(self.program.as_str());
        parts.extend(self.args.iter().map(String::as_str));
        parts.push(identifier);
        parts.join(" ")
    }
}

impl Default for InstallCommand {
    fn default() -> Self {
        Self::go_get(true)
    }
}

/// Start installing `candidate` and stream its output into `queue`.
///
/// Launch failures are returned before any event is posted. Once this returns
/// `Ok`, the queue receives zero or more `Line`s and then one `Done`, whatever
/// the child's exit status.
pub fn spawn_install<M>(
    command: &InstallCommand,
    candidate: &Candidate,
    decoder: Box<dyn OutputDecoder>,
    queue: Sender<M>,
) -> Result<JoinHandle<()>>
where
    M: From<ExecutionEvent> + Send + 'static,
{
    let program = command.program.clone();
    let (reader, writer) = std::io::pipe().map_err(|e| GkitError::launch(&program, e))?;
    let stderr_writer = writer
        .try_clone()
        .map_err(|e| GkitError::launch(&program, e))?;

    info!(
        "Launching: {} (decoder: {})",
        command.command_line(&candidate.identifier),
        decoder.name()
    );

    // The Command owns the parent's copies of the write end; it must be
    // dropped before reading or EOF never arrives.
    let mut child = {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .arg(&candidate.identifier)
            .stdin(Stdio::null())
            .stdout(writer)
            .stderr(stderr_writer);
        #[cfg(unix)]
        cmd.in_new_process_group();
        cmd.spawn().map_err(|e| GkitError::launch(&program, e))?
    };

    let pid = child.id();
    debug!("Install process started with pid {}", pid);
    #[cfg(unix)]
    if let Ok(mut registry) = ChildRegistry::global().lock() {
        registry.register(pid);
    }

    let handle = thread::spawn(move || {
        let lines = stream_lines(BufReader::new(reader), decoder.as_ref(), |line| {
            queue.send(ExecutionEvent::Line(line).into()).is_ok()
        });

        match child.wait() {
            Ok(status) => info!(
                "{} exited with {} after {} line(s)",
                program, status, lines
            ),
            Err(e) => warn!("Failed waiting for {}: {}", program, e),
        }

        #[cfg(unix)]
        if let Ok(mut registry) = ChildRegistry::global().lock() {
            registry.unregister(pid);
        }

        if queue.send(ExecutionEvent::Done.into()).is_err() {
            debug!("Queue closed before install completion was delivered");
        }
    });

    Ok(handle)
}

/// Split `reader` into lines, decode each and hand it to `emit`.
///
/// Lines end at `\n`; a `\r` right before it is part of the terminator. A
/// trailing fragment without a newline still counts as a line. Stops early
/// when `emit` returns false or the stream errors. Returns the number of
/// lines emitted.
pub fn stream_lines<R, F>(mut reader: R, decoder: &dyn OutputDecoder, mut emit: F) -> usize
where
    R: BufRead,
    F: FnMut(String) -> bool,
{
    let mut buf = Vec::new();
    let mut count = 0;
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                    if buf.last() == Some(&b'\r') {
                        buf.pop();
                    }
                }
                if !emit(decoder.decode(&buf)) {
                    debug!("Output receiver gone, stopping reader");
                    break;
                }
                count += 1;
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!("Error reading install output: {}", e);
                break;
            }
        }
    }
    count
}
