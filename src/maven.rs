//! Spawning Maven and draining its output.
//!
//! One call to [`run`] is one build invocation: spawn `mvn` for the job,
//! forward both output streams line by line into a single channel, and hand
//! each line to the caller's callback on the calling thread, in arrival
//! order. The dispatcher downstream therefore stays single-threaded; the only
//! extra threads here are the two stream forwarders, and they never touch
//! classification state.

use crate::config::Config;
use crate::job::Job;
use std::io::{self, BufRead, BufReader, Read};
use std::process::{Command, ExitStatus, Stdio};
use std::sync::mpsc;
use std::thread;

/// Build the `mvn` command line for `job`.
///
/// Batch mode (`-B`) keeps Maven's own ANSI coloring out of the stream; the
/// curated output applies its own.
pub fn command(job: &Job, config: &Config) -> Command {
    let maven_home = job.maven_home.as_ref().unwrap_or(&config.maven_home);
    let mut cmd = Command::new(maven_home.join("bin").join("mvn"));
    cmd.arg("-B");
    cmd.arg("-f").arg(&job.pom_file);
    if let Some(threads) = &job.threads {
        if !regex!(r"^\d+(\.\d+)?C?$").is_match(threads) {
            log::warn!("thread spec {threads:?} does not look like a Maven -T value (e.g. \"4\" or \"1C\")");
        }
        cmd.arg("-T").arg(threads);
    }
    cmd.args(&job.goals);
    if let Some(java_home) = &job.java_home {
        cmd.env("JAVA_HOME", java_home);
    }
    cmd
}

/// Run the job and feed every output line, stdout and stderr combined, to
/// `on_line` in arrival order. Blocks until the build finishes and returns
/// its exit status.
pub fn run(job: &Job, config: &Config, mut on_line: impl FnMut(String)) -> io::Result<ExitStatus> {
    let mut child =
        command(job, config).stdin(Stdio::null()).stdout(Stdio::piped()).stderr(Stdio::piped()).spawn()?;

    let stdout = child.stdout.take().ok_or_else(|| io::Error::other("child stdout was not captured"))?;
    let stderr = child.stderr.take().ok_or_else(|| io::Error::other("child stderr was not captured"))?;

    let (tx, rx) = mpsc::channel::<String>();
    let forwarders = [spawn_forwarder(stdout, tx.clone()), spawn_forwarder(stderr, tx)];

    // Both senders are owned by the forwarders, so this loop ends when the
    // child closes its streams.
    for line in rx {
        on_line(line);
    }

    let status = child.wait()?;
    for forwarder in forwarders {
        let _ = forwarder.join();
    }
    Ok(status)
}

fn spawn_forwarder(stream: impl Read + Send + 'static, tx: mpsc::Sender<String>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for line in BufReader::new(stream).lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    log::debug!("stopped draining a build output stream: {err}");
                    break;
                }
            }
        }
    })
}
