//! Bounded waits on short-lived helper processes.

use std::io::{self, Read};
use std::process::{Child, Output};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Wait for a child process, killing it once `timeout` elapses.
///
/// std::process has no native timeout, so this polls `try_wait`. A timed
/// out child is killed and reaped before `ErrorKind::TimedOut` is returned.
/// Output pipes are drained after exit; callers only use this for commands
/// that print a line or two.
pub fn wait_with_timeout(child: &mut Child, timeout: Duration) -> io::Result<Output> {
    let start = Instant::now();

    loop {
        match child.try_wait()? {
            Some(status) => {
                let stdout = drain(child.stdout.take());
                let stderr = drain(child.stderr.take());
                return Ok(Output {
                    status,
                    stdout,
                    stderr,
                });
            }
            None => {
                if start.elapsed() >= timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(io::Error::new(
                        io::ErrorKind::TimedOut,
                        format!("process timed out after {}ms", timeout.as_millis()),
                    ));
                }
                thread::sleep(POLL_INTERVAL);
            }
        }
    }
}

fn drain<R: Read>(pipe: Option<R>) -> Vec<u8> {
    pipe.map(|mut p| {
        let mut buf = Vec::new();
        p.read_to_end(&mut buf).ok();
        buf
    })
    .unwrap_or_default()
}
