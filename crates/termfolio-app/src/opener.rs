//! Opens the resume with the platform's default viewer.

use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};

use termfolio_core::backend::DocumentOpener;
use termfolio_core::error::{Result, TermfolioError};

/// Program and leading arguments that hand a path or URL to the desktop.
#[cfg(target_os = "macos")]
const LAUNCHER: &[&str] = &["open"];
#[cfg(target_os = "windows")]
const LAUNCHER: &[&str] = &["cmd", "/C", "start", ""];
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const LAUNCHER: &[&str] = &["xdg-open"];

/// Wait for a launcher on its own thread so it never lingers as a zombie.
fn reap_in_background(mut child: Child) -> Option<JoinHandle<()>> {
    let spawned = thread::Builder::new()
        .name("launcher-reaper".into())
        .spawn(move || match child.wait() {
            Ok(status) if !status.success() => log::warn!("Launcher exited with {status}"),
            Ok(_) => {},
            Err(e) => log::warn!("Could not wait for launcher: {e}"),
        });
    match spawned {
        Ok(handle) => Some(handle),
        Err(e) => {
            log::warn!("Could not start launcher reaper: {e}");
            None
        },
    }
}

/// Spawns the platform launcher without blocking the session.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl DocumentOpener for SystemOpener {
    fn open(&self, target: &str) -> Result<()> {
        let (program, args) = LAUNCHER
            .split_first()
            .ok_or_else(|| TermfolioError::Backend("no document launcher".into()))?;
        let child = Command::new(program)
            .args(args)
            .arg(target)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| TermfolioError::Backend(format!("{program}: {e}")))?;
        reap_in_background(child);
        log::info!("Opened {target} with {program}");
        Ok(())
    }
}
