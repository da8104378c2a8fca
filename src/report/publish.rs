use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::configuration::constants::report::{
    REFRESH_FROZEN, REFRESH_ONGOING, TICK_INTERVAL, TITLE_DONE, TITLE_ONGOING,
};
use crate::report::error::Error;
use crate::report::project::project;
use crate::report::render::Renderer;
use crate::runner::RunState;

/// Replaces the file at `path` with `data` atomically: the bytes are staged
/// in a sibling temp file and renamed over the destination, so a concurrent
/// reader sees either the old document or the new one, never a torn write.
pub fn publish(path: &Path, data: &[u8]) -> Result<(), Error> {
    let staging = staging_path(path);
    fs::write(&staging, data).map_err(|source| Error::Publish {
        path: staging.clone(),
        source,
    })?;
    fs::rename(&staging, path).map_err(|source| Error::Publish {
        path: path.to_owned(),
        source,
    })
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("report"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Periodically projects the shared run state into a report and republishes
/// it until the runner signals completion. The completion flag is sampled
/// before each render, so the publish that observes it is the final one and
/// always happens, even when the run finishes before the first tick.
pub struct LiveReporter {
    state: Arc<RunState>,
    output: PathBuf,
    interval: Duration,
    go_version: Option<String>,
}

impl LiveReporter {
    pub fn new(state: Arc<RunState>, output: PathBuf) -> Self {
        Self {
            state,
            output,
            interval: TICK_INTERVAL,
            go_version: None,
        }
    }

    pub fn with_go_version(mut self, go_version: Option<String>) -> Self {
        self.go_version = go_version;
        self
    }

    #[cfg(test)]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn run(&self) -> Result<(), Error> {
        let renderer = Renderer::new()?;
        loop {
            let done = self.state.is_done();
            let packages = self.state.snapshot();
            let report = project(&packages, self.go_version.as_deref());
            let (title, refresh) = if done {
                (TITLE_DONE, REFRESH_FROZEN)
            } else {
                (TITLE_ONGOING, REFRESH_ONGOING)
            };
            let html = renderer.render(&report, title, refresh)?;
            publish(&self.output, &html)?;

            if done {
                info!("Final report published to {}", self.output.display());
                return Ok(());
            }
            thread::sleep(self.interval);
        }
    }
}
