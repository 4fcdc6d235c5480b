//! A replay session: one region fed by every configured device.

use std::collections::HashMap;
use std::io::{self, BufRead, Write};

use serde::Serialize;
use weave_core::{ConfigError, Emission, PointerEvent, Region, View};

use crate::config::ReplayConfig;
use crate::error::{ReplayError, ReplayResult};
use crate::feed::read_feed;

/// One line of replay output.
#[derive(Debug, Serialize)]
struct OutputLine<'a> {
    time_ms: u64,
    #[serde(flatten)]
    emission: &'a Emission,
}

/// Counters for a finished replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub events: usize,
    /// Events the region refused.
    pub dropped: usize,
    pub emissions: usize,
    pub failures: usize,
}

pub struct Session {
    region: Region,
    views: HashMap<String, View>,
}

impl Session {
    pub fn new(config: &ReplayConfig) -> ReplayResult<Self> {
        let region = config.region.build().map_err(ConfigError::from)?;

        let mut views = HashMap::new();
        for device in &config.devices {
            if views.insert(device.id.clone(), device.view.clone()).is_some() {
                log::warn!("Device {} declared twice, keeping the last view", device.id);
            }
        }

        Ok(Self { region, views })
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Read a device's feed and map every event into the workspace through
    /// that device's view.
    pub fn load_feed(&self, device: &str, reader: impl BufRead) -> ReplayResult<Vec<PointerEvent>> {
        let view = self
            .views
            .get(device)
            .ok_or_else(|| ReplayError::UnknownDevice(device.to_string()))?;
        Ok(read_feed(device, reader)?
            .into_iter()
            .map(|event| event.through_view(view))
            .collect())
    }

    /// Dispatch `events` in order, writing each emission as a JSON line.
    /// Refused events are logged and skipped.
    pub fn run(
        &mut self,
        events: impl IntoIterator<Item = PointerEvent>,
        out: &mut impl Write,
        pretty: bool,
    ) -> ReplayResult<Summary> {
        let mut summary = Summary::default();
        for event in events {
            summary.events += 1;
            let dispatch = match self.region.dispatch(&event) {
                Ok(dispatch) => dispatch,
                Err(err) => {
                    log::warn!("Dropped event at {} ms: {err}", event.time_ms);
                    summary.dropped += 1;
                    continue;
                }
            };

            summary.failures += dispatch.failures.len();
            for emission in &dispatch.emissions {
                let line = OutputLine {
                    time_ms: event.time_ms,
                    emission,
                };
                if pretty {
                    serde_json::to_writer_pretty(&mut *out, &line).map_err(io::Error::from)?;
                } else {
                    serde_json::to_writer(&mut *out, &line).map_err(io::Error::from)?;
                }
                writeln!(out)?;
                summary.emissions += 1;
            }
        }
        out.flush()?;
        Ok(summary)
    }
}
