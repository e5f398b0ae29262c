//! Calendar of events, queried for what is running at a given instant.

use chrono::TimeDelta;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::clock::{Instant, parse_instant};
use crate::error::{Error, Result};

/// An event as it appears in the feed, timestamps still unparsed.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    pub name: String,
    #[serde(default)]
    pub location: String,
    pub start: String,
    pub finish: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum EventsPayload {
    List(Vec<RawEvent>),
    Wrapped { events: Vec<RawEvent> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub name: String,
    pub location: String,
    pub start: Instant,
    pub finish: Instant,
}

impl Event {
    pub fn from_raw(raw: &RawEvent) -> Result<Self> {
        let start = parse_instant(&raw.start)?;
        let finish = parse_instant(&raw.finish)?;
        if finish <= start {
            return Err(Error::malformed(
                "events",
                format!("{:?} finishes at {} before it starts at {}", raw.name, raw.finish, raw.start),
            ));
        }
        Ok(Self { name: raw.name.clone(), location: raw.location.clone(), start, finish })
    }

    pub fn duration(&self) -> TimeDelta {
        self.finish - self.start
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration().num_milliseconds() as f64 / 3_600_000.0
    }

    /// Half-open: running from `start` up to, not including, `finish`.
    pub fn is_running(&self, at: &Instant) -> bool {
        self.start <= *at && *at < self.finish
    }
}

#[derive(Debug, Default)]
pub struct EventGuide {
    events: Vec<Event>,
}

impl EventGuide {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every event. Nothing changes unless all records parse.
    pub fn update(&mut self, raw: &[RawEvent]) -> Result<()> {
        let mut events = raw.iter().map(Event::from_raw).collect::<Result<Vec<_>>>()?;
        events.sort_by_key(|e| e.start);
        self.events = events;
        Ok(())
    }

    /// Hot reload entry point: a JSON array of events or `{ "events": [...] }`.
    pub fn reload(&mut self, data: &Value) -> Result<()> {
        let raw = match EventsPayload::deserialize(data) {
            Ok(EventsPayload::List(raw)) | Ok(EventsPayload::Wrapped { events: raw }) => raw,
            Err(e) => return Err(Error::malformed("events", e.to_string())),
        };
        self.update(&raw)?;
        info!(count = self.events.len(), "event guide reloaded");
        Ok(())
    }

    /// Events running at `at`, in start order.
    pub fn running(&self, at: Instant) -> impl Iterator<Item = &Event> + '_ {
        self.events
            .iter()
            .take_while(move |e| e.start <= at)
            .filter(move |e| at < e.finish)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
