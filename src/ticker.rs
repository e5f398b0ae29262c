//! Horizontally scrolling marquee fed from a cyclic message list.

use std::collections::VecDeque;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::constants::*;
use crate::error::{Error, Result};
use crate::render::Frame;

#[derive(Debug, Clone, PartialEq)]
pub struct TickerItem {
    pub text: String,
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

impl TickerItem {
    pub fn end_x(&self) -> f32 {
        self.x + self.width
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MessagesPayload {
    Wrapped { messages: Vec<String> },
    List(Vec<String>),
}

/// What one call to [`Ticker::draw`] did to the queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickerStats {
    pub inserted: usize,
    pub evicted: usize,
    /// The insertion bound stopped replenishment before the width was filled.
    pub saturated: bool,
}

#[derive(Debug)]
pub struct Ticker {
    messages: Vec<String>,
    next_message_id: usize,
    items: VecDeque<TickerItem>,
    speed: f32,
    visible_width: f32,
    size: f32,
    y: f32,
}

impl Ticker {
    pub fn new(visible_width: f32) -> Self {
        Self {
            messages: Vec::new(),
            next_message_id: 0,
            items: VecDeque::new(),
            speed: TICKER_SPEED,
            visible_width,
            size: TICKER_SIZE,
            y: TICKER_Y,
        }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    /// Replaces the message source. Items already on screen keep scrolling
    /// and the cyclic position carries over into the new list.
    pub fn set_messages(&mut self, messages: Vec<String>) {
        self.messages = messages;
    }

    /// Hot reload entry point: `{ "messages": [...] }` or a bare list.
    pub fn reload(&mut self, data: &Value) -> Result<()> {
        let messages = match MessagesPayload::deserialize(data) {
            Ok(MessagesPayload::Wrapped { messages }) | Ok(MessagesPayload::List(messages)) => messages,
            Err(e) => return Err(Error::malformed("ticker", e.to_string())),
        };
        info!(count = messages.len(), "ticker messages reloaded");
        self.set_messages(messages);
        Ok(())
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn items(&self) -> &VecDeque<TickerItem> {
        &self.items
    }

    pub fn next_message_id(&self) -> usize {
        self.next_message_id
    }

    pub fn visible_width(&self) -> f32 {
        self.visible_width
    }

    /// Right edge of the queue, or the left screen edge when it is empty.
    pub fn end_x(&self) -> f32 {
        self.items.back().map_or(0.0, TickerItem::end_x)
    }

    pub fn draw(&mut self, dt: f32, frame: &mut Frame<'_>) -> TickerStats {
        let mut stats = TickerStats::default();
        let font = frame.theme.fonts.normal;
        let color = frame.theme.palette.body;

        let dx = dt * self.speed;
        for item in self.items.iter_mut() {
            item.x -= dx;
            frame.gfx.draw_text(font, &item.text, item.x, self.y, self.size, color);
        }

        while self.items.front().is_some_and(|item| item.end_x() < 0.0) {
            self.items.pop_front();
            stats.evicted += 1;
        }

        if self.messages.is_empty() {
            return stats;
        }

        let mut end_x = self.end_x();
        let mut budget = MAX_INSERTIONS_PER_FRAME;
        while end_x < self.visible_width {
            if budget == 0 {
                stats.saturated = true;
                debug!(end_x, "ticker insertion bound reached");
                break;
            }
            budget -= 1;

            // A shorter list may have been loaded since the index last moved.
            let id = self.next_message_id % self.messages.len();
            let text = &self.messages[id];
            let measured = match frame.gfx.measure_text(font, text, self.size) {
                Ok(measured) => measured,
                Err(e) => {
                    warn!(error = %e, text = %text, "could not measure ticker message");
                    break;
                }
            };

            let item = TickerItem { text: text.clone(), x: end_x, width: measured.width, height: measured.height };
            self.next_message_id = (id + 1) % self.messages.len();
            end_x = item.end_x();
            self.items.push_back(item);
            stats.inserted += 1;
        }

        stats
    }
}
