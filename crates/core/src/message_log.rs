//! Player-facing event log. Consecutive identical messages collapse into one
//! entry with a repeat count.

use serde::{Deserialize, Serialize};

use crate::types::Rgb;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub fg: Rgb,
    pub count: u32,
}

impl Message {
    /// Text with a `(xN)` suffix once the message has repeated.
    pub fn full_text(&self) -> String {
        if self.count > 1 {
            format!("{} (x{})", self.text, self.count)
        } else {
            self.text.clone()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_message(&mut self, text: impl Into<String>, fg: Rgb) {
        let text = text.into();
        if let Some(last) = self.messages.last_mut()
            && last.text == text
        {
            last.count += 1;
            return;
        }
        self.add_message_unstacked(text, fg);
    }

    pub fn add_message_unstacked(&mut self, text: impl Into<String>, fg: Rgb) {
        self.messages.push(Message { text: text.into(), fg, count: 1 });
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
