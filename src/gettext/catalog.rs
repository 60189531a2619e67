use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// `msgid` / `msgstr`
    Singular,
    /// `msgid` / `msgid_plural` / `msgstr[0]` / `msgstr[1]`
    Plural,
}

/// A message with the location where it was first seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedMessage {
    pub kind: MessageKind,
    pub msgid: String,
    pub file_path: String,
    /// 1-based
    pub line: usize,
}

/// Messages in discovery order, each msgid at most once.
#[derive(Debug, Default)]
pub struct MessageCatalog {
    seen: HashSet<String>,
    entries: Vec<ExtractedMessage>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message unless its msgid is already present.
    ///
    /// Returns true if the message was added. Singular and plural entries
    /// share one msgid namespace.
    pub fn add(&mut self, kind: MessageKind, msgid: &str, file_path: &str, line: usize) -> bool {
        if self.seen.contains(msgid) {
            return false;
        }
        self.seen.insert(msgid.to_string());
        self.entries.push(ExtractedMessage {
            kind,
            msgid: msgid.to_string(),
            file_path: file_path.to_string(),
            line,
        });
        true
    }

    pub fn contains(&self, msgid: &str) -> bool {
        self.seen.contains(msgid)
    }

    pub fn entries(&self) -> &[ExtractedMessage] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
