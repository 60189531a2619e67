//! PO template rendering.

use std::io::{self, Write};

use super::catalog::{ExtractedMessage, MessageCatalog, MessageKind};

/// Placeholder used for both date fields of the header.
pub const DATE_PLACEHOLDER: &str = "YEAR-MO-DA HO:MI+ZONE";

/// Write the header block. It is emitted even for an empty catalog.
pub fn write_header<W: Write>(writer: &mut W, project: &str) -> io::Result<()> {
    writeln!(writer, "msgid \"\"")?;
    writeln!(writer, "msgstr \"\"")?;
    writeln!(writer, "\"Project-Id-Version: {}\\n\"", escape(project))?;
    writeln!(writer, "\"POT-Creation-Date: {}\\n\"", DATE_PLACEHOLDER)?;
    writeln!(writer, "\"PO-Revision-Date: {}\\n\"", DATE_PLACEHOLDER)?;
    writeln!(writer, "\"MIME-Version: 1.0\\n\"")?;
    writeln!(writer, "\"Content-Type: text/plain; charset=utf-8\\n\"")?;
    writeln!(writer, "\"Content-Transfer-Encoding: 8bit\\n\"")?;
    writeln!(writer)
}

pub fn write_entry<W: Write>(writer: &mut W, message: &ExtractedMessage) -> io::Result<()> {
    let msgid = escape(&message.msgid);
    writeln!(writer, "#: {}:{}", message.file_path, message.line)?;
    writeln!(writer, "msgid \"{}\"", msgid)?;
    match message.kind {
        MessageKind::Singular => {
            writeln!(writer, "msgstr \"\"")?;
        }
        MessageKind::Plural => {
            writeln!(writer, "msgid_plural \"{}\"", msgid)?;
            writeln!(writer, "msgstr[0] \"\"")?;
            writeln!(writer, "msgstr[1] \"\"")?;
        }
    }
    writeln!(writer)
}

/// Write the header followed by every entry in discovery order.
pub fn write_template<W: Write>(
    writer: &mut W,
    catalog: &MessageCatalog,
    project: &str,
) -> io::Result<()> {
    write_header(writer, project)?;
    for message in catalog.entries() {
        write_entry(writer, message)?;
    }
    Ok(())
}

/// Escape double quotes that the source string left unescaped.
///
/// Captured msgids keep the source language's escapes (`\n`, `\"`), which
/// PO understands, so only bare quotes need attention.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut backslashes = 0;
    for c in text.chars() {
        if c == '"' && backslashes % 2 == 0 {
            out.push('\\');
        }
        backslashes = if c == '\\' { backslashes + 1 } else { 0 };
        out.push(c);
    }
    out
}
