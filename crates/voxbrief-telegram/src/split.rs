// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Splitting long replies into Telegram-sized chunks.
//!
//! Length is measured in UTF-16 code units, which is how Telegram counts the
//! 4096-character message limit.

/// Splits `text` into chunks of at most `max_len` UTF-16 units.
///
/// Each cut lands on the last newline inside the budget, else the last
/// space, else exactly at the budget. Whitespace around every cut is
/// trimmed from the start of the next chunk. Text that already fits is
/// returned unchanged as a single chunk.
pub fn split_for_transport(text: &str, max_len: usize) -> Vec<String> {
    let max_len = max_len.max(1);
    let mut chunks = Vec::new();
    let mut rest = text;

    loop {
        let limit = budget_end(rest, max_len);
        if limit == rest.len() {
            chunks.push(rest.to_string());
            break;
        }

        let window = &rest[..limit];
        // A separator at position 0 would produce an empty chunk.
        let cut = [window.rfind('\n'), window.rfind(' ')]
            .into_iter()
            .flatten()
            .find(|&pos| pos > 0)
            .unwrap_or(limit);
        chunks.push(rest[..cut].to_string());

        rest = rest[cut..].trim();
        if rest.is_empty() {
            break;
        }
    }
    chunks
}

/// Byte index just past the longest prefix of `text` within `max_len` UTF-16 units.
///
/// Always advances by at least one character so splitting makes progress.
fn budget_end(text: &str, max_len: usize) -> usize {
    let mut units = 0;
    for (idx, ch) in text.char_indices() {
        units += ch.len_utf16();
        if units > max_len {
            return if idx == 0 { ch.len_utf8() } else { idx };
        }
    }
    text.len()
}
