// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram transport for voxbrief.
//!
//! Long-polls the Bot API through teloxide, converts updates into
//! transport-neutral messages, and renders model Markdown into the HTML
//! subset Telegram accepts, split into deliverable chunks.

pub mod convert;
pub mod markup;
pub mod split;
pub mod transport;

pub use convert::convert_update;
pub use markup::{compose_reply, escape_html, render_markup};
pub use split::split_for_transport;
pub use transport::TelegramTransport;
