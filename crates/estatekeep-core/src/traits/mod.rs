// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the services and their collaborators.
//!
//! All traits use `#[async_trait]` for dynamic dispatch compatibility.

pub mod clock;
pub mod store;

pub use clock::{Clock, SystemClock};
pub use store::EstateStore;
