// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query modules for CRUD operations on storage entities.

pub mod assets;
pub mod communications;
pub mod escalations;
pub mod estates;
pub mod notifications;
pub mod users;
