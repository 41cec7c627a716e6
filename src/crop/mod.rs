// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Interactive crop rectangle editing: handles, drag rules and the edit
//! session that ties them to gesture events.

pub mod drag;
pub mod editor;
pub mod handle;

pub use editor::{CropEditor, GestureEvent};
pub use handle::Handle;
