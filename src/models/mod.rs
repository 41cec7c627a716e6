// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model: crop rectangles, aspect ratios, frames and projects.

pub mod aspect_ratio;
pub mod crop_rect;
pub mod frame;
pub mod project;
