// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod archive_service;
pub mod extraction_dispatcher;
pub mod task_tracker;
