// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod command_handler;
pub mod server_handler;
pub mod source_handler;
pub mod task_handler;
pub mod testing_handler;
