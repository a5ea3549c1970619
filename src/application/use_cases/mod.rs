// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod command_use_case;
pub mod server_use_case;
pub mod source_use_case;
pub mod testing_use_case;
