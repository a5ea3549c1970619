// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod catalog_api_test;
pub mod helpers;
pub mod source_api_test;
pub mod task_api_test;
