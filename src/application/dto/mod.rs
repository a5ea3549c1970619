// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod command_request;
pub mod home_response;
pub mod server_request;
pub mod source_request;
pub mod testing_request;
