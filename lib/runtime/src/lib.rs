// SPDX-FileCopyrightText: Copyright (c) 2024-2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! medpredict runtime: logging, process settings and shutdown plumbing shared by the
//! diagnosis library and the service binaries.

pub use anyhow::{
    Context as ErrorContext, Error, Ok as OK, Result, anyhow as error, bail as raise,
};

pub mod config;
pub mod logging;
pub mod runtime;

pub use runtime::Runtime;
pub use tokio_util::sync::CancellationToken;
