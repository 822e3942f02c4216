// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod budget;
pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod entries;
pub mod errors;
pub mod models;
pub mod period;
pub mod persistence;
pub mod projection;
pub mod recurrence;
pub mod schedule;
pub mod session;
pub mod utils;
