// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Application layer: workflow orchestration over the domain and the
//! provider port.

pub mod onboarding_service;
