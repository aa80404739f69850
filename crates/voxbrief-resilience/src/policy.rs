// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Retry policy: a primary and a fallback model, each with its own attempt budget.

use std::time::Duration;

use voxbrief_core::VoxbriefError;

/// One model and how many times it may be called per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tier {
    model: String,
    max_attempts: u32,
}

impl Tier {
    /// Fails if `model` is blank or `max_attempts` is zero.
    pub fn new(model: impl Into<String>, max_attempts: u32) -> Result<Self, VoxbriefError> {
        let model = model.into();
        if model.trim().is_empty() {
            return Err(VoxbriefError::Config(
                "retry tier model name must not be empty".into(),
            ));
        }
        if max_attempts < 1 {
            return Err(VoxbriefError::Config(format!(
                "retry tier `{model}` needs at least one attempt"
            )));
        }
        Ok(Self {
            model,
            max_attempts,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

/// Primary tier, fallback tier, and the fixed pause between attempts on one tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    primary: Tier,
    fallback: Tier,
    delay: Duration,
}

impl RetryPolicy {
    pub fn new(primary: Tier, fallback: Tier, delay: Duration) -> Self {
        Self {
            primary,
            fallback,
            delay,
        }
    }

    /// Builds both tiers from raw values, validating each.
    pub fn from_parts(
        primary_model: &str,
        primary_attempts: u32,
        fallback_model: &str,
        fallback_attempts: u32,
        delay: Duration,
    ) -> Result<Self, VoxbriefError> {
        Ok(Self::new(
            Tier::new(primary_model, primary_attempts)?,
            Tier::new(fallback_model, fallback_attempts)?,
            delay,
        ))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Tiers in the order they are tried.
    pub fn tiers(&self) -> [(&'static str, &Tier); 2] {
        [("primary", &self.primary), ("fallback", &self.fallback)]
    }
}
