// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

pub const DEFAULT_GENERATOR_KEY: &str = "generator";

/// Assigns annotation keys to the phases of an intercepted resolver.
///
/// Keys are run in the order listed here; functions under one key run in declaration order.
///
/// ```json
/// { "args": ["validators"], "pre": ["permissions"], "post": ["analytics"] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Keys looked up on arguments (and nested input fields), run only for supplied arguments.
    pub args: Vec<String>,
    /// Keys looked up on the field, run before the primary resolver.
    pub pre: Vec<String>,
    /// Keys looked up on the field, run after the primary resolver without delaying its result.
    pub post: Vec<String>,
    /// Keys looked up on top-level arguments whose functions replace the argument value.
    pub generators: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Args,
    Pre,
    Post,
    Generate,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_args<S: Into<String>>(mut self, keys: impl IntoIterator<Item = S>) -> Self {
        self.args = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_pre<S: Into<String>>(mut self, keys: impl IntoIterator<Item = S>) -> Self {
        self.pre = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_post<S: Into<String>>(mut self, keys: impl IntoIterator<Item = S>) -> Self {
        self.post = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_generators<S: Into<String>>(mut self, keys: impl IntoIterator<Item = S>) -> Self {
        self.generators = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn keys(&self, phase: Phase) -> &[String] {
        match phase {
            Phase::Args => &self.args,
            Phase::Pre => &self.pre,
            Phase::Post => &self.post,
            Phase::Generate => &self.generators,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            args: vec![],
            pre: vec![],
            post: vec![],
            generators: vec![DEFAULT_GENERATOR_KEY.to_string()],
        }
    }
}
