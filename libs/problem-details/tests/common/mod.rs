#![allow(dead_code, clippy::unwrap_used)]

//! Shared fixtures for the problem details integration tests

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use problem_details::{
    AdapterRegistry, AsProblemDetails, Extensions, MemoryLog, ProblemDef, ProblemDetails,
    ProblemRenderer,
};

pub const SAMPLE_ERROR_TITLE: &str = "Something evil this way comes.";

pub const IMMORTAL_DEAD: ProblemDef = ProblemDef {
    status: 409,
    title: "The Immortal Dead Have Arrived",
    type_url: "https://api.example.com/errors/tidha",
};

/// Plain error with no adapter of its own.
#[derive(Debug)]
pub struct SampleError(pub String);

impl SampleError {
    pub fn new(message: &str) -> Self {
        Self(message.to_owned())
    }
}

impl fmt::Display for SampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Error for SampleError {}

/// Error whose message renders as an empty string.
#[derive(Debug)]
pub struct SadError;

impl fmt::Display for SadError {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Ok(())
    }
}

impl Error for SadError {}

/// Error that knows its own problem details.
#[derive(Debug, Clone)]
pub struct SampleProblemDetails {
    pub type_url: Option<String>,
    pub title: Option<String>,
    pub status: Option<u16>,
    pub detail: Option<String>,
    pub instance: Option<String>,
    pub extensions: Extensions,
}

impl SampleProblemDetails {
    pub fn new() -> Self {
        let mut extensions = Extensions::new();
        extensions.insert("severity", "really, really bad").unwrap();
        extensions.insert("whence", "Depths of Hades").unwrap();
        Self::with_extensions(extensions)
    }

    pub fn with_extensions(extensions: Extensions) -> Self {
        Self {
            type_url: Some("https://api.example.com/errors/evil".to_owned()),
            title: Some("Evil is Coming".to_owned()),
            status: Some(400),
            detail: Some("Evil is coming to *your* town.".to_owned()),
            instance: Some("https://api.example.com/errors/evil?town=54321".to_owned()),
            extensions,
        }
    }

    pub fn extension(key: &str, value: &serde_json::Value) -> Self {
        let mut extensions = Extensions::new();
        extensions.insert_value(key, value.clone());
        Self::with_extensions(extensions)
    }
}

impl fmt::Display for SampleProblemDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title.as_deref().unwrap_or("problem"))
    }
}

impl Error for SampleProblemDetails {}

impl AsProblemDetails for SampleProblemDetails {
    fn as_problem_details(&self) -> ProblemDetails {
        ProblemDetails {
            type_url: self.type_url.clone(),
            title: self.title.clone(),
            status: self.status,
            detail: self.detail.clone(),
            instance: self.instance.clone(),
            extensions: self.extensions.clone(),
        }
    }
}

/// Adapter standing in for a host's mapping of `SampleError`.
pub fn sample_adapter(_error: &SampleError) -> ProblemDetails {
    IMMORTAL_DEAD
        .as_problem("They are coming for you.")
        .with_extension("exception_class", std::any::type_name::<SampleError>())
        .unwrap()
}

/// Registry knowing `SampleProblemDetails` natively and the title of
/// `SampleError`, but no adapter for it.
pub fn base_registry() -> AdapterRegistry {
    AdapterRegistry::new()
        .register_native::<SampleProblemDetails>()
        .register_title::<SampleError>(SAMPLE_ERROR_TITLE)
}

/// `base_registry` plus the `SampleError` adapter.
pub fn adapting_registry() -> AdapterRegistry {
    base_registry().register(sample_adapter)
}

pub fn renderer(registry: AdapterRegistry) -> (ProblemRenderer, Arc<MemoryLog>) {
    let log = Arc::new(MemoryLog::new());
    let renderer = ProblemRenderer::new(registry).with_log(log.clone());
    (renderer, log)
}
