//! In-memory fakes for the host and generator ports (testing only)
//!
//! Provides `StaticHost` and `ScriptedGenerator`, which satisfy the trait
//! contracts without a browser host or a network connection.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use crate::domain::ImageRef;
use crate::generation::{GenerationFailure, GenerationResult, LogoGenerator};
use crate::host::{HostCapability, HostError, HostResult};

// ---------------------------------------------------------------------------
// StaticHost
// ---------------------------------------------------------------------------

/// Host capability with a fixed probe answer and call counters.
///
/// Opening the picker marks a key as selected, like a user who completes the
/// dialog.
#[derive(Debug, Default)]
pub struct StaticHost {
    has_key: AtomicBool,
    probe_error: Option<String>,
    picker_error: Option<String>,
    probe_calls: AtomicU32,
    picker_calls: AtomicU32,
}

impl StaticHost {
    pub fn with_key() -> Self {
        Self {
            has_key: AtomicBool::new(true),
            ..Self::default()
        }
    }

    pub fn without_key() -> Self {
        Self::default()
    }

    /// Make `has_selected_api_key` fail with `reason`.
    pub fn failing_probe(mut self, reason: &str) -> Self {
        self.probe_error = Some(reason.to_string());
        self
    }

    /// Make `open_select_key` fail with `reason`.
    pub fn failing_picker(mut self, reason: &str) -> Self {
        self.picker_error = Some(reason.to_string());
        self
    }

    pub fn probe_calls(&self) -> u32 {
        self.probe_calls.load(Ordering::Relaxed)
    }

    pub fn picker_calls(&self) -> u32 {
        self.picker_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl HostCapability for StaticHost {
    async fn has_selected_api_key(&self) -> HostResult<bool> {
        self.probe_calls.fetch_add(1, Ordering::Relaxed);
        match &self.probe_error {
            Some(reason) => Err(HostError::Capability(reason.clone())),
            None => Ok(self.has_key.load(Ordering::Relaxed)),
        }
    }

    async fn open_select_key(&self) -> HostResult<()> {
        self.picker_calls.fetch_add(1, Ordering::Relaxed);
        if let Some(reason) = &self.picker_error {
            return Err(HostError::Capability(reason.clone()));
        }
        self.has_key.store(true, Ordering::Relaxed);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ScriptedGenerator
// ---------------------------------------------------------------------------

#[derive(Debug)]
enum Scripted {
    Image(String),
    Failure(String),
    Opaque(serde_json::Value),
    Panic(String),
    Hang,
}

/// Generator that replays a queue of scripted outcomes, one per call.
///
/// When built with [`ScriptedGenerator::gated`], every call waits for a
/// [`release`](ScriptedGenerator::release) before answering, which lets tests
/// observe the in-flight window. An exhausted script fails with a plain
/// message.
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<Scripted>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicU32,
    gate: Option<Notify>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold every call until [`release`](Self::release) is called.
    pub fn gated(mut self) -> Self {
        self.gate = Some(Notify::new());
        self
    }

    pub fn then_image(self, reference: &str) -> Self {
        self.push(Scripted::Image(reference.to_string()))
    }

    pub fn then_failure(self, message: &str) -> Self {
        self.push(Scripted::Failure(message.to_string()))
    }

    pub fn then_opaque(self, value: serde_json::Value) -> Self {
        self.push(Scripted::Opaque(value))
    }

    pub fn then_panic(self, message: &str) -> Self {
        self.push(Scripted::Panic(message.to_string()))
    }

    /// The next call never resolves.
    pub fn then_hang(self) -> Self {
        self.push(Scripted::Hang)
    }

    fn push(mut self, step: Scripted) -> Self {
        self.script.get_mut().push_back(step);
        self
    }

    /// Let one held call proceed. A release issued before the call arrives
    /// is remembered.
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::Relaxed)
    }

    /// Prompts received so far, in call order.
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }
}

#[async_trait]
impl LogoGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> GenerationResult<ImageRef> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.prompts.lock().await.push(prompt.to_string());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let step = self.script.lock().await.pop_front();
        match step {
            Some(Scripted::Image(reference)) => Ok(ImageRef::new(reference)),
            Some(Scripted::Failure(message)) => Err(GenerationFailure::message(message)),
            Some(Scripted::Opaque(value)) => Err(GenerationFailure::opaque(value)),
            Some(Scripted::Panic(message)) => panic!("{message}"),
            Some(Scripted::Hang) => std::future::pending().await,
            None => Err(GenerationFailure::message("no scripted response left")),
        }
    }
}
