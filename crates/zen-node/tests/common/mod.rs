//! Common test utilities for node integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use zen_node::{
    Decision, DecisionEvaluator, EvaluationError, EvaluationResponse, EvaluatorProvider,
};

type Script = dyn Fn(&Value, &Value) -> Result<Value, EvaluationError> + Send + Sync;

/// Everything the fake engine observed during a run
#[derive(Debug, Default)]
pub struct Journal {
    /// (rules, input) pairs in evaluation order
    pub evaluations: Vec<(Value, Value)>,
    /// Dispose count per acquired instance, indexed by acquisition order
    pub disposals: Vec<usize>,
}

/// Fake engine that runs a script and records every call
#[derive(Clone)]
pub struct RecordingProvider {
    script: Arc<Script>,
    journal: Arc<Mutex<Journal>>,
}

impl RecordingProvider {
    /// Engine whose result is computed by `script(rules, input)`
    pub fn new<F>(script: F) -> Self
    where
        F: Fn(&Value, &Value) -> Result<Value, EvaluationError> + Send + Sync + 'static,
    {
        Self {
            script: Arc::new(script),
            journal: Arc::new(Mutex::new(Journal::default())),
        }
    }

    /// Engine that returns the input document as the result
    pub fn echo() -> Self {
        Self::new(|_rules, input| Ok(input.clone()))
    }

    pub fn evaluations(&self) -> Vec<(Value, Value)> {
        self.journal.lock().unwrap().evaluations.clone()
    }

    pub fn disposals(&self) -> Vec<usize> {
        self.journal.lock().unwrap().disposals.clone()
    }
}

impl EvaluatorProvider for RecordingProvider {
    fn acquire(&self) -> Result<Box<dyn DecisionEvaluator>, EvaluationError> {
        let slot = {
            let mut journal = self.journal.lock().unwrap();
            journal.disposals.push(0);
            journal.disposals.len() - 1
        };
        Ok(Box::new(RecordingEvaluator {
            script: self.script.clone(),
            journal: self.journal.clone(),
            slot,
        }))
    }
}

struct RecordingEvaluator {
    script: Arc<Script>,
    journal: Arc<Mutex<Journal>>,
    slot: usize,
}

impl DecisionEvaluator for RecordingEvaluator {
    fn create_decision(&self, rules: Value) -> Result<Box<dyn Decision>, EvaluationError> {
        Ok(Box::new(RecordingDecision {
            rules,
            script: self.script.clone(),
            journal: self.journal.clone(),
        }))
    }

    fn dispose(&mut self) -> Result<(), EvaluationError> {
        self.journal.lock().unwrap().disposals[self.slot] += 1;
        Ok(())
    }
}

struct RecordingDecision {
    rules: Value,
    script: Arc<Script>,
    journal: Arc<Mutex<Journal>>,
}

#[async_trait]
impl Decision for RecordingDecision {
    async fn evaluate(&self, input: Value) -> Result<EvaluationResponse, EvaluationError> {
        self.journal
            .lock()
            .unwrap()
            .evaluations
            .push((self.rules.clone(), input.clone()));
        tokio::task::yield_now().await;
        (self.script)(&self.rules, &input).map(EvaluationResponse::new)
    }
}
