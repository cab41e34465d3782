// ABOUTME: Rolling latency and token window behind the dashboard charts
// ABOUTME: Three parallel fixed-capacity sequences with FIFO eviction

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Number of samples the dashboard charts show
pub const DASHBOARD_CAPACITY: usize = 5;

/// Chart samples shown before the first run of a session
const SEED_LABELS: [&str; DASHBOARD_CAPACITY] = ["10:00", "10:05", "10:10", "10:15", "10:20"];
const SEED_LATENCY_MS: [u64; DASHBOARD_CAPACITY] = [120, 150, 110, 180, 130];
const SEED_TOKENS: [u32; DASHBOARD_CAPACITY] = [450, 2300, 1200, 5600, 3100];

/// Plain copy of the window, oldest sample first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub time_labels: Vec<String>,
    pub latency_data: Vec<u64>,
    pub token_data: Vec<u32>,
}

/// Invariant: the three sequences always have equal length, never above `capacity`.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsBuffer {
    capacity: usize,
    time_labels: VecDeque<String>,
    latency: VecDeque<u64>,
    tokens: VecDeque<u32>,
}

impl MetricsBuffer {
    pub fn new() -> Self {
        Self::with_capacity(DASHBOARD_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            time_labels: VecDeque::with_capacity(capacity + 1),
            latency: VecDeque::with_capacity(capacity + 1),
            tokens: VecDeque::with_capacity(capacity + 1),
        }
    }

    /// Buffer pre-filled with the initial chart samples
    pub fn seeded() -> Self {
        let mut buffer = Self::new();
        for i in 0..DASHBOARD_CAPACITY {
            buffer.push(SEED_LABELS[i], SEED_LATENCY_MS[i], SEED_TOKENS[i]);
        }
        buffer
    }

    /// Append one sample, evicting the oldest ones past capacity
    pub fn push(&mut self, label: impl Into<String>, latency_ms: u64, tokens: u32) {
        self.time_labels.push_back(label.into());
        self.latency.push_back(latency_ms);
        self.tokens.push_back(tokens);

        while self.time_labels.len() > self.capacity {
            self.time_labels.pop_front();
            self.latency.pop_front();
            self.tokens.pop_front();
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.time_labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_labels.is_empty()
    }

    pub fn time_labels(&self) -> &VecDeque<String> {
        &self.time_labels
    }

    pub fn latency(&self) -> &VecDeque<u64> {
        &self.latency
    }

    pub fn tokens(&self) -> &VecDeque<u32> {
        &self.tokens
    }

    pub fn snapshot(&self) -> DashboardData {
        DashboardData {
            time_labels: self.time_labels.iter().cloned().collect(),
            latency_data: self.latency.iter().copied().collect(),
            token_data: self.tokens.iter().copied().collect(),
        }
    }
}

impl Default for MetricsBuffer {
    fn default() -> Self {
        Self::new()
    }
}
