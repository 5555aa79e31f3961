use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Local;
use rand::Rng;

pub const DEFAULT_PASSWORD: &str = "Test123456";

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

fn next_seq() -> u64 {
    SEQUENCE.fetch_add(1, Ordering::Relaxed)
}

/// `TestUser_{HHmmss}{seq}`. The part after `_` is used as a first name.
pub fn random_name() -> String {
    format!(
        "TestUser_{}{:03}",
        Local::now().format("%H%M%S"),
        next_seq() % 1000
    )
}

/// `testuser_{yyyyMMddHHmmss}_{rand}_{seq}@example.com`.
pub fn random_email() -> String {
    let suffix: u32 = rand::thread_rng().gen_range(1000..9999);
    format!(
        "testuser_{}_{}_{}@example.com",
        Local::now().format("%Y%m%d%H%M%S"),
        suffix,
        next_seq()
    )
}

/// Ten digits starting with 9.
pub fn random_mobile() -> String {
    let n: u32 = rand::thread_rng().gen_range(100_000_000..999_999_999);
    format!("9{}", n)
}

/// Disposable account created by the signup/login setup extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Account {
    pub fn generate() -> Self {
        Self {
            name: random_name(),
            email: random_email(),
            password: DEFAULT_PASSWORD.to_string(),
        }
    }

    /// Part of the generated name after the first `_`, or the whole name.
    pub fn short_name(&self) -> &str {
        self.name
            .split_once('_')
            .map(|(_, rest)| rest)
            .unwrap_or(&self.name)
    }
}
