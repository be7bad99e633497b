// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for grant-lifecycle operations.
#[derive(Debug, Default)]
pub struct ServiceMetrics {
	attempts: AtomicU64,
	success: AtomicU64,
	failure: AtomicU64,
	denials: AtomicU64,
}
impl ServiceMetrics {
	/// Returns the total number of operation attempts.
	pub fn attempts(&self) -> u64 {
		self.attempts.load(Ordering::Relaxed)
	}

	/// Returns the number of operations that completed without error.
	pub fn successes(&self) -> u64 {
		self.success.load(Ordering::Relaxed)
	}

	/// Returns the number of operations that propagated an error.
	pub fn failures(&self) -> u64 {
		self.failure.load(Ordering::Relaxed)
	}

	/// Returns the number of validations that answered `false` (absent, expired, or spent).
	pub fn denials(&self) -> u64 {
		self.denials.load(Ordering::Relaxed)
	}

	pub(crate) fn record_attempt(&self) {
		self.attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_success(&self) {
		self.success.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_failure(&self) {
		self.failure.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_denial(&self) {
		self.denials.fetch_add(1, Ordering::Relaxed);
	}
}
