//! Rust’s turnkey action-scoped token broker—mint, validate, and revoke single- or multi-use
//! access grants over TTL-governed stores in one crate built for production.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod error;
pub mod grant;
pub mod key;
pub mod obs;
pub mod service;
pub mod store;

mod _prelude {
	pub use std::{
		collections::HashMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};

	pub use crate::error::{Error, Result};
}
