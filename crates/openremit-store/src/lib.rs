//! OpenRemit Storage - repository seams for the remittance core
//!
//! Each module pairs an object-safe `async_trait` with its in-memory
//! implementation. Engines depend on the traits only, so the backing
//! store can change without touching business rules.
//!
//! Atomicity contract (per record, no cross-record transactions):
//!
//! - order mutations (inquiry counters, settlement, reveal, escalation)
//!   run under the record's map entry guard
//! - session creation deactivates prior sessions for the user under a
//!   single write lock

pub mod directory;
pub mod orders;
pub mod rates;
pub mod sessions;

pub use directory::{BeneficiaryDirectory, IdentityDirectory, InMemoryDirectory};
pub use orders::{InMemoryOrderStore, OrderStore};
pub use rates::{InMemoryRateSource, RateSource};
pub use sessions::{InMemorySessionStore, SessionStore};
