//! Application services - orchestrate use cases.
//!
//! `GenerationService` drives a whole run; `AnswerCollector` and
//! `ProtectedFs` are the pieces it is built from and are usable on their own.

pub mod answer_collector;
pub mod generation_service;
pub mod protected_fs;

#[cfg(test)]
pub(crate) mod fakes;

pub use answer_collector::AnswerCollector;
pub use generation_service::{
    DEFAULT_HOST_DIR, DEFAULT_INSTALL_COMMAND, GenerationRequest, GenerationService, Host,
};
pub use protected_fs::ProtectedFs;
