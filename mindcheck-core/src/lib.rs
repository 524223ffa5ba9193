//! mindcheck-core is the terminal-agnostic domain layer for the mindcheck client.
//!
//! Holds everything that does not touch the terminal: the fixed survey
//! catalog, answer collection, the risk-class presenter, the chat transcript,
//! and the HTTP client for the prediction and chat service.

pub mod catalog;
pub mod chat;
pub mod client;
pub mod error;
pub mod risk;
pub mod survey;

pub use catalog::{Question, CATALOG};
pub use chat::{ChatRequest, ChatSession, Role, Turn, CHAT_ERROR_PLACEHOLDER};
pub use client::ApiClient;
pub use error::{ServiceError, SurveyError, UnknownRiskClass};
pub use risk::{describe, RiskClass};
pub use survey::{Submission, SurveyResponse};
