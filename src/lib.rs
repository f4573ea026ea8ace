//! Query Bridge — SMS/WhatsApp webhook that answers employee queries with an LLM.

pub mod channels;
pub mod config;
pub mod error;
pub mod llm;
pub mod pipeline;
pub mod store;
