//! Query pipeline — classify an inbound message, build context, generate a reply.

pub mod classifier;
pub mod processor;
pub mod prompts;
pub mod responder;
pub mod types;

pub use classifier::IntentClassifier;
pub use processor::QueryProcessor;
pub use responder::ResponseGenerator;
pub use types::{Category, InboundMessage, ProcessedReply, ReplyPlan};
