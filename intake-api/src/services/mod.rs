//! External service clients and the classification built on them

pub mod sentiment;
pub mod urgency;

pub use sentiment::SentimentClient;
pub use urgency::UrgencyClassifier;
