pub mod bot;
pub mod chatbot;
pub mod config;
pub mod error;
pub mod openai;
pub mod slack;
pub mod store;
pub mod tools;
pub mod types;

#[cfg(test)]
mod testing;
