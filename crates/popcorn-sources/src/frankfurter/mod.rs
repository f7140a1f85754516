pub mod client;

pub use client::FrankfurterClient;
