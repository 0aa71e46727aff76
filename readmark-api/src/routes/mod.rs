/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `books`: Book upload, listing and retrieval
/// - `progress`: Per-user reading progress

pub mod books;
pub mod health;
pub mod progress;
