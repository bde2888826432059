/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `questions`: Question list, detail and tag filter
/// - `answers`: Answer forms, creation, editing, deletion and restoration

pub mod answers;
pub mod health;
pub mod questions;
