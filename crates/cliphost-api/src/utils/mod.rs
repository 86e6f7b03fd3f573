//! Common utilities for upload handlers

pub mod multipart;
