//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components wrap pages with session-aware behavior while reading shared
//! state from Leptos context providers.

pub mod protected_route;
