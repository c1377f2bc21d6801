//! Public library API for walking externally owned object trees.

/// Type catalog, handler registry, walker, and reference handlers.
pub mod walk;
