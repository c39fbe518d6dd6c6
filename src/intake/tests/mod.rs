//! Unit tests for intake normalisation.
