//! Edge case and end-to-end tests for confetti-par.
