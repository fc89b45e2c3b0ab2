//! Property-based suites spanning several core modules.
