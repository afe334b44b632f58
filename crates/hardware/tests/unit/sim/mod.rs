//! Trace and replay tests.
