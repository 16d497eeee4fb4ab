//! Integration tests for rowsmith_core, grouped by area.
