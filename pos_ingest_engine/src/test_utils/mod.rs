//! Helpers for standing up throwaway migrated databases in tests.
pub mod prepare_env;
