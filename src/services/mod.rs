// SPDX-License-Identifier: MIT

//! Service clients for the hosted backend.

pub mod supabase;

pub use supabase::{ScopedClient, SupabaseClient};
