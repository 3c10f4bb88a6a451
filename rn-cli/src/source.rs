use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use rn_backend::SupabaseStorage;
use rn_core::domain::Event;
use rn_core::storage::{InMemoryStorage, Storage};

/// Builds a storage backend from the CLI flags: a JSON file of events, or
/// the hosted backend via env credentials.
pub fn open_storage(file: Option<&Path>, remote: bool) -> anyhow::Result<Arc<dyn Storage>> {
    if remote {
        let storage = SupabaseStorage::from_env()
            .context("SUPABASE_URL/SUPABASE_PROJECT_REF and SUPABASE_ANON_KEY must be set")?;
        info!("Using hosted backend");
        return Ok(Arc::new(storage));
    }

    let path = file.context("either --file or --remote is required")?;
    let events = load_events_file(path)?;
    info!("Loaded {} events from {}", events.len(), path.display());
    Ok(Arc::new(InMemoryStorage::with_events(events)))
}

pub fn load_events_file(path: &Path) -> anyhow::Result<Vec<Event>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading events file {}", path.display()))?;
    let events: Vec<Event> =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
    Ok(events)
}
