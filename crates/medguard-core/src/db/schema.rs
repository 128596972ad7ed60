//! SQLite schema definition.

/// Complete database schema for the medguard knowledge base.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Medicines (rebuilt wholesale by each build run, read-only at query time)
-- ============================================================================

CREATE TABLE IF NOT EXISTS medicines (
    name TEXT PRIMARY KEY,
    manufacturer_name TEXT NOT NULL DEFAULT '',
    all_components TEXT NOT NULL DEFAULT '[]',    -- JSON array of strings, sorted
    interaction_warning TEXT NOT NULL,
    interaction_description TEXT,                 -- source text for the warned pair
    side_effects TEXT NOT NULL DEFAULT '[]'       -- JSON array of strings, sorted
);

-- ============================================================================
-- Build Metadata (single row)
-- ============================================================================

CREATE TABLE IF NOT EXISTS knowledge_base_meta (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    built_at TEXT NOT NULL,
    catalog_rows INTEGER NOT NULL,
    dropped_rows INTEGER NOT NULL,
    unreadable_rows INTEGER NOT NULL DEFAULT 0,
    duplicate_names INTEGER NOT NULL DEFAULT 0,
    medicines INTEGER NOT NULL,
    interaction_pairs INTEGER NOT NULL,
    indexed_ingredients INTEGER NOT NULL
);
"#;
