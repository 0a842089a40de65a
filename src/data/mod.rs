/// Data layer: catalog types, loading, and cascading option filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Catalog
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Catalog  │  Vec<Listing> + static option lists
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  options_for(target, upstream filters) → sorted values
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
