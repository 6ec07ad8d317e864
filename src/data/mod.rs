/// Data layer: loading, the labeled table, and summary statistics.
///
/// Architecture:
/// ```text
///  Minicore        Compositecore
///     │                 │
///     ▼                 ▼
///   ┌──────────┐   ┌──────────┐
///   │  loader   │   │  loader   │  one f64 per non-blank line
///   └──────────┘   └──────────┘
///        │               │
///        └──────┬────────┘
///               ▼
///        ┌──────────────┐
///        │ LabeledTable  │  (label, value) rows in file order
///        └──────────────┘
///               │
///               ▼
///        ┌──────────────┐
///        │    stats      │  count / mean / min / max, quartiles, KDE
///        └──────────────┘
/// ```

pub mod loader;
pub mod model;
pub mod stats;
