/// Data layer: core types, normalization, storage and filtering.
///
/// Architecture:
/// ```text
///   raw aaData rows (JSON arrays)
///        │
///        ▼
///   ┌────────────┐
///   │ normalize  │  one row → CourseRecord
///   └────────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ CatalogStore │  Vec<CourseRecord>, snapshot load/save
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  field → substring criteria → matching records
///   └──────────┘
/// ```

pub mod filter;
pub mod model;
pub mod normalize;
pub mod store;
