//! Sentily feedback explorer core.
//!
//! Everything here is synchronous and pure: raw JSON goes in through
//! [`normalize`], and the filter, pagination and facet functions derive
//! views from the resulting records without modifying them.

pub mod alerts;
pub mod facets;
pub mod filter;
pub mod normalize;
pub mod paginate;
pub mod record;
pub mod summary;
pub mod view;

pub use alerts::{AlertRow, AlertStats};
pub use facets::{extract_facets, FacetSet};
pub use filter::{apply, DimensionFilter, FilterState};
pub use normalize::{alerts_from_json, normalize, normalize_alert, records_from_json};
pub use paginate::{paginate, total_pages, Page, PageState};
pub use record::{Dimension, FeedbackRecord, Tone, UrgencyLevel};
pub use summary::{DashboardSummary, SentimentPoint};
pub use view::ExplorerView;
