pub mod application_lister;
pub mod host_aggregator;
pub mod placement_resolver;
pub mod report_service;
pub mod report_sorter;

pub use application_lister::ApplicationLister;
pub use host_aggregator::HostAggregator;
pub use placement_resolver::PlacementResolver;
pub use report_service::ReportService;
pub use report_sorter::{address_key, sort_hosts};
