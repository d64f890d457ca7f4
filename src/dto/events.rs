use crate::domain::event::Event;
use crate::listing::SortSpec;
use crate::pagination::Paginated;

/// Everything the events listing template needs.
#[derive(Debug)]
pub struct EventsPageData {
    pub events: Paginated<Event>,
    pub sort: SortSpec,
    /// Accepted raw filter parameters, used to rebuild pagination and
    /// sorting links that preserve the current state.
    pub active_filters: Vec<(String, String)>,
}

/// Data backing the public completed-events page.
pub struct CompletedEventsData {
    pub events: Paginated<Event>,
}
