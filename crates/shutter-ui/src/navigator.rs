//! Previous/next navigation over the server-computed photo adjacency.

use shutter_core::ids::PhotoId;
use shutter_core::models::PhotoDetail;

/// Navigation controls for the photo detail view. A control is enabled
/// iff the server reported an adjacent photo on that side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoNavigator {
    previous: Option<PhotoId>,
    next: Option<PhotoId>,
}

impl PhotoNavigator {
    pub fn from_detail(detail: &PhotoDetail) -> Self {
        Self {
            previous: detail.previous_photo_id.clone(),
            next: detail.next_photo_id.clone(),
        }
    }

    pub fn previous_enabled(&self) -> bool {
        self.previous.is_some()
    }

    pub fn next_enabled(&self) -> bool {
        self.next.is_some()
    }

    pub fn previous(&self) -> Option<&PhotoId> {
        self.previous.as_ref()
    }

    pub fn next(&self) -> Option<&PhotoId> {
        self.next.as_ref()
    }
}
