pub mod location;
pub mod marker;
pub mod notice;
pub mod row;
pub mod style;

pub use location::{LocationRecord, RelatedLink};
pub use marker::{
    ClusterCollection, LatLng, MarkerCollection, MarkerDescriptor, MarkerIcon, MarkerShape,
};
pub use notice::{GeolocationFailure, Notice};
pub use row::{Attribute, RawRow, SheetRow, WeeklyHours};
pub use style::{CategoryStyle, StyleMap};
