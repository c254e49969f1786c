//! The find-your-rep widget: form → geocode → concurrent provider lookups →
//! normalized, ordered results rendered into a host [`Surface`].

pub mod lookup;
pub mod surface;
pub mod widget;

pub use lookup::{lookup_sections, prepare_section, ProviderSection, SectionContent, SectionStatus};
pub use surface::{HtmlSurface, Surface};
pub use widget::{SectionOutcome, SectionReport, Widget, WidgetState};
