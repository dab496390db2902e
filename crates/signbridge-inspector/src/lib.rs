//! Page inspector: runs against a page document and reports the playable
//! source of its first video element.

pub mod inspector;
pub mod page;

pub use inspector::PageInspector;
pub use page::{find_video_source, PageDocument, PageSnapshot, SourceElement, VideoElement, VideoLookup};
