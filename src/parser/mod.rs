//! Parser module - extracts references, aliases, mentions and quoted context

mod aliases;
mod context;
mod mentions;
mod refs;
mod spans;

pub use aliases::extract_aliases;
pub use context::{extract_line_with_children, line_number};
pub use mentions::find_mentions_outside_links;
pub use refs::{extract_refs, ref_spans, RefKind, Reference};
pub use spans::{url_spans, Span, SpanSet};

pub(crate) use refs::{ATTRIBUTE_RE, HASHTAG_RE, WIKILINK_RE};
