mod index;
mod party;
pub(crate) mod record;

pub use index::RecordIndex;
pub use party::{PartyCode, Winner};
pub use record::ElectionRecord;
