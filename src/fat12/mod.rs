pub use self::chain::{Link, BAD_CLUSTER, END_OF_CHAIN, FIRST_CLUSTER, LAST_CLUSTER};
pub use self::geometry::Geometry;
pub use self::path::ShortName;
pub use self::structs::{DirEntry, DisplayName};
pub use self::volume::{Entries, Volume};

pub mod chain;
pub mod geometry;
pub mod path;
pub mod structs;
pub mod volume;
