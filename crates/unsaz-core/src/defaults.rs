/// Directory prefix shared by every transaction member
pub const MEMBER_PREFIX: &str = "raw/";

/// Extension of the metadata descriptor member
pub const METADATA_EXTENSION: &str = "xml";

/// Extension of the client and server payload members
pub const PAYLOAD_EXTENSION: &str = "txt";

/// Right-aligned width of the identifier column
pub const ID_COLUMN_WIDTH: usize = 4;

/// Width of the timestamp column (fits `2013-05-17T10:21:35.6230469+02:00`)
pub const TIMESTAMP_COLUMN_WIDTH: usize = 33;

/// Width of the address column (fits a dotted quad)
pub const ADDRESS_COLUMN_WIDTH: usize = 15;

/// Separator between columns
pub const COLUMN_GAP: &str = "  ";
