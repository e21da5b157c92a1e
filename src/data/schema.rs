//! Column names and fixed label tiers the input CSVs must carry.

pub const BAR_TABLE: &str = "bar";
pub const BAR_LABEL_COLUMN: &str = "LABEL";
pub const BAR_COUNT_COLUMN: &str = "COUNT";

pub const SANKEY_TABLE: &str = "sankey";
pub const SANKEY_LABEL_COLUMN: &str = "LABEL";

/// First Sankey tier: one column per code, flowing into each row's label.
pub const ORIGIN_CODES: [&str; 8] = ["PS", "OMP", "CNP", "NRP", "NMCCC", "PEC", "NCDM", "RGS"];

/// Last Sankey tier: one column per code, fed from each row's label.
pub const DESTINATION_CODES: [&str; 3] = ["Reg", "Aca", "Oth"];

pub const NETWORK_TABLE: &str = "network";
pub const NETWORK_LABEL_COLUMN: &str = "LABELS";
