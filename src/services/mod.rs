pub mod amenities;
pub mod hotels;
pub mod images;
pub mod master_data;
pub mod reviews;
pub mod rooms;

/// `?, ?, ...` for an `IN (...)` list or a multi-row `VALUES` group.
pub(crate) fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}
