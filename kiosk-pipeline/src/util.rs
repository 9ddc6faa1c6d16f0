/// Extract a short type name from the full module path.
///
/// Given `"kiosk_pipeline::components::state_filter::StateFilter"`,
/// returns `"StateFilter"`.
pub fn short_type_name(full: &str) -> &str {
    full.rsplit("::").next().unwrap_or(full)
}
