/// Case-insensitive substring filter preserving catalog order.
///
/// An empty query matches every entry.
pub fn filter_models(query: &str, catalog: &[String]) -> Vec<String> {
    let needle = query.to_lowercase();
    catalog
        .iter()
        .filter(|model| model.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
