use krnr::Version;

/// `vN<TAB>created<TAB>operation<TAB>author`, newest first.
pub fn render_history(name: &str, versions: &[Version]) -> String {
    if versions.is_empty() {
        return format!("no history for {}\n", name);
    }
    versions
        .iter()
        .map(|v| {
            format!(
                "v{}\t{}\t{}\t{}\n",
                v.version,
                v.created_at,
                v.operation,
                v.author_name.as_deref().unwrap_or("")
            )
        })
        .collect()
}
