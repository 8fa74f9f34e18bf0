/// Render the metadata header prepended to a chunk body
///
/// Every header line is comment-prefixed and the block is terminated by a
/// `---` line of its own, so the body below stays a byte-identical slice of
/// the source file. The scope section appears only when at least one
/// non-empty breadcrumb exists.
pub(crate) fn render(file_path: &str, scope_paths: &[Vec<String>]) -> String {
    let mut header = format!("# filePath: {file_path}\n");

    let breadcrumbs: Vec<String> = scope_paths
        .iter()
        .filter(|path| !path.is_empty())
        .map(|path| path.join(" -> "))
        .collect();
    if !breadcrumbs.is_empty() {
        header.push_str("# scope:\n");
        for breadcrumb in breadcrumbs {
            header.push_str("#   - ");
            header.push_str(&breadcrumb);
            header.push('\n');
        }
    }

    header.push_str("---\n");
    header
}
