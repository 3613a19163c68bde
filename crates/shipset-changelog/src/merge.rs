/// Header for a changelog file that does not exist yet.
#[must_use]
pub fn new_changelog(package: &str) -> String {
    format!("# {package}\n")
}

/// Inserts a freshly rendered release section at the top of an existing
/// changelog, directly below the `# package` title so newer releases read
/// first. Creates the title when the file was empty or had none.
#[must_use]
pub fn merge_release_into(existing: &str, package: &str, section: &str) -> String {
    let section = section.trim_end();

    if existing.trim().is_empty() {
        return format!("{}\n{section}\n", new_changelog(package));
    }

    let lines: Vec<&str> = existing.lines().collect();

    let Some(header_idx) = lines.iter().position(|line| line.starts_with("# ")) else {
        return format!("{section}\n\n{existing}");
    };

    // Insert after the blank line that follows the title, or right after the
    // title when the file ends there.
    let insert_idx = lines
        .iter()
        .enumerate()
        .skip(header_idx + 1)
        .find(|(_, line)| line.trim().is_empty())
        .map_or(lines.len(), |(idx, _)| idx + 1);

    let mut output = Vec::with_capacity(lines.len() + 8);
    output.extend_from_slice(&lines[..insert_idx]);
    if insert_idx == lines.len() && lines.len() == header_idx + 1 {
        output.push("");
    }
    output.extend(section.lines());
    output.push("");
    output.extend_from_slice(&lines[insert_idx..]);

    let mut merged = output.join("\n");
    if !merged.ends_with('\n') {
        merged.push('\n');
    }
    merged
}
