//! Project-name slugs

/// Turn free-form text into a directory-safe slug
///
/// Trims and lowercases the input, turns each run of whitespace into one
/// hyphen, drops everything outside `[a-z0-9-]` and strips leading/trailing
/// hyphens. Hyphen runs already in the input are kept.
pub fn slugify(name: &str) -> String {
    let mut hyphenated = String::with_capacity(name.len());
    let mut in_whitespace = false;

    for c in name.trim().to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                hyphenated.push('-');
            }
            in_whitespace = true;
        } else {
            in_whitespace = false;
            hyphenated.push(c);
        }
    }

    hyphenated
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect::<String>()
        .trim_matches('-')
        .to_string()
}

/// Slugs that must never be used as a target: they point at the working directory
pub fn is_forbidden(slug: &str) -> bool {
    matches!(slug, "" | "." | "./")
}
