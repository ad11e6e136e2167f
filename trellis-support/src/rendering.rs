//! Text rendering for human-friendly diagnostics.
//!
//! Error messages in trellis name interfaces by their type names, which are
//! long and full of module paths. The helpers here shorten them and lay out
//! dependency chains and candidate lists.

/// Renders a dependency chain, the closing element last.
///
/// # Examples
/// ```
/// use trellis_support::rendering::render_chain;
///
/// let chain = ["dyn Mailer", "dyn Transport", "dyn Mailer"];
/// assert_eq!(render_chain(&chain), "dyn Mailer -> dyn Transport -> dyn Mailer");
/// ```
pub fn render_chain(chain: &[impl AsRef<str>]) -> String {
    chain
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Renders an indented bullet list, one entry per line.
///
/// Each line starts with a newline so the result can be appended to a
/// one-line headline.
///
/// ```
/// use trellis_support::rendering::render_bullets;
///
/// assert_eq!(render_bullets(&["A", "B"]), "\n    - A\n    - B");
/// assert_eq!(render_bullets(&[] as &[&str]), "");
/// ```
pub fn render_bullets(items: &[impl AsRef<str>]) -> String {
    let mut out = String::new();
    for item in items {
        out.push_str("\n    - ");
        out.push_str(item.as_ref());
    }
    out
}

/// Shortens a fully qualified type name for display.
///
/// ```
/// use trellis_support::rendering::shorten_type_name;
///
/// assert_eq!(shorten_type_name("app::net::HttpClient"), "HttpClient");
/// assert_eq!(
///     shorten_type_name("alloc::rc::Rc<dyn app::io::Reader>"),
///     "Rc<dyn Reader>"
/// );
/// ```
pub fn shorten_type_name(full_name: &str) -> String {
    let mut result = String::with_capacity(full_name.len());
    let mut chars = full_name.chars().peekable();
    let mut segment = String::new();

    while let Some(ch) = chars.next() {
        match ch {
            ':' if chars.peek() == Some(&':') => {
                chars.next();
                segment.clear();
            }
            '<' | '>' | ',' | ' ' | '(' | ')' | '&' | '[' | ']' | ';' => {
                result.push_str(&segment);
                result.push(ch);
                segment.clear();
            }
            _ => segment.push(ch),
        }
    }

    result.push_str(&segment);
    result
}

/// Picks registered names that look like the requested one.
///
/// Used for "did you mean?" hints when an interface is not registered.
/// Candidates are ranked: substring of the full name, then substring of
/// the short name, then length of the common short-name prefix (at least
/// three characters).
pub fn suggest_similar(requested: &str, available: &[&str], max_suggestions: usize) -> Vec<String> {
    let requested_full = requested.to_lowercase();
    let requested_short = shorten_type_name(requested).to_lowercase();

    let mut scored: Vec<(&str, usize)> = available
        .iter()
        .filter(|&&name| name != requested)
        .filter_map(|&name| {
            let full = name.to_lowercase();
            let short = shorten_type_name(name).to_lowercase();

            if full.contains(&requested_full) || requested_full.contains(&full) {
                return Some((name, 100));
            }
            if short.contains(&requested_short) || requested_short.contains(&short) {
                return Some((name, 80));
            }

            let common = short
                .chars()
                .zip(requested_short.chars())
                .take_while(|(a, b)| a == b)
                .count();
            (common >= 3).then_some((name, common * 10))
        })
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored
        .into_iter()
        .take(max_suggestions)
        .map(|(name, _)| name.to_string())
        .collect()
}
