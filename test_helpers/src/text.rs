//! Helpers for inspecting generated example files.

/// Returns the document without its auto-generated header line.
#[must_use]
pub fn without_header(document: &str) -> &str {
    document
        .split_once('\n')
        .map_or("", |(_, rest)| rest)
}

/// Returns the first line of `document`.
#[must_use]
pub fn header(document: &str) -> &str {
    document.lines().next().unwrap_or_default()
}

/// Collects the bodies of every fenced `js` block, in order.
#[must_use]
pub fn example_blocks(document: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Option<Vec<&str>> = None;
    for line in document.lines() {
        match current.as_mut() {
            None if line == "```js" => current = Some(Vec::new()),
            None => {}
            Some(_) if line == "```" => {
                if let Some(done) = current.take() {
                    blocks.push(done.join("\n"));
                }
            }
            Some(lines) => lines.push(line),
        }
    }
    blocks
}

/// Lines of `document` starting with `prefix`, in order.
#[must_use]
pub fn lines_starting_with<'a>(document: &'a str, prefix: &str) -> Vec<&'a str> {
    document
        .lines()
        .filter(|line| line.starts_with(prefix))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{example_blocks, header, lines_starting_with, without_header};

    const DOC: &str = "H\n\n### props\n\n#### a\n```js\n// pre\n<A />\n```\n";

    #[test]
    fn splits_header_from_body() {
        assert_eq!(header(DOC), "H");
        assert!(without_header(DOC).starts_with("\n### props"));
    }

    #[test]
    fn collects_fenced_blocks() {
        assert_eq!(example_blocks(DOC), ["// pre\n<A />"]);
        assert_eq!(lines_starting_with(DOC, "#"), ["### props", "#### a"]);
    }
}
