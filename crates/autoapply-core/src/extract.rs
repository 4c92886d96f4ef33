//! Question text extraction.

use autoapply_protocols::ContainerSnapshot;

/// Normalized question text for a container, or `None` if nothing readable.
///
/// Candidates are tried in order: the grouped-choice legend, the field
/// label (visible span, title, whole label), then the container's full
/// visible text. The first candidate that is non-empty after normalization
/// wins.
pub fn extract(container: &ContainerSnapshot) -> Option<String> {
    let candidates = [
        container.legend_label.as_deref(),
        container.label_span.as_deref(),
        container.label_title.as_deref(),
        container.label_text.as_deref(),
        Some(container.full_text.as_str()),
    ];
    candidates
        .into_iter()
        .flatten()
        .map(normalize)
        .find(|text| !text.is_empty())
}

/// Lowercase, drop everything except ASCII letters, digits and whitespace,
/// then collapse whitespace.
pub fn normalize(text: &str) -> String {
    let kept: String = text
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container() -> ContainerSnapshot {
        ContainerSnapshot::default()
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Current CTC (in INR)?  "), "current ctc in inr");
        assert_eq!(normalize("Node.js / C#"), "nodejs c");
        assert_eq!(normalize("Tabs\tand\nnewlines"), "tabs and newlines");
        assert_eq!(normalize("?!"), "");
    }

    #[test]
    fn test_normalize_is_stable() {
        let once = normalize("How many years of work experience do you have with React.js?");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_legend_wins() {
        let mut c = container();
        c.legend_label = Some("Are you comfortable working in a hybrid setting?".to_string());
        c.label_text = Some("ignored".to_string());
        c.full_text = "ignored too".to_string();
        assert_eq!(
            extract(&c).as_deref(),
            Some("are you comfortable working in a hybrid setting")
        );
    }

    #[test]
    fn test_label_span_then_title_then_text() {
        let mut c = container();
        c.label_title = Some("Title text".to_string());
        c.label_text = Some("Whole label".to_string());
        assert_eq!(extract(&c).as_deref(), Some("title text"));

        c.label_span = Some("Span text".to_string());
        assert_eq!(extract(&c).as_deref(), Some("span text"));
    }

    #[test]
    fn test_blank_candidates_fall_through() {
        let mut c = container();
        c.legend_label = Some("   ".to_string());
        c.label_span = Some("*".to_string());
        c.full_text = "Phone number\nRequired".to_string();
        assert_eq!(extract(&c).as_deref(), Some("phone number required"));
    }

    #[test]
    fn test_nothing_readable() {
        let mut c = container();
        c.full_text = " ... ".to_string();
        assert_eq!(extract(&c), None);
    }
}
