pub mod analytics;
pub mod category;
pub mod newsletter;
pub mod search;
pub mod tool;
pub mod user;

/// Builds a URL-safe identifier from a display name.
///
/// Letters and digits are lowercased and kept; every other run of characters
/// collapses into a single `-`. Leading and trailing separators are dropped,
/// so `"  ChatGPT (Plus)!"` becomes `"chatgpt-plus"`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn test_slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("Midjourney AI"), "midjourney-ai");
        assert_eq!(slugify("  ChatGPT (Plus)!"), "chatgpt-plus");
        assert_eq!(slugify("Text--to--Speech"), "text-to-speech");
    }

    #[test]
    fn test_slugify_keeps_unicode_letters() {
        assert_eq!(slugify("Café Über"), "café-über");
    }

    #[test]
    fn test_slugify_of_punctuation_is_empty() {
        assert_eq!(slugify("!!!"), "");
    }
}
