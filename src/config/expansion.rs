//! Template expansion for user-configured commands.

use shell_escape::escape;
use std::borrow::Cow;

/// Expand `{url}` in an opener command template, shell-escaping the value.
///
/// A template without the placeholder gets the URL appended as its last argument.
///
/// # Examples
/// ```
/// use vc::config::expand_open_command;
///
/// assert_eq!(
///     expand_open_command("firefox --new-tab {url}", "https://example.com/a b"),
///     "firefox --new-tab 'https://example.com/a b'"
/// );
/// assert_eq!(expand_open_command("wslview", "https://example.com"), "wslview 'https://example.com'");
/// ```
pub fn expand_open_command(template: &str, url: &str) -> String {
    let escaped = escape(Cow::Borrowed(url));

    if template.contains("{url}") {
        template.replace("{url}", &escaped)
    } else {
        format!("{} {}", template.trim_end(), escaped)
    }
}
