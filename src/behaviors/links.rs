//! In-page link interception for rendered posts.

use super::mount::MountedPost;

/// What a click on an anchor should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkAction {
    /// Scroll to the element with this id and update the URL fragment.
    ScrollTo(String),
    /// Navigate inside the site without a full page load.
    Navigate(String),
    /// Leave the click to the browser.
    Default,
}

/// Page operations the interceptor drives.
pub trait Navigator {
    /// Smoothly scrolls the element with `id` into view.
    ///
    /// Returns false when no such element exists.
    fn scroll_into_view(&mut self, id: &str) -> bool;

    /// Replaces the URL fragment without reloading or adding history.
    fn replace_fragment(&mut self, fragment: &str);

    /// In-app navigation to a same origin path.
    fn navigate(&mut self, path: &str);
}

/// Decides how anchor clicks inside a post are handled.
///
/// Fragment links scroll within the page, same origin links navigate in
/// app, and everything else is left to the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkInterceptor {
    origin: String,
}

impl LinkInterceptor {
    /// Creates interceptor for the site origin (`https://host[:port]`).
    pub fn new(origin: impl Into<String>) -> Self {
        let origin = origin.into();
        Self {
            origin: origin.trim_end_matches('/').to_string(),
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Classifies an anchor target without acting on it.
    pub fn classify(&self, href: &str) -> LinkAction {
        if let Some(fragment) = href.strip_prefix('#') {
            return LinkAction::ScrollTo(fragment.to_string());
        }

        if let Some(rest) = href.strip_prefix(self.origin.as_str())
            && (rest.is_empty() || rest.starts_with(['/', '?', '#']))
        {
            let path = if rest.is_empty() { "/" } else { rest };
            return LinkAction::Navigate(path.to_string());
        }

        if href.starts_with("//") || has_scheme(href) {
            return LinkAction::Default;
        }

        LinkAction::Navigate(href.to_string())
    }

    /// Handles a click on an anchor with the given `href`.
    ///
    /// Fragment links only update the URL when their target exists.
    pub fn handle_click(&self, href: &str, navigator: &mut dyn Navigator) -> LinkAction {
        let action = self.classify(href);

        match &action {
            LinkAction::ScrollTo(id) => {
                if navigator.scroll_into_view(id) {
                    navigator.replace_fragment(&format!("#{}", id));
                } else {
                    log::debug!("No element for fragment link {}", href);
                }
            }
            LinkAction::Navigate(path) => navigator.navigate(path),
            LinkAction::Default => {}
        }

        action
    }

    /// Scrolls to the target named by a URL hash after a page is shown.
    ///
    /// Accepts `#id` with an optional trailing query (`#id?tab=2`). Returns
    /// whether a target was found.
    pub fn restore_hash(&self, hash: &str, navigator: &mut dyn Navigator) -> bool {
        let id = hash
            .trim_start_matches('#')
            .split('?')
            .next()
            .unwrap_or_default();

        !id.is_empty() && navigator.scroll_into_view(id)
    }
}

/// Whether `href` starts with a URL scheme such as `https:` or `mailto:`.
fn has_scheme(href: &str) -> bool {
    let Some((scheme, _)) = href.split_once(':') else {
        return false;
    };

    scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Navigator over a mounted post with no browser behind it.
///
/// Scrolling succeeds when the post has a matching heading id. Fragment
/// updates and navigations are recorded, which makes it suitable for link
/// checks and tests.
#[derive(Debug)]
pub struct MountedNavigator<'a> {
    post: &'a MountedPost,
    fragment: Option<String>,
    scrolled: Vec<String>,
    visited: Vec<String>,
}

impl<'a> MountedNavigator<'a> {
    pub fn new(post: &'a MountedPost) -> Self {
        Self {
            post,
            fragment: None,
            scrolled: Vec::new(),
            visited: Vec::new(),
        }
    }

    /// Current URL fragment, including the `#`.
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Ids scrolled into view, in order.
    pub fn scrolled(&self) -> &[String] {
        &self.scrolled
    }

    /// Paths navigated to, in order.
    pub fn visited(&self) -> &[String] {
        &self.visited
    }
}

impl Navigator for MountedNavigator<'_> {
    fn scroll_into_view(&mut self, id: &str) -> bool {
        if !self.post.has_target(id) {
            return false;
        }
        self.scrolled.push(id.to_string());
        true
    }

    fn replace_fragment(&mut self, fragment: &str) {
        self.fragment = Some(fragment.to_string());
    }

    fn navigate(&mut self, path: &str) {
        self.visited.push(path.to_string());
    }
}
