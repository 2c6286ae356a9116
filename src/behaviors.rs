//! Behaviours attached to a rendered post once it is on the page.
//!
//! Rendering is pure; this module is the separate step that binds copy
//! buttons and link handling to a mounted render. Bindings belong to exactly
//! one render: attaching new content tears the previous bindings down first,
//! and re-attaching unchanged content is a no-op.

mod clipboard;
mod links;
mod mount;

use anyhow::{Result, bail};
use std::time::Instant;

pub use clipboard::{
    COPIED_LABEL, Clipboard, CopyButton, CopyOutcome, FEEDBACK_DURATION, SystemClipboard,
    copy_payload,
};
pub use links::{LinkAction, LinkInterceptor, MountedNavigator, Navigator};
pub use mount::{CodeBlockView, CodeRow, MountedPost};

/// Live bindings for the currently displayed post.
#[derive(Debug)]
pub struct PostBindings {
    interceptor: LinkInterceptor,
    content: Option<String>,
    post: MountedPost,
    buttons: Vec<CopyButton>,
    generation: u64,
}

impl PostBindings {
    pub fn new(interceptor: LinkInterceptor) -> Self {
        Self {
            interceptor,
            content: None,
            post: MountedPost::default(),
            buttons: Vec::new(),
            generation: 0,
        }
    }

    /// Binds behaviours to freshly rendered HTML.
    ///
    /// Previous bindings are released before new ones are made, so buttons
    /// never carry handlers from an older render. Returns false when `html`
    /// is the content already bound.
    pub fn attach(&mut self, html: &str) -> bool {
        if self.content.as_deref() == Some(html) {
            return false;
        }

        self.detach();

        self.post = MountedPost::mount(html);
        self.buttons = (0..self.post.code_blocks().len())
            .map(CopyButton::new)
            .collect();
        self.content = Some(html.to_string());
        self.generation += 1;

        log::debug!(
            "Attached render {}: {} copy buttons, {} links",
            self.generation,
            self.buttons.len(),
            self.post.anchors().len()
        );
        true
    }

    /// Releases every binding of the current render.
    pub fn detach(&mut self) {
        if self.content.take().is_some() {
            log::trace!("Detached render {}", self.generation);
        }
        self.buttons.clear();
        self.post = MountedPost::default();
    }

    /// Number of renders bound so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn post(&self) -> &MountedPost {
        &self.post
    }

    pub fn buttons(&self) -> &[CopyButton] {
        &self.buttons
    }

    /// Clicks copy button `index`.
    ///
    /// # Errors
    ///
    /// Returns error if no such button is bound. Clipboard failures are not
    /// errors; they are logged and reported as [`CopyOutcome::Failed`].
    pub fn click_copy(
        &mut self,
        index: usize,
        clipboard: &mut dyn Clipboard,
        now: Instant,
    ) -> Result<CopyOutcome> {
        let Some(button) = self.buttons.get_mut(index) else {
            bail!(
                "No copy button {} (post has {} code blocks)",
                index,
                self.post.code_blocks().len()
            );
        };
        let block = &self.post.code_blocks()[button.block()];

        Ok(button.click(block, clipboard, now))
    }

    /// Label of copy button `index` at `now`.
    pub fn copy_label(&self, index: usize, now: Instant) -> Option<&'static str> {
        self.buttons.get(index).map(|button| button.label(now))
    }

    /// Routes a click on an anchor through the link interceptor.
    pub fn click_link(&self, href: &str, navigator: &mut dyn Navigator) -> LinkAction {
        self.interceptor.handle_click(href, navigator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MarkdownRenderer;
    use crate::markdown::COPY_LABEL;

    #[derive(Default)]
    struct MemoryClipboard {
        writes: Vec<String>,
    }

    impl Clipboard for MemoryClipboard {
        fn write_text(&mut self, text: &str) -> Result<()> {
            self.writes.push(text.to_string());
            Ok(())
        }
    }

    fn bindings() -> PostBindings {
        PostBindings::new(LinkInterceptor::new("https://folio.dev"))
    }

    #[test]
    fn test_attach_binds_one_button_per_block() {
        // Arrange
        let html = MarkdownRenderer::new().render("```\na\n```\n\n```\nb\n```");
        let mut bindings = bindings();

        // Act
        let attached = bindings.attach(&html);

        // Assert
        assert!(attached);
        assert_eq!(bindings.buttons().len(), 2);
        assert_eq!(bindings.generation(), 1);
    }

    #[test]
    fn test_same_content_not_rebound() {
        // Arrange
        let html = MarkdownRenderer::new().render("```\na\n```");
        let mut bindings = bindings();
        bindings.attach(&html);

        // Act
        let attached = bindings.attach(&html);

        // Assert
        assert!(!attached);
        assert_eq!(bindings.generation(), 1);
        assert_eq!(bindings.buttons().len(), 1);
    }

    #[test]
    fn test_new_render_replaces_bindings() {
        // Arrange
        let renderer = MarkdownRenderer::new();
        let mut bindings = bindings();
        let mut clipboard = MemoryClipboard::default();
        let now = Instant::now();
        bindings.attach(&renderer.render("```\nold\n```"));
        bindings.click_copy(0, &mut clipboard, now).unwrap();

        // Act
        bindings.attach(&renderer.render("```\nnew\n```\n\n```\nsecond\n```"));
        bindings.click_copy(0, &mut clipboard, now).unwrap();

        // Assert
        assert_eq!(bindings.generation(), 2);
        assert_eq!(bindings.buttons().len(), 2);
        assert_eq!(clipboard.writes, vec!["old", "new"]);
        assert_eq!(bindings.copy_label(1, now), Some(COPY_LABEL));
    }

    #[test]
    fn test_click_copy_unknown_button() {
        // Arrange
        let mut bindings = bindings();
        bindings.attach("<p>no code</p>");

        // Act
        let result = bindings.click_copy(0, &mut MemoryClipboard::default(), Instant::now());

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_copy_label_feedback_and_revert() {
        // Arrange
        let mut bindings = bindings();
        bindings.attach(&MarkdownRenderer::new().render("```js\nconst a = 1;\n```"));
        let now = Instant::now();

        // Act
        let outcome = bindings
            .click_copy(0, &mut MemoryClipboard::default(), now)
            .unwrap();

        // Assert
        assert_eq!(outcome, CopyOutcome::Copied);
        assert_eq!(bindings.copy_label(0, now), Some(COPIED_LABEL));
        assert_eq!(
            bindings.copy_label(0, now + FEEDBACK_DURATION),
            Some(COPY_LABEL)
        );
        assert_eq!(bindings.copy_label(5, now), None);
    }

    #[test]
    fn test_detach_clears_everything() {
        // Arrange
        let mut bindings = bindings();
        bindings.attach(&MarkdownRenderer::new().render("```\nx\n```\n[a](#b)"));

        // Act
        bindings.detach();

        // Assert
        assert!(bindings.buttons().is_empty());
        assert!(bindings.post().anchors().is_empty());
        assert!(bindings.attach(&MarkdownRenderer::new().render("```\nx\n```\n[a](#b)")));
    }

    #[test]
    fn test_click_link_uses_interceptor() {
        // Arrange
        let mut bindings = bindings();
        bindings.attach(&MarkdownRenderer::new().render("[top](#intro)\n\n# Intro"));
        let post = bindings.post().clone();
        let mut navigator = MountedNavigator::new(&post);

        // Act
        let action = bindings.click_link("#intro", &mut navigator);

        // Assert
        assert_eq!(action, LinkAction::ScrollTo("intro".to_string()));
        assert_eq!(navigator.fragment(), Some("#intro"));
    }
}
