//! Redaction strategies.
//!
//! A [`RedactionStrategy`] decides which nodes get redacted and how an edited
//! placeholder rebuilds into a full node afterwards. Each strategy owns one
//! node shape: detection inspects a node and, on a claim, yields the
//! redaction's display content; restoration receives the preserved original
//! node plus the edited display text and rebuilds the node around it.
//!
//! Strategies are registered per [`StrategySet`] value. The three built-ins
//! cover links, images, and annotation regions; callers add their own with
//! [`StrategySet::register`].

use crate::ir::nodes::{
    Annotation, Block, BlockRedaction, Image, Inline, InlineRedaction, Link,
};
use crate::Error;

/// A pluggable redact/restore pair for one node shape.
///
/// The default method bodies decline everything, so an implementation only
/// overrides the level (inline or block) it operates at.
pub trait RedactionStrategy {
    /// Tag stamped on the redactions this strategy produces; restoration
    /// routes each placeholder back through the strategy with the same tag.
    fn tag(&self) -> &'static str;

    /// Claim an inline node for redaction.
    fn redact_inline(&self, _node: &Inline) -> Option<InlineRedaction> {
        None
    }

    /// Claim a block node for redaction.
    fn redact_block(&self, _node: &Block) -> Option<BlockRedaction> {
        None
    }

    /// Rebuild an inline node from its preserved source and the edited
    /// display text. `children` carries re-parsed inline content when the
    /// placeholder was nested.
    fn restore_inline(
        &self,
        _source: &Inline,
        _text: &str,
        _children: Option<&[Inline]>,
    ) -> Option<Inline> {
        None
    }

    /// Rebuild a block node. `children` is the re-parsed body of the edited
    /// placeholder region.
    fn restore_block(
        &self,
        _source: &Block,
        _text: &str,
        _children: Vec<Block>,
    ) -> Option<Vec<Block>> {
        None
    }
}

/// An ordered collection of strategies.
///
/// Detection tries strategies in registration order and the first claim
/// wins; restoration looks a strategy up by tag.
pub struct StrategySet {
    strategies: Vec<Box<dyn RedactionStrategy>>,
}

impl std::fmt::Debug for StrategySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategySet")
            .field("strategies", &self.strategies.len())
            .finish()
    }
}

impl StrategySet {
    /// An empty set: nothing gets redacted.
    pub fn new() -> Self {
        StrategySet {
            strategies: Vec::new(),
        }
    }

    /// The built-in strategies: links, images, annotations.
    pub fn with_defaults() -> Self {
        StrategySet::new()
            .register(Box::new(LinkStrategy))
            .register(Box::new(ImageStrategy))
            .register(Box::new(AnnotationStrategy))
    }

    /// Build a set from built-in strategy names, as listed in configuration.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, Error> {
        let mut set = StrategySet::new();
        for name in names {
            let strategy: Box<dyn RedactionStrategy> = match name.as_ref() {
                "link" => Box::new(LinkStrategy),
                "image" => Box::new(ImageStrategy),
                "annotation" => Box::new(AnnotationStrategy),
                other => return Err(Error::UnknownStrategy(other.to_string())),
            };
            set = set.register(strategy);
        }
        Ok(set)
    }

    /// Append a strategy after all existing ones.
    pub fn register(mut self, strategy: Box<dyn RedactionStrategy>) -> Self {
        self.strategies.push(strategy);
        self
    }

    /// Look up a strategy by tag.
    pub fn get(&self, tag: &str) -> Option<&dyn RedactionStrategy> {
        self.strategies
            .iter()
            .find(|s| s.tag() == tag)
            .map(|s| s.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn RedactionStrategy> {
        self.strategies.iter().map(|s| s.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl Default for StrategySet {
    fn default() -> Self {
        StrategySet::with_defaults()
    }
}

/// Redacts `[text](url)` links. The link's children become the display
/// content; restoration keeps the original destination and title and swaps
/// in the edited text.
pub struct LinkStrategy;

impl RedactionStrategy for LinkStrategy {
    fn tag(&self) -> &'static str {
        "link"
    }

    fn redact_inline(&self, node: &Inline) -> Option<InlineRedaction> {
        let Inline::Link(link) = node else {
            return None;
        };
        // Autolinks carry their URL as their only text; hiding it would
        // leave nothing meaningful to translate.
        if link.title.is_none() && link.children == vec![Inline::Text(link.url.clone())] {
            return None;
        }
        Some(InlineRedaction {
            kind: self.tag().to_string(),
            index: 0,
            content: link.children.clone(),
            source: Box::new(node.clone()),
        })
    }

    fn restore_inline(
        &self,
        source: &Inline,
        text: &str,
        children: Option<&[Inline]>,
    ) -> Option<Inline> {
        let Inline::Link(link) = source else {
            return None;
        };
        let children = match children {
            Some(children) => children.to_vec(),
            None => vec![Inline::Text(text.to_string())],
        };
        Some(Inline::Link(Link {
            url: link.url.clone(),
            title: link.title.clone(),
            children,
        }))
    }
}

/// Redacts `![alt](url)` images, exposing the alt text for editing.
pub struct ImageStrategy;

impl RedactionStrategy for ImageStrategy {
    fn tag(&self) -> &'static str {
        "image"
    }

    fn redact_inline(&self, node: &Inline) -> Option<InlineRedaction> {
        let Inline::Image(image) = node else {
            return None;
        };
        Some(InlineRedaction {
            kind: self.tag().to_string(),
            index: 0,
            content: vec![Inline::Text(image.alt.clone())],
            source: Box::new(node.clone()),
        })
    }

    fn restore_inline(
        &self,
        source: &Inline,
        text: &str,
        _children: Option<&[Inline]>,
    ) -> Option<Inline> {
        let Inline::Image(image) = source else {
            return None;
        };
        Some(Inline::Image(Image {
            url: image.url.clone(),
            title: image.title.clone(),
            alt: text.to_string(),
        }))
    }
}

/// Redacts annotation regions into block placeholders. The label is the
/// display text; the region body stays visible and editable between the
/// markers. Restoration keeps the original label and parameters and adopts
/// the edited body.
pub struct AnnotationStrategy;

impl RedactionStrategy for AnnotationStrategy {
    fn tag(&self) -> &'static str {
        "annotation"
    }

    fn redact_block(&self, node: &Block) -> Option<BlockRedaction> {
        let Block::Annotation(a) = node else {
            return None;
        };
        Some(BlockRedaction {
            kind: self.tag().to_string(),
            index: 0,
            content: vec![Inline::Text(a.label.clone())],
            children: a.children.clone(),
            source: Box::new(node.clone()),
        })
    }

    fn restore_block(
        &self,
        source: &Block,
        _text: &str,
        children: Vec<Block>,
    ) -> Option<Vec<Block>> {
        let Block::Annotation(a) = source else {
            return None;
        };
        Some(vec![Block::Annotation(Annotation {
            label: a.label.clone(),
            parameters: a.parameters.clone(),
            children,
        })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(text: &str, url: &str) -> Inline {
        Inline::Link(Link {
            url: url.to_string(),
            title: None,
            children: vec![Inline::Text(text.to_string())],
        })
    }

    #[test]
    fn test_link_detection_and_restore() {
        let node = link("a cat", "http://example.com/cat");
        let strategy = LinkStrategy;
        let redaction = strategy.redact_inline(&node).unwrap();
        assert_eq!(redaction.kind, "link");
        assert_eq!(redaction.content, vec![Inline::Text("a cat".to_string())]);

        let restored = strategy.restore_inline(&redaction.source, "un chat", None).unwrap();
        assert_eq!(restored, link("un chat", "http://example.com/cat"));
    }

    #[test]
    fn test_link_strategy_skips_autolinks() {
        let node = link("http://example.com", "http://example.com");
        assert!(LinkStrategy.redact_inline(&node).is_none());
    }

    #[test]
    fn test_image_restore_replaces_alt() {
        let node = Inline::Image(Image {
            url: "cat.png".to_string(),
            title: Some("Cat".to_string()),
            alt: "a cat".to_string(),
        });
        let strategy = ImageStrategy;
        let redaction = strategy.redact_inline(&node).unwrap();
        let restored = strategy.restore_inline(&redaction.source, "un chat", None).unwrap();
        assert_eq!(
            restored,
            Inline::Image(Image {
                url: "cat.png".to_string(),
                title: Some("Cat".to_string()),
                alt: "un chat".to_string(),
            })
        );
    }

    #[test]
    fn test_annotation_restore_keeps_parameters() {
        let node = Block::Annotation(Annotation {
            label: "callout".to_string(),
            parameters: vec![("kind".to_string(), "warning".to_string())],
            children: vec![],
        });
        let strategy = AnnotationStrategy;
        let redaction = strategy.redact_block(&node).unwrap();
        let edited = vec![Block::RawText("new body".to_string())];
        let restored = strategy
            .restore_block(&redaction.source, "callout", edited.clone())
            .unwrap();
        match &restored[0] {
            Block::Annotation(a) => {
                assert_eq!(a.parameters.len(), 1);
                assert_eq!(a.children, edited);
            }
            other => panic!("Expected annotation, found {other:?}"),
        }
    }

    #[test]
    fn test_from_names() {
        let set = StrategySet::from_names(&["link", "image"]).unwrap();
        assert!(set.get("link").is_some());
        assert!(set.get("image").is_some());
        assert!(set.get("annotation").is_none());

        let err = StrategySet::from_names(&["link", "censor"]).unwrap_err();
        assert_eq!(err, Error::UnknownStrategy("censor".to_string()));
    }

    #[test]
    fn test_strategy_mismatch_declines() {
        let image = Inline::Image(Image {
            url: "u".to_string(),
            title: None,
            alt: "a".to_string(),
        });
        assert!(LinkStrategy.redact_inline(&image).is_none());
        assert!(LinkStrategy.restore_inline(&image, "t", None).is_none());
    }
}
