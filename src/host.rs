//! Host items that own a redirect source.

/// Storage kind of a host item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EntityKind {
    /// Field-backed content; reconciled on save.
    #[default]
    Content,
    /// Configuration-only item; never reconciled.
    Config,
}

/// Read-only view of the item whose save triggers reconciliation.
pub trait HostEntity {
    /// Identifier of the item.
    fn id(&self) -> u64;

    /// `true` while the item is being inserted rather than updated.
    fn is_new(&self) -> bool;

    /// The item's own path, e.g. `node/5`.
    fn internal_path(&self) -> String;

    /// Title, if the item has one.
    fn title(&self) -> Option<&str>;

    /// Storage kind of the item.
    fn kind(&self) -> EntityKind {
        EntityKind::Content
    }
}

/// A plain content item, used by the CLI and in tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentItem {
    /// Identifier of the item.
    pub id: u64,
    /// Whether this save inserts the item.
    pub is_new: bool,
    /// The item's own path.
    pub internal_path: String,
    /// Optional title.
    pub title: Option<String>,
    /// Storage kind.
    pub kind: EntityKind,
}

impl HostEntity for ContentItem {
    fn id(&self) -> u64 {
        self.id
    }

    fn is_new(&self) -> bool {
        self.is_new
    }

    fn internal_path(&self) -> String {
        self.internal_path.clone()
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn kind(&self) -> EntityKind {
        self.kind
    }
}
